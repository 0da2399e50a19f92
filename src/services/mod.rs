pub mod search;
pub use search::SearchService;
