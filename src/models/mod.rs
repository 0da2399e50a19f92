pub mod query;
pub mod video;

pub use query::SearchQuery;
pub use video::{RawVideo, ResultRecord, VideoDetails, format_duration, watch_url};
