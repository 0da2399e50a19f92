pub mod limits {

    pub const MAX_SEARCH_RESULTS: usize = 10;

    pub const MAX_RELATED_VIDEOS: usize = 5;

    pub const MAX_VIDEO_ID_LEN: usize = 64;
}

pub mod placeholders {

    pub const UNKNOWN: &str = "unknown";

    pub const MISSING_URL: &str = "#";
}

pub mod youtube {

    pub const WATCH_URL: &str = "https://www.youtube.com/watch";

    pub const EMBED_URL: &str = "https://www.youtube-nocookie.com/embed";
}
