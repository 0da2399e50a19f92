use crate::constants::{placeholders, youtube};

/// A single video as reported by a search provider. Providers fill what they
/// know; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVideo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub channel: Option<String>,
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
}

/// Display shape of a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub title: String,
    pub url: String,
    pub channel: String,
    pub duration: String,

    /// Provider video id, when known. Enables the in-site watch link.
    pub video_id: Option<String>,

    /// Thumbnail image URL. Rendered only when present.
    pub thumbnail: Option<String>,
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| placeholders::UNKNOWN.to_string())
}

impl From<RawVideo> for ResultRecord {
    fn from(raw: RawVideo) -> Self {
        Self {
            title: or_unknown(raw.title),
            url: raw
                .link
                .unwrap_or_else(|| placeholders::MISSING_URL.to_string()),
            channel: or_unknown(raw.channel),
            duration: or_unknown(raw.duration),
            video_id: raw.id,
            thumbnail: raw.thumbnail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub id: String,
    pub title: String,
    pub channel: Option<String>,
}

#[must_use]
pub fn watch_url(video_id: &str) -> String {
    format!(
        "{}?v={}",
        youtube::WATCH_URL,
        urlencoding::encode(video_id)
    )
}

/// Formats a length in seconds as `M:SS`, or `H:MM:SS` from one hour up.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record_is_kept() {
        let raw = RawVideo {
            id: Some("abc".to_string()),
            title: Some("Cats".to_string()),
            link: Some("https://example.com/v".to_string()),
            channel: Some("Cat TV".to_string()),
            duration: Some("3:21".to_string()),
            thumbnail: Some("https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string()),
        };

        let record = ResultRecord::from(raw);
        assert_eq!(record.title, "Cats");
        assert_eq!(record.url, "https://example.com/v");
        assert_eq!(record.channel, "Cat TV");
        assert_eq!(record.duration, "3:21");
        assert_eq!(record.video_id.as_deref(), Some("abc"));
        assert_eq!(
            record.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/abc/hqdefault.jpg")
        );
    }

    #[test]
    fn test_fields_default_independently() {
        let record = ResultRecord::from(RawVideo::default());
        assert_eq!(record.title, "unknown");
        assert_eq!(record.url, "#");
        assert_eq!(record.channel, "unknown");
        assert_eq!(record.duration, "unknown");
        assert!(record.video_id.is_none());
        assert!(record.thumbnail.is_none());

        let record = ResultRecord::from(RawVideo {
            title: Some("Only a title".to_string()),
            ..RawVideo::default()
        });
        assert_eq!(record.title, "Only a title");
        assert_eq!(record.url, "#");
        assert_eq!(record.channel, "unknown");
    }

    #[test]
    fn test_values_are_not_validated() {
        let record = ResultRecord::from(RawVideo {
            link: Some("not a url".to_string()),
            duration: Some("LIVE".to_string()),
            ..RawVideo::default()
        });
        assert_eq!(record.url, "not a url");
        assert_eq!(record.duration, "LIVE");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3725), "1:02:05");
        assert_eq!(format_duration(36_000 + 59), "10:00:59");
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            watch_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }
}
