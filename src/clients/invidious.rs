use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{SearchError, VideoSearch};
use crate::config::SearchConfig;
use crate::models::{RawVideo, VideoDetails, format_duration, watch_url};

const PROVIDER: &str = "invidious";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvidiousItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    video_id: Option<String>,
    author: Option<String>,
    length_seconds: Option<u64>,
    #[serde(default)]
    video_thumbnails: Vec<InvidiousThumbnail>,
}

#[derive(Debug, Deserialize)]
struct InvidiousThumbnail {
    quality: Option<String>,
    url: Option<String>,
}

/// Thumbnail quality shown next to a result.
const THUMBNAIL_QUALITY: &str = "medium";

impl InvidiousItem {
    fn is_video(&self) -> bool {
        self.kind.as_deref().is_none_or(|k| k == "video")
    }

    /// Picks the `medium` thumbnail, else the last one listed. Instances may
    /// answer with paths relative to themselves.
    fn thumbnail(&self, base_url: &Url) -> Option<String> {
        let thumb = self
            .video_thumbnails
            .iter()
            .find(|t| t.quality.as_deref() == Some(THUMBNAIL_QUALITY))
            .or_else(|| self.video_thumbnails.last())?;

        let url = thumb.url.as_deref().filter(|url| !url.is_empty())?;
        base_url.join(url).ok().map(String::from)
    }

    fn into_raw(self, base_url: &Url) -> RawVideo {
        let thumbnail = self.thumbnail(base_url);
        let id = self.video_id.filter(|id| !id.is_empty());
        RawVideo {
            link: id.as_deref().map(watch_url),
            title: self.title,
            channel: self.author,
            // Live streams report a length of zero
            duration: self.length_seconds.filter(|s| *s > 0).map(format_duration),
            thumbnail,
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InvidiousVideo {
    title: Option<String>,
    author: Option<String>,
}

#[derive(Clone)]
pub struct InvidiousClient {
    client: Client,
    base_url: Url,
    region: String,
}

impl InvidiousClient {
    pub fn with_shared_client(client: Client, config: &SearchConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.invidious_url)
            .map_err(|e| anyhow::anyhow!("Invalid Invidious URL {}: {e}", config.invidious_url))?;

        Ok(Self {
            client,
            base_url,
            region: config.region.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| SearchError::parse(PROVIDER, e.to_string()))
    }

    fn search_url(&self, keyword: &str) -> Result<Url, SearchError> {
        let mut url = self.endpoint("/api/v1/search")?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("type", "video")
            .append_pair("region", &self.region);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl VideoSearch for InvidiousClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<RawVideo>, SearchError> {
        let response = self
            .client
            .get(self.search_url(keyword)?)
            .send()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        parse_search_response(&body, limit, &self.base_url)
    }

    async fn video(&self, id: &str) -> Result<Option<VideoDetails>, SearchError> {
        let path = format!("/api/v1/videos/{}", urlencoding::encode(id));
        let mut url = self.endpoint(&path)?;
        url.query_pairs_mut().append_pair("fields", "title,author");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
        ) {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(SearchError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }

        let video: InvidiousVideo = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER, e.to_string()))?;

        Ok(video
            .title
            .filter(|t| !t.is_empty())
            .map(|title| VideoDetails {
                id: id.to_string(),
                title,
                channel: video.author,
            }))
    }
}

pub(crate) fn parse_search_response(
    body: &str,
    limit: usize,
    base_url: &Url,
) -> Result<Vec<RawVideo>, SearchError> {
    let items: Vec<InvidiousItem> =
        serde_json::from_str(body).map_err(|e| SearchError::parse(PROVIDER, e.to_string()))?;

    Ok(items
        .into_iter()
        .filter(InvidiousItem::is_video)
        .map(|item| item.into_raw(base_url))
        .take(limit)
        .collect())
}
