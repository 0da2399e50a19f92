//! Scrapes the public YouTube results page.
//!
//! The page embeds its initial state as a `ytInitialData` JSON blob; every
//! `videoRenderer` object in it is one search hit.

use regex::Regex;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use super::{SearchError, VideoSearch};
use crate::config::SearchConfig;
use crate::models::{RawVideo, VideoDetails, watch_url};

const PROVIDER: &str = "youtube";
const RESULTS_URL: &str = "https://www.youtube.com/results";
const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// `sp` filter value restricting results to videos.
const VIDEOS_ONLY_FILTER: &str = "EgIQAQ==";

/// Skips the EU consent interstitial, which has no `ytInitialData`.
const CONSENT_COOKIE: &str = "CONSENT=YES+cb; SOCS=CAI";

fn initial_data_regex() -> Option<&'static Regex> {
    static INSTANCE: OnceLock<Option<Regex>> = OnceLock::new();
    INSTANCE
        .get_or_init(|| {
            Regex::new(
                r#"(?s)(?:var\s+ytInitialData|window\["ytInitialData"\])\s*=\s*(\{.+?\})\s*;\s*</script>"#,
            )
            .ok()
        })
        .as_ref()
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: Option<String>,
    author_name: Option<String>,
}

#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    language: String,
    region: String,
}

impl YoutubeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            language: config.language.clone(),
            region: config.region.clone(),
        }
    }

    fn results_url(&self, keyword: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(
            RESULTS_URL,
            &[
                ("search_query", keyword),
                ("sp", VIDEOS_ONLY_FILTER),
                ("hl", self.language.as_str()),
                ("gl", self.region.as_str()),
            ],
        )
        .map_err(|e| SearchError::parse(PROVIDER, e.to_string()))
    }
}

#[async_trait::async_trait]
impl VideoSearch for YoutubeClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<RawVideo>, SearchError> {
        let url = self.results_url(keyword)?;

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, self.language.as_str())
            .header(header::COOKIE, CONSENT_COOKIE)
            .send()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        if !response.status().is_success() {
            return Err(SearchError::Status {
                provider: PROVIDER,
                status: response.status(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        debug!(bytes = html.len(), "YouTube results page received");

        parse_results_page(&html, limit)
    }

    async fn video(&self, id: &str) -> Result<Option<VideoDetails>, SearchError> {
        let target = watch_url(id);
        let url = Url::parse_with_params(OEMBED_URL, &[("url", target.as_str()), ("format", "json")])
            .map_err(|e| SearchError::parse(PROVIDER, e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SearchError::request(PROVIDER))?;

        match response.status() {
            // oEmbed answers 401 for videos that cannot be embedded
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                return Ok(None);
            }
            status if !status.is_success() => {
                return Err(SearchError::Status {
                    provider: PROVIDER,
                    status,
                });
            }
            _ => {}
        }

        let body: OembedResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER, e.to_string()))?;

        Ok(body.title.filter(|t| !t.is_empty()).map(|title| VideoDetails {
            id: id.to_string(),
            title,
            channel: body.author_name,
        }))
    }
}

/// Extracts up to `limit` videos from a results page, in page order.
pub(crate) fn parse_results_page(html: &str, limit: usize) -> Result<Vec<RawVideo>, SearchError> {
    let json = initial_data_regex()
        .and_then(|re| re.captures(html))
        .and_then(|c| c.get(1))
        .ok_or_else(|| SearchError::parse(PROVIDER, "ytInitialData not found"))?;

    let data: Value = serde_json::from_str(json.as_str())
        .map_err(|e| SearchError::parse(PROVIDER, format!("invalid ytInitialData: {e}")))?;

    let root = data.get("contents").unwrap_or(&data);
    let mut renderers = Vec::new();
    collect_video_renderers(root, &mut renderers);

    Ok(renderers
        .into_iter()
        .map(video_from_renderer)
        .take(limit)
        .collect())
}

fn collect_video_renderers<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(renderer) = map.get("videoRenderer") {
                out.push(renderer);
                return;
            }
            // Relies on serde_json's `preserve_order`: siblings are visited in page order.
            for child in map.values() {
                collect_video_renderers(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_video_renderers(item, out);
            }
        }
        _ => {}
    }
}

/// Reads a YouTube text object: either `{"simpleText": ..}` or `{"runs": [{"text": ..}]}`.
fn text_of(value: &Value) -> Option<String> {
    if let Some(simple) = value.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string()).filter(|s| !s.is_empty());
    }

    let joined: String = value
        .get("runs")?
        .as_array()?
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();

    Some(joined).filter(|s| !s.is_empty())
}

/// Last, and largest, entry of `thumbnail.thumbnails`.
fn thumbnail_of(renderer: &Value) -> Option<String> {
    let url = renderer["thumbnail"]["thumbnails"]
        .as_array()?
        .iter()
        .rev()
        .find_map(|thumb| thumb.get("url").and_then(Value::as_str))
        .filter(|url| !url.is_empty())?;

    Some(if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    })
}

fn video_from_renderer(renderer: &Value) -> RawVideo {
    let id = renderer
        .get("videoId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    RawVideo {
        link: id.as_deref().map(watch_url),
        title: text_of(&renderer["title"]),
        channel: text_of(&renderer["ownerText"]).or_else(|| text_of(&renderer["longBylineText"])),
        duration: text_of(&renderer["lengthText"]),
        thumbnail: thumbnail_of(renderer),
        id,
    }
}
