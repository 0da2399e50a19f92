use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{SearchError, VideoSearch};
use crate::models::{ResultRecord, SearchQuery, VideoDetails};

/// How many extra hits to ask for when looking up related videos, so that
/// dropping the current video still leaves a full list.
const RELATED_HEADROOM: usize = 1;

pub struct SearchService {
    provider: Arc<dyn VideoSearch>,
    result_limit: usize,
    related_limit: usize,
}

impl SearchService {
    #[must_use]
    pub const fn new(
        provider: Arc<dyn VideoSearch>,
        result_limit: usize,
        related_limit: usize,
    ) -> Self {
        Self {
            provider,
            result_limit,
            related_limit,
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Runs a search and returns the display records.
    ///
    /// An empty query never reaches the provider. Provider failures are
    /// logged and reported as an empty result set.
    pub async fn search(&self, query: &SearchQuery) -> Vec<ResultRecord> {
        if query.is_empty() {
            return Vec::new();
        }

        info!(
            query = %query,
            provider = self.provider.name(),
            limit = self.result_limit,
            "Searching videos"
        );
        metrics::counter!("video_searches_total", "provider" => self.provider.name()).increment(1);

        match self.provider.search(query.as_str(), self.result_limit).await {
            Ok(videos) => {
                let results: Vec<ResultRecord> = videos
                    .into_iter()
                    .take(self.result_limit)
                    .map(ResultRecord::from)
                    .collect();
                info!(query = %query, count = results.len(), "Search finished");
                results
            }
            Err(e) => {
                self.record_failure();
                warn!(query = %query, error = %e, "Search failed, showing no results");
                Vec::new()
            }
        }
    }

    /// Looks up a single video for the watch page.
    pub async fn video(&self, id: &str) -> Result<Option<VideoDetails>, SearchError> {
        self.provider.video(id).await.inspect_err(|e| {
            self.record_failure();
            warn!(video_id = id, error = %e, "Video lookup failed");
        })
    }

    /// Videos related to `video`, found by searching for its title.
    /// The video itself is excluded. Failures yield an empty list.
    pub async fn related(&self, video: &VideoDetails) -> Vec<ResultRecord> {
        if self.related_limit == 0 {
            return Vec::new();
        }

        let limit = self.related_limit + RELATED_HEADROOM;
        match self.provider.search(&video.title, limit).await {
            Ok(videos) => videos
                .into_iter()
                .filter(|v| v.title.is_some() && v.id.as_deref() != Some(video.id.as_str()))
                .take(self.related_limit)
                .map(ResultRecord::from)
                .collect(),
            Err(e) => {
                self.record_failure();
                warn!(video_id = %video.id, error = %e, "Related video search failed");
                Vec::new()
            }
        }
    }

    fn record_failure(&self) {
        metrics::counter!("video_search_failures_total", "provider" => self.provider.name())
            .increment(1);
    }
}
