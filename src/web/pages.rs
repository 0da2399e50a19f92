use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::{AppState, PageError};
use crate::constants::limits;
use crate::models::SearchQuery;
use crate::models::query::query_param;

/// `GET /`: empty form, no search attempted.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.renderer.search_page("", None))
}

/// `GET /search?q=..`: always answers 200, with results or the prompt.
pub async fn search(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let query = SearchQuery::from_query_string(raw.as_deref());
    let results = state.search.search(&query).await;

    Html(state.renderer.search_page(query.as_str(), Some(results.as_slice())))
}

/// `GET /watch?v=..`: embedded player with related videos.
pub async fn watch(State(state): State<Arc<AppState>>, RawQuery(raw): RawQuery) -> Response {
    match watch_page(&state, raw.as_deref()).await {
        Ok(html) => html.into_response(),
        Err(e) => e.render(&state.renderer),
    }
}

async fn watch_page(state: &AppState, raw: Option<&str>) -> Result<Html<String>, PageError> {
    let video_id = raw
        .and_then(|qs| query_param(qs, "v"))
        .map(|v| v.trim().to_string())
        .unwrap_or_default();

    validate_video_id(&video_id)?;

    let video = state
        .search
        .video(&video_id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| PageError::video_not_found(&video_id))?;

    let related = state.search.related(&video).await;

    Ok(Html(state.renderer.watch_page(&video, &related)))
}

fn validate_video_id(id: &str) -> Result<(), PageError> {
    if id.is_empty() {
        return Err(PageError::bad_request("No video id (v) was given."));
    }

    let well_formed = id.len() <= limits::MAX_VIDEO_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if well_formed {
        Ok(())
    } else {
        Err(PageError::bad_request("The video id is not valid."))
    }
}
