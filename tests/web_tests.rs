use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use yuzutube::clients::{SearchError, VideoSearch};
use yuzutube::config::Config;
use yuzutube::models::{RawVideo, VideoDetails};
use yuzutube::web::{AppState, router};

/// In-memory provider that answers every search with a fixed script and
/// records the calls it receives.
struct ScriptedProvider {
    outcome: Outcome,
    calls: Mutex<Vec<(String, usize)>>,
}

enum Outcome {
    Videos(Vec<RawVideo>),
    Fail,
}

impl ScriptedProvider {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VideoSearch for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<RawVideo>, SearchError> {
        self.calls.lock().unwrap().push((keyword.to_string(), limit));
        match &self.outcome {
            Outcome::Videos(videos) => Ok(videos.clone()),
            Outcome::Fail => Err(SearchError::Parse {
                provider: "scripted",
                message: "upstream changed".to_string(),
            }),
        }
    }

    async fn video(&self, id: &str) -> Result<Option<VideoDetails>, SearchError> {
        match &self.outcome {
            Outcome::Videos(videos) => Ok(videos
                .iter()
                .find(|v| v.id.as_deref() == Some(id))
                .map(|v| VideoDetails {
                    id: id.to_string(),
                    title: v.title.clone().unwrap_or_default(),
                    channel: v.channel.clone(),
                })),
            Outcome::Fail => Err(SearchError::Parse {
                provider: "scripted",
                message: "upstream changed".to_string(),
            }),
        }
    }
}

fn video(n: usize) -> RawVideo {
    RawVideo {
        id: Some(format!("video{n:06}")),
        title: Some(format!("Cat video {n}")),
        link: Some(format!("https://www.youtube.com/watch?v=video{n:06}")),
        channel: Some("Cat TV".to_string()),
        duration: Some(format!("{n}:00")),
        thumbnail: Some(format!("https://i.ytimg.com/vi/video{n:06}/hqdefault.jpg")),
    }
}

fn spawn_app(provider: Arc<ScriptedProvider>) -> Router {
    let state = Arc::new(AppState::new(Config::default(), provider, None));
    router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

const PROMPT: &str = "Enter a keyword and press the search button.";

#[tokio::test]
async fn test_index_shows_prompt_and_empty_form() {
    let provider = ScriptedProvider::new(Outcome::Videos(vec![video(1)]));
    let app = spawn_app(provider.clone());

    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(PROMPT));
    assert!(body.contains("value=\"\""));
    assert!(!body.contains("<li"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_empty_query_does_not_search() {
    let provider = ScriptedProvider::new(Outcome::Videos(vec![video(1)]));
    let app = spawn_app(provider.clone());

    for uri in ["/search", "/search?q=", "/search?q=%20%20%09"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains(PROMPT), "{uri}");
        assert!(!body.contains("<li"), "{uri}");
    }

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_query_is_trimmed_and_limited_to_ten() {
    let provider = ScriptedProvider::new(Outcome::Videos(vec![video(1)]));
    let app = spawn_app(provider.clone());

    let (status, _) = get(&app, "/search?q=++cute+cats+").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls(), vec![("cute cats".to_string(), 10)]);
}

#[tokio::test]
async fn test_three_results_render_three_entries() {
    let videos = vec![video(1), video(2), video(3)];
    let provider = ScriptedProvider::new(Outcome::Videos(videos.clone()));
    let app = spawn_app(provider);

    let (status, body) = get(&app, "/search?q=cats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<li>").count(), 3);
    assert!(!body.contains(PROMPT));

    let mut last = 0;
    for v in &videos {
        let href = format!("href=\"{}\"", v.link.as_deref().unwrap());
        let pos = body.find(&href).expect("result link rendered");
        assert!(pos > last, "results keep provider order");
        last = pos;
    }

    assert_eq!(body.matches("<img ").count(), 3);
    assert!(body.contains("src=\"https://i.ytimg.com/vi/video000002/hqdefault.jpg\" loading=\"lazy\""));
}

#[tokio::test]
async fn test_more_than_ten_results_are_capped() {
    let videos: Vec<RawVideo> = (1..=15).map(video).collect();
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(videos)));

    let (_, body) = get(&app, "/search?q=cats").await;

    assert_eq!(body.matches("<li>").count(), 10);
    assert!(body.contains("Cat video 10<"));
    assert!(!body.contains("Cat video 11<"));
}

#[tokio::test]
async fn test_provider_failure_renders_empty_page_with_200() {
    let provider = ScriptedProvider::new(Outcome::Fail);
    let app = spawn_app(provider.clone());

    let (status, body) = get(&app, "/search?q=cats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<li").count(), 0);
    assert!(body.contains(PROMPT));
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_missing_fields_use_placeholders() {
    let record = RawVideo {
        title: Some("Nameless channel".to_string()),
        link: Some("https://example.com/v".to_string()),
        ..RawVideo::default()
    };
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![record])));

    let (_, body) = get(&app, "/search?q=cats").await;

    assert!(body.contains("Channel: unknown | Duration: unknown"));
    assert!(body.contains("href=\"https://example.com/v\""));
    assert!(!body.contains("<img"));

    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![
        RawVideo::default(),
    ])));
    let (_, body) = get(&app, "/search?q=cats").await;
    assert!(body.contains("href=\"#\""));
    assert!(body.contains("<strong>unknown</strong>"));
}

#[tokio::test]
async fn test_form_round_trips_the_query() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![])));

    let (_, body) = get(&app, "/search?q=%E3%82%86%E3%81%9A+%26+%22tea%22").await;

    assert!(body.contains("action=\"/search\""));
    assert!(body.contains("value=\"ゆず &amp; &quot;tea&quot;\""));
    assert!(body.contains("Results for “ゆず &amp; \"tea\"”"));
}

#[tokio::test]
async fn test_zero_results_keep_the_prompt() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![])));

    let (status, body) = get(&app, "/search?q=nothing+matches").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(PROMPT));
    assert!(!body.contains("<ul>"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![])));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    let csp = headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("default-src 'none'"));
    assert!(csp.contains("img-src https:;"));
    assert!(csp.contains("frame-src https://www.youtube-nocookie.com"));
    assert!(!csp.contains("data:"));
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
}

#[tokio::test]
async fn test_watch_requires_a_video_id() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![video(1)])));

    let (status, _) = get(&app, "/watch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/watch?v=%3Cscript%3E").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_watch_unknown_video_is_not_found() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![video(1)])));
    let (status, body) = get(&app, "/watch?v=doesnotexist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("could not be found"));

    let app = spawn_app(ScriptedProvider::new(Outcome::Fail));
    let (status, _) = get(&app, "/watch?v=video000001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watch_page_embeds_video_and_lists_related() {
    let videos: Vec<RawVideo> = (1..=8).map(video).collect();
    let provider = ScriptedProvider::new(Outcome::Videos(videos));
    let app = spawn_app(provider.clone());

    let (status, body) = get(&app, "/watch?v=video000001").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("https://www.youtube-nocookie.com/embed/video000001"));
    assert!(body.contains("<h1>Cat video 1</h1>"));
    assert_eq!(body.matches("<li>").count(), 5);
    assert!(!body.contains("/watch?v=video000001\""));
    assert_eq!(provider.calls(), vec![("Cat video 1".to_string(), 6)]);
}

#[tokio::test]
async fn test_metrics_endpoint_without_recorder() {
    let app = spawn_app(ScriptedProvider::new(Outcome::Videos(vec![])));
    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Metrics are disabled");
}
