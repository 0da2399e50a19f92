//! HTML rendering for every page the site serves.
//!
//! All text coming from the user or from a provider goes through
//! `html_escape` before it is interpolated.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::config::UiConfig;
use crate::constants::youtube;
use crate::models::{ResultRecord, VideoDetails};

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 800px; margin: auto; padding: 20px; }
    ul { list-style: none; padding: 0; }
    li { border-bottom: 1px solid #eee; padding: 15px 0; }
    li a { text-decoration: none; color: #007bff; }
    li a:hover { text-decoration: underline; }
    small { color: #666; display: block; margin-top: 5px; }
    h1, h2 { border-bottom: 2px solid #ccc; padding-bottom: 10px; }
    .video-player { width: 100%; aspect-ratio: 16 / 9; border: 0; margin-bottom: 20px; }
    .error { color: #b00020; }
    .thumbnail { float: right; width: 160px; margin-left: 10px; }
    li::after { content: ""; display: block; clear: both; }
"#;

const PROMPT: &str = "Enter a keyword and press the search button.";

/// Page templates, built once at startup.
#[derive(Debug, Clone)]
pub struct Renderer {
    site_name: String,
}

impl Renderer {
    #[must_use]
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            site_name: ui.site_name.clone(),
        }
    }

    /// Renders the search page.
    ///
    /// `results` is `None` when no search was attempted. An empty slice and
    /// `None` currently render the same prompt.
    #[must_use]
    pub fn search_page(&self, query: &str, results: Option<&[ResultRecord]>) -> String {
        let heading = if query.is_empty() { "..." } else { query };

        let body = match results {
            Some(records) if !records.is_empty() => result_list(records),
            _ => format!("<p>{PROMPT}</p>\n"),
        };

        format!(
            "{head}<h1>Results for “{heading}”</h1>\n{body}<hr>\n<h2>New search</h2>\n{form}{FOOT}",
            head = self.head("Search results"),
            heading = text(heading),
            form = search_form(query),
        )
    }

    /// Renders the watch page: embedded player plus related videos.
    #[must_use]
    pub fn watch_page(&self, video: &VideoDetails, related: &[ResultRecord]) -> String {
        let embed = format!(
            "{}/{}",
            youtube::EMBED_URL,
            urlencoding::encode(&video.id)
        );

        let channel = video
            .channel
            .as_deref()
            .map_or_else(String::new, |channel| {
                format!("<p><small>Channel: {}</small></p>\n", text(channel))
            });

        let related = if related.is_empty() {
            "<p>No related videos were found.</p>\n".to_string()
        } else {
            result_list(related)
        };

        format!(
            "{head}<h1>{title}</h1>\n{channel}\
             <iframe class=\"video-player\" src=\"{embed}\" title=\"{title_attr}\" \
             allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
             allowfullscreen></iframe>\n\
             <h2>Related videos</h2>\n{related}\
             <hr>\n<p><a href=\"/\">← Back to a new search</a></p>\n{FOOT}",
            head = self.head(&video.title),
            title = text(&video.title),
            embed = attr(&embed),
            title_attr = attr(&video.title),
        )
    }

    #[must_use]
    pub fn error_page(&self, heading: &str, message: &str) -> String {
        format!(
            "{head}<h1>{heading}</h1>\n<p class=\"error\">{message}</p>\n\
             <hr>\n<h2>New search</h2>\n{form}{FOOT}",
            head = self.head(heading),
            heading = text(heading),
            message = text(message),
            form = search_form(""),
        )
    }

    fn head(&self, title: &str) -> String {
        format!(
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{} - {}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
            text(&self.site_name),
            text(title)
        )
    }
}

const FOOT: &str = "</body>\n</html>\n";

fn result_list(records: &[ResultRecord]) -> String {
    let mut html = String::from("<ul>\n");
    for record in records {
        // Writing into a String cannot fail.
        let _ = writeln!(
            html,
            "<li>\n{}<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><strong>{}</strong></a>\n\
             <small>Channel: {} | Duration: {}{}</small>\n</li>",
            thumbnail(record),
            attr(&record.url),
            text(&record.title),
            text(&record.channel),
            text(&record.duration),
            watch_link(record)
        );
    }
    html.push_str("</ul>\n");
    html
}

fn thumbnail(record: &ResultRecord) -> String {
    record.thumbnail.as_deref().map_or_else(String::new, |src| {
        format!(
            "<img class=\"thumbnail\" src=\"{}\" loading=\"lazy\" alt=\"\">\n",
            attr(src)
        )
    })
}

fn watch_link(record: &ResultRecord) -> String {
    record.video_id.as_deref().map_or_else(String::new, |id| {
        format!(
            " | <a href=\"/watch?v={}\">watch here</a>",
            attr(&urlencoding::encode(id))
        )
    })
}

fn search_form(query: &str) -> String {
    format!(
        "<form action=\"/search\" method=\"GET\">\n\
         <input type=\"text\" name=\"q\" placeholder=\"Enter a keyword\" value=\"{}\" size=\"40\">\n\
         <button type=\"submit\">🍊 Search</button>\n</form>\n",
        attr(query)
    )
}
