use std::fmt;

/// A search keyword with surrounding whitespace removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Builds the query from the `q` parameter of a raw query string.
    ///
    /// Decoding is lenient: a missing parameter or an undecodable query
    /// string both produce an empty query. The first `q` wins.
    #[must_use]
    pub fn from_query_string(raw: Option<&str>) -> Self {
        raw.and_then(|qs| query_param(qs, "q"))
            .map(|q| Self::new(&q))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the first value of `key` in an `application/x-www-form-urlencoded`
/// query string.
#[must_use]
pub fn query_param(raw: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(raw.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
