use thiserror::Error;

/// Reasons the page itself could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },

    #[error("Timed out fetching {url}")]
    Timeout { url: String },

    #[error("Too many redirects fetching {url} (limit {limit})")]
    RedirectLimit { url: String, limit: usize },

    #[error("Could not reach {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{url} returned an anti-bot challenge page ({marker})")]
    Blocked { url: String, marker: String },

    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Classify a transport error from reqwest.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error, limit: usize) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_redirect() {
            FetchError::RedirectLimit {
                url: url.to_string(),
                limit,
            }
        } else if err.is_builder() {
            FetchError::Client(err.to_string())
        } else {
            FetchError::Unreachable {
                url: url.to_string(),
                reason: error_chain(&err),
            }
        }
    }
}

/// Render an error with its sources, `a: b: c`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}
