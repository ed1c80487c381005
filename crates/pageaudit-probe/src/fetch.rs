use reqwest::redirect::Policy;
use url::Url;

use crate::Prober;
use crate::error::{FetchError, error_chain};

/// Lower-cased substrings that identify anti-automation interstitials when
/// the response is an error (typically 403, 429 or 503).
///
/// Several of these also appear on ordinary pages behind bot management,
/// which load the challenge script in the background, so a successful
/// response is only checked against [`INTERSTITIAL_MARKERS`].
pub const CHALLENGE_MARKERS: &[&str] = &[
    "cf-browser-verification",
    "cf-challenge",
    "/cdn-cgi/challenge-platform/",
    "<title>just a moment...</title>",
    "<title>attention required! | cloudflare</title>",
    "checking your browser before accessing",
    "_incapsula_resource",
    "px-captcha",
    "captcha-delivery.com",
    "sucuri website firewall",
];

/// Interstitial titles that mark a challenge even on a 2xx response.
pub const INTERSTITIAL_MARKERS: &[&str] = &[
    "<title>just a moment...</title>",
    "<title>attention required! | cloudflare</title>",
];

/// Returns the first challenge marker found in a response with `status`.
pub fn challenge_marker(status: u16, body: &str) -> Option<&'static str> {
    let markers = if (200..300).contains(&status) {
        INTERSTITIAL_MARKERS
    } else {
        CHALLENGE_MARKERS
    };
    let lower = body.to_lowercase();
    markers.iter().copied().find(|m| lower.contains(m))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    pub status: u16,
    pub final_url: String,
}

impl Prober {
    /// Fetch the page to audit, following at most `max_redirects` hops.
    ///
    /// Unlike the auxiliary probes this surfaces every failure, including
    /// challenge pages, since an interstitial is not the document.
    pub async fn fetch_html(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }

        let limit = self.settings.max_redirects;
        let client = self
            .client(self.settings.fetch_timeout_ms, Policy::limited(limit))
            .map_err(|e| FetchError::Client(error_chain(&e)))?;

        tracing::debug!(%url, "fetching page");
        let response = client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e, limit))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let html = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: error_chain(&e),
        })?;

        if let Some(marker) = challenge_marker(status.as_u16(), &html) {
            return Err(FetchError::Blocked {
                url: final_url,
                marker: marker.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: final_url,
                status: status.as_u16(),
            });
        }

        tracing::debug!(%final_url, status = status.as_u16(), bytes = html.len(), "page fetched");
        Ok(FetchedPage {
            html,
            status: status.as_u16(),
            final_url,
        })
    }
}
