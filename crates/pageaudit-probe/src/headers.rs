use std::collections::BTreeMap;

use pageaudit_types::SecurityHeaderFacts;
use reqwest::header::HeaderMap;
use url::Url;

use crate::Prober;

/// Response headers every page should send, lower-cased.
pub const SECURITY_HEADERS: &[&str] = &[
    "strict-transport-security",
    "content-security-policy",
    "x-frame-options",
    "x-content-type-options",
    "referrer-policy",
    "permissions-policy",
];

/// Presence map, share present as a 0-100 score, and the missing names.
pub fn evaluate_headers(headers: &HeaderMap) -> SecurityHeaderFacts {
    let mut map = BTreeMap::new();
    let mut missing = Vec::new();
    for name in SECURITY_HEADERS {
        let value = headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if value.is_none() {
            missing.push((*name).to_string());
        }
        map.insert((*name).to_string(), value);
    }
    let present = SECURITY_HEADERS.len() - missing.len();
    let score = (present as f64 * 100.0 / SECURITY_HEADERS.len() as f64).round() as u8;
    SecurityHeaderFacts {
        headers: map,
        score,
        missing,
    }
}

impl Prober {
    pub async fn check_security_headers(&self, page: &Url) -> Option<SecurityHeaderFacts> {
        let client = self.probe_client().ok()?;
        tracing::debug!(url = %page, "checking security headers");
        match client.get(page.clone()).send().await {
            Ok(response) => Some(evaluate_headers(response.headers())),
            Err(err) => {
                tracing::warn!(url = %page, %err, "security header probe failed open");
                None
            }
        }
    }
}
