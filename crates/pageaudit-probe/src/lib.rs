//! # pageaudit-probe
//!
//! **Tier 2 (Network Collaborators)**
//!
//! Async HTTP probes that feed the network-only fields of the audit.
//!
//! ## What belongs here
//! * Fetching the page itself ([`Prober::fetch_html`]), the only fallible probe
//! * robots.txt, sitemap, TLS and security-header checks
//! * Redirect, external-link and image-size probes
//!
//! Every probe except the page fetch fails open: a timeout or transport error
//! yields the same default as a genuine absence. Each call builds its own
//! client, so no connections or counters are shared between probes.
//!
//! ## Example
//! ```ignore
//! let prober = Prober::new(NetworkSettings::default());
//! let page = prober.fetch_html("https://example.com/").await?;
//! let facts = prober.collect(&page_url, targets).await;
//! ```

mod collect;
mod error;
mod fetch;
mod headers;
mod links;
mod robots;
mod sitemap;
mod tls;

use std::time::Duration;

use pageaudit_settings::NetworkSettings;
use reqwest::redirect::Policy;

pub use collect::ProbeTargets;
pub use error::FetchError;
pub use fetch::{CHALLENGE_MARKERS, FetchedPage, INTERSTITIAL_MARKERS, challenge_marker};
pub use headers::{SECURITY_HEADERS, evaluate_headers};
pub use robots::{robots_disallows, sitemap_directives};

/// Entry point for every probe, configured once per audit.
#[derive(Debug, Clone)]
pub struct Prober {
    settings: NetworkSettings,
}

impl Prober {
    pub fn new(settings: NetworkSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NetworkSettings {
        &self.settings
    }

    /// A fresh client for one probe call.
    fn client(&self, timeout_ms: u64, redirect: Policy) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(Duration::from_millis(timeout_ms))
            .redirect(redirect)
            .build()
    }

    fn probe_client(&self) -> reqwest::Result<reqwest::Client> {
        self.client(
            self.settings.probe_timeout_ms,
            Policy::limited(self.settings.max_redirects),
        )
    }
}
