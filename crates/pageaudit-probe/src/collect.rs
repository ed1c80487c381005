//! The auxiliary phase: every probe runs concurrently and the phase never
//! waits past `aux_deadline_ms`. A probe that misses the deadline keeps its
//! default.

use std::future::Future;
use std::time::Duration;

use pageaudit_types::{NetworkFacts, RobotsTxtFacts, SitemapFacts};
use tokio::time::{Instant, timeout_at};
use url::Url;

use crate::Prober;
use crate::robots::robots_disallows;

/// URL samples the probes work from.
#[derive(Debug, Clone, Default)]
pub struct ProbeTargets<'a> {
    pub internal_urls: &'a [String],
    pub external_urls: &'a [String],
    pub image_urls: &'a [String],
}

impl Prober {
    pub async fn collect(&self, page: &Url, targets: ProbeTargets<'_>) -> NetworkFacts {
        let deadline = Instant::now() + Duration::from_millis(self.settings.aux_deadline_ms);
        let limit_links = self.settings.max_links_to_probe;
        let limit_images = self.settings.max_images_to_size;

        let crawl = async {
            let content = self.fetch_robots_txt(page).await;
            let robots = RobotsTxtFacts {
                checked: true,
                found: content.is_some(),
                blocks_page: content
                    .as_deref()
                    .is_some_and(|c| robots_disallows(c, &page_path(page))),
                content,
            };
            let sitemap = self.check_sitemap(page, robots.content.as_deref()).await;
            (robots, sitemap)
        };

        let (crawl, ssl, headers, redirects, external, images) = tokio::join!(
            bounded(deadline, "robots/sitemap", crawl),
            bounded(deadline, "tls", self.check_ssl_certificate(page)),
            bounded(deadline, "headers", self.check_security_headers(page)),
            bounded(deadline, "redirects", self.check_redirects(targets.internal_urls, limit_links)),
            bounded(
                deadline,
                "external links",
                self.check_external_links(targets.external_urls, limit_links)
            ),
            bounded(deadline, "images", self.check_image_sizes(targets.image_urls, limit_images)),
        );

        let (robots_txt, sitemap): (RobotsTxtFacts, SitemapFacts) = crawl.unwrap_or_default();
        NetworkFacts {
            robots_txt,
            sitemap,
            ssl: ssl.flatten(),
            headers: headers.flatten(),
            redirect_probes: redirects.unwrap_or_default(),
            external_probes: external.unwrap_or_default(),
            image_sizes: images.unwrap_or_default(),
        }
    }
}

async fn bounded<T>(deadline: Instant, name: &'static str, fut: impl Future<Output = T>) -> Option<T> {
    match timeout_at(deadline, fut).await {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(probe = name, "auxiliary deadline reached, probe dropped");
            None
        }
    }
}

/// Path plus query, the part robots.txt rules match against.
fn page_path(page: &Url) -> String {
    match page.query() {
        Some(q) => format!("{}?{q}", page.path()),
        None => page.path().to_string(),
    }
}
