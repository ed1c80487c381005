//! Link and image probes. Each call owns its client; fan-out is bounded by
//! the caller's limit.

use pageaudit_types::{ImageSize, LinkProbe};
use reqwest::redirect::Policy;
use reqwest::{StatusCode, header};
use tokio::task::JoinSet;
use url::Url;

use crate::Prober;
use crate::error::error_chain;

impl Prober {
    /// Follow redirects by hand so every hop is counted.
    pub async fn check_redirect(&self, url: &str) -> LinkProbe {
        let mut probe = LinkProbe {
            url: url.to_string(),
            ..Default::default()
        };
        let client = match self.client(self.settings.probe_timeout_ms, Policy::none()) {
            Ok(c) => c,
            Err(err) => {
                probe.error = Some(error_chain(&err));
                return probe;
            }
        };
        let Ok(mut current) = Url::parse(url) else {
            probe.error = Some("invalid URL".to_string());
            return probe;
        };

        loop {
            tracing::debug!(url = %current, hop = probe.redirects, "redirect probe");
            let response = match client.head(current.clone()).send().await {
                Ok(r) => r,
                Err(err) => {
                    tracing::warn!(url = %current, %err, "redirect probe failed open");
                    probe.error = Some(error_chain(&err));
                    return probe;
                }
            };
            let status = response.status();
            probe.status = Some(status.as_u16());
            if !status.is_redirection() {
                probe.ok = status.is_success();
                probe.final_url = Some(current.to_string());
                return probe;
            }
            let next = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|loc| current.join(loc).ok());
            let Some(next) = next else {
                probe.error = Some("redirect without Location".to_string());
                return probe;
            };
            if probe.redirects >= self.settings.max_redirects {
                probe.error = Some(format!(
                    "more than {} redirects",
                    self.settings.max_redirects
                ));
                probe.final_url = Some(next.to_string());
                return probe;
            }
            probe.redirects += 1;
            current = next;
        }
    }

    /// Status of an external URL. Servers that reject `HEAD` get a `GET`.
    pub async fn check_link_status(&self, url: &str) -> LinkProbe {
        let mut probe = LinkProbe {
            url: url.to_string(),
            ..Default::default()
        };
        let client = match self.probe_client() {
            Ok(c) => c,
            Err(err) => {
                probe.error = Some(error_chain(&err));
                return probe;
            }
        };
        tracing::debug!(%url, "link status probe");
        let mut result = client.head(url).send().await;
        let head_rejected = matches!(
            result.as_ref().map(|r| r.status()),
            Ok(StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED | StatusCode::FORBIDDEN)
        );
        if head_rejected {
            result = client.get(url).send().await;
        }
        match result {
            Ok(r) => {
                let status = r.status();
                probe.status = Some(status.as_u16());
                probe.ok = status.is_success();
                if r.url().as_str() != url {
                    probe.final_url = Some(r.url().to_string());
                }
            }
            Err(err) => {
                tracing::warn!(%url, %err, "link status probe failed open");
                probe.error = Some(error_chain(&err));
            }
        }
        probe
    }

    /// Status probes for the first `limit` external URLs, in input order.
    pub async fn check_external_links(&self, urls: &[String], limit: usize) -> Vec<LinkProbe> {
        fan_out(self, urls, limit, |p, url| async move { p.check_link_status(&url).await }).await
    }

    /// `Content-Length` from a `HEAD` request.
    pub async fn check_image_size(&self, url: &str) -> ImageSize {
        let bytes = match self.probe_client() {
            Ok(client) => match client.head(url).send().await {
                Ok(r) if r.status().is_success() => r
                    .headers()
                    .get(header::CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok()),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!(%url, %err, "image size probe failed open");
                    None
                }
            },
            Err(_) => None,
        };
        ImageSize {
            url: url.to_string(),
            bytes,
        }
    }

    /// Sizes for the first `limit` images, in input order.
    pub async fn check_image_sizes(&self, urls: &[String], limit: usize) -> Vec<ImageSize> {
        fan_out(self, urls, limit, |p, url| async move { p.check_image_size(&url).await }).await
    }

    /// Redirect probes for the first `limit` internal URLs, in input order.
    pub async fn check_redirects(&self, urls: &[String], limit: usize) -> Vec<LinkProbe> {
        fan_out(self, urls, limit, |p, url| async move { p.check_redirect(&url).await }).await
    }
}

/// Run `probe` for the first `limit` URLs concurrently, one task per URL,
/// and return the results in input order. Panicked tasks are dropped.
async fn fan_out<T, F, Fut>(prober: &Prober, urls: &[String], limit: usize, probe: F) -> Vec<T>
where
    F: Fn(Prober, String) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    for (index, url) in urls.iter().take(limit).enumerate() {
        let fut = probe(prober.clone(), url.clone());
        set.spawn(async move { (index, fut.await) });
    }
    let mut out = Vec::with_capacity(limit.min(urls.len()));
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(pair) => out.push(pair),
            Err(err) => tracing::warn!(%err, "probe task failed"),
        }
    }
    out.sort_by_key(|(index, _)| *index);
    out.into_iter().map(|(_, value)| value).collect()
}
