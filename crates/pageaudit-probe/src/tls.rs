use std::time::Duration;

use pageaudit_types::SslFacts;
use reqwest::redirect::Policy;
use reqwest::tls::TlsInfo;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

use crate::Prober;
use crate::error::error_chain;

impl Prober {
    fn tls_client(&self, verify: bool) -> reqwest::Result<reqwest::Client> {
        let timeout = Duration::from_millis(self.settings.probe_timeout_ms);
        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(Policy::none())
            .tls_info(true)
            .danger_accept_invalid_certs(!verify)
            .build()
    }

    /// TLS handshake validity for an https page, plus the issuer and
    /// validity window of the certificate the server presented.
    ///
    /// A verified request that succeeds means a valid certificate. When it
    /// fails but the same request succeeds without verification, the
    /// certificate is invalid. Any other failure is unknown and yields `None`.
    pub async fn check_ssl_certificate(&self, page: &Url) -> Option<SslFacts> {
        if page.scheme() != "https" {
            return None;
        }
        let verified = self.tls_client(true).ok()?;
        tracing::debug!(url = %page, "checking TLS certificate");
        let err = match verified.head(page.clone()).send().await {
            Ok(response) => {
                let mut facts = SslFacts {
                    valid: true,
                    ..Default::default()
                };
                fill_certificate(&response, &mut facts);
                return Some(facts);
            }
            Err(err) if err.is_timeout() => {
                tracing::warn!(url = %page, "TLS probe timed out");
                return None;
            }
            Err(err) => err,
        };

        let unverified = self.tls_client(false).ok()?;
        match unverified.head(page.clone()).send().await {
            Ok(response) => {
                let mut facts = SslFacts {
                    valid: false,
                    error: Some(error_chain(&err)),
                    ..Default::default()
                };
                fill_certificate(&response, &mut facts);
                Some(facts)
            }
            Err(second) => {
                tracing::warn!(url = %page, err = %second, "TLS probe failed open");
                None
            }
        }
    }
}

fn fill_certificate(response: &reqwest::Response, facts: &mut SslFacts) {
    let der = response
        .extensions()
        .get::<TlsInfo>()
        .and_then(TlsInfo::peer_certificate);
    match der {
        Some(der) => certificate_facts(der, OffsetDateTime::now_utc(), facts),
        None => tracing::debug!(url = %response.url(), "no peer certificate exposed"),
    }
}

/// Issuer, validity window and days left from a DER certificate. An
/// unparsable certificate leaves `facts` untouched.
pub(crate) fn certificate_facts(der: &[u8], now: OffsetDateTime, facts: &mut SslFacts) {
    let cert = match x509_parser::parse_x509_certificate(der) {
        Ok((_, cert)) => cert,
        Err(err) => {
            tracing::debug!(%err, "unparsable peer certificate");
            return;
        }
    };
    let validity = cert.validity();
    let not_before = validity.not_before.to_datetime();
    let not_after = validity.not_after.to_datetime();
    facts.issuer = Some(cert.issuer().to_string());
    facts.valid_from = not_before.format(&Rfc3339).ok();
    facts.valid_to = not_after.format(&Rfc3339).ok();
    facts.days_until_expiry = Some((not_after - now).whole_days());
}
