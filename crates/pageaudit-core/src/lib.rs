//! # pageaudit-core
//!
//! **Tier 3 (Orchestration)**
//!
//! This crate is the **primary library interface** for `pageaudit`. It
//! sequences the category checkers, merges network facts, runs the issue,
//! pass and score synthesis, and assembles the [`AuditResult`].
//!
//! If you are embedding `pageaudit` into another Rust application, depend on
//! this crate and `pageaudit-types`.
//!
//! ## Example
//!
//! ```rust
//! use pageaudit_core::audit_html;
//! use pageaudit_settings::AuditSettings;
//!
//! let html = "<html><head><title>Hello</title></head><body><h1>Hi</h1></body></html>";
//! let result = audit_html(html, Some("https://example.com/"), &AuditSettings::offline());
//! assert!(result.score <= 100);
//! assert!(result.issues.iter().any(|i| i.id == "no-meta-description"));
//! ```

mod error;

use pageaudit_dom::Document;
use pageaudit_probe::{ProbeTargets, Prober};
use pageaudit_settings::{AuditSettings, ScoreWeights};
use pageaudit_types::{
    AUDIT_SCHEMA_VERSION, AuditResult, CategoryReports, FetchMethod, NetworkFacts,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

pub use error::{AuditError, ErrorCode};
pub use pageaudit_settings as settings;
pub use pageaudit_types as types;

/// What to audit: a live URL, or HTML already in hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditSource {
    Url(String),
    Html { html: String, url: Option<String> },
}

/// Runs every category checker over a parsed document.
///
/// Technical runs before Content (title) and Schema before Trust Signals.
/// Network-only fields keep their defaults.
pub fn inspect(doc: &Document) -> CategoryReports {
    let _span = tracing::debug_span!("inspect", bytes = doc.html_len()).entered();

    let technical = phase("technical", || pageaudit_checks::build_technical_report(doc));
    let content = phase("content", || {
        pageaudit_checks::build_content_report(doc, technical.title.content.as_deref())
    });
    let schema = phase("schema", || pageaudit_checks::build_schema_report(doc));
    let trust_signals = phase("trust_signals", || {
        pageaudit_checks::build_trust_signals_report(doc, &schema)
    });

    CategoryReports {
        international: phase("international", || {
            pageaudit_checks::build_international_report(doc)
        }),
        links: phase("links", || pageaudit_checks::build_links_report(doc)),
        images: phase("images", || pageaudit_checks::build_images_report(doc)),
        social: phase("social", || pageaudit_checks::build_social_report(doc)),
        accessibility: phase("accessibility", || {
            pageaudit_checks::build_accessibility_report(doc)
        }),
        structure: phase("structure", || pageaudit_checks::build_structure_report(doc)),
        performance: phase("performance", || {
            pageaudit_checks::build_performance_report(doc)
        }),
        security: phase("security", || pageaudit_checks::build_security_report(doc)),
        platform: phase("platform", || pageaudit_checks::build_platform_report(doc)),
        mobile: phase("mobile", || pageaudit_checks::build_mobile_report(doc)),
        external_resources: phase("external_resources", || {
            pageaudit_checks::build_external_resources_report(doc)
        }),
        technical,
        content,
        schema,
        trust_signals,
    }
}

fn phase<T>(name: &'static str, run: impl FnOnce() -> T) -> T {
    let _span = tracing::debug_span!("checker", name).entered();
    run()
}

/// Merges the network collaborators' facts into their categories.
pub fn augment(reports: &mut CategoryReports, facts: NetworkFacts) {
    reports.technical.robots_txt = facts.robots_txt;
    reports.technical.sitemap = facts.sitemap;
    reports.security.ssl = facts.ssl;
    reports.security.headers = facts.headers;
    reports.links.redirect_probes = facts.redirect_probes;
    reports.links.external_probes = facts.external_probes;
    reports.images.sizes = facts.image_sizes;
}

/// Synthesizes issues, passed checks and the score, and stamps the result.
pub fn finalize(
    reports: CategoryReports,
    url: Option<String>,
    fetch_method: FetchMethod,
    weights: &ScoreWeights,
) -> AuditResult {
    let issues = pageaudit_rules::synthesize_issues(&reports);
    let passed = pageaudit_rules::synthesize_passed(&reports);
    let score = pageaudit_rules::calculate_score(&issues, &passed, weights);
    let summary = pageaudit_rules::summarize(&issues, &passed);

    tracing::info!(
        score,
        issues = issues.len(),
        passed = passed.len(),
        "audit complete"
    );

    AuditResult {
        schema_version: AUDIT_SCHEMA_VERSION,
        url,
        timestamp: now_rfc3339(),
        fetch_method,
        score,
        summary,
        reports,
        issues,
        passed,
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

/// Audits HTML already in hand, without any network access.
///
/// Never fails: malformed markup yields default facts.
pub fn audit_html(html: &str, source_url: Option<&str>, settings: &AuditSettings) -> AuditResult {
    let doc = Document::parse(html, source_url);
    let reports = inspect(&doc);
    finalize(
        reports,
        source_url.map(str::to_string),
        FetchMethod::Html,
        &settings.scoring,
    )
}

/// Fetches `url`, audits it and, when enabled, augments it with network facts.
pub async fn audit_url(url: &str, settings: &AuditSettings) -> Result<AuditResult, AuditError> {
    let prober = Prober::new(settings.network.clone());
    let page = prober.fetch_html(url).await?;
    tracing::debug!(requested = url, final_url = %page.final_url, "page fetched");
    let reports = inspect_and_probe(&prober, &page.html, &page.final_url, settings).await?;
    Ok(finalize(
        reports,
        Some(page.final_url),
        FetchMethod::Url,
        &settings.scoring,
    ))
}

/// Validates the request and dispatches to [`audit_url`] or an HTML audit.
///
/// HTML with a source URL is augmented with network facts when
/// `settings.network.enabled` is set.
pub async fn audit_source(
    source: AuditSource,
    settings: &AuditSettings,
) -> Result<AuditResult, AuditError> {
    settings.validate()?;
    match source {
        AuditSource::Url(url) => {
            if url.trim().is_empty() {
                return Err(AuditError::invalid_input("No HTML or URL to audit"));
            }
            audit_url(url.trim(), settings).await
        }
        AuditSource::Html { html, url } => {
            if html.trim().is_empty() {
                return Err(AuditError::invalid_input("HTML input is empty"));
            }
            let Some(url) = url else {
                return Ok(audit_html(&html, None, settings));
            };
            parse_http_url(&url)?;
            if !settings.network.enabled {
                return Ok(audit_html(&html, Some(&url), settings));
            }
            let prober = Prober::new(settings.network.clone());
            let reports = inspect_and_probe(&prober, &html, &url, settings).await?;
            Ok(finalize(reports, Some(url), FetchMethod::Html, &settings.scoring))
        }
    }
}

/// The parsed document is dropped before the probes run.
async fn inspect_and_probe(
    prober: &Prober,
    html: &str,
    url: &str,
    settings: &AuditSettings,
) -> Result<CategoryReports, AuditError> {
    let mut reports = {
        let doc = Document::parse(html, Some(url));
        inspect(&doc)
    };
    if settings.network.enabled {
        let page = parse_http_url(url)?;
        let targets = ProbeTargets {
            internal_urls: &reports.links.internal_urls,
            external_urls: &reports.links.external_urls,
            image_urls: &reports.images.image_urls,
        };
        let facts = prober.collect(&page, targets).await;
        augment(&mut reports, facts);
    }
    Ok(reports)
}

fn parse_http_url(url: &str) -> Result<Url, AuditError> {
    let parsed = Url::parse(url).map_err(|e| {
        AuditError::with_details(ErrorCode::InvalidUrl, format!("Invalid URL '{url}'"), e.to_string())
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AuditError::new(
            ErrorCode::InvalidUrl,
            format!("Unsupported URL scheme '{other}' (expected http or https)"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageaudit_types::{ImageSize, LinkProbe, RobotsTxtFacts, SslFacts};

    #[test]
    fn augment_routes_each_fact_to_its_category() {
        let mut reports = CategoryReports::default();
        let facts = NetworkFacts {
            robots_txt: RobotsTxtFacts {
                checked: true,
                found: true,
                content: Some("User-agent: *".into()),
                blocks_page: false,
            },
            ssl: Some(SslFacts {
                valid: true,
                ..Default::default()
            }),
            external_probes: vec![LinkProbe {
                url: "https://b.com".into(),
                status: Some(404),
                ..Default::default()
            }],
            image_sizes: vec![ImageSize {
                url: "https://a.com/x.png".into(),
                bytes: Some(10),
            }],
            ..Default::default()
        };
        augment(&mut reports, facts);
        assert!(reports.technical.robots_txt.found);
        assert!(reports.security.ssl.as_ref().is_some_and(|s| s.valid));
        assert_eq!(reports.links.external_probes.len(), 1);
        assert_eq!(reports.images.sizes[0].bytes, Some(10));
        assert!(!reports.technical.sitemap.checked);
    }

    #[test]
    fn html_audit_records_source_and_method() {
        let r = audit_html("<p>x</p>", Some("https://a.com/"), &AuditSettings::offline());
        assert_eq!(r.url.as_deref(), Some("https://a.com/"));
        assert_eq!(r.fetch_method, FetchMethod::Html);
        assert_eq!(r.schema_version, AUDIT_SCHEMA_VERSION);
        assert!(!r.timestamp.is_empty());
    }

    #[test]
    fn non_http_source_urls_are_rejected() {
        assert_eq!(
            parse_http_url("ftp://a.com").unwrap_err().code,
            ErrorCode::InvalidUrl
        );
        assert_eq!(parse_http_url("nope").unwrap_err().code, ErrorCode::InvalidUrl);
        assert!(parse_http_url("https://a.com/x").is_ok());
    }
}
