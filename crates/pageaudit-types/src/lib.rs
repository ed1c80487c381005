//! # pageaudit-types
//!
//! **Tier 0 (Audit Contract)**
//!
//! Pure data structures for page audit results. No I/O or business logic.
//!
//! ## What belongs here
//! * Category fact records produced by the checkers
//! * Issue, summary and result types
//! * Shapes of the facts contributed by the network collaborators
//!
//! ## What does NOT belong here
//! * Checker logic (use pageaudit-checks)
//! * Issue/pass/score rules (use pageaudit-rules)
//! * Rendering (use pageaudit-format)

pub mod ids;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Schema version for audit results.
/// v2: Added Mobile and ExternalResources categories and network facts.
pub const AUDIT_SCHEMA_VERSION: u32 = 2;

// --------------
// Issue contract
// --------------

/// Issue severity. Declaration order is display order (most severe first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display grouping for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Technical SEO")]
    Technical,
    #[serde(rename = "International")]
    International,
    #[serde(rename = "Content")]
    Content,
    #[serde(rename = "Links")]
    Links,
    #[serde(rename = "Images")]
    Images,
    #[serde(rename = "Structured Data")]
    Schema,
    #[serde(rename = "Social")]
    Social,
    #[serde(rename = "Accessibility")]
    Accessibility,
    #[serde(rename = "HTML Structure")]
    Structure,
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Security")]
    Security,
    #[serde(rename = "Platform")]
    Platform,
    #[serde(rename = "Trust Signals")]
    TrustSignals,
    #[serde(rename = "Mobile")]
    Mobile,
    #[serde(rename = "External Resources")]
    ExternalResources,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Technical => "Technical SEO",
            Category::International => "International",
            Category::Content => "Content",
            Category::Links => "Links",
            Category::Images => "Images",
            Category::Schema => "Structured Data",
            Category::Social => "Social",
            Category::Accessibility => "Accessibility",
            Category::Structure => "HTML Structure",
            Category::Performance => "Performance",
            Category::Security => "Security",
            Category::Platform => "Platform",
            Category::TrustSignals => "Trust Signals",
            Category::Mobile => "Mobile",
            Category::ExternalResources => "External Resources",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A synthesized, severity-tagged finding with remediation guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditIssue {
    /// Stable kebab-case key, unique within one result.
    pub id: String,
    pub severity: Severity,
    pub category: Category,
    pub issue: String,
    /// DOM-path-like location, e.g. `<title>` or `<meta name="robots">`.
    pub location: String,
    pub fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditIssue {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        category: Category,
        issue: impl Into<String>,
        location: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            category,
            issue: issue.into(),
            location: location.into(),
            fix: fix.into(),
            current: None,
            details: None,
        }
    }

    pub fn with_current(mut self, current: impl Into<String>) -> Self {
        self.current = Some(current.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMethod {
    Url,
    Html,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub critical_issues: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
    pub total_checks: usize,
    pub passed_checks: usize,
}

impl AuditSummary {
    pub fn from_findings(issues: &[AuditIssue], passed: &[String]) -> Self {
        let count = |sev: Severity| issues.iter().filter(|i| i.severity == sev).count();
        Self {
            critical_issues: count(Severity::Critical),
            high_issues: count(Severity::High),
            medium_issues: count(Severity::Medium),
            low_issues: count(Severity::Low),
            total_checks: issues.len() + passed.len(),
            passed_checks: passed.len(),
        }
    }

    pub fn issue_count(&self) -> usize {
        self.critical_issues + self.high_issues + self.medium_issues + self.low_issues
    }
}

/// Aggregate root returned for one audited document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub schema_version: u32,
    pub url: Option<String>,
    pub timestamp: String,
    pub fetch_method: FetchMethod,
    pub score: u8,
    pub summary: AuditSummary,
    #[serde(flatten)]
    pub reports: CategoryReports,
    pub issues: Vec<AuditIssue>,
    pub passed: Vec<String>,
}

/// One typed fact record per audited dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReports {
    pub technical: TechnicalReport,
    pub international: InternationalReport,
    pub content: ContentReport,
    pub links: LinksReport,
    pub images: ImagesReport,
    pub schema: SchemaReport,
    pub social: SocialReport,
    pub accessibility: AccessibilityReport,
    pub structure: StructureReport,
    pub performance: PerformanceReport,
    pub security: SecurityReport,
    pub platform: PlatformReport,
    pub trust_signals: TrustSignalsReport,
    pub mobile: MobileReport,
    pub external_resources: ExternalResourcesReport,
}

// -------------
// Technical SEO
// -------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthStatus {
    #[default]
    Missing,
    TooShort,
    Optimal,
    TooLong,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFacts {
    pub content: Option<String>,
    /// Length in characters, not bytes.
    pub length: usize,
    pub status: LengthStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFacts {
    pub href: Option<String>,
    pub count: usize,
    pub is_self_referencing: bool,
    pub is_cross_domain: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsMetaFacts {
    pub content: Option<String>,
    pub googlebot: Option<String>,
    pub noindex: bool,
    pub nofollow: bool,
}

/// Filled by the robots.txt collaborator; `checked` stays false offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsTxtFacts {
    pub checked: bool,
    pub found: bool,
    pub content: Option<String>,
    pub blocks_page: bool,
}

/// Filled by the sitemap collaborator; `checked` stays false offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapFacts {
    pub checked: bool,
    pub found: bool,
    pub url: Option<String>,
    pub contains_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalReport {
    pub title: TextFacts,
    pub meta_description: TextFacts,
    pub canonical: CanonicalFacts,
    pub robots: RobotsMetaFacts,
    pub charset: Option<String>,
    pub has_content_type_meta: bool,
    pub has_doctype: bool,
    pub has_favicon: bool,
    pub is_https: bool,
    /// The page was audited with a parseable source URL.
    pub has_source_url: bool,
    pub url_length: usize,
    pub robots_txt: RobotsTxtFacts,
    pub sitemap: SitemapFacts,
}

// -------------
// International
// -------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HreflangTag {
    pub lang: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalReport {
    pub html_lang: Option<String>,
    pub html_lang_valid: bool,
    pub content_language: Option<String>,
    pub hreflang_tags: Vec<HreflangTag>,
    pub has_x_default: bool,
    pub has_self_reference: bool,
    pub invalid_region_codes: Vec<String>,
    pub invalid_language_codes: Vec<String>,
    pub relative_hrefs: Vec<String>,
}

// -------
// Content
// -------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingFacts {
    /// Counts for h1..h6 at index 0..5.
    pub counts: [usize; 6],
    pub h1: Vec<String>,
    pub outline: Vec<HeadingEntry>,
}

impl HeadingFacts {
    pub fn h1_count(&self) -> usize {
        self.counts[0]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseHit {
    pub phrase: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDensity {
    pub word: String,
    pub count: usize,
    /// Percentage of total words, rounded to two decimals.
    pub density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub headings: HeadingFacts,
    pub title_h1_duplicate: bool,
    pub duplicate_paragraph_count: usize,
    pub duplicate_paragraphs: Vec<String>,
    pub ai_score: u32,
    pub ai_phrases: Vec<PhraseHit>,
    pub keyword_density: Vec<KeywordDensity>,
    pub has_lorem_ipsum: bool,
}

// -----
// Links
// -----

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSample {
    pub href: String,
    pub text: String,
}

/// Result of one redirect or status probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkProbe {
    pub url: String,
    pub status: Option<u16>,
    pub final_url: Option<String>,
    pub redirects: usize,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksReport {
    pub total: usize,
    pub internal_count: usize,
    pub external_count: usize,
    pub contact_count: usize,
    pub nofollow_count: usize,
    pub broken_count: usize,
    pub broken_links: Vec<LinkSample>,
    pub generic_anchor_count: usize,
    pub generic_anchors: Vec<LinkSample>,
    pub unsafe_external_count: usize,
    pub unsafe_external_links: Vec<String>,
    pub external_domains: Vec<String>,
    pub internal_urls: Vec<String>,
    pub external_urls: Vec<String>,
    /// Network: redirect probes for internal links.
    pub redirect_probes: Vec<LinkProbe>,
    /// Network: status probes for external links.
    pub external_probes: Vec<LinkProbe>,
}

// ------
// Images
// ------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSize {
    pub url: String,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagesReport {
    pub total: usize,
    pub missing_alt_count: usize,
    pub missing_alt: Vec<String>,
    pub empty_alt_count: usize,
    pub missing_dimensions_count: usize,
    pub lazy_loaded_count: usize,
    pub lazy_above_fold_count: usize,
    pub clickable_without_alt_count: usize,
    pub srcset_count: usize,
    pub modern_format_count: usize,
    pub legacy_format_count: usize,
    pub image_urls: Vec<String>,
    /// Network: byte sizes for the first few images.
    pub sizes: Vec<ImageSize>,
}

// ---------------
// Structured data
// ---------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaItem {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// One entry per `@type` of this item that lacks required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incomplete: Vec<IncompleteType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteType {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    /// Number of JSON-LD blocks found.
    pub count: usize,
    pub items: Vec<SchemaItem>,
    pub types: Vec<String>,
    pub invalid_json_count: usize,
    pub microdata_count: usize,
    pub rdfa_count: usize,
    pub authors: Vec<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    pub has_review_data: bool,
    pub has_postal_address: bool,
}

impl SchemaReport {
    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t == name)
    }
}

// ------
// Social
// ------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraphFacts {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub site_name: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterFacts {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub site: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialReport {
    pub open_graph: OpenGraphFacts,
    pub twitter: TwitterFacts,
    pub og_complete: bool,
    pub og_missing: Vec<String>,
    pub og_image_absolute: bool,
    pub twitter_complete: bool,
}

// -------------
// Accessibility
// -------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkCounts {
    pub main: usize,
    pub nav: usize,
    pub header: usize,
    pub footer: usize,
    pub aside: usize,
    pub search: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingSkip {
    pub from: u8,
    pub to: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub landmarks: LandmarkCounts,
    pub buttons_without_label: usize,
    pub inputs_without_label: usize,
    pub links_without_text: usize,
    pub unlabeled_samples: Vec<String>,
    pub heading_skips: Vec<HeadingSkip>,
    pub has_skip_link: bool,
    pub has_lang: bool,
    pub invalid_aria_roles: Vec<String>,
    pub positive_tabindex_count: usize,
    pub iframes_without_title: usize,
}

// --------------
// HTML structure
// --------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub element_count: usize,
    pub max_depth: usize,
    pub has_doctype: bool,
    pub deprecated_tags: Vec<TagCount>,
    pub duplicate_ids: Vec<String>,
    pub inline_style_count: usize,
    pub iframe_count: usize,
    pub form_count: usize,
    pub html_size_bytes: usize,
    /// Visible text bytes as a percentage of total HTML bytes.
    pub text_ratio: f64,
}

// -----------
// Performance
// -----------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub total_scripts: usize,
    pub external_scripts: usize,
    pub inline_scripts: usize,
    pub async_scripts: usize,
    pub defer_scripts: usize,
    pub render_blocking_scripts: usize,
    pub render_blocking_script_urls: Vec<String>,
    pub stylesheets: usize,
    pub render_blocking_stylesheets: usize,
    pub inline_styles: usize,
    pub preload_count: usize,
    pub preloads_without_as: Vec<String>,
    pub preconnect_count: usize,
    pub dns_prefetch_count: usize,
    pub font_face_count: usize,
    pub font_faces_without_display: usize,
    pub html_size_bytes: usize,
}

// --------
// Security
// --------

/// Filled by the TLS collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslFacts {
    pub valid: bool,
    pub issuer: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub days_until_expiry: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Filled by the security-header collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityHeaderFacts {
    pub headers: BTreeMap<String, Option<String>>,
    pub score: u8,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub is_https: bool,
    pub mixed_content_count: usize,
    pub mixed_content_urls: Vec<String>,
    pub protocol_relative_count: usize,
    pub unsafe_external_links: usize,
    pub insecure_form_actions: usize,
    pub has_csp_meta: bool,
    pub has_referrer_policy_meta: bool,
    pub inline_event_handlers: usize,
    pub ssl: Option<SslFacts>,
    pub headers: Option<SecurityHeaderFacts>,
}

// --------
// Platform
// --------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMethod {
    Ssr,
    Ssg,
    Csr,
    SsrOrStatic,
    #[default]
    Unknown,
}

impl RenderMethod {
    pub fn label(self) -> &'static str {
        match self {
            RenderMethod::Ssr => "SSR",
            RenderMethod::Ssg => "SSG",
            RenderMethod::Csr => "CSR",
            RenderMethod::SsrOrStatic => "SSR/Static",
            RenderMethod::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformReport {
    pub cms: Vec<String>,
    pub frameworks: Vec<String>,
    pub analytics: Vec<String>,
    pub advertising: Vec<String>,
    pub generator: Option<String>,
    pub render_method: RenderMethod,
    pub render_evidence: Option<String>,
}

// -------------
// Trust signals
// -------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorSource {
    Schema,
    Meta,
    Markup,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustSignalsReport {
    pub has_about_page: bool,
    pub has_contact_page: bool,
    pub has_privacy_policy: bool,
    pub has_terms: bool,
    pub has_cookie_notice: bool,
    pub has_author: bool,
    pub author: Option<String>,
    pub author_source: AuthorSource,
    pub has_trust_badges: bool,
    pub has_payment_icons: bool,
    pub has_reviews: bool,
    pub has_certifications: bool,
    pub has_phone: bool,
    pub has_email: bool,
    pub has_address: bool,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    pub social_link_count: usize,
    pub social_platforms: Vec<String>,
    pub social_profiles: Vec<SocialProfile>,
}

impl TrustSignalsReport {
    /// Number of positive trust signals present.
    pub fn signal_count(&self) -> usize {
        [
            self.has_about_page,
            self.has_contact_page,
            self.has_privacy_policy,
            self.has_terms,
            self.has_author,
            self.has_reviews,
            self.has_phone || self.has_email || self.has_address,
            self.social_link_count > 0,
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

// ------
// Mobile
// ------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileReport {
    pub viewport: Option<String>,
    pub has_device_width: bool,
    pub has_initial_scale: bool,
    pub blocks_zoom: bool,
    pub has_apple_touch_icon: bool,
    pub has_theme_color: bool,
    pub has_manifest: bool,
    pub has_media_queries: bool,
    pub fixed_width_elements: usize,
}

// ------------------
// External resources
// ------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalResourcesReport {
    pub total: usize,
    pub scripts: usize,
    pub stylesheets: usize,
    pub iframes: usize,
    pub fonts: usize,
    pub images: usize,
    pub domains: Vec<DomainCount>,
}

// -------------
// Network facts
// -------------

/// Everything the network collaborators found for one page. Every field
/// keeps its default when the matching probe did not run or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFacts {
    pub robots_txt: RobotsTxtFacts,
    pub sitemap: SitemapFacts,
    pub ssl: Option<SslFacts>,
    pub headers: Option<SecurityHeaderFacts>,
    pub redirect_probes: Vec<LinkProbe>,
    pub external_probes: Vec<LinkProbe>,
    pub image_sizes: Vec<ImageSize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_most_severe_first() {
        let mut v = vec![Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        v.sort();
        assert_eq!(v, Severity::ALL.to_vec());
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn category_serializes_as_display_label() {
        let json = serde_json::to_string(&Category::Schema).unwrap();
        assert_eq!(json, "\"Structured Data\"");
        assert_eq!(Category::TrustSignals.to_string(), "Trust Signals");
    }

    #[test]
    fn issue_optional_fields_are_omitted_when_absent() {
        let issue = AuditIssue::new(
            "no-title",
            Severity::Critical,
            Category::Technical,
            "Missing title",
            "<title>",
            "Add a title",
        );
        let v = serde_json::to_value(&issue).unwrap();
        assert!(v.get("current").is_none());
        assert!(v.get("details").is_none());

        let v = serde_json::to_value(issue.with_current("x")).unwrap();
        assert_eq!(v["current"], "x");
    }

    #[test]
    fn summary_counts_each_severity() {
        let mk = |sev| AuditIssue::new("a", sev, Category::Content, "i", "l", "f");
        let issues = vec![
            mk(Severity::Critical),
            mk(Severity::Low),
            mk(Severity::Low),
            mk(Severity::Medium),
        ];
        let passed = vec!["ok".to_string()];
        let summary = AuditSummary::from_findings(&issues, &passed);
        assert_eq!(summary.critical_issues, 1);
        assert_eq!(summary.high_issues, 0);
        assert_eq!(summary.medium_issues, 1);
        assert_eq!(summary.low_issues, 2);
        assert_eq!(summary.issue_count(), issues.len());
        assert_eq!(summary.total_checks, 5);
        assert_eq!(summary.passed_checks, 1);
    }

    #[test]
    fn trust_signal_count_groups_contact_channels() {
        let report = TrustSignalsReport {
            has_phone: true,
            has_email: true,
            has_about_page: true,
            ..Default::default()
        };
        assert_eq!(report.signal_count(), 2);
    }

    #[test]
    fn category_reports_flatten_into_result() {
        let result = AuditResult {
            schema_version: AUDIT_SCHEMA_VERSION,
            url: None,
            timestamp: "1970-01-01T00:00:00Z".into(),
            fetch_method: FetchMethod::Html,
            score: 100,
            summary: AuditSummary::default(),
            reports: CategoryReports::default(),
            issues: vec![],
            passed: vec![],
        };
        let v = serde_json::to_value(&result).unwrap();
        assert!(v.get("technical").is_some());
        assert!(v.get("trustSignals").is_some());
        assert!(v.get("externalResources").is_some());
        assert_eq!(v["fetchMethod"], "html");
    }
}
