//! Issue ID registry.
//!
//! Stable kebab-case identifiers for audit issues, grouped by category.
//! Schema-completeness issues are derived per type via [`schema_incomplete`].

/// Technical SEO issues
pub mod technical {
    pub const NO_TITLE: &str = "no-title";
    pub const TITLE_TOO_SHORT: &str = "title-too-short";
    pub const TITLE_TOO_LONG: &str = "title-too-long";
    pub const NO_META_DESCRIPTION: &str = "no-meta-description";
    pub const META_DESCRIPTION_TOO_SHORT: &str = "meta-description-too-short";
    pub const META_DESCRIPTION_TOO_LONG: &str = "meta-description-too-long";
    pub const NO_CANONICAL: &str = "no-canonical";
    pub const MULTIPLE_CANONICAL: &str = "multiple-canonical";
    pub const CANONICAL_CROSS_DOMAIN: &str = "canonical-cross-domain";
    /// Page carries a noindex directive
    pub const NOINDEX: &str = "noindex";
    pub const NOFOLLOW: &str = "nofollow";
    pub const NO_CHARSET: &str = "no-charset";
    pub const NO_DOCTYPE: &str = "no-doctype";
    pub const NOT_HTTPS: &str = "not-https";
    pub const NO_FAVICON: &str = "no-favicon";
    /// Only emitted after a robots.txt probe
    pub const ROBOTS_TXT_MISSING: &str = "robots-txt-missing";
    pub const ROBOTS_TXT_BLOCKS_PAGE: &str = "robots-txt-blocks-page";
    /// Only emitted after a sitemap probe
    pub const SITEMAP_MISSING: &str = "sitemap-missing";
}

/// International issues
pub mod international {
    pub const NO_HTML_LANG: &str = "no-html-lang";
    pub const INVALID_HTML_LANG: &str = "invalid-html-lang";
    pub const HREFLANG_MISSING_X_DEFAULT: &str = "hreflang-missing-x-default";
    pub const HREFLANG_NO_SELF_REFERENCE: &str = "hreflang-no-self-reference";
    pub const HREFLANG_INVALID_REGION: &str = "hreflang-invalid-region";
    pub const HREFLANG_INVALID_LANGUAGE: &str = "hreflang-invalid-language";
    pub const HREFLANG_RELATIVE_URL: &str = "hreflang-relative-url";
}

/// Content issues
pub mod content {
    pub const NO_H1: &str = "no-h1";
    pub const MULTIPLE_H1: &str = "multiple-h1";
    pub const THIN_CONTENT: &str = "thin-content";
    pub const TITLE_H1_DUPLICATE: &str = "title-h1-duplicate";
    pub const DUPLICATE_PARAGRAPHS: &str = "duplicate-paragraphs";
    pub const AI_CONTENT_HIGH: &str = "ai-content-high";
    pub const AI_CONTENT_MODERATE: &str = "ai-content-moderate";
    pub const KEYWORD_STUFFING: &str = "keyword-stuffing";
    pub const LOREM_IPSUM: &str = "lorem-ipsum";
}

/// Link issues
pub mod links {
    pub const BROKEN_LINKS: &str = "broken-links";
    pub const GENERIC_ANCHOR_TEXT: &str = "generic-anchor-text";
    pub const UNSAFE_EXTERNAL_LINKS: &str = "unsafe-external-links";
    pub const NO_INTERNAL_LINKS: &str = "no-internal-links";
    pub const TOO_MANY_LINKS: &str = "too-many-links";
    pub const BROKEN_EXTERNAL_LINKS: &str = "broken-external-links";
    pub const REDIRECT_CHAINS: &str = "redirect-chains";
}

/// Image issues
pub mod images {
    pub const MISSING_ALT: &str = "images-missing-alt";
    pub const MISSING_DIMENSIONS: &str = "images-missing-dimensions";
    pub const LAZY_ABOVE_FOLD: &str = "lazy-above-fold";
    pub const CLICKABLE_NO_ALT: &str = "clickable-images-no-alt";
    pub const LEGACY_FORMATS: &str = "legacy-image-formats";
    pub const LARGE_IMAGES: &str = "large-images";
}

/// Structured data issues
pub mod schema {
    pub const NO_STRUCTURED_DATA: &str = "no-structured-data";
    pub const INVALID_JSON: &str = "schema-invalid-json";
    pub const MISSING_CONTEXT: &str = "schema-missing-context";
    pub const INCOMPLETE_PREFIX: &str = "schema-incomplete-";
}

/// Social issues
pub mod social {
    pub const NO_OPEN_GRAPH: &str = "no-open-graph";
    pub const OG_INCOMPLETE: &str = "og-incomplete";
    pub const NO_TWITTER_CARD: &str = "no-twitter-card";
    pub const OG_IMAGE_RELATIVE: &str = "og-image-relative";
}

/// Accessibility issues
pub mod accessibility {
    pub const NO_MAIN_LANDMARK: &str = "no-main-landmark";
    pub const BUTTONS_WITHOUT_LABEL: &str = "buttons-without-label";
    pub const INPUTS_WITHOUT_LABEL: &str = "inputs-without-label";
    pub const LINKS_WITHOUT_TEXT: &str = "links-without-text";
    pub const HEADING_HIERARCHY_SKIP: &str = "heading-hierarchy-skip";
    pub const NO_SKIP_LINK: &str = "no-skip-link";
    pub const INVALID_ARIA_ROLES: &str = "invalid-aria-roles";
    pub const POSITIVE_TABINDEX: &str = "positive-tabindex";
    pub const IFRAMES_WITHOUT_TITLE: &str = "iframes-without-title";
}

/// HTML structure issues
pub mod structure {
    pub const DEPRECATED_TAGS: &str = "deprecated-tags";
    pub const DUPLICATE_IDS: &str = "duplicate-ids";
    pub const EXCESSIVE_DOM_SIZE: &str = "excessive-dom-size";
    pub const EXCESSIVE_DOM_DEPTH: &str = "excessive-dom-depth";
    pub const MANY_INLINE_STYLES: &str = "many-inline-styles";
}

/// Performance issues
pub mod performance {
    pub const RENDER_BLOCKING_SCRIPTS: &str = "render-blocking-scripts";
    pub const RENDER_BLOCKING_STYLESHEETS: &str = "render-blocking-stylesheets";
    pub const PRELOAD_MISSING_AS: &str = "preload-missing-as";
    pub const FONT_DISPLAY_MISSING: &str = "font-display-missing";
    pub const LARGE_HTML: &str = "large-html";
    pub const TOO_MANY_SCRIPTS: &str = "too-many-scripts";
}

/// Security issues
pub mod security {
    pub const MIXED_CONTENT: &str = "mixed-content";
    pub const PROTOCOL_RELATIVE_URLS: &str = "protocol-relative-urls";
    pub const INSECURE_FORM_ACTION: &str = "insecure-form-action";
    pub const MISSING_SECURITY_HEADERS: &str = "missing-security-headers";
    pub const SSL_INVALID: &str = "ssl-invalid";
    pub const SSL_EXPIRING: &str = "ssl-expiring";
}

/// Platform issues
pub mod platform {
    pub const CLIENT_SIDE_RENDERING: &str = "client-side-rendering";
}

/// Trust signal issues
pub mod trust {
    pub const NO_ABOUT_PAGE: &str = "no-about-page";
    pub const NO_CONTACT_PAGE: &str = "no-contact-page";
    pub const NO_PRIVACY_POLICY: &str = "no-privacy-policy";
    pub const NO_AUTHOR: &str = "no-author";
    pub const NO_SOCIAL_LINKS: &str = "no-social-links";
}

/// Mobile issues
pub mod mobile {
    pub const NO_VIEWPORT: &str = "no-viewport";
    pub const VIEWPORT_NO_DEVICE_WIDTH: &str = "viewport-no-device-width";
    pub const VIEWPORT_BLOCKS_ZOOM: &str = "viewport-blocks-zoom";
    pub const NO_APPLE_TOUCH_ICON: &str = "no-apple-touch-icon";
}

/// External resource issues
pub mod external {
    pub const MANY_THIRD_PARTY_DOMAINS: &str = "many-third-party-domains";
}

/// Build the per-type completeness id, e.g. `Product` -> `schema-incomplete-product`
/// and `LocalBusiness` -> `schema-incomplete-local-business`.
pub fn schema_incomplete(schema_type: &str) -> String {
    let mut out = String::from(schema::INCOMPLETE_PREFIX);
    let mut prev_lower = false;
    for ch in schema_type.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_lower = true;
        } else {
            if !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        }
    }
    out
}
