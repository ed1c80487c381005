use std::sync::LazyLock;

use pageaudit_dom::{Document, attr, element_text};
use pageaudit_patterns::signatures::SOCIAL_PLATFORMS;
use pageaudit_patterns::trust::{
    ABOUT, AUTHOR_SELECTORS, CERTIFICATIONS, CONTACT, COOKIE_NOTICE, COOKIE_POLICY, PAYMENT,
    PRIVACY, REVIEWS, TERMS, TRUST_BADGES,
};
use pageaudit_types::{AuthorSource, SchemaReport, SocialProfile, TrustSignalsReport};
use regex::Regex;

use crate::util::{contains_word, truncate_chars};

/// Link text longer than this is prose, not navigation.
const NAV_TEXT_MAX_WORDS: usize = 4;
const AUTHOR_MAX_CHARS: usize = 100;

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\d[\d\s().-]{7,18}\d").expect("valid regex literal"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex literal")
});

/// `schema` supplies authors, dates and review data found in structured data.
pub fn build_trust_signals_report(doc: &Document, schema: &SchemaReport) -> TrustSignalsReport {
    let mut r = TrustSignalsReport::default();
    let mut tel_or_mail = (false, false);

    for a in doc.select("a[href]") {
        let href = attr(a, "href").unwrap_or_default().trim().to_lowercase();
        let text = element_text(a).to_lowercase();
        let nav_text = if text.split_whitespace().count() <= NAV_TEXT_MAX_WORDS {
            text.as_str()
        } else {
            ""
        };
        let link_is = |needles: &[&str]| {
            needles.iter().any(|n| href.contains(n) || nav_text.contains(n))
        };

        r.has_about_page |= link_is(ABOUT);
        r.has_contact_page |= link_is(CONTACT);
        r.has_privacy_policy |= link_is(PRIVACY);
        r.has_terms |= link_is(TERMS);
        r.has_cookie_notice |= link_is(COOKIE_POLICY);

        tel_or_mail.0 |= href.starts_with("tel:");
        tel_or_mail.1 |= href.starts_with("mailto:");

        if let Some(platform) = social_platform(&href) {
            r.social_link_count += 1;
            if !r.social_platforms.iter().any(|p| p == platform) {
                r.social_platforms.push(platform.to_string());
                r.social_profiles.push(SocialProfile {
                    platform: platform.to_string(),
                    url: attr(a, "href").unwrap_or_default().trim().to_string(),
                });
            }
        }
    }

    let lower = doc.lower();
    r.has_cookie_notice |= COOKIE_NOTICE.iter().any(|n| lower.contains(n));
    r.has_trust_badges = TRUST_BADGES.iter().any(|n| contains_word(lower, n));
    r.has_payment_icons = PAYMENT.iter().any(|n| contains_word(lower, n));
    r.has_reviews = schema.has_review_data || REVIEWS.iter().any(|n| contains_word(lower, n));
    r.has_certifications = CERTIFICATIONS.iter().any(|n| contains_word(lower, n));

    let body_text = doc.body_text();
    r.has_phone = tel_or_mail.0 || PHONE.is_match(&body_text);
    r.has_email = tel_or_mail.1 || EMAIL.is_match(&body_text);
    r.has_address = schema.has_postal_address || doc.count("address, [itemprop=address]") > 0;

    let (author, source) = author(doc, schema);
    r.has_author = author.is_some();
    r.author = author;
    r.author_source = source;

    r.date_published = schema
        .date_published
        .clone()
        .or_else(|| doc.meta_property("article:published_time"))
        .or_else(|| doc.attr_of("time[datetime]", "datetime"));
    r.date_modified = schema
        .date_modified
        .clone()
        .or_else(|| doc.meta_property("article:modified_time"));

    r
}

/// Schema author first, then `<meta name=author>`, then common markup.
fn author(doc: &Document, schema: &SchemaReport) -> (Option<String>, AuthorSource) {
    if let Some(a) = schema.authors.first() {
        return (Some(a.clone()), AuthorSource::Schema);
    }
    if let Some(a) = doc.meta_name("author").filter(|a| !a.is_empty()) {
        return (Some(a), AuthorSource::Meta);
    }
    for sel in AUTHOR_SELECTORS {
        let found = doc
            .select(sel)
            .into_iter()
            .map(element_text)
            .find(|t| !t.is_empty());
        if let Some(t) = found {
            return (Some(truncate_chars(&t, AUTHOR_MAX_CHARS)), AuthorSource::Markup);
        }
    }
    (None, AuthorSource::None)
}

/// Platform needles must start at a host boundary so `x.com/` does not match
/// `netflix.com/`.
fn social_platform(href: &str) -> Option<&'static str> {
    SOCIAL_PLATFORMS
        .iter()
        .find(|sig| {
            sig.patterns
                .iter()
                .any(|p| href.contains(&format!("//{p}")) || href.contains(&format!(".{p}")))
        })
        .map(|sig| sig.name)
}
