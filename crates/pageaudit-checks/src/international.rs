use pageaudit_dom::{Document, attr, attr_tokens};
use pageaudit_patterns::language::is_valid_language_tag;
use pageaudit_types::{HreflangTag, InternationalReport};
use url::Url;

const X_DEFAULT: &str = "x-default";

pub fn build_international_report(doc: &Document) -> InternationalReport {
    let html_lang = attr(doc.html_element(), "lang")
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);
    let content_language = doc
        .select("meta[http-equiv]")
        .into_iter()
        .find(|m| {
            attr(*m, "http-equiv").is_some_and(|v| v.trim().eq_ignore_ascii_case("content-language"))
        })
        .and_then(|m| attr(m, "content"))
        .map(|c| c.trim().to_string());

    let hreflang_tags: Vec<HreflangTag> = doc
        .select("link[hreflang]")
        .into_iter()
        .filter(|l| attr_tokens(*l, "rel").iter().any(|t| t == "alternate"))
        .map(|l| HreflangTag {
            lang: attr(l, "hreflang").unwrap_or_default().trim().to_string(),
            href: attr(l, "href").unwrap_or_default().trim().to_string(),
        })
        .collect();

    let has_x_default = hreflang_tags
        .iter()
        .any(|t| t.lang.eq_ignore_ascii_case(X_DEFAULT));

    let source = doc.source_url().map(|u| normalize(u.as_str()));
    let has_self_reference = source
        .as_ref()
        .is_some_and(|src| hreflang_tags.iter().any(|t| &normalize(&t.href) == src));

    let mut invalid_region_codes = Vec::new();
    let mut invalid_language_codes = Vec::new();
    let mut relative_hrefs = Vec::new();
    for tag in &hreflang_tags {
        if Url::parse(&tag.href).is_err() {
            relative_hrefs.push(tag.href.clone());
        }
        if tag.lang.eq_ignore_ascii_case(X_DEFAULT) {
            continue;
        }
        if has_bad_region(&tag.lang) {
            invalid_region_codes.push(tag.lang.clone());
        }
        if !is_valid_language_tag(&tag.lang) {
            invalid_language_codes.push(tag.lang.clone());
        }
    }

    InternationalReport {
        html_lang_valid: html_lang.as_deref().is_some_and(is_valid_language_tag),
        html_lang,
        content_language,
        hreflang_tags,
        has_x_default,
        has_self_reference,
        invalid_region_codes,
        invalid_language_codes,
        relative_hrefs,
    }
}

/// For `xx-YY`, the two-letter region must already be upper-case.
fn has_bad_region(lang: &str) -> bool {
    let mut parts = lang.split('-');
    let _primary = parts.next();
    match parts.next() {
        Some(region) if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) => {
            region != region.to_ascii_uppercase()
        }
        _ => false,
    }
}

fn normalize(s: &str) -> String {
    s.trim().trim_end_matches('/').to_lowercase()
}
