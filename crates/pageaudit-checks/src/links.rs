use std::collections::BTreeSet;

use pageaudit_dom::{Document, ElementRef, LinkKind, attr, attr_tokens, element_text};
use pageaudit_patterns::anchors::is_generic_anchor;
use pageaudit_patterns::words::is_void_link;
use pageaudit_types::{LinkSample, LinksReport};

use crate::util::{push_sample, truncate_chars};

/// Upper bound on the URL lists kept for network probing.
const PROBE_CANDIDATES: usize = 50;

pub fn build_links_report(doc: &Document) -> LinksReport {
    let mut r = LinksReport::default();
    let mut domains = BTreeSet::new();
    let mut internal_seen = BTreeSet::new();
    let mut external_seen = BTreeSet::new();

    for a in doc.select("a[href]") {
        r.total += 1;
        let href = attr(a, "href").unwrap_or_default().trim();
        let text = element_text(a);

        if attr_tokens(a, "rel").iter().any(|t| t == "nofollow") {
            r.nofollow_count += 1;
        }
        if is_generic_anchor(&text) {
            r.generic_anchor_count += 1;
            push_sample(&mut r.generic_anchors, sample(href, &text));
        }
        if href.is_empty() || is_void_link(href) {
            r.broken_count += 1;
            push_sample(&mut r.broken_links, sample(href, &text));
            continue;
        }

        match doc.classify(href) {
            LinkKind::Contact => r.contact_count += 1,
            LinkKind::Internal(url) => {
                r.internal_count += 1;
                if let Some(mut url) = url {
                    url.set_fragment(None);
                    let s = url.to_string();
                    if internal_seen.len() < PROBE_CANDIDATES && internal_seen.insert(s.clone()) {
                        r.internal_urls.push(s);
                    }
                }
            }
            LinkKind::External(mut url) => {
                r.external_count += 1;
                if let Some(host) = url.host_str() {
                    domains.insert(host.to_ascii_lowercase());
                }
                if opens_unsafely(a) {
                    r.unsafe_external_count += 1;
                    push_sample(&mut r.unsafe_external_links, href.to_string());
                }
                url.set_fragment(None);
                let s = url.to_string();
                if external_seen.len() < PROBE_CANDIDATES && external_seen.insert(s.clone()) {
                    r.external_urls.push(s);
                }
            }
        }
    }

    r.external_domains = domains.into_iter().collect();
    r
}

/// `target="_blank"` without `noopener` in `rel`.
pub(crate) fn opens_unsafely(a: ElementRef<'_>) -> bool {
    let blank = attr(a, "target").is_some_and(|t| t.trim().eq_ignore_ascii_case("_blank"));
    blank && !attr_tokens(a, "rel").iter().any(|t| t == "noopener")
}

/// Number of external anchors that open unsafely.
pub(crate) fn count_unsafe_external(doc: &Document) -> usize {
    doc.select("a[href]")
        .into_iter()
        .filter(|a| {
            let href = attr(*a, "href").unwrap_or_default();
            matches!(doc.classify(href), LinkKind::External(_)) && opens_unsafely(*a)
        })
        .count()
}

fn sample(href: &str, text: &str) -> LinkSample {
    LinkSample {
        href: truncate_chars(href, 200),
        text: truncate_chars(text, 100),
    }
}
