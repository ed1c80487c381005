use pageaudit_dom::{Document, ElementRef, attr, attr_tokens};
use pageaudit_types::SecurityReport;

use crate::links::count_unsafe_external;
use crate::util::{push_sample, truncate_chars};

const SRC_RESOURCES: &str = "img[src], script[src], iframe[src], audio[src], video[src], source[src], embed[src]";
const RESOURCE_RELS: &[&str] = &["stylesheet", "icon", "preload", "modulepreload", "manifest", "apple-touch-icon"];

/// TLS and response-header facts stay `None` until the network phase fills them.
pub fn build_security_report(doc: &Document) -> SecurityReport {
    let is_https = doc.is_https();
    let mut r = SecurityReport {
        is_https,
        unsafe_external_links: count_unsafe_external(doc),
        ..Default::default()
    };

    for url in resource_urls(doc) {
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("//") {
            r.protocol_relative_count += 1;
        } else if is_https && lower.starts_with("http://") {
            r.mixed_content_count += 1;
            push_sample(&mut r.mixed_content_urls, truncate_chars(url, 200));
        }
    }

    r.insecure_form_actions = doc
        .select("form[action]")
        .into_iter()
        .filter(|f| {
            attr(*f, "action").is_some_and(|a| a.trim().to_ascii_lowercase().starts_with("http://"))
        })
        .count();

    r.has_csp_meta = doc.select("meta[http-equiv]").into_iter().any(|m| {
        attr(m, "http-equiv").is_some_and(|v| v.trim().eq_ignore_ascii_case("content-security-policy"))
    });
    r.has_referrer_policy_meta = doc.meta_name("referrer").is_some();
    r.inline_event_handlers = doc
        .elements_with_depth()
        .into_iter()
        .filter(|(el, _)| has_event_handler(*el))
        .count();
    r
}

fn resource_urls<'a>(doc: &'a Document) -> Vec<&'a str> {
    let mut out: Vec<&str> = doc
        .select(SRC_RESOURCES)
        .into_iter()
        .filter_map(|el| attr(el, "src").map(str::trim))
        .collect();
    for link in doc.select("link[href]") {
        if attr_tokens(link, "rel").iter().any(|t| RESOURCE_RELS.contains(&t.as_str())) {
            if let Some(href) = attr(link, "href") {
                out.push(href.trim());
            }
        }
    }
    out
}

fn has_event_handler(el: ElementRef<'_>) -> bool {
    el.value()
        .attrs()
        .any(|(name, _)| name.len() > 2 && name.to_ascii_lowercase().starts_with("on"))
}
