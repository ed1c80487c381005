use pageaudit_dom::{Document, attr, attr_tokens, element_text, same_host};
use pageaudit_types::{
    CanonicalFacts, LengthStatus, RobotsMetaFacts, TechnicalReport, TextFacts,
};

pub const TITLE_MIN: usize = 30;
pub const TITLE_MAX: usize = 60;
pub const DESCRIPTION_MIN: usize = 120;
pub const DESCRIPTION_MAX: usize = 160;

pub fn build_technical_report(doc: &Document) -> TechnicalReport {
    let title = doc
        .first("head title")
        .or_else(|| doc.first("title"))
        .map(element_text);
    let description = doc.meta_name("description");

    TechnicalReport {
        title: text_facts(title, TITLE_MIN, TITLE_MAX),
        meta_description: text_facts(description, DESCRIPTION_MIN, DESCRIPTION_MAX),
        canonical: canonical_facts(doc),
        robots: robots_facts(doc),
        charset: charset(doc),
        has_content_type_meta: content_type_meta(doc).is_some(),
        has_doctype: doc.has_doctype(),
        has_favicon: doc
            .select("link[rel]")
            .into_iter()
            .any(|l| attr_tokens(l, "rel").iter().any(|t| t == "icon")),
        is_https: doc.is_https(),
        has_source_url: doc.source_url().is_some(),
        url_length: doc.source_url().map_or(0, |u| u.as_str().chars().count()),
        robots_txt: Default::default(),
        sitemap: Default::default(),
    }
}

fn text_facts(content: Option<String>, min: usize, max: usize) -> TextFacts {
    let content = content.filter(|c| !c.trim().is_empty());
    let length = content.as_deref().map_or(0, |c| c.chars().count());
    let status = match &content {
        None => LengthStatus::Missing,
        Some(_) if length < min => LengthStatus::TooShort,
        Some(_) if length > max => LengthStatus::TooLong,
        Some(_) => LengthStatus::Optimal,
    };
    TextFacts {
        content,
        length,
        status,
    }
}

fn canonical_facts(doc: &Document) -> CanonicalFacts {
    // Every canonical tag counts, duplicates included.
    let hrefs: Vec<String> = doc
        .select("link[rel]")
        .into_iter()
        .filter(|l| attr_tokens(*l, "rel").iter().any(|t| t == "canonical"))
        .filter_map(|l| attr(l, "href").map(|h| h.trim().to_string()))
        .collect();
    let count = hrefs.len();
    let href = hrefs.into_iter().next();

    let resolved = href.as_deref().and_then(|h| doc.resolve(h));
    let is_cross_domain = match (resolved.as_ref().and_then(|u| u.host_str()), doc.source_host()) {
        (Some(canon), Some(src)) => !same_host(canon, src),
        _ => false,
    };
    let is_self_referencing = match (&resolved, doc.source_url()) {
        (Some(canon), Some(src)) => normalize_url(canon.as_str()) == normalize_url(src.as_str()),
        _ => false,
    };

    CanonicalFacts {
        href,
        count,
        is_self_referencing,
        is_cross_domain,
    }
}

fn normalize_url(s: &str) -> String {
    let no_fragment = s.split('#').next().unwrap_or(s);
    no_fragment.trim_end_matches('/').to_lowercase()
}

fn robots_facts(doc: &Document) -> RobotsMetaFacts {
    let content = doc.meta_name("robots");
    let googlebot = doc.meta_name("googlebot");
    let combined = format!(
        "{} {}",
        content.as_deref().unwrap_or_default(),
        googlebot.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    RobotsMetaFacts {
        noindex: combined.contains("noindex"),
        nofollow: combined.contains("nofollow"),
        content,
        googlebot,
    }
}

fn content_type_meta(doc: &Document) -> Option<String> {
    doc.select("meta[http-equiv]")
        .into_iter()
        .find(|m| attr(*m, "http-equiv").is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type")))
        .map(|m| attr(m, "content").unwrap_or_default().to_string())
}

/// `<meta charset>` first, then the charset parameter of a content-type meta.
fn charset(doc: &Document) -> Option<String> {
    if let Some(cs) = doc.attr_of("meta[charset]", "charset") {
        let cs = cs.trim();
        if !cs.is_empty() {
            return Some(cs.to_string());
        }
    }
    let content = content_type_meta(doc)?;
    let lower = content.to_ascii_lowercase();
    let idx = lower.find("charset=")?;
    let value = content[idx + "charset=".len()..]
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(['"', '\''])
        .to_string();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(html: &str, url: Option<&str>) -> TechnicalReport {
        build_technical_report(&Document::parse(html, url))
    }

    #[test]
    fn title_length_is_bucketed_in_chars() {
        let r = report("<title>Short</title>", None);
        assert_eq!(r.title.status, LengthStatus::TooShort);
        assert_eq!(r.title.length, 5);

        let exact = "é".repeat(30);
        let r = report(&format!("<title>{exact}</title>"), None);
        assert_eq!(r.title.length, 30);
        assert_eq!(r.title.status, LengthStatus::Optimal);

        let long = "x".repeat(61);
        let r = report(&format!("<title>{long}</title>"), None);
        assert_eq!(r.title.status, LengthStatus::TooLong);
    }

    #[test]
    fn source_url_presence_is_recorded() {
        let r = report("<title>Home</title>", Some("http://a.com/"));
        assert!(r.has_source_url);
        assert!(!r.is_https);
        let r = report("<title>Home</title>", None);
        assert!(!r.has_source_url);
        assert!(!report("", Some("not a url")).has_source_url);
    }

    #[test]
    fn blank_title_is_missing() {
        let r = report("<title>   </title>", None);
        assert_eq!(r.title.status, LengthStatus::Missing);
        assert!(r.title.content.is_none());
    }

    #[test]
    fn multiple_canonicals_are_counted() {
        let html = r#"<link rel="canonical" href="https://a.com/"><link rel="canonical" href="https://a.com/">"#;
        let r = report(html, Some("https://a.com"));
        assert_eq!(r.canonical.count, 2);
        assert!(r.canonical.is_self_referencing);
        assert!(!r.canonical.is_cross_domain);
    }

    #[test]
    fn cross_domain_canonical_compares_hosts() {
        let html = r#"<link rel="canonical" href="https://b.com/page">"#;
        let r = report(html, Some("https://a.com/page"));
        assert!(r.canonical.is_cross_domain);
        assert!(!r.canonical.is_self_referencing);
    }

    #[test]
    fn robots_and_googlebot_are_combined() {
        let html = r#"<meta name="robots" content="index"><meta name="googlebot" content="NOINDEX">"#;
        let r = report(html, None);
        assert!(r.robots.noindex);
        assert!(!r.robots.nofollow);
    }

    #[test]
    fn charset_and_content_type_are_distinct() {
        let r = report(r#"<meta charset="utf-8">"#, None);
        assert_eq!(r.charset.as_deref(), Some("utf-8"));
        assert!(!r.has_content_type_meta);

        let r = report(
            r#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1251">"#,
            None,
        );
        assert_eq!(r.charset.as_deref(), Some("windows-1251"));
        assert!(r.has_content_type_meta);
    }

    #[test]
    fn favicon_matches_shortcut_icon() {
        let r = report(r#"<link rel="shortcut icon" href="/f.ico">"#, None);
        assert!(r.has_favicon);
    }
}
