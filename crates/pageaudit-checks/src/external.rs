use std::collections::BTreeMap;

use pageaudit_dom::{Document, attr, attr_tokens, is_third_party};
use pageaudit_types::{DomainCount, ExternalResourcesReport};

const FONT_EXTENSIONS: &[&str] = &[".woff2", ".woff", ".ttf", ".otf", ".eot"];
const FONT_HOSTS: &[&str] = &["fonts.googleapis.com", "fonts.gstatic.com", "use.typekit.net"];

#[derive(Clone, Copy)]
enum Kind {
    Script,
    Stylesheet,
    Iframe,
    Font,
    Image,
}

pub fn build_external_resources_report(doc: &Document) -> ExternalResourcesReport {
    let mut refs: Vec<(Kind, &str)> = Vec::new();
    for s in doc.select("script[src]") {
        refs.extend(attr(s, "src").map(|v| (Kind::Script, v)));
    }
    for f in doc.select("iframe[src]") {
        refs.extend(attr(f, "src").map(|v| (Kind::Iframe, v)));
    }
    for i in doc.select("img[src]") {
        refs.extend(attr(i, "src").map(|v| (Kind::Image, v)));
    }
    for link in doc.select("link[href]") {
        let Some(href) = attr(link, "href") else {
            continue;
        };
        let rel = attr_tokens(link, "rel");
        let as_font = attr(link, "as").is_some_and(|a| a.eq_ignore_ascii_case("font"));
        if as_font || is_font_url(href) {
            refs.push((Kind::Font, href));
        } else if rel.iter().any(|t| t == "stylesheet") {
            refs.push((Kind::Stylesheet, href));
        }
    }

    let source_host = doc.source_host();
    let mut r = ExternalResourcesReport::default();
    let mut domains: BTreeMap<String, usize> = BTreeMap::new();

    for (kind, raw) in refs {
        let Some(url) = doc.resolve(raw) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }
        let Some(host) = url.host_str() else {
            continue;
        };
        let third_party = source_host.is_none_or(|src| is_third_party(host, src));
        if !third_party {
            continue;
        }
        r.total += 1;
        match kind {
            Kind::Script => r.scripts += 1,
            Kind::Stylesheet => r.stylesheets += 1,
            Kind::Iframe => r.iframes += 1,
            Kind::Font => r.fonts += 1,
            Kind::Image => r.images += 1,
        }
        *domains.entry(host.to_ascii_lowercase()).or_insert(0) += 1;
    }

    let mut rows: Vec<DomainCount> = domains
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
    r.domains = rows;
    r
}

fn is_font_url(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    FONT_EXTENSIONS.iter().any(|e| path.ends_with(e)) || FONT_HOSTS.iter().any(|h| lower.contains(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(html: &str, url: Option<&str>) -> ExternalResourcesReport {
        build_external_resources_report(&Document::parse(html, url))
    }

    #[test]
    fn first_party_and_subdomains_are_excluded() {
        let r = report(
            r#"<script src="/a.js"></script><script src="https://cdn.a.com/b.js"></script>
               <script src="https://t.b.com/c.js"></script><img src="https://t.b.com/p.gif">
               <link rel="stylesheet" href="https://fonts.googleapis.com/css?family=X">
               <link rel="stylesheet" href="https://c.com/s.css">"#,
            Some("https://www.a.com/"),
        );
        assert_eq!(r.total, 4);
        assert_eq!(r.scripts, 1);
        assert_eq!(r.images, 1);
        assert_eq!(r.fonts, 1);
        assert_eq!(r.stylesheets, 1);
        assert_eq!(r.domains[0], DomainCount { domain: "t.b.com".into(), count: 2 });
    }

    #[test]
    fn without_source_every_absolute_host_is_third_party() {
        let r = report(r#"<iframe src="https://yt.com/embed/1"></iframe><img src="/x.png">"#, None);
        assert_eq!(r.total, 1);
        assert_eq!(r.iframes, 1);
    }
}
