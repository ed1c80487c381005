use pageaudit_dom::Document;
use pageaudit_types::{OpenGraphFacts, SocialReport, TwitterFacts};
use url::Url;

pub fn build_social_report(doc: &Document) -> SocialReport {
    // Some sites publish og:* under name= and twitter:* under property=.
    let og = |key: &str| doc.meta_property(key).or_else(|| doc.meta_name(key)).filter(|v| !v.is_empty());
    let tw = |key: &str| doc.meta_name(key).or_else(|| doc.meta_property(key)).filter(|v| !v.is_empty());

    let open_graph = OpenGraphFacts {
        title: og("og:title"),
        description: og("og:description"),
        image: og("og:image"),
        url: og("og:url"),
        og_type: og("og:type"),
        site_name: og("og:site_name"),
        locale: og("og:locale"),
    };
    let twitter = TwitterFacts {
        card: tw("twitter:card"),
        title: tw("twitter:title"),
        description: tw("twitter:description"),
        image: tw("twitter:image"),
        site: tw("twitter:site"),
        creator: tw("twitter:creator"),
    };

    let og_missing: Vec<String> = [
        ("og:title", &open_graph.title),
        ("og:description", &open_graph.description),
        ("og:image", &open_graph.image),
        ("og:url", &open_graph.url),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_none())
    .map(|(k, _)| k.to_string())
    .collect();

    let og_image_absolute = open_graph
        .image
        .as_deref()
        .and_then(|i| Url::parse(i).ok())
        .is_some_and(|u| matches!(u.scheme(), "http" | "https"));

    SocialReport {
        og_complete: og_missing.is_empty(),
        og_missing,
        og_image_absolute,
        twitter_complete: twitter.card.is_some() && twitter.title.is_some() && twitter.description.is_some(),
        open_graph,
        twitter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(head: &str) -> SocialReport {
        build_social_report(&Document::parse(&format!("<html><head>{head}</head></html>"), None))
    }

    #[test]
    fn absent_fields_are_none() {
        let r = report("");
        assert!(r.open_graph.title.is_none());
        assert!(!r.og_complete);
        assert_eq!(r.og_missing.len(), 4);
    }

    #[test]
    fn complete_needs_title_description_image_url() {
        let r = report(
            r#"<meta property="og:title" content="T"><meta property="og:description" content="D">
               <meta property="og:image" content="https://a.com/i.png"><meta property="og:url" content="https://a.com/">"#,
        );
        assert!(r.og_complete);
        assert!(r.og_image_absolute);
    }

    #[test]
    fn relative_og_image_is_not_absolute() {
        let r = report(r#"<meta property="og:image" content="/i.png">"#);
        assert!(!r.og_image_absolute);
        assert_eq!(r.og_missing, vec!["og:title", "og:description", "og:url"]);
    }

    #[test]
    fn twitter_reads_name_or_property() {
        let r = report(r#"<meta property="twitter:card" content="summary">"#);
        assert_eq!(r.twitter.card.as_deref(), Some("summary"));
    }
}
