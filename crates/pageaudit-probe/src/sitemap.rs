use pageaudit_types::SitemapFacts;
use url::Url;

use crate::Prober;
use crate::robots::sitemap_directives;

const FALLBACK_PATHS: &[&str] = &["/sitemap.xml", "/sitemap_index.xml"];

impl Prober {
    /// Look for a sitemap declared in robots.txt, then at the conventional
    /// paths. The first XML sitemap that answers wins.
    pub async fn check_sitemap(&self, page: &Url, robots_txt: Option<&str>) -> SitemapFacts {
        let mut facts = SitemapFacts {
            checked: true,
            ..Default::default()
        };
        let client = match self.probe_client() {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(%err, "sitemap probe skipped");
                return facts;
            }
        };

        let mut candidates: Vec<Url> = robots_txt
            .map(sitemap_directives)
            .unwrap_or_default()
            .iter()
            .filter_map(|s| page.join(s).ok())
            .collect();
        candidates.extend(FALLBACK_PATHS.iter().filter_map(|p| page.join(p).ok()));
        candidates.dedup();

        for candidate in candidates {
            tracing::debug!(url = %candidate, "probing sitemap");
            let response = match client.get(candidate.clone()).send().await {
                Ok(r) if r.status().is_success() => r,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(url = %candidate, %err, "sitemap probe failed open");
                    continue;
                }
            };
            let Ok(body) = response.text().await else {
                continue;
            };
            if !is_sitemap(&body) {
                continue;
            }
            facts.found = true;
            facts.url = Some(candidate.to_string());
            facts.contains_page = lists_page(&body, page);
            break;
        }
        facts
    }
}

fn is_sitemap(body: &str) -> bool {
    let head: String = body.chars().take(2048).collect::<String>().to_lowercase();
    head.contains("<urlset") || head.contains("<sitemapindex")
}

/// The page URL appears in the body, with or without its trailing slash.
fn lists_page(body: &str, page: &Url) -> bool {
    let full = page.as_str();
    let trimmed = full.trim_end_matches('/');
    body.contains(full) || body.contains(&format!("<loc>{trimmed}</loc>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlset_and_index_are_sitemaps() {
        assert!(is_sitemap(r#"<?xml version="1.0"?><urlset xmlns="x"></urlset>"#));
        assert!(is_sitemap("<sitemapindex></sitemapindex>"));
        assert!(!is_sitemap("<html><body>Not found</body></html>"));
    }

    #[test]
    fn page_match_ignores_trailing_slash() {
        let page = Url::parse("https://a.com/blog/").unwrap();
        assert!(lists_page("<loc>https://a.com/blog</loc>", &page));
        assert!(lists_page("<loc>https://a.com/blog/</loc>", &page));
        assert!(!lists_page("<loc>https://a.com/shop</loc>", &page));
    }
}
