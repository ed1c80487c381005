//! robots.txt retrieval and evaluation for the `*` user agent.

use url::Url;

use crate::Prober;

impl Prober {
    /// Body of `<origin>/robots.txt`, or `None` when absent or unreachable.
    pub async fn fetch_robots_txt(&self, page: &Url) -> Option<String> {
        let robots = page.join("/robots.txt").ok()?;
        let client = match self.probe_client() {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(%err, "robots.txt probe skipped");
                return None;
            }
        };
        tracing::debug!(url = %robots, "fetching robots.txt");
        let response = match client.get(robots.clone()).send().await {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(url = %robots, %err, "robots.txt probe failed open");
                return None;
            }
        };
        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }
}

/// One `Allow`/`Disallow` line from a group that applies to `*`.
struct Rule<'a> {
    allow: bool,
    pattern: &'a str,
}

fn star_rules(content: &str) -> Vec<Rule<'_>> {
    let mut rules = Vec::new();
    let mut group_agents: Vec<&str> = Vec::new();
    let mut in_rules = false;

    for raw in content.lines() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "user-agent" => {
                if in_rules {
                    group_agents.clear();
                    in_rules = false;
                }
                group_agents.push(value);
            }
            "allow" | "disallow" => {
                in_rules = true;
                if group_agents.contains(&"*") && !value.is_empty() {
                    rules.push(Rule {
                        allow: key == "allow",
                        pattern: value,
                    });
                }
            }
            _ => {}
        }
    }
    rules
}

/// `*` wildcards anywhere, `$` anchors the end.
fn rule_matches(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(p) => (p, true),
        None => (pattern, false),
    };
    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = path.strip_prefix(first) else {
        return false;
    };
    let parts: Vec<&str> = parts.collect();
    for (i, part) in parts.iter().enumerate() {
        if anchored && i + 1 == parts.len() {
            return rest.ends_with(part);
        }
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }
    !anchored || rest.is_empty()
}

/// True when the most specific matching rule for `*` disallows `path`.
/// Ties go to `Allow`.
pub fn robots_disallows(content: &str, path: &str) -> bool {
    let mut best: Option<(usize, bool)> = None;
    for rule in star_rules(content) {
        if !rule_matches(rule.pattern, path) {
            continue;
        }
        let len = rule.pattern.len();
        best = match best {
            Some((best_len, best_allow)) if best_len > len || (best_len == len && best_allow) => {
                Some((best_len, best_allow))
            }
            _ => Some((len, rule.allow)),
        };
    }
    best.is_some_and(|(_, allow)| !allow)
}

/// `Sitemap:` URLs declared anywhere in the file.
pub fn sitemap_directives(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case("sitemap")
                .then(|| value.trim().to_string())
        })
        .filter(|v| !v.is_empty())
        .collect()
}
