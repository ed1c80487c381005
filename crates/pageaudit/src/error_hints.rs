use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("[blocked]") {
        push_hint(
            &mut out,
            "The site served an anti-bot challenge. Save the page from a browser and use `--html-file`.",
        );
    }

    if haystack.contains("[timeout]") {
        push_hint(&mut out, "Raise the fetch timeout with `--timeout-ms`.");
    }

    if haystack.contains("[redirect_limit]") {
        push_hint(
            &mut out,
            "Audit the final URL directly, or raise `network.max_redirects` in the config.",
        );
    }

    if haystack.contains("[invalid_url]") {
        push_hint(&mut out, "Pass a full URL including the scheme, e.g. `https://example.com/`.");
    }

    if haystack.contains("[unreachable]") {
        push_hint(&mut out, "Check DNS and connectivity, or audit a saved copy with `--html-file`.");
    }

    if haystack.contains("no such file or directory") {
        push_hint(&mut out, "Verify the HTML file path exists and is readable.");
    }

    if haystack.contains("failed to parse config") || haystack.contains("invalid settings") {
        push_hint(
            &mut out,
            "Check the TOML syntax and field names under `[settings]` and `[profiles.<name>]`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_errors_suggest_html_file() {
        let err = anyhow::anyhow!("[blocked] https://a.com returned an anti-bot challenge page");
        let text = format(&err);
        assert!(text.starts_with("Error: [blocked]"));
        assert!(text.contains("--html-file"));
    }

    #[test]
    fn unknown_errors_have_no_hints() {
        let text = format(&anyhow::anyhow!("something odd"));
        assert!(!text.contains("Hints:"));
    }
}
