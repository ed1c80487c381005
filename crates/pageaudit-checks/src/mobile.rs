use std::sync::LazyLock;

use pageaudit_dom::{Document, attr, attr_tokens};
use pageaudit_types::MobileReport;
use regex::Regex;

/// Inline widths wider than this overflow small screens.
const MAX_MOBILE_WIDTH_PX: u32 = 480;
const MIN_MAX_SCALE: f64 = 2.0;

static INLINE_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[;\s])(?:min-)?width\s*:\s*(\d{1,6})px").expect("valid regex literal")
});

pub fn build_mobile_report(doc: &Document) -> MobileReport {
    let viewport = doc.meta_name("viewport");
    let directives = viewport.as_deref().map(parse_viewport).unwrap_or_default();
    let get = |k: &str| directives.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

    let blocks_zoom = matches!(get("user-scalable"), Some("no" | "0"))
        || get("maximum-scale")
            .and_then(|v| v.parse::<f64>().ok())
            .is_some_and(|v| v < MIN_MAX_SCALE);

    let has_rel = |wanted: &[&str]| {
        doc.select("link[rel]")
            .into_iter()
            .any(|l| attr_tokens(l, "rel").iter().any(|t| wanted.contains(&t.as_str())))
    };

    let fixed_width_elements = doc
        .select("[style]")
        .into_iter()
        .filter(|el| {
            let style = attr(*el, "style").unwrap_or_default();
            INLINE_WIDTH
                .captures_iter(style)
                .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
                .any(|px| px > MAX_MOBILE_WIDTH_PX)
        })
        .count();

    MobileReport {
        has_device_width: get("width") == Some("device-width"),
        has_initial_scale: get("initial-scale").is_some(),
        blocks_zoom,
        has_apple_touch_icon: has_rel(&["apple-touch-icon", "apple-touch-icon-precomposed"]),
        has_theme_color: doc.meta_name("theme-color").is_some(),
        has_manifest: has_rel(&["manifest"]),
        has_media_queries: doc
            .select("style")
            .into_iter()
            .any(|s| s.text().any(|t| t.to_ascii_lowercase().contains("@media"))),
        fixed_width_elements,
        viewport,
    }
}

/// `width=device-width, initial-scale=1` into lower-cased key/value pairs.
fn parse_viewport(content: &str) -> Vec<(String, String)> {
    content
        .split([',', ';'])
        .filter_map(|part| {
            let (k, v) = part.split_once('=')?;
            Some((k.trim().to_ascii_lowercase(), v.trim().to_ascii_lowercase()))
        })
        .collect()
}
