//! Pass synthesis: the positive states of the issue tables, at most one note
//! per addressed dimension.

use pageaudit_types::{CategoryReports, LengthStatus, RenderMethod};

use crate::thresholds::*;

pub fn synthesize_passed(reports: &CategoryReports) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut pass = |cond: bool, note: String| {
        if cond {
            out.push(note);
        }
    };

    let t = &reports.technical;
    pass(
        t.title.status == LengthStatus::Optimal,
        format!("Title length is optimal ({} characters)", t.title.length),
    );
    pass(
        t.meta_description.status == LengthStatus::Optimal,
        format!(
            "Meta description length is optimal ({} characters)",
            t.meta_description.length
        ),
    );
    pass(
        t.canonical.count == 1 && !t.canonical.is_cross_domain,
        "Canonical URL is set".into(),
    );
    pass(!t.robots.noindex, "Page is indexable".into());
    pass(t.charset.is_some(), "Character encoding is declared".into());
    pass(t.has_doctype, "Doctype is declared".into());
    pass(t.is_https, "Page is served over HTTPS".into());
    pass(t.has_favicon, "Favicon is declared".into());
    pass(
        t.robots_txt.found && !t.robots_txt.blocks_page,
        "robots.txt allows this page".into(),
    );
    pass(t.sitemap.found, "XML sitemap found".into());

    let i = &reports.international;
    pass(
        i.html_lang_valid,
        format!("Language is declared ({})", i.html_lang.as_deref().unwrap_or_default()),
    );
    pass(
        !i.hreflang_tags.is_empty()
            && i.has_x_default
            && i.has_self_reference
            && i.invalid_region_codes.is_empty()
            && i.invalid_language_codes.is_empty()
            && i.relative_hrefs.is_empty(),
        format!("Hreflang set is complete ({} alternates)", i.hreflang_tags.len()),
    );

    let c = &reports.content;
    pass(c.headings.h1_count() == 1, "Single H1 heading".into());
    pass(
        c.word_count >= THIN_CONTENT_WORDS,
        format!("Substantial content ({} words)", c.word_count),
    );
    pass(
        c.word_count > 0 && c.ai_score < AI_SCORE_MODERATE,
        "Little AI-typical phrasing".into(),
    );
    pass(
        c.paragraph_count > 0 && c.duplicate_paragraph_count == 0,
        "No duplicated paragraphs".into(),
    );

    let l = &reports.links;
    pass(l.internal_count > 0, format!("{} internal links", l.internal_count));
    pass(l.total > 0 && l.broken_count == 0, "No empty or void links".into());
    pass(
        l.total > 0 && l.generic_anchor_count == 0,
        "Anchor text is descriptive".into(),
    );
    pass(
        l.external_count > 0 && l.unsafe_external_count == 0,
        "External links opening new tabs use noopener".into(),
    );

    let img = &reports.images;
    pass(
        img.total > 0 && img.missing_alt_count == 0,
        "All images have alt attributes".into(),
    );
    pass(
        img.total > 0 && img.missing_dimensions_count == 0,
        "All images declare dimensions".into(),
    );
    pass(img.modern_format_count > 0, "Modern image formats in use".into());

    let s = &reports.schema;
    let valid_items = !s.items.is_empty() && s.items.iter().all(|it| it.valid);
    pass(
        valid_items,
        format!("Structured data is valid ({})", s.types.join(", ")),
    );

    let so = &reports.social;
    pass(so.og_complete, "Open Graph tags are complete".into());
    pass(so.twitter_complete, "Twitter Card is complete".into());

    let a = &reports.accessibility;
    pass(a.landmarks.main > 0, "Main landmark present".into());
    pass(
        a.buttons_without_label == 0 && a.inputs_without_label == 0 && a.links_without_text == 0,
        "Interactive elements have accessible names".into(),
    );
    pass(
        c.headings.total() > 0 && a.heading_skips.is_empty(),
        "Heading hierarchy has no skipped levels".into(),
    );
    pass(a.has_skip_link, "Skip link present".into());

    let st = &reports.structure;
    pass(
        st.deprecated_tags.is_empty() && st.duplicate_ids.is_empty(),
        "No deprecated elements or duplicate ids".into(),
    );

    let p = &reports.performance;
    pass(
        p.render_blocking_scripts == 0,
        "No render-blocking scripts".into(),
    );
    pass(
        p.font_face_count > 0 && p.font_faces_without_display == 0,
        "Web fonts declare font-display".into(),
    );

    let se = &reports.security;
    pass(
        se.is_https && se.mixed_content_count == 0,
        "No mixed content".into(),
    );
    pass(
        se.headers.as_ref().is_some_and(|h| h.missing.is_empty()),
        "All security headers present".into(),
    );
    pass(
        se.ssl.as_ref().is_some_and(|ssl| ssl.valid),
        "TLS certificate is valid".into(),
    );

    let pl = &reports.platform;
    pass(
        matches!(
            pl.render_method,
            RenderMethod::Ssr | RenderMethod::Ssg | RenderMethod::SsrOrStatic
        ),
        format!("Content is present in the initial HTML ({})", pl.render_method.label()),
    );

    let tr = &reports.trust_signals;
    let signals = tr.signal_count();
    pass(
        signals >= STRONG_TRUST_SIGNALS,
        format!("Strong trust signals ({signals})"),
    );
    pass(
        tr.has_author,
        format!("Author attribution ({})", tr.author.as_deref().unwrap_or_default()),
    );

    let m = &reports.mobile;
    pass(
        m.has_device_width && !m.blocks_zoom,
        "Mobile viewport is configured".into(),
    );
    pass(m.has_apple_touch_icon, "Apple touch icon present".into());

    let e = &reports.external_resources;
    pass(
        e.total > 0 && e.domains.len() <= MAX_THIRD_PARTY_DOMAINS,
        format!("Third-party domains kept to {}", e.domains.len()),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageaudit_types::{MobileReport, TextFacts};

    #[test]
    fn viewport_pass_needs_device_width_and_zoom() {
        let mut reports = CategoryReports::default();
        reports.mobile = MobileReport {
            viewport: Some("width=device-width".into()),
            has_device_width: true,
            ..Default::default()
        };
        assert!(synthesize_passed(&reports).contains(&"Mobile viewport is configured".to_string()));

        reports.mobile.blocks_zoom = true;
        assert!(!synthesize_passed(&reports).contains(&"Mobile viewport is configured".to_string()));
    }

    #[test]
    fn optimal_title_notes_length() {
        let mut reports = CategoryReports::default();
        reports.technical.title = TextFacts {
            content: Some("x".repeat(40)),
            length: 40,
            status: LengthStatus::Optimal,
        };
        let passed = synthesize_passed(&reports);
        assert!(passed.contains(&"Title length is optimal (40 characters)".to_string()));
    }

    #[test]
    fn empty_reports_earn_only_absence_notes() {
        let passed = synthesize_passed(&CategoryReports::default());
        assert!(passed.contains(&"Page is indexable".to_string()));
        assert!(!passed.iter().any(|p| p.starts_with("Single H1")));
        assert!(!passed.iter().any(|p| p.starts_with("All images")));
    }
}
