//! Issue synthesis.
//!
//! Each category has a fixed, ordered predicate table. Predicates on the same
//! field are mutually exclusive (missing, then too short, then too long) and
//! categories never suppress each other. Issues from network facts are only
//! raised when the probe actually ran.

use pageaudit_checks::{DESCRIPTION_MAX, DESCRIPTION_MIN, TITLE_MAX, TITLE_MIN};
use pageaudit_types::ids::{self, schema_incomplete};
use pageaudit_types::{
    AccessibilityReport, AuditIssue, Category, CategoryReports, ContentReport,
    ExternalResourcesReport, ImagesReport, InternationalReport, LengthStatus, LinksReport,
    MobileReport, PerformanceReport, PlatformReport, RenderMethod, SchemaReport, SecurityReport,
    Severity, SocialReport, StructureReport, TechnicalReport, TrustSignalsReport,
};

use crate::thresholds::*;

/// Issues for every category, in checker order.
pub fn synthesize_issues(reports: &CategoryReports) -> Vec<AuditIssue> {
    let mut out = Vec::new();
    let has_source = reports.technical.has_source_url;

    technical(&reports.technical, has_source, &mut out);
    international(&reports.international, has_source, &mut out);
    content(&reports.content, &mut out);
    links(&reports.links, &mut out);
    images(&reports.images, &mut out);
    schema(&reports.schema, &mut out);
    social(&reports.social, &mut out);
    accessibility(&reports.accessibility, &mut out);
    structure(&reports.structure, &mut out);
    performance(&reports.performance, &mut out);
    security(&reports.security, &mut out);
    platform(&reports.platform, &mut out);
    trust(&reports.trust_signals, &mut out);
    mobile(&reports.mobile, &mut out);
    external(&reports.external_resources, &mut out);
    out
}

fn list(items: &[String]) -> String {
    items.join(", ")
}

fn technical(r: &TechnicalReport, has_source: bool, out: &mut Vec<AuditIssue>) {
    use ids::technical::*;
    let cat = Category::Technical;
    let title = r.title.content.clone().unwrap_or_default();

    match r.title.status {
        LengthStatus::Missing => out.push(AuditIssue::new(
            NO_TITLE,
            Severity::Critical,
            cat,
            "Page has no title",
            "<title>",
            format!("Add a unique, descriptive <title> of {TITLE_MIN}-{TITLE_MAX} characters."),
        )),
        LengthStatus::TooShort => out.push(
            AuditIssue::new(
                TITLE_TOO_SHORT,
                Severity::High,
                cat,
                format!("Title is too short ({} characters)", r.title.length),
                "<title>",
                format!("Expand the title to {TITLE_MIN}-{TITLE_MAX} characters with the main keyword."),
            )
            .with_current(title),
        ),
        LengthStatus::TooLong => out.push(
            AuditIssue::new(
                TITLE_TOO_LONG,
                Severity::Medium,
                cat,
                format!("Title is too long ({} characters)", r.title.length),
                "<title>",
                format!("Shorten the title to at most {TITLE_MAX} characters so it is not truncated."),
            )
            .with_current(title),
        ),
        LengthStatus::Optimal => {}
    }

    let description = r.meta_description.content.clone().unwrap_or_default();
    let desc_loc = r#"<meta name="description">"#;
    match r.meta_description.status {
        LengthStatus::Missing => out.push(AuditIssue::new(
            NO_META_DESCRIPTION,
            Severity::High,
            cat,
            "Page has no meta description",
            desc_loc,
            format!("Add a meta description of {DESCRIPTION_MIN}-{DESCRIPTION_MAX} characters."),
        )),
        LengthStatus::TooShort => out.push(
            AuditIssue::new(
                META_DESCRIPTION_TOO_SHORT,
                Severity::Medium,
                cat,
                format!(
                    "Meta description is too short ({} characters)",
                    r.meta_description.length
                ),
                desc_loc,
                format!("Expand the description to {DESCRIPTION_MIN}-{DESCRIPTION_MAX} characters."),
            )
            .with_current(description),
        ),
        LengthStatus::TooLong => out.push(
            AuditIssue::new(
                META_DESCRIPTION_TOO_LONG,
                Severity::Low,
                cat,
                format!(
                    "Meta description is too long ({} characters)",
                    r.meta_description.length
                ),
                desc_loc,
                format!("Trim the description to at most {DESCRIPTION_MAX} characters."),
            )
            .with_current(description),
        ),
        LengthStatus::Optimal => {}
    }

    let canonical_loc = r#"<link rel="canonical">"#;
    match r.canonical.count {
        0 => out.push(AuditIssue::new(
            NO_CANONICAL,
            Severity::Medium,
            cat,
            "No canonical URL is declared",
            canonical_loc,
            "Add a self-referencing <link rel=\"canonical\"> with the preferred URL.",
        )),
        1 => {}
        n => out.push(AuditIssue::new(
            MULTIPLE_CANONICAL,
            Severity::High,
            cat,
            format!("{n} canonical tags found"),
            canonical_loc,
            "Keep exactly one canonical tag; search engines may ignore conflicting ones.",
        )),
    }
    if r.canonical.is_cross_domain {
        out.push(
            AuditIssue::new(
                CANONICAL_CROSS_DOMAIN,
                Severity::High,
                cat,
                "Canonical URL points to another domain",
                canonical_loc,
                "Point the canonical at this site unless the content is intentionally syndicated.",
            )
            .with_current(r.canonical.href.clone().unwrap_or_default()),
        );
    }

    let robots_loc = r#"<meta name="robots">"#;
    let robots_current = [r.robots.content.as_deref(), r.robots.googlebot.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("; ");
    if r.robots.noindex {
        out.push(
            AuditIssue::new(
                NOINDEX,
                Severity::Critical,
                cat,
                "Page is excluded from search indexes (noindex)",
                robots_loc,
                "Remove noindex from the robots meta tag if the page should rank.",
            )
            .with_current(robots_current.clone()),
        );
    }
    if r.robots.nofollow {
        out.push(
            AuditIssue::new(
                NOFOLLOW,
                Severity::Medium,
                cat,
                "Links on this page are not followed (nofollow)",
                robots_loc,
                "Remove nofollow unless crawlers should ignore every link on the page.",
            )
            .with_current(robots_current),
        );
    }

    if r.charset.is_none() {
        out.push(AuditIssue::new(
            NO_CHARSET,
            Severity::Low,
            cat,
            "No character encoding declared",
            "<meta charset>",
            "Add <meta charset=\"utf-8\"> as the first element in <head>.",
        ));
    }
    if !r.has_doctype {
        out.push(AuditIssue::new(
            NO_DOCTYPE,
            Severity::Medium,
            cat,
            "Document has no doctype",
            "<!DOCTYPE>",
            "Start the document with <!DOCTYPE html> to avoid quirks mode.",
        ));
    }
    if has_source && !r.is_https {
        out.push(AuditIssue::new(
            NOT_HTTPS,
            Severity::High,
            cat,
            "Page is not served over HTTPS",
            "URL",
            "Serve the site over HTTPS and redirect HTTP requests.",
        ));
    }
    if !r.has_favicon {
        out.push(AuditIssue::new(
            NO_FAVICON,
            Severity::Low,
            cat,
            "No favicon declared",
            r#"<link rel="icon">"#,
            "Add a favicon with <link rel=\"icon\">.",
        ));
    }

    if r.robots_txt.checked {
        if !r.robots_txt.found {
            out.push(AuditIssue::new(
                ROBOTS_TXT_MISSING,
                Severity::Low,
                cat,
                "No robots.txt found",
                "/robots.txt",
                "Publish a robots.txt, even an empty one, and reference the sitemap from it.",
            ));
        } else if r.robots_txt.blocks_page {
            out.push(AuditIssue::new(
                ROBOTS_TXT_BLOCKS_PAGE,
                Severity::Critical,
                cat,
                "robots.txt disallows this page for all crawlers",
                "/robots.txt",
                "Remove the matching Disallow rule if the page should be crawled.",
            ));
        }
    }
    if r.sitemap.checked && !r.sitemap.found {
        out.push(AuditIssue::new(
            SITEMAP_MISSING,
            Severity::Low,
            cat,
            "No XML sitemap found",
            "/sitemap.xml",
            "Publish an XML sitemap and list it in robots.txt.",
        ));
    }
}

fn international(r: &InternationalReport, has_source: bool, out: &mut Vec<AuditIssue>) {
    use ids::international::*;
    let cat = Category::International;
    let alt_loc = r#"<link rel="alternate" hreflang>"#;

    match &r.html_lang {
        None => out.push(AuditIssue::new(
            NO_HTML_LANG,
            Severity::Medium,
            cat,
            "The <html> element has no lang attribute",
            "<html lang>",
            "Declare the page language, e.g. <html lang=\"en\">.",
        )),
        Some(lang) if !r.html_lang_valid => out.push(
            AuditIssue::new(
                INVALID_HTML_LANG,
                Severity::Medium,
                cat,
                "The lang attribute is not a valid ISO 639-1 code",
                "<html lang>",
                "Use a two-letter ISO 639-1 language code, optionally with a region.",
            )
            .with_current(lang.clone()),
        ),
        Some(_) => {}
    }

    if r.hreflang_tags.is_empty() {
        return;
    }
    if !r.has_x_default {
        out.push(AuditIssue::new(
            HREFLANG_MISSING_X_DEFAULT,
            Severity::Low,
            cat,
            "Hreflang set has no x-default",
            alt_loc,
            "Add an hreflang=\"x-default\" alternate for unmatched languages.",
        ));
    }
    if has_source && !r.has_self_reference {
        out.push(AuditIssue::new(
            HREFLANG_NO_SELF_REFERENCE,
            Severity::Medium,
            cat,
            "Hreflang set does not reference this page",
            alt_loc,
            "Include this page's own URL in its hreflang set.",
        ));
    }
    if !r.invalid_region_codes.is_empty() {
        out.push(
            AuditIssue::new(
                HREFLANG_INVALID_REGION,
                Severity::Medium,
                cat,
                "Hreflang region codes must be upper case",
                alt_loc,
                "Write regions in upper case, e.g. en-US instead of en-us.",
            )
            .with_details(list(&r.invalid_region_codes)),
        );
    }
    if !r.invalid_language_codes.is_empty() {
        out.push(
            AuditIssue::new(
                HREFLANG_INVALID_LANGUAGE,
                Severity::High,
                cat,
                "Hreflang values use unknown language codes",
                alt_loc,
                "Use ISO 639-1 language codes in hreflang values.",
            )
            .with_details(list(&r.invalid_language_codes)),
        );
    }
    if !r.relative_hrefs.is_empty() {
        out.push(
            AuditIssue::new(
                HREFLANG_RELATIVE_URL,
                Severity::Medium,
                cat,
                "Hreflang alternates use relative URLs",
                alt_loc,
                "Use absolute URLs including the scheme in hreflang links.",
            )
            .with_details(list(&r.relative_hrefs)),
        );
    }
}

fn content(r: &ContentReport, out: &mut Vec<AuditIssue>) {
    use ids::content::*;
    let cat = Category::Content;

    match r.headings.h1_count() {
        0 => out.push(AuditIssue::new(
            NO_H1,
            Severity::High,
            cat,
            "Page has no H1 heading",
            "<h1>",
            "Add one H1 that states the page topic.",
        )),
        1 => {}
        n => out.push(
            AuditIssue::new(
                MULTIPLE_H1,
                Severity::Low,
                cat,
                format!("Page has {n} H1 headings"),
                "<h1>",
                "Keep a single H1 and demote the others to H2.",
            )
            .with_details(list(&r.headings.h1)),
        ),
    }
    if r.word_count < THIN_CONTENT_WORDS {
        out.push(
            AuditIssue::new(
                THIN_CONTENT,
                Severity::Medium,
                cat,
                "Page has little text content",
                "<body>",
                format!("Expand the main content to at least {THIN_CONTENT_WORDS} words."),
            )
            .with_current(format!("{} words", r.word_count)),
        );
    }
    if r.title_h1_duplicate {
        out.push(AuditIssue::new(
            TITLE_H1_DUPLICATE,
            Severity::Low,
            cat,
            "H1 repeats the title exactly",
            "<h1>",
            "Vary the H1 from the title to cover more search phrasing.",
        ));
    }
    if r.duplicate_paragraph_count > 0 {
        out.push(
            AuditIssue::new(
                DUPLICATE_PARAGRAPHS,
                Severity::Low,
                cat,
                format!("{} duplicated paragraphs", r.duplicate_paragraph_count),
                "<p>",
                "Remove or rewrite repeated paragraphs.",
            )
            .with_details(r.duplicate_paragraphs.join(" | ")),
        );
    }

    let phrases = r
        .ai_phrases
        .iter()
        .map(|p| format!("{} ({})", p.phrase, p.count))
        .collect::<Vec<_>>();
    if r.ai_score >= AI_SCORE_HIGH {
        out.push(
            AuditIssue::new(
                AI_CONTENT_HIGH,
                Severity::Medium,
                cat,
                format!("Heavy use of AI-typical phrasing (score {})", r.ai_score),
                "<body>",
                "Rewrite clichéd passages with specific, first-hand language.",
            )
            .with_details(list(&phrases)),
        );
    } else if r.ai_score >= AI_SCORE_MODERATE {
        out.push(
            AuditIssue::new(
                AI_CONTENT_MODERATE,
                Severity::Low,
                cat,
                format!("Some AI-typical phrasing (score {})", r.ai_score),
                "<body>",
                "Review flagged phrases and replace generic wording.",
            )
            .with_details(list(&phrases)),
        );
    }

    if r.word_count >= KEYWORD_MIN_WORDS {
        if let Some(top) = r
            .keyword_density
            .first()
            .filter(|k| k.density > KEYWORD_MAX_DENSITY)
        {
            out.push(
                AuditIssue::new(
                    KEYWORD_STUFFING,
                    Severity::Medium,
                    cat,
                    format!("\"{}\" makes up {}% of the text", top.word, top.density),
                    "<body>",
                    format!("Keep any single term below {KEYWORD_MAX_DENSITY}% and use natural variations."),
                )
                .with_current(format!("{} occurrences", top.count)),
            );
        }
    }
    if r.has_lorem_ipsum {
        out.push(AuditIssue::new(
            LOREM_IPSUM,
            Severity::High,
            cat,
            "Placeholder lorem ipsum text found",
            "<body>",
            "Replace placeholder text with real content.",
        ));
    }
}

fn links(r: &LinksReport, out: &mut Vec<AuditIssue>) {
    use ids::links::*;
    let cat = Category::Links;
    let hrefs = |samples: &[pageaudit_types::LinkSample]| {
        samples.iter().map(|s| s.href.clone()).collect::<Vec<_>>()
    };

    if r.broken_count > 0 {
        out.push(
            AuditIssue::new(
                BROKEN_LINKS,
                Severity::Medium,
                cat,
                format!("{} links have an empty or void href", r.broken_count),
                "<a href>",
                "Point every link at a real URL or use a <button> for scripted actions.",
            )
            .with_details(list(&hrefs(&r.broken_links))),
        );
    }
    if r.generic_anchor_count > 0 {
        let texts = r.generic_anchors.iter().map(|s| s.text.clone()).collect::<Vec<_>>();
        out.push(
            AuditIssue::new(
                GENERIC_ANCHOR_TEXT,
                Severity::Low,
                cat,
                format!("{} links use generic anchor text", r.generic_anchor_count),
                "<a>",
                "Describe the link target in the anchor text instead of \"click here\".",
            )
            .with_details(list(&texts)),
        );
    }
    if r.unsafe_external_count > 0 {
        out.push(
            AuditIssue::new(
                UNSAFE_EXTERNAL_LINKS,
                Severity::Low,
                cat,
                format!(
                    "{} external links open a new tab without noopener",
                    r.unsafe_external_count
                ),
                "<a target=\"_blank\">",
                "Add rel=\"noopener noreferrer\" to links with target=\"_blank\".",
            )
            .with_details(list(&r.unsafe_external_links)),
        );
    }
    if r.internal_count == 0 {
        out.push(AuditIssue::new(
            NO_INTERNAL_LINKS,
            Severity::Medium,
            cat,
            "Page has no internal links",
            "<a>",
            "Link to related pages on the same site.",
        ));
    }
    if r.total > MAX_LINKS {
        out.push(
            AuditIssue::new(
                TOO_MANY_LINKS,
                Severity::Low,
                cat,
                "Page has a very large number of links",
                "<a>",
                format!("Keep the number of links under {MAX_LINKS}."),
            )
            .with_current(r.total.to_string()),
        );
    }

    let failed: Vec<String> = r
        .external_probes
        .iter()
        .filter(|p| !p.ok)
        .map(|p| match p.status {
            Some(code) => format!("{} ({code})", p.url),
            None => p.url.clone(),
        })
        .collect();
    if !failed.is_empty() {
        out.push(
            AuditIssue::new(
                BROKEN_EXTERNAL_LINKS,
                Severity::High,
                cat,
                format!("{} external links failed", failed.len()),
                "<a href>",
                "Fix or remove links that return errors.",
            )
            .with_details(list(&failed)),
        );
    }
    let redirected: Vec<String> = r
        .redirect_probes
        .iter()
        .filter(|p| p.redirects > 0)
        .map(|p| match &p.final_url {
            Some(to) => format!("{} -> {to}", p.url),
            None => p.url.clone(),
        })
        .collect();
    if !redirected.is_empty() {
        out.push(
            AuditIssue::new(
                REDIRECT_CHAINS,
                Severity::Low,
                cat,
                format!("{} internal links redirect", redirected.len()),
                "<a href>",
                "Link directly to the final URL.",
            )
            .with_details(list(&redirected)),
        );
    }
}

fn images(r: &ImagesReport, out: &mut Vec<AuditIssue>) {
    use ids::images::*;
    let cat = Category::Images;

    if r.missing_alt_count > 0 {
        out.push(
            AuditIssue::new(
                MISSING_ALT,
                Severity::High,
                cat,
                format!("{} images have no alt attribute", r.missing_alt_count),
                "<img>",
                "Add alt text describing each image, or alt=\"\" for decorative ones.",
            )
            .with_details(list(&r.missing_alt)),
        );
    }
    if r.missing_dimensions_count > 0 {
        out.push(AuditIssue::new(
            MISSING_DIMENSIONS,
            Severity::Low,
            cat,
            format!("{} images have no width/height", r.missing_dimensions_count),
            "<img>",
            "Set width and height to reserve space and avoid layout shift.",
        ));
    }
    if r.lazy_above_fold_count > 0 {
        out.push(AuditIssue::new(
            LAZY_ABOVE_FOLD,
            Severity::Medium,
            cat,
            "Images near the top of the page are lazy-loaded",
            "<img loading=\"lazy\">",
            "Load the first visible images eagerly; lazy-load images further down.",
        ));
    }
    if r.clickable_without_alt_count > 0 {
        out.push(AuditIssue::new(
            CLICKABLE_NO_ALT,
            Severity::High,
            cat,
            format!(
                "{} linked images have no alt text",
                r.clickable_without_alt_count
            ),
            "<a><img></a>",
            "Give linked images alt text that describes the link target.",
        ));
    }
    if r.legacy_format_count > 0 && r.modern_format_count == 0 {
        out.push(AuditIssue::new(
            LEGACY_FORMATS,
            Severity::Low,
            cat,
            "No images use modern formats",
            "<img>",
            "Serve WebP or AVIF versions, e.g. with <picture>.",
        ));
    }
    let large: Vec<String> = r
        .sizes
        .iter()
        .filter_map(|s| {
            let bytes = s.bytes.filter(|b| *b > LARGE_IMAGE_BYTES)?;
            Some(format!("{} ({} KB)", s.url, bytes / 1024))
        })
        .collect();
    if !large.is_empty() {
        out.push(
            AuditIssue::new(
                LARGE_IMAGES,
                Severity::Medium,
                cat,
                format!("{} images exceed {} KB", large.len(), LARGE_IMAGE_BYTES / 1024),
                "<img>",
                "Compress and resize large images.",
            )
            .with_details(list(&large)),
        );
    }
}

fn schema(r: &SchemaReport, out: &mut Vec<AuditIssue>) {
    use ids::schema::{INVALID_JSON, MISSING_CONTEXT, NO_STRUCTURED_DATA};
    let cat = Category::Schema;
    let loc = r#"<script type="application/ld+json">"#;

    if r.count == 0 && r.microdata_count == 0 && r.rdfa_count == 0 {
        out.push(AuditIssue::new(
            NO_STRUCTURED_DATA,
            Severity::Medium,
            cat,
            "No structured data found",
            loc,
            "Add JSON-LD describing the page, e.g. Organization, Article or Product.",
        ));
        return;
    }
    if r.invalid_json_count > 0 {
        out.push(AuditIssue::new(
            INVALID_JSON,
            Severity::High,
            cat,
            format!("{} JSON-LD blocks are not valid JSON", r.invalid_json_count),
            loc,
            "Fix the JSON syntax so the block can be parsed.",
        ));
    }

    let no_context = r
        .items
        .iter()
        .filter(|i| i.issues.iter().any(|s| s == pageaudit_checks::MISSING_CONTEXT))
        .count();
    if no_context > 0 {
        out.push(AuditIssue::new(
            MISSING_CONTEXT,
            Severity::Medium,
            cat,
            format!("{no_context} structured data items are missing @context"),
            loc,
            "Add \"@context\": \"https://schema.org\".",
        ));
    }

    let mut seen: Vec<String> = Vec::new();
    for gap in r.items.iter().flat_map(|i| &i.incomplete) {
        let name = gap.schema_type.as_str();
        let id = schema_incomplete(name);
        if seen.contains(&id) {
            continue;
        }
        seen.push(id.clone());
        out.push(
            AuditIssue::new(
                id,
                Severity::Medium,
                cat,
                format!("{name} schema incomplete"),
                loc,
                format!("Add the required {name} properties."),
            )
            .with_details(format!("missing: {}", gap.missing.join(", "))),
        );
    }
}

fn social(r: &SocialReport, out: &mut Vec<AuditIssue>) {
    use ids::social::*;
    let cat = Category::Social;
    let og = &r.open_graph;
    let any_og = og.title.is_some() || og.description.is_some() || og.image.is_some() || og.url.is_some();

    if !any_og {
        out.push(AuditIssue::new(
            NO_OPEN_GRAPH,
            Severity::Medium,
            cat,
            "No Open Graph tags",
            "<meta property=\"og:*\">",
            "Add og:title, og:description, og:image and og:url for link previews.",
        ));
    } else if !r.og_complete {
        out.push(
            AuditIssue::new(
                OG_INCOMPLETE,
                Severity::Low,
                cat,
                "Open Graph tags are incomplete",
                "<meta property=\"og:*\">",
                "Add the missing Open Graph properties.",
            )
            .with_details(list(&r.og_missing)),
        );
    }
    if og.image.is_some() && !r.og_image_absolute {
        out.push(
            AuditIssue::new(
                OG_IMAGE_RELATIVE,
                Severity::Medium,
                cat,
                "og:image is not an absolute URL",
                "<meta property=\"og:image\">",
                "Use an absolute https:// URL for og:image.",
            )
            .with_current(og.image.clone().unwrap_or_default()),
        );
    }
    if r.twitter.card.is_none() {
        out.push(AuditIssue::new(
            NO_TWITTER_CARD,
            Severity::Low,
            cat,
            "No Twitter Card declared",
            "<meta name=\"twitter:card\">",
            "Add <meta name=\"twitter:card\" content=\"summary_large_image\">.",
        ));
    }
}

fn accessibility(r: &AccessibilityReport, out: &mut Vec<AuditIssue>) {
    use ids::accessibility::*;
    let cat = Category::Accessibility;
    let samples = list(&r.unlabeled_samples);

    if r.landmarks.main == 0 {
        out.push(AuditIssue::new(
            NO_MAIN_LANDMARK,
            Severity::Medium,
            cat,
            "No main landmark",
            "<main>",
            "Wrap the primary content in <main>.",
        ));
    }
    if r.buttons_without_label > 0 {
        out.push(
            AuditIssue::new(
                BUTTONS_WITHOUT_LABEL,
                Severity::High,
                cat,
                format!("{} buttons have no accessible name", r.buttons_without_label),
                "<button>",
                "Give buttons visible text or an aria-label.",
            )
            .with_details(samples.clone()),
        );
    }
    if r.inputs_without_label > 0 {
        out.push(
            AuditIssue::new(
                INPUTS_WITHOUT_LABEL,
                Severity::High,
                cat,
                format!("{} form fields have no label", r.inputs_without_label),
                "<input>",
                "Associate each field with a <label for> or aria-label.",
            )
            .with_details(samples.clone()),
        );
    }
    if r.links_without_text > 0 {
        out.push(
            AuditIssue::new(
                LINKS_WITHOUT_TEXT,
                Severity::Medium,
                cat,
                format!("{} links have no accessible text", r.links_without_text),
                "<a>",
                "Add link text, an aria-label, or alt text on the linked image.",
            )
            .with_details(samples),
        );
    }
    if !r.heading_skips.is_empty() {
        let skips = r
            .heading_skips
            .iter()
            .map(|s| format!("h{} -> h{}", s.from, s.to))
            .collect::<Vec<_>>();
        out.push(
            AuditIssue::new(
                HEADING_HIERARCHY_SKIP,
                Severity::Low,
                cat,
                "Heading levels are skipped",
                "<h1>-<h6>",
                "Nest headings one level at a time.",
            )
            .with_details(list(&skips)),
        );
    }
    if !r.has_skip_link {
        out.push(AuditIssue::new(
            NO_SKIP_LINK,
            Severity::Low,
            cat,
            "No skip-to-content link",
            "<a href=\"#main\">",
            "Add a skip link as the first focusable element.",
        ));
    }
    if !r.invalid_aria_roles.is_empty() {
        out.push(
            AuditIssue::new(
                INVALID_ARIA_ROLES,
                Severity::Medium,
                cat,
                "Elements use unknown ARIA roles",
                "[role]",
                "Use only roles defined by WAI-ARIA.",
            )
            .with_details(list(&r.invalid_aria_roles)),
        );
    }
    if r.positive_tabindex_count > 0 {
        out.push(AuditIssue::new(
            POSITIVE_TABINDEX,
            Severity::Low,
            cat,
            format!("{} elements use a positive tabindex", r.positive_tabindex_count),
            "[tabindex]",
            "Use tabindex=\"0\" or -1 and rely on document order.",
        ));
    }
    if r.iframes_without_title > 0 {
        out.push(AuditIssue::new(
            IFRAMES_WITHOUT_TITLE,
            Severity::Medium,
            cat,
            format!("{} iframes have no title", r.iframes_without_title),
            "<iframe>",
            "Add a title describing each iframe's content.",
        ));
    }
}

fn structure(r: &StructureReport, out: &mut Vec<AuditIssue>) {
    use ids::structure::*;
    let cat = Category::Structure;

    if !r.deprecated_tags.is_empty() {
        let tags = r
            .deprecated_tags
            .iter()
            .map(|t| format!("<{}> ({})", t.tag, t.count))
            .collect::<Vec<_>>();
        out.push(
            AuditIssue::new(
                DEPRECATED_TAGS,
                Severity::Medium,
                cat,
                "Deprecated HTML elements in use",
                "<body>",
                "Replace deprecated elements with semantic HTML and CSS.",
            )
            .with_details(list(&tags)),
        );
    }
    if !r.duplicate_ids.is_empty() {
        out.push(
            AuditIssue::new(
                DUPLICATE_IDS,
                Severity::Medium,
                cat,
                format!("{} id values are used more than once", r.duplicate_ids.len()),
                "[id]",
                "Make every id unique within the page.",
            )
            .with_details(list(&r.duplicate_ids)),
        );
    }
    if r.element_count > MAX_ELEMENTS {
        out.push(
            AuditIssue::new(
                EXCESSIVE_DOM_SIZE,
                Severity::Medium,
                cat,
                "DOM is very large",
                "<html>",
                format!("Keep the page under {MAX_ELEMENTS} elements."),
            )
            .with_current(format!("{} elements", r.element_count)),
        );
    }
    if r.max_depth > MAX_DEPTH {
        out.push(
            AuditIssue::new(
                EXCESSIVE_DOM_DEPTH,
                Severity::Low,
                cat,
                "DOM is nested very deeply",
                "<html>",
                format!("Flatten markup to at most {MAX_DEPTH} levels."),
            )
            .with_current(format!("depth {}", r.max_depth)),
        );
    }
    if r.inline_style_count > MAX_INLINE_STYLES {
        out.push(
            AuditIssue::new(
                MANY_INLINE_STYLES,
                Severity::Low,
                cat,
                "Many inline style attributes",
                "[style]",
                "Move inline styles into stylesheets.",
            )
            .with_current(r.inline_style_count.to_string()),
        );
    }
}

fn performance(r: &PerformanceReport, out: &mut Vec<AuditIssue>) {
    use ids::performance::*;
    let cat = Category::Performance;

    if r.render_blocking_scripts > 0 {
        out.push(
            AuditIssue::new(
                RENDER_BLOCKING_SCRIPTS,
                Severity::Medium,
                cat,
                format!("{} render-blocking scripts in <head>", r.render_blocking_scripts),
                "<head><script>",
                "Add async or defer, or move scripts to the end of <body>.",
            )
            .with_details(list(&r.render_blocking_script_urls)),
        );
    }
    if r.render_blocking_stylesheets > MAX_BLOCKING_STYLESHEETS {
        out.push(AuditIssue::new(
            RENDER_BLOCKING_STYLESHEETS,
            Severity::Low,
            cat,
            format!(
                "{} render-blocking stylesheets in <head>",
                r.render_blocking_stylesheets
            ),
            "<link rel=\"stylesheet\">",
            "Inline critical CSS and combine or defer the rest.",
        ));
    }
    if !r.preloads_without_as.is_empty() {
        out.push(
            AuditIssue::new(
                PRELOAD_MISSING_AS,
                Severity::Low,
                cat,
                "Preload hints without an as attribute",
                "<link rel=\"preload\">",
                "Set as=\"script\", \"style\", \"font\" or \"image\" on every preload.",
            )
            .with_details(list(&r.preloads_without_as)),
        );
    }
    if r.font_faces_without_display > 0 {
        out.push(AuditIssue::new(
            FONT_DISPLAY_MISSING,
            Severity::Low,
            cat,
            format!(
                "{} @font-face rules without font-display",
                r.font_faces_without_display
            ),
            "@font-face",
            "Add font-display: swap to avoid invisible text while fonts load.",
        ));
    }
    if r.html_size_bytes > LARGE_HTML_BYTES {
        out.push(
            AuditIssue::new(
                LARGE_HTML,
                Severity::Medium,
                cat,
                "HTML document is large",
                "<html>",
                format!("Keep the HTML under {} KB.", LARGE_HTML_BYTES / 1024),
            )
            .with_current(format!("{} KB", r.html_size_bytes / 1024)),
        );
    }
    if r.total_scripts > MAX_SCRIPTS {
        out.push(
            AuditIssue::new(
                TOO_MANY_SCRIPTS,
                Severity::Low,
                cat,
                "Page loads many scripts",
                "<script>",
                format!("Bundle or remove scripts to stay under {MAX_SCRIPTS}."),
            )
            .with_current(r.total_scripts.to_string()),
        );
    }
}

fn security(r: &SecurityReport, out: &mut Vec<AuditIssue>) {
    use ids::security::*;
    let cat = Category::Security;

    if r.mixed_content_count > 0 {
        out.push(
            AuditIssue::new(
                MIXED_CONTENT,
                Severity::High,
                cat,
                format!("{} resources load over HTTP on an HTTPS page", r.mixed_content_count),
                "src/href",
                "Load every resource over HTTPS.",
            )
            .with_details(list(&r.mixed_content_urls)),
        );
    }
    if r.protocol_relative_count > 0 {
        out.push(AuditIssue::new(
            PROTOCOL_RELATIVE_URLS,
            Severity::Low,
            cat,
            format!("{} protocol-relative resource URLs", r.protocol_relative_count),
            "src/href",
            "Replace // URLs with explicit https:// URLs.",
        ));
    }
    if r.insecure_form_actions > 0 {
        out.push(AuditIssue::new(
            INSECURE_FORM_ACTION,
            Severity::High,
            cat,
            format!("{} forms submit over HTTP", r.insecure_form_actions),
            "<form action>",
            "Submit forms to https:// endpoints.",
        ));
    }
    if let Some(headers) = r.headers.as_ref().filter(|h| !h.missing.is_empty()) {
        out.push(
            AuditIssue::new(
                MISSING_SECURITY_HEADERS,
                Severity::Medium,
                cat,
                format!("{} security headers missing", headers.missing.len()),
                "HTTP response headers",
                "Send the missing headers from the web server or CDN.",
            )
            .with_current(format!("score {}", headers.score))
            .with_details(list(&headers.missing)),
        );
    }
    if let Some(ssl) = &r.ssl {
        if !ssl.valid {
            let mut issue = AuditIssue::new(
                SSL_INVALID,
                Severity::Critical,
                cat,
                "TLS certificate could not be validated",
                "TLS",
                "Install a valid certificate from a trusted authority.",
            );
            if let Some(err) = &ssl.error {
                issue = issue.with_details(err.clone());
            }
            out.push(issue);
        } else if let Some(days) = ssl
            .days_until_expiry
            .filter(|d| *d < SSL_EXPIRY_WARN_DAYS)
        {
            out.push(
                AuditIssue::new(
                    SSL_EXPIRING,
                    Severity::High,
                    cat,
                    "TLS certificate expires soon",
                    "TLS",
                    "Renew the certificate and automate renewal.",
                )
                .with_current(format!("{days} days left")),
            );
        }
    }
}

fn platform(r: &PlatformReport, out: &mut Vec<AuditIssue>) {
    if r.render_method == RenderMethod::Csr {
        let mut issue = AuditIssue::new(
            ids::platform::CLIENT_SIDE_RENDERING,
            Severity::Medium,
            Category::Platform,
            "Content appears to be rendered client-side",
            "<body>",
            "Server-render or pre-render the main content so crawlers see it without JavaScript.",
        );
        if let Some(evidence) = &r.render_evidence {
            issue = issue.with_details(evidence.clone());
        }
        out.push(issue);
    }
}

fn trust(r: &TrustSignalsReport, out: &mut Vec<AuditIssue>) {
    use ids::trust::*;
    let cat = Category::TrustSignals;

    if !r.has_about_page {
        out.push(AuditIssue::new(
            NO_ABOUT_PAGE,
            Severity::Low,
            cat,
            "No link to an About page",
            "<a>",
            "Link to a page that explains who runs the site.",
        ));
    }
    if !r.has_contact_page {
        out.push(AuditIssue::new(
            NO_CONTACT_PAGE,
            Severity::Medium,
            cat,
            "No link to a Contact page",
            "<a>",
            "Link to a contact page or list contact details.",
        ));
    }
    if !r.has_privacy_policy {
        out.push(AuditIssue::new(
            NO_PRIVACY_POLICY,
            Severity::Medium,
            cat,
            "No link to a privacy policy",
            "<a>",
            "Publish a privacy policy and link it from every page.",
        ));
    }
    if !r.has_author {
        out.push(AuditIssue::new(
            NO_AUTHOR,
            Severity::Low,
            cat,
            "No author attribution",
            "<meta name=\"author\">",
            "Name the author in markup, meta tags or Article schema.",
        ));
    }
    if r.social_link_count == 0 {
        out.push(AuditIssue::new(
            NO_SOCIAL_LINKS,
            Severity::Low,
            cat,
            "No links to social profiles",
            "<a>",
            "Link to the organization's social profiles.",
        ));
    }
}

fn mobile(r: &MobileReport, out: &mut Vec<AuditIssue>) {
    use ids::mobile::*;
    let cat = Category::Mobile;
    let loc = r#"<meta name="viewport">"#;

    match &r.viewport {
        None => out.push(AuditIssue::new(
            NO_VIEWPORT,
            Severity::High,
            cat,
            "No viewport meta tag",
            loc,
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
        )),
        Some(content) => {
            if !r.has_device_width {
                out.push(
                    AuditIssue::new(
                        VIEWPORT_NO_DEVICE_WIDTH,
                        Severity::Medium,
                        cat,
                        "Viewport does not use width=device-width",
                        loc,
                        "Set width=device-width in the viewport content.",
                    )
                    .with_current(content.clone()),
                );
            }
            if r.blocks_zoom {
                out.push(
                    AuditIssue::new(
                        VIEWPORT_BLOCKS_ZOOM,
                        Severity::Medium,
                        cat,
                        "Viewport prevents zooming",
                        loc,
                        "Remove user-scalable=no and maximum-scale limits.",
                    )
                    .with_current(content.clone()),
                );
            }
        }
    }
    if !r.has_apple_touch_icon {
        out.push(AuditIssue::new(
            NO_APPLE_TOUCH_ICON,
            Severity::Low,
            cat,
            "No apple-touch-icon",
            r#"<link rel="apple-touch-icon">"#,
            "Add a 180x180 apple-touch-icon.",
        ));
    }
}

fn external(r: &ExternalResourcesReport, out: &mut Vec<AuditIssue>) {
    if r.domains.len() > MAX_THIRD_PARTY_DOMAINS {
        let domains = r.domains.iter().map(|d| d.domain.clone()).collect::<Vec<_>>();
        out.push(
            AuditIssue::new(
                ids::external::MANY_THIRD_PARTY_DOMAINS,
                Severity::Low,
                Category::ExternalResources,
                format!("Resources load from {} third-party domains", r.domains.len()),
                "src/href",
                "Remove unused third-party tags and self-host critical assets.",
            )
            .with_details(list(&domains)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageaudit_types::{HeadingFacts, IncompleteType, SchemaItem, SslFacts, TextFacts};

    fn ids_of(issues: &[AuditIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn title_predicates_are_mutually_exclusive() {
        let mut r = TechnicalReport::default();
        let mut out = Vec::new();
        technical(&r, false, &mut out);
        assert!(ids_of(&out).contains(&"no-title"));

        r.title = TextFacts {
            content: Some("Short".into()),
            length: 5,
            status: LengthStatus::TooShort,
        };
        out.clear();
        technical(&r, false, &mut out);
        let ids = ids_of(&out);
        assert!(ids.contains(&"title-too-short"));
        assert!(!ids.contains(&"no-title"));
        assert!(!ids.contains(&"title-too-long"));
    }

    #[test]
    fn network_issues_need_a_probe() {
        let mut r = TechnicalReport::default();
        let mut out = Vec::new();
        technical(&r, true, &mut out);
        assert!(!ids_of(&out).contains(&"robots-txt-missing"));
        assert!(!ids_of(&out).contains(&"sitemap-missing"));

        r.robots_txt.checked = true;
        r.sitemap.checked = true;
        out.clear();
        technical(&r, true, &mut out);
        assert!(ids_of(&out).contains(&"robots-txt-missing"));
        assert!(ids_of(&out).contains(&"sitemap-missing"));
    }

    #[test]
    fn not_https_only_with_source_url() {
        let r = TechnicalReport::default();
        let mut out = Vec::new();
        technical(&r, false, &mut out);
        assert!(!ids_of(&out).contains(&"not-https"));
        technical(&r, true, &mut out);
        assert!(ids_of(&out).contains(&"not-https"));
    }

    #[test]
    fn source_url_flag_drives_url_dependent_rules() {
        let mut reports = CategoryReports::default();
        assert!(!ids_of(&synthesize_issues(&reports)).contains(&"not-https"));

        reports.technical.has_source_url = true;
        reports.technical.url_length = 0;
        let issues = synthesize_issues(&reports);
        assert!(ids_of(&issues).contains(&"not-https"));

        reports.technical.has_source_url = false;
        reports.technical.url_length = 40;
        assert!(!ids_of(&synthesize_issues(&reports)).contains(&"not-https"));
    }

    #[test]
    fn multiple_h1_is_low() {
        let r = ContentReport {
            word_count: 500,
            headings: HeadingFacts {
                counts: [2, 0, 0, 0, 0, 0],
                h1: vec!["A".into(), "B".into()],
                outline: vec![],
            },
            ..Default::default()
        };
        let mut out = Vec::new();
        content(&r, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "multiple-h1");
        assert_eq!(out[0].severity, Severity::Low);
    }

    #[test]
    fn product_schema_raises_context_and_incomplete() {
        let r = SchemaReport {
            count: 1,
            types: vec!["Product".into()],
            items: vec![SchemaItem {
                schema_type: "Product".into(),
                valid: false,
                issues: vec![
                    "missing @context".into(),
                    "missing: image, offers/review/aggregateRating".into(),
                ],
                warnings: vec![],
                incomplete: vec![IncompleteType {
                    schema_type: "Product".into(),
                    missing: vec!["image".into(), "offers/review/aggregateRating".into()],
                }],
            }],
            ..Default::default()
        };
        let mut out = Vec::new();
        schema(&r, &mut out);
        assert_eq!(
            ids_of(&out),
            vec!["schema-missing-context", "schema-incomplete-product"]
        );
        assert_eq!(out[1].issue, "Product schema incomplete");
        assert_eq!(
            out[1].details.as_deref(),
            Some("missing: image, offers/review/aggregateRating")
        );
    }

    #[test]
    fn multi_type_item_names_the_incomplete_type() {
        let r = SchemaReport {
            count: 1,
            types: vec!["Organization".into(), "LocalBusiness".into()],
            items: vec![SchemaItem {
                schema_type: "Organization, LocalBusiness".into(),
                valid: false,
                issues: vec!["missing: address".into()],
                incomplete: vec![IncompleteType {
                    schema_type: "LocalBusiness".into(),
                    missing: vec!["address".into()],
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut out = Vec::new();
        schema(&r, &mut out);
        assert_eq!(ids_of(&out), vec!["schema-incomplete-local-business"]);
        assert_eq!(out[0].issue, "LocalBusiness schema incomplete");
    }

    #[test]
    fn repeated_schema_types_raise_one_issue() {
        let item = SchemaItem {
            schema_type: "Product".into(),
            valid: false,
            issues: vec!["missing: image".into()],
            warnings: vec![],
            incomplete: vec![IncompleteType {
                schema_type: "Product".into(),
                missing: vec!["image".into()],
            }],
        };
        let r = SchemaReport {
            count: 2,
            items: vec![item.clone(), item],
            ..Default::default()
        };
        let mut out = Vec::new();
        schema(&r, &mut out);
        assert_eq!(ids_of(&out), vec!["schema-incomplete-product"]);
    }

    #[test]
    fn ssl_expiry_only_when_valid() {
        let mut r = SecurityReport {
            ssl: Some(SslFacts {
                valid: true,
                days_until_expiry: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut out = Vec::new();
        security(&r, &mut out);
        assert_eq!(ids_of(&out), vec!["ssl-expiring"]);

        r.ssl = Some(SslFacts::default());
        out.clear();
        security(&r, &mut out);
        assert_eq!(ids_of(&out), vec!["ssl-invalid"]);
    }

    #[test]
    fn default_reports_have_unique_ids() {
        let issues = synthesize_issues(&CategoryReports::default());
        let mut ids = ids_of(&issues);
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
        assert!(issues.iter().all(|i| !i.fix.is_empty()));
    }
}
