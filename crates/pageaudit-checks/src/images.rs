use std::collections::BTreeSet;

use pageaudit_dom::{Document, attr, has_ancestor, has_attr, parent_element};
use pageaudit_types::ImagesReport;

use crate::util::{push_sample, truncate_chars};

/// Images at these document positions stand in for "above the fold".
const ABOVE_FOLD_IMAGES: usize = 3;
const MODERN_FORMATS: &[&str] = &["webp", "avif", "jxl"];
const LEGACY_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff"];

pub fn build_images_report(doc: &Document) -> ImagesReport {
    let mut r = ImagesReport::default();
    let mut urls = BTreeSet::new();

    for (idx, img) in doc.select("img").into_iter().enumerate() {
        r.total += 1;
        let src = attr(img, "src").unwrap_or_default().trim();
        let alt = attr(img, "alt");

        match alt {
            None => {
                r.missing_alt_count += 1;
                push_sample(&mut r.missing_alt, truncate_chars(src, 200));
            }
            Some(a) if a.trim().is_empty() => r.empty_alt_count += 1,
            Some(_) => {}
        }

        if !(has_attr(img, "width") && has_attr(img, "height")) {
            r.missing_dimensions_count += 1;
        }

        let lazy = attr(img, "loading").is_some_and(|l| l.trim().eq_ignore_ascii_case("lazy"));
        if lazy {
            r.lazy_loaded_count += 1;
            if idx < ABOVE_FOLD_IMAGES {
                r.lazy_above_fold_count += 1;
            }
        }

        let unlabeled = alt.is_none_or(|a| a.trim().is_empty());
        if unlabeled && has_ancestor(img, &["a", "button"]) {
            r.clickable_without_alt_count += 1;
        }

        let in_picture = parent_element(img).is_some_and(|p| p.value().name() == "picture");
        if has_attr(img, "srcset") || in_picture {
            r.srcset_count += 1;
        }

        match image_format(src) {
            Some(f) if MODERN_FORMATS.contains(&f.as_str()) => r.modern_format_count += 1,
            Some(f) if LEGACY_FORMATS.contains(&f.as_str()) => r.legacy_format_count += 1,
            _ => {}
        }

        if let Some(url) = doc.resolve(src).filter(|u| matches!(u.scheme(), "http" | "https")) {
            let s = url.to_string();
            if urls.insert(s.clone()) {
                r.image_urls.push(s);
            }
        }
    }
    r
}

/// Lower-case format from a data URI media type or the path extension.
fn image_format(src: &str) -> Option<String> {
    let lower = src.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("data:image/") {
        let end = rest.find([';', ',', '+']).unwrap_or(rest.len());
        return Some(rest[..end].to_string());
    }
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_string())
}
