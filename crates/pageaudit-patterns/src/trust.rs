//! Trust-signal substrings. All needles are lower-case.

/// Link href or text needles for an "about" page.
pub const ABOUT: &[&str] = &["about", "о-нас", "о нас", "о компании", "uber-uns", "über uns", "a-propos", "à propos", "sobre", "chi-siamo"];
pub const CONTACT: &[&str] = &["contact", "контакт", "kontakt", "contacto", "contatti", "impressum"];
pub const PRIVACY: &[&str] = &["privacy", "конфиденциальн", "datenschutz", "confidentialit", "privacidad", "privacy-policy"];
pub const TERMS: &[&str] = &["terms", "условия", "соглашение", "agb", "conditions", "términos", "legal"];
pub const COOKIE_POLICY: &[&str] = &["cookie-policy", "cookies-policy", "cookie policy", "политика cookie"];

/// Markers of a cookie consent banner in the page source.
pub const COOKIE_NOTICE: &[&str] = &[
    "cookie-banner",
    "cookie-consent",
    "cookie-notice",
    "cookieconsent",
    "cookiebot",
    "onetrust",
    "cc-window",
    "gdpr",
    "we use cookies",
    "мы используем cookie",
];

pub const TRUST_BADGES: &[&str] = &[
    "norton secured",
    "mcafee secure",
    "trustedsite",
    "secure checkout",
    "ssl secured",
    "verified by",
    "trust-badge",
    "trustbadge",
    "bbb accredited",
];

pub const PAYMENT: &[&str] = &[
    "visa",
    "mastercard",
    "paypal",
    "american express",
    "apple pay",
    "google pay",
    "stripe",
    "klarna",
];

pub const REVIEWS: &[&str] = &[
    "trustpilot",
    "yotpo",
    "reviews.io",
    "feefo",
    "judge.me",
    "bazaarvoice",
    "customer reviews",
    "testimonial",
    "отзывы",
];

pub const CERTIFICATIONS: &[&str] = &[
    "iso 9001",
    "iso 27001",
    "iso/iec",
    "soc 2",
    "hipaa",
    "pci dss",
    "gdpr compliant",
    "certified",
    "сертифицирован",
];

/// Author markup conventions beyond `meta[name=author]` and schema.
pub const AUTHOR_SELECTORS: &[&str] = &[
    "[rel=author]",
    "[itemprop=author]",
    ".author",
    ".byline",
    ".post-author",
    ".entry-author",
    "[class*=author-name]",
];

/// Case-insensitive substring match of any needle in `haystack`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_any_lowercases_haystack() {
        assert!(contains_any("/Privacy-Policy", PRIVACY));
        assert!(contains_any("О нас", ABOUT));
        assert!(!contains_any("/blog", ABOUT));
    }
}
