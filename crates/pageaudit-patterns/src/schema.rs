//! Structured-data requirements keyed by `@type`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRequirement {
    pub required: &'static [&'static str],
    pub recommended: &'static [&'static str],
    /// At least one of these must be present.
    pub needs_one_of: &'static [&'static str],
}

const fn req(
    required: &'static [&'static str],
    recommended: &'static [&'static str],
    needs_one_of: &'static [&'static str],
) -> SchemaRequirement {
    SchemaRequirement {
        required,
        recommended,
        needs_one_of,
    }
}

const ARTICLE: SchemaRequirement = req(
    &["headline"],
    &["author", "datePublished", "image", "publisher", "dateModified"],
    &[],
);

pub const REQUIREMENTS: &[(&str, SchemaRequirement)] = &[
    (
        "Product",
        req(
            &["name", "image"],
            &["description", "brand", "sku"],
            &["offers", "review", "aggregateRating"],
        ),
    ),
    ("Organization", req(&["name"], &["url", "logo", "sameAs", "contactPoint"], &[])),
    (
        "LocalBusiness",
        req(&["name", "address"], &["telephone", "openingHours", "geo", "url"], &[]),
    ),
    ("Article", ARTICLE),
    ("NewsArticle", ARTICLE),
    ("BlogPosting", ARTICLE),
    ("BreadcrumbList", req(&["itemListElement"], &[], &[])),
    ("FAQPage", req(&["mainEntity"], &[], &[])),
    ("WebSite", req(&["name", "url"], &["potentialAction"], &[])),
    ("WebPage", req(&["name"], &["description", "url"], &[])),
    ("Person", req(&["name"], &["url", "sameAs", "jobTitle", "image"], &[])),
    (
        "Event",
        req(&["name", "startDate", "location"], &["endDate", "image", "offers", "description"], &[]),
    ),
    (
        "Recipe",
        req(&["name", "image"], &["recipeIngredient", "recipeInstructions", "author", "totalTime"], &[]),
    ),
    ("Review", req(&["itemReviewed", "author"], &["reviewRating", "datePublished"], &[])),
    (
        "VideoObject",
        req(&["name", "thumbnailUrl", "uploadDate"], &["description", "duration", "contentUrl"], &[]),
    ),
    ("HowTo", req(&["name", "step"], &["totalTime", "image"], &[])),
    (
        "JobPosting",
        req(
            &["title", "description", "datePosted", "hiringOrganization"],
            &["validThrough", "employmentType", "baseSalary"],
            &["jobLocation", "applicantLocationRequirements"],
        ),
    ),
    (
        "SoftwareApplication",
        req(&["name"], &["operatingSystem", "applicationCategory"], &["offers", "aggregateRating", "review"]),
    ),
    ("Course", req(&["name", "description"], &["provider"], &[])),
];

/// Requirement record for `schema_type`; `None` for types that are never
/// checked for missing fields.
pub fn requirement(schema_type: &str) -> Option<&'static SchemaRequirement> {
    REQUIREMENTS
        .iter()
        .find(|(name, _)| *name == schema_type)
        .map(|(_, r)| r)
}
