//! Requested-field summary for the metrics panel.
//!
//! This is a substring heuristic over the static documents in
//! [`super::queries`], not a GraphQL parser. A token that happens to appear
//! elsewhere in a document (an argument name, say) is reported as requested.
//! The output is display-only.

/// Scalar field tokens, in display order.
const SCALAR_FIELDS: &[&str] = &[
    "id",
    "name",
    "sku",
    "price",
    "stockQuantity",
    "description",
    "slug",
    "compareAtPrice",
    "weight",
    "active",
    "featured",
    "imageUrls",
    "tags",
    "createdAt",
    "updatedAt",
];

/// Relation selection markers and the field name reported for each.
const RELATION_MARKERS: &[(&str, &str)] = &[("brand {", "brand"), ("category {", "category")];

/// Fields a document requests, in display order, without duplicates.
#[must_use]
pub fn extract_fields(document: &str) -> Vec<&'static str> {
    let scalars = SCALAR_FIELDS
        .iter()
        .copied()
        .filter(|field| document.contains(field));
    let relations = RELATION_MARKERS
        .iter()
        .filter(|(marker, _)| document.contains(marker))
        .map(|&(_, field)| field);

    scalars.chain(relations).collect()
}

#[cfg(test)]
mod tests {
    use catalog_explorer_core::{LookupMode, QueryVariant};

    use super::*;
    use crate::catalog::queries::document;

    #[test]
    fn test_basic_listing_fields() {
        let fields = extract_fields(document(LookupMode::Listing, QueryVariant::Basic));
        assert_eq!(fields, ["id", "name", "sku", "price", "stockQuantity"]);
    }

    #[test]
    fn test_all_fields_listing_has_every_token() {
        let fields = extract_fields(document(LookupMode::Listing, QueryVariant::AllFields));
        for token in SCALAR_FIELDS {
            assert!(fields.contains(token), "missing {token}");
        }
        assert!(fields.contains(&"brand"));
        assert!(fields.contains(&"category"));
    }

    #[test]
    fn test_with_relations_adds_markers_only() {
        let fields = extract_fields(document(LookupMode::Search, QueryVariant::WithRelations));
        // `slug` comes from the category selection.
        assert_eq!(
            fields,
            ["id", "name", "sku", "price", "stockQuantity", "slug", "brand", "category"]
        );
    }

    #[test]
    fn test_no_duplicates() {
        let fields = extract_fields(document(LookupMode::Search, QueryVariant::AllFields));
        let mut deduped = fields.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), fields.len());
    }

    #[test]
    fn test_unrelated_text_yields_nothing() {
        assert!(extract_fields("query { ping }").is_empty());
    }
}
