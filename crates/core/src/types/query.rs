//! Query selectors: which fields a catalog query requests and how it looks products up.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field depth of a catalog product query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum QueryVariant {
    /// Core scalar fields only.
    #[default]
    Basic,
    /// Core scalar fields plus a summary of brand and category.
    WithRelations,
    /// Every product field plus full brand and category records.
    AllFields,
}

impl QueryVariant {
    /// All variants in display order.
    pub const ALL: [Self; 3] = [Self::Basic, Self::WithRelations, Self::AllFields];

    /// Wire name used in forms and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::WithRelations => "withRelations",
            Self::AllFields => "allFields",
        }
    }

    /// Human-readable label for radio groups.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic fields",
            Self::WithRelations => "With brand & category",
            Self::AllFields => "All fields",
        }
    }
}

impl fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query variant name that matches none of the known variants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown query variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for QueryVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "basic" => Ok(Self::Basic),
            "withRelations" | "with-relations" | "with_relations" => Ok(Self::WithRelations),
            "allFields" | "all-fields" | "all_fields" => Ok(Self::AllFields),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Whether a query lists the catalog or filters it by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LookupMode {
    /// Unfiltered, paginated listing.
    #[default]
    Listing,
    /// Name-pattern search.
    Search,
}

impl LookupMode {
    /// Both modes.
    pub const ALL: [Self; 2] = [Self::Listing, Self::Search];

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_parses_wire_and_cli_names() {
        assert_eq!("basic".parse::<QueryVariant>().unwrap(), QueryVariant::Basic);
        assert_eq!(
            "withRelations".parse::<QueryVariant>().unwrap(),
            QueryVariant::WithRelations
        );
        assert_eq!(
            "all-fields".parse::<QueryVariant>().unwrap(),
            QueryVariant::AllFields
        );
    }

    #[test]
    fn test_variant_rejects_unknown() {
        let err = "everything".parse::<QueryVariant>().unwrap_err();
        assert_eq!(err.to_string(), "unknown query variant: everything");
    }

    #[test]
    fn test_variant_serde_uses_camel_case() {
        let json = serde_json::to_string(&QueryVariant::WithRelations).unwrap();
        assert_eq!(json, "\"withRelations\"");
    }
}
