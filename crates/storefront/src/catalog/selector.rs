//! Picks the product list out of a decoded GraphQL `data` object.

use catalog_explorer_core::{LookupMode, QueryVariant};
use serde_json::Value;

use super::queries::root_field;

/// Product entries under the root field for `mode` and `variant`.
///
/// A missing key, `null`, or a non-array value is treated as no products.
/// Entries are returned undecoded; the renderer decides how to treat
/// `null` or malformed items.
#[must_use]
pub fn select_products(data: &Value, mode: LookupMode, variant: QueryVariant) -> Vec<Value> {
    data.get(root_field(mode, variant))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
