//! Static GraphQL documents for the product catalog.
//!
//! There is one document per (lookup mode, query variant) pair. Each selects a
//! distinct root field on the catalog schema, which is also the key the
//! products come back under.

use catalog_explorer_core::{LookupMode, QueryVariant};

const LIST_BASIC: &str = r"
query GetProducts($pageIndex: Int, $pageSize: Int) {
  productsBasic(pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    sku
    price
    stockQuantity
  }
}
";

const LIST_WITH_RELATIONS: &str = r"
query GetProducts($pageIndex: Int, $pageSize: Int) {
  productsWithBrandAndCategory(pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    sku
    price
    stockQuantity
    brand {
      id
      name
      logoUrl
    }
    category {
      id
      name
      slug
    }
  }
}
";

const LIST_ALL_FIELDS: &str = r"
query GetProducts($pageIndex: Int, $pageSize: Int) {
  productsWithPagination(pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    description
    sku
    slug
    price
    compareAtPrice
    stockQuantity
    lowStockThreshold
    weight
    weightUnit
    active
    featured
    trackInventory
    imageUrls
    tags
    createdAt
    updatedAt
    brand {
      id
      name
      description
      logoUrl
      websiteUrl
      active
      createdAt
      updatedAt
    }
    category {
      id
      name
      description
      slug
      imageUrl
      active
      sortOrder
      createdAt
      updatedAt
    }
  }
}
";

const SEARCH_BASIC: &str = r"
query SearchProducts($namePattern: String!, $pageIndex: Int, $pageSize: Int) {
  searchProductsBasic(namePattern: $namePattern, pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    sku
    price
    stockQuantity
  }
}
";

const SEARCH_WITH_RELATIONS: &str = r"
query SearchProducts($namePattern: String!, $pageIndex: Int, $pageSize: Int) {
  searchProductsWithBrandAndCategory(namePattern: $namePattern, pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    sku
    price
    stockQuantity
    brand {
      id
      name
      logoUrl
    }
    category {
      id
      name
      slug
    }
  }
}
";

const SEARCH_ALL_FIELDS: &str = r"
query SearchProducts($namePattern: String!, $pageIndex: Int, $pageSize: Int) {
  searchProductsWithPagination(namePattern: $namePattern, pageIndex: $pageIndex, pageSize: $pageSize) {
    id
    name
    description
    sku
    slug
    price
    compareAtPrice
    stockQuantity
    lowStockThreshold
    weight
    weightUnit
    active
    featured
    trackInventory
    imageUrls
    tags
    createdAt
    updatedAt
    brand {
      id
      name
      description
      logoUrl
      websiteUrl
      active
      createdAt
      updatedAt
    }
    category {
      id
      name
      description
      slug
      imageUrl
      active
      sortOrder
      createdAt
      updatedAt
    }
  }
}
";

/// GraphQL document for a lookup mode and query variant.
#[must_use]
pub const fn document(mode: LookupMode, variant: QueryVariant) -> &'static str {
    match (mode, variant) {
        (LookupMode::Listing, QueryVariant::Basic) => LIST_BASIC,
        (LookupMode::Listing, QueryVariant::WithRelations) => LIST_WITH_RELATIONS,
        (LookupMode::Listing, QueryVariant::AllFields) => LIST_ALL_FIELDS,
        (LookupMode::Search, QueryVariant::Basic) => SEARCH_BASIC,
        (LookupMode::Search, QueryVariant::WithRelations) => SEARCH_WITH_RELATIONS,
        (LookupMode::Search, QueryVariant::AllFields) => SEARCH_ALL_FIELDS,
    }
}

/// Root field selected by [`document`] for the same pair.
#[must_use]
pub const fn root_field(mode: LookupMode, variant: QueryVariant) -> &'static str {
    match (mode, variant) {
        (LookupMode::Listing, QueryVariant::Basic) => "productsBasic",
        (LookupMode::Listing, QueryVariant::WithRelations) => "productsWithBrandAndCategory",
        (LookupMode::Listing, QueryVariant::AllFields) => "productsWithPagination",
        (LookupMode::Search, QueryVariant::Basic) => "searchProductsBasic",
        (LookupMode::Search, QueryVariant::WithRelations) => {
            "searchProductsWithBrandAndCategory"
        }
        (LookupMode::Search, QueryVariant::AllFields) => "searchProductsWithPagination",
    }
}
