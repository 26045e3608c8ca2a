//! Custom data-generation volume.

use core::fmt;
use std::num::NonZeroU32;

/// Suggested number of brands offered when prompting.
pub const DEFAULT_BRANDS: u32 = 20;
/// Suggested number of categories offered when prompting.
pub const DEFAULT_CATEGORIES: u32 = 15;
/// Suggested number of products offered when prompting.
pub const DEFAULT_PRODUCTS: u32 = 5000;

/// Errors that can occur when parsing a [`CustomVolume`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// A count is not a positive whole number.
    #[error("{field} must be a positive whole number (got {value:?})")]
    NotPositive {
        /// Which count was rejected.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// How many brands, categories and products to generate.
///
/// ## Examples
///
/// ```
/// use catalog_explorer_core::CustomVolume;
///
/// // All three answered
/// let volume = CustomVolume::from_prompts(Some("20"), Some("15"), Some("5000"))
///     .unwrap()
///     .unwrap();
/// assert_eq!(volume.products().get(), 5000);
///
/// // Any cancelled or blank answer aborts the whole operation
/// assert_eq!(CustomVolume::from_prompts(Some("20"), None, Some("5000")), Ok(None));
/// assert_eq!(CustomVolume::from_prompts(Some(""), Some("15"), Some("5000")), Ok(None));
///
/// // Answers that are not positive integers are rejected
/// assert!(CustomVolume::from_prompts(Some("0"), Some("15"), Some("5000")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomVolume {
    brands: NonZeroU32,
    categories: NonZeroU32,
    products: NonZeroU32,
}

impl CustomVolume {
    /// Create a volume from already-validated counts.
    #[must_use]
    pub const fn new(brands: NonZeroU32, categories: NonZeroU32, products: NonZeroU32) -> Self {
        Self {
            brands,
            categories,
            products,
        }
    }

    /// Build a volume from three prompt answers.
    ///
    /// Returns `Ok(None)` when any answer was cancelled (`None`) or left blank:
    /// the caller must then abort without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns `VolumeError` if an answer is present but is not a positive integer.
    pub fn from_prompts(
        brands: Option<&str>,
        categories: Option<&str>,
        products: Option<&str>,
    ) -> Result<Option<Self>, VolumeError> {
        let answers = [brands, categories, products].map(|a| a.map(str::trim));
        let [Some(brands), Some(categories), Some(products)] = answers else {
            return Ok(None);
        };
        if brands.is_empty() || categories.is_empty() || products.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            brands: parse_count("brands", brands)?,
            categories: parse_count("categories", categories)?,
            products: parse_count("products", products)?,
        }))
    }

    /// Number of brands.
    #[must_use]
    pub const fn brands(&self) -> NonZeroU32 {
        self.brands
    }

    /// Number of categories.
    #[must_use]
    pub const fn categories(&self) -> NonZeroU32 {
        self.categories
    }

    /// Number of products.
    #[must_use]
    pub const fn products(&self) -> NonZeroU32 {
        self.products
    }

    /// Query parameters understood by the generation endpoint.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("brands", self.brands.to_string()),
            ("categories", self.categories.to_string()),
            ("products", self.products.to_string()),
        ]
    }
}

impl fmt::Display for CustomVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} brands, {} categories, and {} products",
            self.brands, self.categories, self.products
        )
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<NonZeroU32, VolumeError> {
    value.parse().map_err(|_| VolumeError::NotPositive {
        field,
        value: value.to_string(),
    })
}
