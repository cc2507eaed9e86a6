//! Catalog policy configuration.

use serde::{Deserialize, Serialize};

/// What happens to customer assignments when a product is hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductDeletePolicy {
    /// Refuse the delete while any assignment references the product.
    #[default]
    Restrict,
    /// Delete the referencing assignments together with the product.
    Cascade,
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Policy applied by permanent product deletion.
    #[serde(default)]
    pub product_delete_policy: ProductDeletePolicy,
}
