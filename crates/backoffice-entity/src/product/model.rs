//! Product entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use backoffice_core::types::{CategoryId, ProductId};

/// A product row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Owning category, if any.
    pub category_id: Option<CategoryId>,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the product can currently be assigned.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_archived: bool,
    /// Created ad hoc for a single customer, hidden from the catalog.
    pub is_custom: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// A product joined with its category name, as shown in catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogProduct {
    /// The product row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    /// Name of the owning category.
    pub category_name: Option<String>,
}

/// Data required to create a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Product name.
    pub name: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Unit price; zero when absent.
    pub price: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProduct {
    /// Product name.
    pub name: String,
    /// Owning category.
    pub category_id: Option<CategoryId>,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Optional description.
    pub description: Option<String>,
}
