//! Assignment row models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use backoffice_core::types::{AssignmentId, CategoryId, CustomerId, ProductId};

/// A raw `customer_products` row.
///
/// At most one row exists per `(customer_id, product_id, is_billed)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Assigned product.
    pub product_id: ProductId,
    /// Number of units, never negative.
    pub quantity: i32,
    /// Whether the line has been invoiced.
    pub is_billed: bool,
    /// When the row was first created.
    pub added_at: DateTime<Utc>,
}

/// An assignment enriched with product and category display fields.
///
/// The display fields are joined at read time and never persisted on the
/// assignment itself.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentView {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Assigned product.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: i32,
    /// Whether the line has been invoiced.
    pub is_billed: bool,
    /// When the row was first created.
    pub added_at: DateTime<Utc>,
    /// Product name.
    pub product_name: String,
    /// Current unit price of the product.
    pub price: Option<Decimal>,
    /// Whether the product is still active.
    pub is_active: bool,
    /// Product category.
    pub category_id: Option<CategoryId>,
    /// Category name.
    pub category_name: Option<String>,
}

/// Unit and product counts across every assignment of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    /// Sum of all quantities.
    pub total_products: i64,
    /// Number of distinct products.
    pub distinct_products: i64,
}

/// One entry of a bulk quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    /// Target assignment.
    pub id: AssignmentId,
    /// New quantity.
    pub quantity: i32,
}
