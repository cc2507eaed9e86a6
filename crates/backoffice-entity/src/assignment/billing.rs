//! Billing line arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use backoffice_core::types::{AssignmentId, ProductId};

use super::model::AssignmentView;

/// `price * quantity`, with a missing price counting as zero.
pub fn line_total(price: Option<Decimal>, quantity: i32) -> Decimal {
    price.unwrap_or(Decimal::ZERO) * Decimal::from(quantity)
}

/// One unbilled line of a billing snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingLine {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Option<Decimal>,
    /// Number of units.
    pub quantity: i32,
    /// Category name.
    pub category_name: Option<String>,
    /// `price * quantity`.
    #[serde(rename = "lineTotal")]
    pub line_total: Decimal,
}

impl From<AssignmentView> for BillingLine {
    fn from(view: AssignmentView) -> Self {
        Self {
            id: view.id,
            product_id: view.product_id,
            line_total: line_total(view.price, view.quantity),
            name: view.product_name,
            price: view.price,
            quantity: view.quantity,
            category_name: view.category_name,
        }
    }
}

/// Unbilled items of one customer together with their total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSnapshot {
    /// Unbilled lines ordered by category then product name.
    pub items: Vec<BillingLine>,
    /// Sum of all line totals.
    pub total: Decimal,
}

impl BillingSnapshot {
    /// Build a snapshot from already-filtered unbilled views.
    pub fn from_unbilled(views: Vec<AssignmentView>) -> Self {
        let items: Vec<BillingLine> = views
            .into_iter()
            .filter(|v| !v.is_billed)
            .map(BillingLine::from)
            .collect();
        let total = items.iter().map(|line| line.line_total).sum();
        Self { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::types::CustomerId;
    use chrono::Utc;

    fn view(id: i64, price: Option<Decimal>, quantity: i32, is_billed: bool) -> AssignmentView {
        AssignmentView {
            id: AssignmentId(id),
            customer_id: CustomerId(1),
            product_id: ProductId(id),
            quantity,
            is_billed,
            added_at: Utc::now(),
            product_name: format!("Produkt {id}"),
            price,
            is_active: true,
            category_id: None,
            category_name: None,
        }
    }

    #[test]
    fn test_line_total_treats_missing_price_as_zero() {
        assert_eq!(line_total(None, 4), Decimal::ZERO);
        assert_eq!(line_total(Some(Decimal::new(1250, 2)), 2), Decimal::new(2500, 2));
    }

    #[test]
    fn test_snapshot_total_skips_billed_lines() {
        let snapshot = BillingSnapshot::from_unbilled(vec![
            view(1, Some(Decimal::from(10)), 3, false),
            view(2, None, 5, false),
            view(3, Some(Decimal::from(99)), 1, true),
        ]);

        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.total, Decimal::from(30));
    }

    #[test]
    fn test_empty_snapshot_total_is_zero() {
        let snapshot = BillingSnapshot::from_unbilled(Vec::new());
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.total, Decimal::ZERO);
    }
}
