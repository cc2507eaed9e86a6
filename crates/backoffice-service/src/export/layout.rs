//! Row layout of the per-customer workbook.
//!
//! The layout is computed from plain data before anything is rendered, so
//! grouping, highlighting and the grand total can be checked without
//! opening a spreadsheet.

use rust_decimal::Decimal;

use backoffice_entity::assignment::{AssignmentView, line_total};
use backoffice_entity::customer::Customer;

/// Column headers of every category block.
pub const ITEM_HEADERS: [&str; 3] = ["Produktname", "Menge", "Preis"];

/// Label of the grand total row.
pub const TOTAL_LABEL: &str = "Gesamt";

/// One worksheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetRow {
    /// A label/value pair of the customer block.
    Field {
        /// German field label.
        label: &'static str,
        /// Rendered value, empty when unset.
        value: String,
    },
    /// Empty separator row.
    Blank,
    /// Bold category name opening a group.
    CategoryTitle(String),
    /// Column header row of a group.
    ItemHeader,
    /// One product line.
    Item {
        /// Product name.
        name: String,
        /// Units.
        quantity: i32,
        /// Unit price, if known.
        price: Option<Decimal>,
        /// Set when the price is missing or zero.
        highlight: bool,
    },
    /// Final row carrying the sum of `price * quantity` over every line.
    GrandTotal(Decimal),
}

/// A category and its lines, in display order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    /// Category name, or the fallback label.
    pub label: String,
    /// Lines of this category.
    pub items: Vec<&'a AssignmentView>,
}

/// Complete row layout for one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Rows from top to bottom.
    pub rows: Vec<SheetRow>,
    /// Sum over all lines, billed or not.
    pub grand_total: Decimal,
}

impl SheetLayout {
    /// Lay out the customer block followed by one block per category.
    pub fn build(customer: &Customer, views: &[AssignmentView], uncategorized_label: &str) -> Self {
        let mut rows = customer_block(customer);
        rows.push(SheetRow::Blank);

        for group in group_by_category(views, uncategorized_label) {
            rows.push(SheetRow::CategoryTitle(group.label));
            rows.push(SheetRow::ItemHeader);
            for view in group.items {
                rows.push(SheetRow::Item {
                    name: view.product_name.clone(),
                    quantity: view.quantity,
                    price: view.price,
                    highlight: needs_price(view.price),
                });
            }
            rows.push(SheetRow::Blank);
        }

        let grand_total = views
            .iter()
            .map(|v| line_total(v.price, v.quantity))
            .sum();
        rows.push(SheetRow::GrandTotal(grand_total));

        Self { rows, grand_total }
    }
}

/// Whether a line should be flagged for a missing or zero price.
pub fn needs_price(price: Option<Decimal>) -> bool {
    price.is_none_or(|p| p.is_zero())
}

/// Group lines by category name, keeping the order in which categories
/// first appear. Lines without a category go to `uncategorized_label`.
pub fn group_by_category<'a>(
    views: &'a [AssignmentView],
    uncategorized_label: &str,
) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for view in views {
        let label = view
            .category_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(uncategorized_label);

        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.items.push(view),
            None => groups.push(CategoryGroup {
                label: label.to_string(),
                items: vec![view],
            }),
        }
    }
    groups
}

fn customer_block(customer: &Customer) -> Vec<SheetRow> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    vec![
        SheetRow::Field {
            label: "Name",
            value: customer.name.clone(),
        },
        SheetRow::Field {
            label: "Adresse",
            value: text(&customer.address),
        },
        SheetRow::Field {
            label: "Telefon",
            value: text(&customer.phone),
        },
        SheetRow::Field {
            label: "E-Mail",
            value: text(&customer.email),
        },
        SheetRow::Field {
            label: "Projektart",
            value: text(&customer.project_type),
        },
        SheetRow::Field {
            label: "Notizen",
            value: text(&customer.notes),
        },
        SheetRow::Field {
            label: "Archiviert",
            value: if customer.is_archived { "Ja" } else { "Nein" }.to_string(),
        },
        SheetRow::Field {
            label: "Erstellt am",
            value: customer.created_at.format("%d.%m.%Y").to_string(),
        },
    ]
}
