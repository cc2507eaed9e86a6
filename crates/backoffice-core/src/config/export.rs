//! Spreadsheet export configuration.

use serde::{Deserialize, Serialize};

/// Settings for the per-customer Excel export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Name of the single worksheet.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Group heading for products without a category.
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            uncategorized_label: default_uncategorized_label(),
        }
    }
}

fn default_sheet_name() -> String {
    "Kunde".to_string()
}

fn default_uncategorized_label() -> String {
    "Sonstige".to_string()
}
