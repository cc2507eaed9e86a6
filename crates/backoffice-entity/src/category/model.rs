//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use backoffice_core::types::CategoryId;

/// A catalog category, optionally nested under a parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent category (null for top-level categories).
    pub parent_id: Option<CategoryId>,
    /// Soft-delete flag.
    pub is_archived: bool,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is a top-level category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent category.
    pub parent_id: Option<CategoryId>,
}
