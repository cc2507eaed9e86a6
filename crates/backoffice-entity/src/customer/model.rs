//! Customer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use backoffice_core::types::CustomerId;

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Kind of project the customer ordered.
    pub project_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft-delete flag.
    pub is_archived: bool,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

/// Writable customer fields, used for both create and full update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    /// Display name (required).
    pub name: String,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Kind of project.
    pub project_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}
