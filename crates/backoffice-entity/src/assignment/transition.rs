//! Billed/unbilled transition for a `(customer, product)` pair.
//!
//! Each pair has two states, and each state holds at most one row. Flipping
//! a row into a state that is already occupied merges it into the occupant
//! instead of creating a second row.

use serde::{Deserialize, Serialize};

use backoffice_core::types::AssignmentId;

use super::model::Assignment;

/// Billing state of an assignment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    /// Pending, not yet on an invoice.
    Unbilled,
    /// Included in a finalized invoice.
    Billed,
}

impl BillingStatus {
    /// Map the stored `is_billed` flag.
    pub fn from_flag(is_billed: bool) -> Self {
        if is_billed { Self::Billed } else { Self::Unbilled }
    }

    /// The stored flag for this state.
    pub fn is_billed(self) -> bool {
        matches!(self, Self::Billed)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Unbilled => Self::Billed,
            Self::Billed => Self::Unbilled,
        }
    }
}

/// What a toggle must do to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePlan {
    /// No row occupies the target state: flip the source in place.
    Flip {
        /// Row to update.
        id: AssignmentId,
        /// State after the flip.
        to: BillingStatus,
    },
    /// The target state is occupied: fold the source quantity into the
    /// occupant and delete the source.
    Merge {
        /// Row that disappears.
        source: AssignmentId,
        /// Pre-existing row that absorbs the quantity.
        target: AssignmentId,
        /// Units moved from source to target.
        quantity: i32,
    },
}

/// Result reported back to callers of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    /// Whether the source row was merged away.
    pub merged: bool,
    /// The row that now carries the quantity.
    pub resulting_id: AssignmentId,
}

impl TogglePlan {
    /// Decide how to toggle `source`, given the row currently holding the
    /// opposite state for the same pair (if any).
    ///
    /// A `counterpart` that does not belong to the same pair, or that is not
    /// in the opposite state, is ignored.
    pub fn plan(source: &Assignment, counterpart: Option<&Assignment>) -> Self {
        let target_status = BillingStatus::from_flag(source.is_billed).toggled();

        let occupant = counterpart.filter(|c| {
            c.id != source.id
                && c.customer_id == source.customer_id
                && c.product_id == source.product_id
                && BillingStatus::from_flag(c.is_billed) == target_status
        });

        match occupant {
            Some(target) => Self::Merge {
                source: source.id,
                target: target.id,
                quantity: source.quantity,
            },
            None => Self::Flip {
                id: source.id,
                to: target_status,
            },
        }
    }

    /// The outcome this plan produces once applied.
    pub fn outcome(&self) -> ToggleOutcome {
        match *self {
            Self::Flip { id, .. } => ToggleOutcome {
                merged: false,
                resulting_id: id,
            },
            Self::Merge { target, .. } => ToggleOutcome {
                merged: true,
                resulting_id: target,
            },
        }
    }
}
