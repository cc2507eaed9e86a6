//! Customer-product assignment entities and the rules that act on them.

pub mod billing;
pub mod model;
pub mod quantity;
pub mod transition;

pub use billing::{BillingLine, BillingSnapshot, line_total};
pub use model::{Assignment, AssignmentSummary, AssignmentView, QuantityUpdate};
pub use quantity::DecreaseStep;
pub use transition::{BillingStatus, ToggleOutcome, TogglePlan};
