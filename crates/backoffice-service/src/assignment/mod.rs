//! Customer-product assignment engine.

pub mod service;

pub use service::{AssignmentService, Attached, Decreased, Toggled};
