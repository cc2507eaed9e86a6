//! Billing view over unbilled assignments.

pub mod service;

pub use service::BillingService;
