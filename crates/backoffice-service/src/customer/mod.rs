//! Customer records.

pub mod service;

pub use service::CustomerService;
