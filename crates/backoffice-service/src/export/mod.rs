//! Per-customer Excel export.

pub mod layout;
pub mod render;
pub mod service;

pub use layout::{SheetLayout, SheetRow};
pub use service::{ExportFile, ExportService};
