//! Product domain entities.

pub mod model;

pub use model::{CatalogProduct, CreateProduct, Product, UpdateProduct};
