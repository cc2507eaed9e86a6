//! Catalog product management.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use backoffice_core::config::{CatalogConfig, ProductDeletePolicy};
use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::ProductId;
use backoffice_database::repositories::ProductRepository;
use backoffice_entity::product::{CatalogProduct, CreateProduct, Product, UpdateProduct};

use crate::context::RequestContext;

/// Manages shared catalog products.
#[derive(Debug, Clone)]
pub struct ProductService {
    product_repo: Arc<ProductRepository>,
    delete_policy: ProductDeletePolicy,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(product_repo: Arc<ProductRepository>, config: &CatalogConfig) -> Self {
        Self {
            product_repo,
            delete_policy: config.product_delete_policy,
        }
    }

    /// Assignable products: active, not archived, not custom.
    pub async fn list_catalog(&self) -> AppResult<Vec<CatalogProduct>> {
        self.product_repo.list_catalog().await
    }

    /// Non-archived catalog products including inactive ones.
    pub async fn list_all(&self) -> AppResult<Vec<CatalogProduct>> {
        self.product_repo.list_all().await
    }

    /// Archived catalog products.
    pub async fn list_archived(&self) -> AppResult<Vec<CatalogProduct>> {
        self.product_repo.list_archived().await
    }

    /// One product with its category name.
    pub async fn get(&self, id: ProductId) -> AppResult<CatalogProduct> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Add a product to the catalog.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateProduct) -> AppResult<CatalogProduct> {
        data.name = required_name(&data.name)?;
        check_price(Some(data.price))?;

        let product = self.product_repo.create(&data).await?;
        info!(user_id = %ctx.user_id, product_id = %product.product.id, "Product created");
        Ok(product)
    }

    /// Replace the editable fields of a product.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        mut data: UpdateProduct,
    ) -> AppResult<CatalogProduct> {
        data.name = required_name(&data.name)?;
        check_price(data.price)?;

        let product = self.product_repo.update(id, &data).await?;
        info!(user_id = %ctx.user_id, product_id = %id, "Product updated");
        Ok(product)
    }

    /// Flip whether a product can be assigned.
    pub async fn toggle_active(&self, ctx: &RequestContext, id: ProductId) -> AppResult<Product> {
        let product = self.product_repo.toggle_active(id).await?;
        info!(user_id = %ctx.user_id, product_id = %id, is_active = product.is_active, "Product active flag toggled");
        Ok(product)
    }

    /// Soft-delete a product.
    pub async fn archive(&self, ctx: &RequestContext, id: ProductId) -> AppResult<Product> {
        let product = self.product_repo.set_archived(id, true).await?;
        info!(user_id = %ctx.user_id, product_id = %id, "Product archived");
        Ok(product)
    }

    /// Bring an archived product back.
    pub async fn restore(&self, ctx: &RequestContext, id: ProductId) -> AppResult<Product> {
        let product = self.product_repo.set_archived(id, false).await?;
        info!(user_id = %ctx.user_id, product_id = %id, "Product restored");
        Ok(product)
    }

    /// Remove a product for good, following the configured delete policy.
    ///
    /// Returns the number of assignments deleted along with it.
    pub async fn delete_permanently(&self, ctx: &RequestContext, id: ProductId) -> AppResult<u64> {
        let removed = self
            .product_repo
            .delete_permanently(id, self.delete_policy)
            .await?;

        if removed > 0 {
            warn!(
                user_id = %ctx.user_id,
                product_id = %id,
                assignments = removed,
                "Product deleted together with its assignments"
            );
        } else {
            info!(user_id = %ctx.user_id, product_id = %id, "Product deleted");
        }
        Ok(removed)
    }
}

fn required_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    Ok(name.to_string())
}

fn check_price(price: Option<Decimal>) -> AppResult<()> {
    match price {
        Some(p) if p < Decimal::ZERO => Err(AppError::validation("Price must not be negative")),
        _ => Ok(()),
    }
}
