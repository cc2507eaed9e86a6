//! Product repository.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use backoffice_core::config::ProductDeletePolicy;
use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::ProductId;
use backoffice_entity::product::{CatalogProduct, CreateProduct, Product, UpdateProduct};

use super::{database_error, violated_constraint};

const CATALOG_SELECT: &str = "SELECT p.*, c.name AS category_name \
     FROM products p \
     LEFT JOIN categories c ON c.id = p.category_id";

/// Repository for catalog and custom products.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assignable catalog products: active, not archived, not custom.
    pub async fn list_catalog(&self) -> AppResult<Vec<CatalogProduct>> {
        self.fetch_catalog(
            "WHERE p.is_active = TRUE AND p.is_archived = FALSE AND p.is_custom = FALSE \
             ORDER BY c.name, p.name",
        )
        .await
    }

    /// Every non-archived catalog product, inactive ones included.
    pub async fn list_all(&self) -> AppResult<Vec<CatalogProduct>> {
        self.fetch_catalog(
            "WHERE p.is_archived = FALSE AND p.is_custom = FALSE \
             ORDER BY p.is_active DESC, c.name, p.name",
        )
        .await
    }

    /// Archived catalog products.
    pub async fn list_archived(&self) -> AppResult<Vec<CatalogProduct>> {
        self.fetch_catalog(
            "WHERE p.is_archived = TRUE AND p.is_custom = FALSE ORDER BY c.name, p.name",
        )
        .await
    }

    async fn fetch_catalog(&self, tail: &str) -> AppResult<Vec<CatalogProduct>> {
        sqlx::query_as::<_, CatalogProduct>(&format!("{CATALOG_SELECT} {tail}"))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("Failed to list products"))
    }

    /// Find a product with its category name.
    pub async fn find_by_id(&self, id: ProductId) -> AppResult<Option<CatalogProduct>> {
        sqlx::query_as::<_, CatalogProduct>(&format!("{CATALOG_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find product"))
    }

    /// Insert a catalog product.
    pub async fn create(&self, data: &CreateProduct) -> AppResult<CatalogProduct> {
        let id: ProductId = sqlx::query_scalar(
            "INSERT INTO products (name, category_id, price, description) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.price)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("products_category_id_fkey") => {
                AppError::not_found(format!("Category {} not found", data.category_id))
            }
            _ => database_error("Failed to create product")(e),
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Product {id} vanished after insert")))
    }

    /// Replace the editable fields of a product.
    pub async fn update(&self, id: ProductId, data: &UpdateProduct) -> AppResult<CatalogProduct> {
        let updated = sqlx::query(
            "UPDATE products SET name = $2, category_id = $3, price = $4, description = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.category_id)
        .bind(data.price)
        .bind(&data.description)
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("products_category_id_fkey") => AppError::not_found("Category not found"),
            _ => database_error("Failed to update product")(e),
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Flip the active flag and return the product.
    pub async fn toggle_active(&self, id: ProductId) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET is_active = NOT is_active WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to toggle product"))?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Set or clear the soft-delete flag.
    pub async fn set_archived(&self, id: ProductId, archived: bool) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET is_archived = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to change product archive flag"))?
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))
    }

    /// Insert an ad hoc product owned by a single customer assignment.
    pub async fn insert_custom(
        conn: &mut PgConnection,
        name: &str,
        price: Decimal,
    ) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price, is_custom, is_active, is_archived) \
             VALUES ($1, $2, TRUE, TRUE, FALSE) RETURNING *",
        )
        .bind(name)
        .bind(price)
        .fetch_one(conn)
        .await
        .map_err(database_error("Failed to create custom product"))
    }

    /// Hard-delete a product, applying `policy` to its assignments.
    ///
    /// Returns the number of assignments removed together with the product.
    pub async fn delete_permanently(
        &self,
        id: ProductId,
        policy: ProductDeletePolicy,
    ) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to begin transaction"))?;

        let exists: Option<ProductId> =
            sqlx::query_scalar("SELECT id FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(database_error("Failed to lock product"))?;
        if exists.is_none() {
            return Err(AppError::not_found(format!("Product {id} not found")));
        }

        let removed = match policy {
            ProductDeletePolicy::Restrict => {
                let referenced: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM customer_products WHERE product_id = $1",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error("Failed to count product assignments"))?;
                if referenced > 0 {
                    return Err(AppError::conflict(format!(
                        "Product {id} is still assigned to customers ({referenced} rows)"
                    )));
                }
                0
            }
            ProductDeletePolicy::Cascade => sqlx::query(
                "DELETE FROM customer_products WHERE product_id = $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to delete product assignments"))?
            .rows_affected(),
        };

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some("customer_products_product_id_fkey") => {
                    AppError::conflict(format!("Product {id} is still assigned to customers"))
                }
                _ => database_error("Failed to delete product")(e),
            })?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit product delete"))?;
        Ok(removed)
    }
}
