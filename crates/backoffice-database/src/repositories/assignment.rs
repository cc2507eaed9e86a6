//! Customer-product assignment repository.
//!
//! Single-statement operations run on the pool. Operations that the
//! assignment engine composes into a transaction take a `&mut PgConnection`
//! so the caller controls commit and rollback.

use sqlx::{FromRow, PgConnection, PgPool};

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::{AssignmentId, CustomerId, ProductId};
use backoffice_entity::assignment::{Assignment, AssignmentSummary, AssignmentView, TogglePlan};

use super::{database_error, quantity_error, violated_constraint};

const VIEW_SELECT: &str = "SELECT cp.id, cp.customer_id, cp.product_id, cp.quantity, \
            cp.is_billed, cp.added_at, \
            p.name AS product_name, p.price, p.is_active, \
            p.category_id, c.name AS category_name \
     FROM customer_products cp \
     JOIN products p ON p.id = cp.product_id \
     LEFT JOIN categories c ON c.id = p.category_id";

/// Row returned by the attach upsert.
#[derive(Debug, FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    assignment: Assignment,
    inserted: bool,
}

/// Repository for `customer_products` rows and their enriched views.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // -- catalog accessor ---------------------------------------------------

    /// Every assignment of a customer, ordered by category then product name.
    pub async fn list_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<AssignmentView>> {
        sqlx::query_as::<_, AssignmentView>(&format!(
            "{VIEW_SELECT} WHERE cp.customer_id = $1 ORDER BY c.name, p.name, cp.is_billed"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list customer assignments"))
    }

    /// Unbilled assignments of a customer, ordered by category then product name.
    pub async fn list_unbilled(&self, customer_id: CustomerId) -> AppResult<Vec<AssignmentView>> {
        sqlx::query_as::<_, AssignmentView>(&format!(
            "{VIEW_SELECT} WHERE cp.customer_id = $1 AND cp.is_billed = FALSE \
             ORDER BY c.name, p.name"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list unbilled assignments"))
    }

    /// One enriched assignment.
    pub async fn find_view(&self, id: AssignmentId) -> AppResult<Option<AssignmentView>> {
        sqlx::query_as::<_, AssignmentView>(&format!("{VIEW_SELECT} WHERE cp.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to load assignment"))
    }

    /// One enriched assignment read inside an open transaction.
    pub async fn find_view_in(
        conn: &mut PgConnection,
        id: AssignmentId,
    ) -> AppResult<Option<AssignmentView>> {
        sqlx::query_as::<_, AssignmentView>(&format!("{VIEW_SELECT} WHERE cp.id = $1"))
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(database_error("Failed to load assignment"))
    }

    /// Unit and distinct product counts for a customer.
    pub async fn summary(&self, customer_id: CustomerId) -> AppResult<AssignmentSummary> {
        sqlx::query_as::<_, AssignmentSummary>(
            "SELECT COALESCE(SUM(quantity), 0)::BIGINT AS total_products, \
                    COUNT(DISTINCT product_id) AS distinct_products \
             FROM customer_products WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to summarize assignments"))
    }

    // -- single-statement writes --------------------------------------------

    /// Add `quantity` units to the unbilled row of the pair, creating it if
    /// needed. The flag is `true` when a new row was inserted.
    pub async fn upsert_unbilled(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> AppResult<(Assignment, bool)> {
        let row = sqlx::query_as::<_, UpsertRow>(
            "INSERT INTO customer_products (customer_id, product_id, quantity, is_billed) \
             VALUES ($1, $2, $3, FALSE) \
             ON CONFLICT (customer_id, product_id, is_billed) \
             DO UPDATE SET quantity = customer_products.quantity + EXCLUDED.quantity \
             RETURNING id, customer_id, product_id, quantity, is_billed, added_at, \
                       (xmax = 0) AS inserted",
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("customer_products_customer_id_fkey") => {
                AppError::not_found(format!("Customer {customer_id} not found"))
            }
            Some("customer_products_product_id_fkey") => {
                AppError::not_found(format!("Product {product_id} not found"))
            }
            _ => quantity_error("Failed to attach product")(e),
        })?;

        Ok((row.assignment, row.inserted))
    }

    /// Add `delta` to the quantity. `None` when the row does not exist.
    pub async fn add_quantity(
        &self,
        id: AssignmentId,
        delta: i32,
    ) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            "UPDATE customer_products SET quantity = quantity + $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(quantity_error("Failed to change quantity"))
    }

    /// Set the quantity exactly. `None` when the row does not exist.
    pub async fn set_quantity(
        &self,
        id: AssignmentId,
        quantity: i32,
    ) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            "UPDATE customer_products SET quantity = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to set quantity"))
    }

    /// Delete a row. Returns whether anything was removed.
    pub async fn delete(&self, id: AssignmentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM customer_products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to delete assignment"))?;
        Ok(result.rows_affected() > 0)
    }

    // -- transactional building blocks --------------------------------------

    /// Read a row and hold its lock until the transaction ends.
    pub async fn lock(conn: &mut PgConnection, id: AssignmentId) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            "SELECT * FROM customer_products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(database_error("Failed to lock assignment"))
    }

    /// Read a row inside a transaction without locking it.
    pub async fn find_in(conn: &mut PgConnection, id: AssignmentId) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM customer_products WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(database_error("Failed to load assignment"))
    }

    /// Lock every row of a customer-product pair, lowest ID first.
    ///
    /// Callers touching both rows of a pair must lock through here so that
    /// concurrent transactions acquire the locks in the same order.
    pub async fn lock_pair(
        conn: &mut PgConnection,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> AppResult<Vec<Assignment>> {
        sqlx::query_as::<_, Assignment>(
            "SELECT * FROM customer_products \
             WHERE customer_id = $1 AND product_id = $2 \
             ORDER BY id FOR UPDATE",
        )
        .bind(customer_id)
        .bind(product_id)
        .fetch_all(conn)
        .await
        .map_err(database_error("Failed to lock assignment pair"))
    }

    /// Set the quantity inside a transaction. Returns the affected row count.
    pub async fn set_quantity_in(
        conn: &mut PgConnection,
        id: AssignmentId,
        quantity: i32,
    ) -> AppResult<u64> {
        sqlx::query("UPDATE customer_products SET quantity = $2 WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(conn)
            .await
            .map(|r| r.rows_affected())
            .map_err(database_error("Failed to set quantity"))
    }

    /// Delete a row inside a transaction.
    pub async fn delete_in(conn: &mut PgConnection, id: AssignmentId) -> AppResult<bool> {
        sqlx::query("DELETE FROM customer_products WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(database_error("Failed to delete assignment"))
    }

    /// Insert a fresh unbilled row inside a transaction.
    pub async fn insert_unbilled_in(
        conn: &mut PgConnection,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>(
            "INSERT INTO customer_products (customer_id, product_id, quantity, is_billed) \
             VALUES ($1, $2, $3, FALSE) RETURNING *",
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(conn)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("customer_products_customer_id_fkey") => {
                AppError::not_found(format!("Customer {customer_id} not found"))
            }
            _ => database_error("Failed to insert assignment")(e),
        })
    }

    /// Write a toggle plan to the store.
    pub async fn apply_toggle(conn: &mut PgConnection, plan: &TogglePlan) -> AppResult<()> {
        match *plan {
            TogglePlan::Flip { id, to } => {
                sqlx::query("UPDATE customer_products SET is_billed = $2 WHERE id = $1")
                    .bind(id)
                    .bind(to.is_billed())
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| match violated_constraint(&e) {
                        Some("customer_products_customer_product_billed_key") => {
                            AppError::conflict("Assignment changed concurrently, retry the toggle")
                        }
                        _ => database_error("Failed to toggle billed status")(e),
                    })?;
            }
            TogglePlan::Merge {
                source,
                target,
                quantity,
            } => {
                sqlx::query(
                    "UPDATE customer_products SET quantity = quantity + $2 WHERE id = $1",
                )
                .bind(target)
                .bind(quantity)
                .execute(&mut *conn)
                .await
                .map_err(quantity_error("Failed to merge assignment quantity"))?;

                sqlx::query("DELETE FROM customer_products WHERE id = $1")
                    .bind(source)
                    .execute(&mut *conn)
                    .await
                    .map_err(database_error("Failed to remove merged assignment"))?;
            }
        }
        Ok(())
    }
}
