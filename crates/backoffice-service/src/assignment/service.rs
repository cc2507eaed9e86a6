//! The assignment engine: attaching products to customers, quantity
//! arithmetic, billed/unbilled toggling, and ad hoc products.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use backoffice_core::error::{AppError, ErrorKind};
use backoffice_core::result::AppResult;
use backoffice_core::types::{AssignmentId, CustomerId, ProductId};
use backoffice_database::DatabasePool;
use backoffice_database::repositories::{AssignmentRepository, ProductRepository};
use backoffice_entity::assignment::quantity::validate_attach_quantity;
use backoffice_entity::assignment::{
    AssignmentSummary, AssignmentView, DecreaseStep, QuantityUpdate, ToggleOutcome, TogglePlan,
};

use crate::context::RequestContext;

/// Result of an attach call.
#[derive(Debug, Clone)]
pub struct Attached {
    /// The enriched unbilled row.
    pub assignment: AssignmentView,
    /// `true` when a new row was inserted, `false` when an existing one grew.
    pub created: bool,
}

/// Result of a billed/unbilled toggle.
#[derive(Debug, Clone)]
pub struct Toggled {
    /// The row that carries the quantity after the toggle.
    pub assignment: AssignmentView,
    /// Whether the source row was merged away.
    pub outcome: ToggleOutcome,
}

/// Result of a decrease.
#[derive(Debug, Clone)]
pub enum Decreased {
    /// The row is still there with one unit less.
    Updated(AssignmentView),
    /// The row held a single unit and was removed.
    Deleted,
}

/// Business rules for customer-product assignments.
#[derive(Debug, Clone)]
pub struct AssignmentService {
    db: Arc<DatabasePool>,
    assignment_repo: Arc<AssignmentRepository>,
}

impl AssignmentService {
    /// Creates a new assignment service.
    pub fn new(db: Arc<DatabasePool>, assignment_repo: Arc<AssignmentRepository>) -> Self {
        Self {
            db,
            assignment_repo,
        }
    }

    /// Every assignment of a customer, enriched with product and category data.
    pub async fn list_for_customer(&self, customer_id: CustomerId) -> AppResult<Vec<AssignmentView>> {
        self.assignment_repo.list_for_customer(customer_id).await
    }

    /// Unit and distinct product counts for a customer.
    pub async fn summary(&self, customer_id: CustomerId) -> AppResult<AssignmentSummary> {
        self.assignment_repo.summary(customer_id).await
    }

    /// Add `quantity` units of a product to the customer's unbilled row,
    /// creating the row when there is none yet.
    pub async fn attach(
        &self,
        ctx: &RequestContext,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: Option<i64>,
    ) -> AppResult<Attached> {
        let quantity = validate_attach_quantity(quantity.unwrap_or(1))?;

        let (row, created) = self
            .assignment_repo
            .upsert_unbilled(customer_id, product_id, quantity)
            .await?;

        info!(
            user_id = %ctx.user_id,
            customer_id = %customer_id,
            product_id = %product_id,
            assignment_id = %row.id,
            quantity = row.quantity,
            created,
            "Product attached to customer"
        );

        Ok(Attached {
            assignment: self.load_view(row.id).await?,
            created,
        })
    }

    /// Flip the billed flag of a row, merging into the pair's other row when
    /// that state is already occupied.
    pub async fn toggle_billed(&self, ctx: &RequestContext, id: AssignmentId) -> AppResult<Toggled> {
        let mut tx = self.db.begin().await?;

        let key = AssignmentRepository::find_in(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        let pair = AssignmentRepository::lock_pair(&mut tx, key.customer_id, key.product_id).await?;

        // Re-read under the lock: a concurrent toggle may have merged the row away.
        let source = pair
            .iter()
            .find(|row| row.id == id)
            .ok_or_else(|| not_found(id))?;
        let counterpart = pair
            .iter()
            .find(|row| row.id != id && row.is_billed != source.is_billed);

        let plan = TogglePlan::plan(source, counterpart);
        AssignmentRepository::apply_toggle(&mut tx, &plan).await?;
        let outcome = plan.outcome();

        let assignment = AssignmentRepository::find_view_in(&mut tx, outcome.resulting_id)
            .await?
            .ok_or_else(|| not_found(outcome.resulting_id))?;

        tx.commit().await.map_err(commit_error)?;

        info!(
            user_id = %ctx.user_id,
            assignment_id = %id,
            resulting_id = %outcome.resulting_id,
            merged = outcome.merged,
            is_billed = assignment.is_billed,
            "Billed status toggled"
        );

        Ok(Toggled {
            assignment,
            outcome,
        })
    }

    /// Add one unit.
    pub async fn increase(&self, ctx: &RequestContext, id: AssignmentId) -> AppResult<AssignmentView> {
        self.assignment_repo
            .add_quantity(id, 1)
            .await?
            .ok_or_else(|| not_found(id))?;
        debug!(user_id = %ctx.user_id, assignment_id = %id, "Quantity increased");
        self.load_view(id).await
    }

    /// Remove one unit, deleting the row when it held only one.
    pub async fn decrease(&self, ctx: &RequestContext, id: AssignmentId) -> AppResult<Decreased> {
        let mut tx = self.db.begin().await?;

        let row = AssignmentRepository::lock(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let result = match DecreaseStep::for_quantity(row.quantity) {
            DecreaseStep::Decrement => {
                AssignmentRepository::set_quantity_in(&mut tx, id, row.quantity - 1).await?;
                let view = AssignmentRepository::find_view_in(&mut tx, id)
                    .await?
                    .ok_or_else(|| not_found(id))?;
                Decreased::Updated(view)
            }
            DecreaseStep::Remove => {
                AssignmentRepository::delete_in(&mut tx, id).await?;
                Decreased::Deleted
            }
        };

        tx.commit().await.map_err(commit_error)?;

        debug!(
            user_id = %ctx.user_id,
            assignment_id = %id,
            deleted = matches!(result, Decreased::Deleted),
            "Quantity decreased"
        );
        Ok(result)
    }

    /// Set the quantity exactly. Zero is kept as a row with zero units.
    pub async fn set_quantity(
        &self,
        ctx: &RequestContext,
        id: AssignmentId,
        quantity: i32,
    ) -> AppResult<AssignmentView> {
        if quantity < 0 {
            return Err(AppError::validation("Quantity must be a non-negative integer"));
        }

        self.assignment_repo
            .set_quantity(id, quantity)
            .await?
            .ok_or_else(|| not_found(id))?;

        debug!(user_id = %ctx.user_id, assignment_id = %id, quantity, "Quantity set");
        self.load_view(id).await
    }

    /// Apply every update in one transaction. Any failure, including an ID
    /// that matches no row, leaves all rows untouched.
    pub async fn bulk_set_quantities(
        &self,
        ctx: &RequestContext,
        updates: &[QuantityUpdate],
    ) -> AppResult<usize> {
        if updates.is_empty() {
            return Err(AppError::validation("No updates given"));
        }
        if let Some(bad) = updates.iter().find(|u| u.quantity < 0) {
            return Err(AppError::validation(format!(
                "Quantity for assignment {} must be a non-negative integer",
                bad.id
            )));
        }

        let mut tx = self.db.begin().await?;
        for update in updates {
            let affected =
                AssignmentRepository::set_quantity_in(&mut tx, update.id, update.quantity).await?;
            if affected == 0 {
                // Dropping the transaction rolls back the updates applied so far.
                return Err(not_found(update.id));
            }
        }
        tx.commit().await.map_err(commit_error)?;

        info!(user_id = %ctx.user_id, count = updates.len(), "Bulk quantity update applied");
        Ok(updates.len())
    }

    /// Delete a row outright.
    pub async fn remove(&self, ctx: &RequestContext, id: AssignmentId) -> AppResult<()> {
        if !self.assignment_repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = %ctx.user_id, assignment_id = %id, "Assignment removed");
        Ok(())
    }

    /// Create a product for this customer only and attach one unit of it.
    pub async fn attach_custom(
        &self,
        ctx: &RequestContext,
        customer_id: CustomerId,
        name: &str,
        price: Option<Decimal>,
    ) -> AppResult<AssignmentView> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Product name is required"));
        }
        let price = price.unwrap_or(Decimal::ZERO);
        if price < Decimal::ZERO {
            return Err(AppError::validation("Price must not be negative"));
        }

        let mut tx = self.db.begin().await?;
        let product = ProductRepository::insert_custom(&mut tx, name, price).await?;
        let row =
            AssignmentRepository::insert_unbilled_in(&mut tx, customer_id, product.id, 1).await?;
        let view = AssignmentRepository::find_view_in(&mut tx, row.id)
            .await?
            .ok_or_else(|| not_found(row.id))?;
        tx.commit().await.map_err(commit_error)?;

        info!(
            user_id = %ctx.user_id,
            customer_id = %customer_id,
            product_id = %product.id,
            assignment_id = %row.id,
            "Custom product attached"
        );
        Ok(view)
    }

    async fn load_view(&self, id: AssignmentId) -> AppResult<AssignmentView> {
        self.assignment_repo
            .find_view(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: AssignmentId) -> AppError {
    AppError::not_found(format!("Assignment {id} not found"))
}

fn commit_error(e: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
}
