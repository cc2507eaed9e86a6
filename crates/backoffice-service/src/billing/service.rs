//! Builds the unbilled line items and total for one customer.

use std::sync::Arc;

use tracing::debug;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CustomerId;
use backoffice_database::repositories::{AssignmentRepository, CustomerRepository};
use backoffice_entity::assignment::BillingSnapshot;

/// Read-only billing snapshot builder.
#[derive(Debug, Clone)]
pub struct BillingService {
    customer_repo: Arc<CustomerRepository>,
    assignment_repo: Arc<AssignmentRepository>,
}

impl BillingService {
    /// Creates a new billing service.
    pub fn new(
        customer_repo: Arc<CustomerRepository>,
        assignment_repo: Arc<AssignmentRepository>,
    ) -> Self {
        Self {
            customer_repo,
            assignment_repo,
        }
    }

    /// Unbilled items of a customer, ordered by category then product name,
    /// and the sum of their line totals.
    pub async fn snapshot(&self, customer_id: CustomerId) -> AppResult<BillingSnapshot> {
        if !self.customer_repo.exists(customer_id).await? {
            return Err(AppError::not_found(format!("Customer {customer_id} not found")));
        }

        let views = self.assignment_repo.list_unbilled(customer_id).await?;
        let snapshot = BillingSnapshot::from_unbilled(views);

        debug!(
            customer_id = %customer_id,
            items = snapshot.items.len(),
            total = %snapshot.total,
            "Billing snapshot built"
        );
        Ok(snapshot)
    }
}
