//! Customer CRUD with soft-delete.

use std::sync::Arc;

use tracing::info;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CustomerId;
use backoffice_database::repositories::CustomerRepository;
use backoffice_entity::customer::{Customer, CustomerInput};

use crate::context::RequestContext;

/// Manages customer records.
#[derive(Debug, Clone)]
pub struct CustomerService {
    customer_repo: Arc<CustomerRepository>,
}

impl CustomerService {
    /// Creates a new customer service.
    pub fn new(customer_repo: Arc<CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    /// Active customers, newest first.
    pub async fn list_active(&self) -> AppResult<Vec<Customer>> {
        self.customer_repo.list_active().await
    }

    /// Archived customers by name.
    pub async fn list_archived(&self) -> AppResult<Vec<Customer>> {
        self.customer_repo.list_archived().await
    }

    /// One customer, archived or not.
    pub async fn get(&self, id: CustomerId) -> AppResult<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }

    /// Create a customer. The name is required.
    pub async fn create(&self, ctx: &RequestContext, input: CustomerInput) -> AppResult<Customer> {
        let input = normalize(input)?;
        let customer = self.customer_repo.create(&input).await?;
        info!(user_id = %ctx.user_id, customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Replace every writable field of a customer.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: CustomerId,
        input: CustomerInput,
    ) -> AppResult<Customer> {
        let input = normalize(input)?;
        let customer = self.customer_repo.update(id, &input).await?;
        info!(user_id = %ctx.user_id, customer_id = %id, "Customer updated");
        Ok(customer)
    }

    /// Soft-delete a customer. Its assignments stay in place.
    pub async fn archive(&self, ctx: &RequestContext, id: CustomerId) -> AppResult<Customer> {
        let customer = self.customer_repo.set_archived(id, true).await?;
        info!(user_id = %ctx.user_id, customer_id = %id, "Customer archived");
        Ok(customer)
    }

    /// Bring an archived customer back.
    pub async fn restore(&self, ctx: &RequestContext, id: CustomerId) -> AppResult<Customer> {
        let customer = self.customer_repo.set_archived(id, false).await?;
        info!(user_id = %ctx.user_id, customer_id = %id, "Customer restored");
        Ok(customer)
    }
}

/// Trim the name and reject it when blank.
fn normalize(mut input: CustomerInput) -> AppResult<CustomerInput> {
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    Ok(input)
}
