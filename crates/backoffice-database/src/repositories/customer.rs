//! Customer repository.

use sqlx::PgPool;

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CustomerId;
use backoffice_entity::customer::{Customer, CustomerInput};

use super::database_error;

/// Repository for customer records.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active customers, newest first.
    pub async fn list_active(&self) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE is_archived = FALSE ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list customers"))
    }

    /// Archived customers by name.
    pub async fn list_archived(&self) -> AppResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE is_archived = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list archived customers"))
    }

    /// Find a customer by ID, archived or not.
    pub async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find customer"))
    }

    /// Whether a customer row exists.
    pub async fn exists(&self, id: CustomerId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("Failed to check customer"))
    }

    /// Insert a new customer.
    pub async fn create(&self, input: &CustomerInput) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, address, phone, email, project_type, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.project_type)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to create customer"))
    }

    /// Replace every writable field of a customer.
    pub async fn update(&self, id: CustomerId, input: &CustomerInput) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = $2, address = $3, phone = $4, email = $5, \
                                  project_type = $6, notes = $7 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.project_type)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to update customer"))?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }

    /// Set or clear the soft-delete flag.
    pub async fn set_archived(&self, id: CustomerId, archived: bool) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET is_archived = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to change customer archive flag"))?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }
}
