//! Category repository.

use sqlx::{PgConnection, PgPool};

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CategoryId;
use backoffice_entity::category::{Category, CreateCategory};

use super::{database_error, violated_constraint};

/// Repository for catalog categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Categories filtered by archive flag, ordered by name.
    pub async fn list(&self, archived: bool) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE is_archived = $1 ORDER BY name, id",
        )
        .bind(archived)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list categories"))
    }

    /// Every category regardless of archive state.
    ///
    /// Hierarchy checks run against this set, since an archived category
    /// still occupies its place in the tree.
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("Failed to load categories"))
    }

    /// Find a category by ID.
    pub async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("Failed to find category"))
    }

    /// Insert a category.
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description, parent_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("categories_parent_id_fkey") => AppError::validation("Parent category does not exist"),
            _ => database_error("Failed to create category")(e),
        })
    }

    /// Block other hierarchy changes until the transaction ends and return
    /// every category as seen under that lock.
    ///
    /// `SHARE ROW EXCLUSIVE` conflicts with itself, so two moves never
    /// validate against the same snapshot.
    pub async fn lock_hierarchy(conn: &mut PgConnection) -> AppResult<Vec<Category>> {
        sqlx::query("LOCK TABLE categories IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *conn)
            .await
            .map_err(database_error("Failed to lock categories"))?;

        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name, id")
            .fetch_all(&mut *conn)
            .await
            .map_err(database_error("Failed to load categories"))
    }

    /// Move a category under a new parent, or to the top level, inside a
    /// transaction.
    pub async fn set_parent_in(
        conn: &mut PgConnection,
        id: CategoryId,
        parent_id: Option<CategoryId>,
    ) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET parent_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("categories_parent_id_fkey") => AppError::validation("Parent category does not exist"),
            _ => database_error("Failed to move category")(e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    /// Set or clear the soft-delete flag.
    pub async fn set_archived(&self, id: CategoryId, archived: bool) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET is_archived = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(archived)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to change category archive flag"))?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }
}
