//! Category management with hierarchy validation.

use std::sync::Arc;

use tracing::info;

use backoffice_core::error::{AppError, ErrorKind};
use backoffice_core::result::AppResult;
use backoffice_core::types::CategoryId;
use backoffice_database::DatabasePool;
use backoffice_database::repositories::CategoryRepository;
use backoffice_entity::category::{Category, CategoryNode, CategoryTree, CreateCategory};

use crate::context::RequestContext;

/// Manages catalog categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Arc<DatabasePool>,
    category_repo: Arc<CategoryRepository>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(db: Arc<DatabasePool>, category_repo: Arc<CategoryRepository>) -> Self {
        Self { db, category_repo }
    }

    /// Active or archived categories, by name.
    pub async fn list(&self, archived: bool) -> AppResult<Vec<Category>> {
        self.category_repo.list(archived).await
    }

    /// Nested view of the active categories.
    pub async fn tree(&self) -> AppResult<Vec<CategoryNode>> {
        let active = self.category_repo.list(false).await?;
        Ok(CategoryTree::build(active).to_nodes())
    }

    /// Create a category, optionally below an existing parent.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateCategory) -> AppResult<Category> {
        data.name = data.name.trim().to_string();
        if data.name.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        if data.parent_id.is_some() {
            let tree = CategoryTree::build(self.category_repo.find_all().await?);
            tree.validate_new_parent(data.parent_id)?;
        }

        let category = self.category_repo.create(&data).await?;
        info!(
            user_id = %ctx.user_id,
            category_id = %category.id,
            parent_id = ?category.parent_id.map(|p| p.get()),
            "Category created"
        );
        Ok(category)
    }

    /// Move a category. Unknown parents, self-parenting, and moving below a
    /// descendant are rejected.
    pub async fn set_parent(
        &self,
        ctx: &RequestContext,
        id: CategoryId,
        parent_id: Option<CategoryId>,
    ) -> AppResult<Category> {
        let mut tx = self.db.begin().await?;

        let tree = CategoryTree::build(CategoryRepository::lock_hierarchy(&mut tx).await?);
        if !tree.contains(id) {
            return Err(AppError::not_found(format!("Category {id} not found")));
        }
        tree.validate_parent(id, parent_id)?;

        let category = CategoryRepository::set_parent_in(&mut tx, id, parent_id).await?;
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        info!(
            user_id = %ctx.user_id,
            category_id = %id,
            parent_id = ?parent_id.map(|p| p.get()),
            "Category moved"
        );
        Ok(category)
    }

    /// Soft-delete a category.
    pub async fn archive(&self, ctx: &RequestContext, id: CategoryId) -> AppResult<Category> {
        let category = self.category_repo.set_archived(id, true).await?;
        info!(user_id = %ctx.user_id, category_id = %id, "Category archived");
        Ok(category)
    }

    /// Bring an archived category back.
    pub async fn restore(&self, ctx: &RequestContext, id: CategoryId) -> AppResult<Category> {
        let category = self.category_repo.set_archived(id, false).await?;
        info!(user_id = %ctx.user_id, category_id = %id, "Category restored");
        Ok(category)
    }
}
