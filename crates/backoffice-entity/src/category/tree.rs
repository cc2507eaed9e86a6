//! Category hierarchy as an arena of nodes with parent indices.
//!
//! The store does not prevent cycles in `categories.parent_id`, so every
//! parent assignment is checked against this structure first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CategoryId;

use super::model::Category;

/// A node in the nested category view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Child categories, ordered by name.
    pub children: Vec<CategoryNode>,
}

/// Arena holding every category plus the index of its parent.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: Vec<Category>,
    parents: Vec<Option<usize>>,
    index: HashMap<CategoryId, usize>,
}

impl CategoryTree {
    /// Build the arena. A `parent_id` that points outside the given set is
    /// treated as absent, so the node becomes a root.
    pub fn build(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let index: HashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        let parents = categories
            .iter()
            .map(|c| c.parent_id.and_then(|p| index.get(&p).copied()))
            .collect();

        Self {
            nodes: categories,
            parents,
            index,
        }
    }

    /// Number of categories in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the category is part of the arena.
    pub fn contains(&self, id: CategoryId) -> bool {
        self.index.contains_key(&id)
    }

    /// Ancestor chain of `id`, nearest parent first.
    ///
    /// The walk stops after `len()` steps so that a cycle already present in
    /// stored data cannot loop forever.
    pub fn ancestors(&self, id: CategoryId) -> Vec<CategoryId> {
        let mut chain = Vec::new();
        let Some(&start) = self.index.get(&id) else {
            return chain;
        };

        let mut current = self.parents[start];
        while let Some(idx) = current {
            if chain.len() >= self.nodes.len() {
                break;
            }
            chain.push(self.nodes[idx].id);
            current = self.parents[idx];
        }
        chain
    }

    /// Check that a brand-new category may hang under `parent`.
    pub fn validate_new_parent(&self, parent: Option<CategoryId>) -> AppResult<()> {
        match parent {
            Some(parent_id) if !self.contains(parent_id) => Err(AppError::validation(format!(
                "Parent category {parent_id} does not exist"
            ))),
            _ => Ok(()),
        }
    }

    /// Check that re-parenting `child` under `parent` keeps the hierarchy a tree.
    ///
    /// Rejects an unknown parent, a category becoming its own parent, and a
    /// category moving beneath one of its own descendants.
    pub fn validate_parent(&self, child: CategoryId, parent: Option<CategoryId>) -> AppResult<()> {
        let Some(parent_id) = parent else {
            return Ok(());
        };

        if !self.contains(child) {
            return Err(AppError::not_found(format!("Category {child} not found")));
        }
        self.validate_new_parent(parent)?;

        if parent_id == child {
            return Err(AppError::validation("A category cannot be its own parent"));
        }
        if self.ancestors(parent_id).contains(&child) {
            return Err(AppError::validation(
                "Cannot move a category beneath one of its descendants",
            ));
        }
        Ok(())
    }

    /// Nested view starting from every root, children ordered by name.
    pub fn to_nodes(&self) -> Vec<CategoryNode> {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut roots = Vec::new();
        for (idx, parent) in self.parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(idx),
                None => roots.push(idx),
            }
        }

        roots
            .into_iter()
            .map(|idx| self.node_at(idx, &children))
            .collect()
    }

    fn node_at(&self, idx: usize, children: &[Vec<usize>]) -> CategoryNode {
        let category = &self.nodes[idx];
        CategoryNode {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            children: children[idx]
                .iter()
                .map(|&child| self.node_at(child, children))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::error::ErrorKind;
    use chrono::Utc;

    fn category(id: i64, name: &str, parent: Option<i64>) -> Category {
        Category {
            id: CategoryId(id),
            name: name.to_string(),
            description: None,
            parent_id: parent.map(CategoryId),
            is_archived: false,
            created_at: Utc::now(),
        }
    }

    fn sample() -> CategoryTree {
        // Baumaterial(1) -> Holz(4) -> Leisten(7); Werkzeuge(2)
        CategoryTree::build(vec![
            category(1, "Baumaterial", None),
            category(2, "Werkzeuge", None),
            category(4, "Holz", Some(1)),
            category(7, "Leisten", Some(4)),
        ])
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = sample();
        assert_eq!(tree.ancestors(CategoryId(7)), vec![CategoryId(4), CategoryId(1)]);
        assert!(tree.ancestors(CategoryId(1)).is_empty());
    }

    #[test]
    fn test_self_parent_rejected() {
        let err = sample()
            .validate_parent(CategoryId(4), Some(CategoryId(4)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_descendant_parent_rejected() {
        let err = sample()
            .validate_parent(CategoryId(1), Some(CategoryId(7)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = sample()
            .validate_parent(CategoryId(4), Some(CategoryId(99)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_valid_moves_accepted() {
        let tree = sample();
        assert!(tree.validate_parent(CategoryId(7), Some(CategoryId(2))).is_ok());
        assert!(tree.validate_parent(CategoryId(4), None).is_ok());
        assert!(tree.validate_new_parent(Some(CategoryId(1))).is_ok());
    }

    #[test]
    fn test_existing_cycle_does_not_hang() {
        let tree = CategoryTree::build(vec![
            category(1, "A", Some(2)),
            category(2, "B", Some(1)),
        ]);
        assert_eq!(tree.ancestors(CategoryId(1)).len(), 2);
        assert!(tree.to_nodes().is_empty());
    }

    #[test]
    fn test_nested_view() {
        let nodes = sample().to_nodes();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "Baumaterial");
        assert_eq!(nodes[0].children[0].name, "Holz");
        assert_eq!(nodes[0].children[0].children[0].name, "Leisten");
        assert!(nodes[1].children.is_empty());
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let tree = CategoryTree::build(vec![category(5, "Orphan", Some(42))]);
        assert_eq!(tree.to_nodes().len(), 1);
    }
}
