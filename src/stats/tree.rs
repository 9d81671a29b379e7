//! Assembles the flat category list into a forest.
//!
//! Children lists are owned top-down; the parent link is kept as a plain
//! identifier so the structure can never form a reference cycle.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    /// Lookup only; `None` for roots, including roots with a dangling parent.
    pub parent_id: Option<Uuid>,
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Ids of this node and every descendant, pre-order.
    pub fn subtree_ids(&self) -> Vec<Uuid> {
        let mut ids = vec![self.id];
        for child in &self.children {
            ids.extend(child.subtree_ids());
        }
        ids
    }
}

pub type CategoryForest = Vec<CategoryTreeNode>;

/// Canonical sibling ordering: `order` ascending, then name.
pub fn sibling_order(a: &Category, b: &Category) -> Ordering {
    a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name))
}

pub struct CategoryTreeBuilder;

impl CategoryTreeBuilder {
    /// Never fails: a parent id that does not resolve degrades the category to a root.
    pub fn build(categories: &[Category]) -> CategoryForest {
        let known: HashSet<Uuid> = categories.iter().map(|category| category.id).collect();

        let mut roots: Vec<&Category> = Vec::new();
        let mut children_of: HashMap<Uuid, Vec<&Category>> = HashMap::new();
        for category in categories {
            match category.parent_id {
                Some(parent_id) if parent_id != category.id && known.contains(&parent_id) => {
                    children_of.entry(parent_id).or_default().push(category);
                }
                Some(parent_id) => {
                    warn!(
                        category = %category.id,
                        parent = %parent_id,
                        "parent category not in set, treating as root"
                    );
                    roots.push(category);
                }
                None => roots.push(category),
            }
        }

        roots.sort_by(|a, b| sibling_order(a, b));
        for siblings in children_of.values_mut() {
            siblings.sort_by(|a, b| sibling_order(a, b));
        }

        roots
            .into_iter()
            .map(|category| Self::node(category, None, &children_of))
            .collect()
    }

    fn node(
        category: &Category,
        parent_id: Option<Uuid>,
        children_of: &HashMap<Uuid, Vec<&Category>>,
    ) -> CategoryTreeNode {
        let children = children_of
            .get(&category.id)
            .map(|children| {
                children
                    .iter()
                    .map(|child| Self::node(child, Some(category.id), children_of))
                    .collect()
            })
            .unwrap_or_default();
        CategoryTreeNode {
            id: category.id,
            name: category.name.clone(),
            is_active: category.is_active,
            parent_id,
            children,
        }
    }
}
