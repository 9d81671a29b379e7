//! Per-category amounts, share-of-group percentages and the presentation tree.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{BelongsToCategory, Category, Transaction};
use crate::stats::aggregator;
use crate::stats::tree::{CategoryTreeBuilder, CategoryTreeNode};

pub const TOTAL_ITEM_ID: &str = "total";
pub const DIRECT_ITEM_SUFFIX: &str = "_general";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmounts {
    /// Booked directly on the category.
    pub self_amount: i64,
    /// `self_amount` plus every descendant's `self_amount`.
    pub total_amount: i64,
}

/// A tree node annotated with amounts and its share of the comparison base.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatNode {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub parent_id: Option<Uuid>,
    #[serde(flatten)]
    pub amounts: CategoryAmounts,
    pub share: f64,
    pub children: Vec<StatNode>,
}

/// Display item; `children` is omitted for leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatItem {
    pub id: String,
    pub title: String,
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub self_amount: i64,
    pub total_amount: i64,
    pub share: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryStatItem>>,
}

/// Titles used for the synthetic items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationLabels {
    pub total_title: String,
    pub direct_suffix: String,
}

impl Default for PresentationLabels {
    fn default() -> Self {
        Self {
            total_title: "Total".into(),
            direct_suffix: " (general)".into(),
        }
    }
}

/// Percentage of `base` contributed by `total`; zero unless the base is positive.
pub fn group_share(total: i64, base: i64) -> f64 {
    if base > 0 {
        total as f64 * 100.0 / base as f64
    } else {
        0.0
    }
}

/// Part of a category's total booked directly on it rather than on its children.
pub fn direct_booking_share(self_amount: i64, total_amount: i64) -> f64 {
    if total_amount == 0 {
        0.0
    } else {
        self_amount as f64 * 100.0 / total_amount as f64
    }
}

pub struct CategoryStatsEngine;

impl CategoryStatsEngine {
    /// Tree build, amounts, shares and presentation in one call.
    pub fn compute(
        categories: &[Category],
        transactions: &[Transaction],
        labels: &PresentationLabels,
    ) -> Vec<CategoryStatItem> {
        let tree = CategoryTreeBuilder::build(categories);
        let annotated = Self::annotate_shares(Self::annotate_amounts(&tree, transactions));
        let grand_total = aggregator::sum(transactions);
        debug!(
            categories = categories.len(),
            transactions = transactions.len(),
            grand_total,
            "computed category statistics"
        );
        Self::build_presentation_tree(&annotated, grand_total, labels)
    }

    /// Post-order: each total embeds the full subtree, not just direct children.
    pub fn annotate_amounts(tree: &[CategoryTreeNode], transactions: &[Transaction]) -> Vec<StatNode> {
        let self_amounts = aggregator::sums_by_category(transactions);
        tree.iter()
            .map(|node| Self::amounts_for(node, &self_amounts))
            .collect()
    }

    fn amounts_for(node: &CategoryTreeNode, self_amounts: &HashMap<Uuid, i64>) -> StatNode {
        let children: Vec<StatNode> = node
            .children
            .iter()
            .map(|child| Self::amounts_for(child, self_amounts))
            .collect();
        let self_amount = self_amounts.get(&node.id).copied().unwrap_or(0);
        let total_amount = self_amount
            + children
                .iter()
                .map(|child| child.amounts.total_amount)
                .sum::<i64>();
        StatNode {
            id: node.id,
            name: node.name.clone(),
            is_active: node.is_active,
            parent_id: node.parent_id,
            amounts: CategoryAmounts {
                self_amount,
                total_amount,
            },
            share: 0.0,
            children,
        }
    }

    /// Roots share the sum of all root totals. Children share their siblings'
    /// totals plus the parent's own `self_amount`, which competes with them.
    pub fn annotate_shares(mut forest: Vec<StatNode>) -> Vec<StatNode> {
        let root_base: i64 = forest.iter().map(|node| node.amounts.total_amount).sum();
        for node in &mut forest {
            node.share = group_share(node.amounts.total_amount, root_base);
            Self::share_children(node);
        }
        forest
    }

    fn share_children(parent: &mut StatNode) {
        let base = parent.amounts.self_amount
            + parent
                .children
                .iter()
                .map(|child| child.amounts.total_amount)
                .sum::<i64>();
        for child in &mut parent.children {
            child.share = group_share(child.amounts.total_amount, base);
            Self::share_children(child);
        }
    }

    pub fn build_presentation_tree(
        forest: &[StatNode],
        grand_total: i64,
        labels: &PresentationLabels,
    ) -> Vec<CategoryStatItem> {
        let mut items: Vec<CategoryStatItem> = forest
            .iter()
            .map(|node| Self::stat_item(node, labels))
            .collect();
        items.push(CategoryStatItem {
            id: TOTAL_ITEM_ID.into(),
            title: labels.total_title.clone(),
            key: TOTAL_ITEM_ID.into(),
            value: labels.total_title.clone(),
            is_active: None,
            self_amount: grand_total,
            total_amount: grand_total,
            share: 100.0,
            children: None,
        });
        items
    }

    fn stat_item(node: &StatNode, labels: &PresentationLabels) -> CategoryStatItem {
        let id = node.id.to_string();
        let children = if node.children.is_empty() {
            None
        } else {
            let mut children = Vec::with_capacity(node.children.len() + 1);
            if node.amounts.self_amount != 0 {
                children.push(Self::direct_item(node, labels));
            }
            children.extend(node.children.iter().map(|child| Self::stat_item(child, labels)));
            Some(children)
        };
        CategoryStatItem {
            title: node.name.clone(),
            key: id.clone(),
            value: id.clone(),
            id,
            is_active: Some(node.is_active),
            self_amount: node.amounts.self_amount,
            total_amount: node.amounts.total_amount,
            share: node.share,
            children,
        }
    }

    /// Synthetic leading child for the amount booked on the parent itself.
    fn direct_item(node: &StatNode, labels: &PresentationLabels) -> CategoryStatItem {
        let id = format!("{}{}", node.id, DIRECT_ITEM_SUFFIX);
        CategoryStatItem {
            title: format!("{}{}", node.name, labels.direct_suffix),
            key: id.clone(),
            value: id.clone(),
            id,
            is_active: Some(node.is_active),
            self_amount: node.amounts.self_amount,
            total_amount: node.amounts.self_amount,
            share: direct_booking_share(node.amounts.self_amount, node.amounts.total_amount),
            children: None,
        }
    }

    pub fn calculate_transactions_by_categories(
        transactions: &[Transaction],
        category_ids: &[Uuid],
    ) -> i64 {
        let ids: HashSet<Uuid> = category_ids.iter().copied().collect();
        aggregator::sum(aggregator::filter_by_category(transactions, &ids))
    }

    /// Transactions whose category reference does not resolve in `categories`.
    /// They are left out of every category sum rather than failing the report.
    pub fn orphaned_transactions(categories: &[Category], transactions: &[Transaction]) -> usize {
        let known: HashSet<Uuid> = categories.iter().map(|category| category.id).collect();
        let orphaned = transactions
            .iter()
            .filter(|txn| txn.category_id().map_or(false, |id| !known.contains(&id)))
            .count();
        if orphaned > 0 {
            warn!(orphaned, "transactions reference categories outside the selection");
        }
        orphaned
    }
}
