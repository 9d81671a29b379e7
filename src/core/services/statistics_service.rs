use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Category, CategoryKind, LedgerSnapshot, Transaction};
use crate::stats::{
    tree::sibling_order, CategorySeries, CategoryStatItem, CategoryStatsEngine,
    CategoryTreeBuilder, CategoryTreeNode, DateRange, MonthlySeriesBuilder,
};

use super::{ServiceError, ServiceResult};

/// Selection applied to a snapshot before any aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsQuery {
    pub kind: Option<CategoryKind>,
    pub from: Option<String>,
    pub until: Option<String>,
    pub show_hidden: bool,
    /// Restricts which categories get a monthly series.
    pub category_ids: Option<Vec<Uuid>>,
    pub exclude_returns: bool,
}

impl StatsQuery {
    pub fn range(&self) -> ServiceResult<DateRange> {
        Ok(DateRange::parse(self.from.as_deref(), self.until.as_deref())?)
    }

    pub fn admits_category(&self, category: &Category) -> bool {
        (self.show_hidden || category.is_active)
            && self.kind.map_or(true, |kind| category.kind == kind)
    }

    /// A typed query keeps the returns of that flow unless told otherwise.
    pub fn admits_kind(&self, transaction: &Transaction) -> bool {
        match self.kind {
            None => true,
            Some(kind) => {
                transaction.kind.category_kind() == kind
                    && !(self.exclude_returns && transaction.kind.is_return())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStatsReport {
    pub items: Vec<CategoryStatItem>,
    pub orphaned_transactions: usize,
}

/// Category tree item without amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeItem {
    pub id: String,
    pub title: String,
    pub key: String,
    pub value: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryTreeItem>>,
}

impl From<&CategoryTreeNode> for CategoryTreeItem {
    fn from(node: &CategoryTreeNode) -> Self {
        let id = node.id.to_string();
        let children = if node.children.is_empty() {
            None
        } else {
            Some(node.children.iter().map(CategoryTreeItem::from).collect())
        };
        Self {
            title: node.name.clone(),
            key: id.clone(),
            value: id.clone(),
            id,
            is_active: node.is_active,
            children,
        }
    }
}

pub struct StatisticsService;

impl StatisticsService {
    pub fn category_stats(
        snapshot: &LedgerSnapshot,
        query: &StatsQuery,
        config: &Config,
    ) -> ServiceResult<CategoryStatsReport> {
        let range = query.range()?;
        let categories = Self::select_categories(snapshot, query);
        let transactions = Self::select_transactions(snapshot, query, &range);
        info!(
            categories = categories.len(),
            transactions = transactions.len(),
            "category statistics requested"
        );

        let orphaned_transactions =
            CategoryStatsEngine::orphaned_transactions(&categories, &transactions);
        let items = CategoryStatsEngine::compute(&categories, &transactions, &config.labels());
        Ok(CategoryStatsReport {
            items,
            orphaned_transactions,
        })
    }

    pub fn monthly_series(
        snapshot: &LedgerSnapshot,
        query: &StatsQuery,
    ) -> ServiceResult<Vec<CategorySeries>> {
        let range = query.range()?;
        let lookup = Self::select_categories(snapshot, query);
        let mut selection: Vec<Category> = match &query.category_ids {
            Some(ids) => {
                Self::ensure_known(snapshot, ids)?;
                let wanted: HashSet<&Uuid> = ids.iter().collect();
                lookup
                    .iter()
                    .filter(|category| wanted.contains(&category.id))
                    .cloned()
                    .collect()
            }
            None => lookup.clone(),
        };
        selection.sort_by(sibling_order);

        let transactions = Self::select_transactions(snapshot, query, &range);
        debug!(selected = selection.len(), "monthly series requested");
        Ok(MonthlySeriesBuilder::new(&lookup).series(&selection, &transactions, &range)?)
    }

    pub fn category_tree(snapshot: &LedgerSnapshot, query: &StatsQuery) -> Vec<CategoryTreeItem> {
        let categories = Self::select_categories(snapshot, query);
        CategoryTreeBuilder::build(&categories)
            .iter()
            .map(CategoryTreeItem::from)
            .collect()
    }

    fn select_categories(snapshot: &LedgerSnapshot, query: &StatsQuery) -> Vec<Category> {
        snapshot
            .categories
            .iter()
            .filter(|category| query.admits_category(category))
            .cloned()
            .collect()
    }

    fn select_transactions(
        snapshot: &LedgerSnapshot,
        query: &StatsQuery,
        range: &DateRange,
    ) -> Vec<Transaction> {
        snapshot
            .transactions
            .iter()
            .filter(|txn| range.contains(txn.timestamp) && query.admits_kind(txn))
            .cloned()
            .collect()
    }

    fn ensure_known(snapshot: &LedgerSnapshot, ids: &[Uuid]) -> ServiceResult<()> {
        match ids.iter().find(|id| snapshot.category(**id).is_none()) {
            Some(missing) => Err(ServiceError::Invalid(format!(
                "Category {} not found",
                missing
            ))),
            None => Ok(()),
        }
    }
}
