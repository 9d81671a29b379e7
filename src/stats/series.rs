//! Month-bucketed amounts per category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{BelongsToCategory, Category, Transaction};
use crate::errors::Result;
use crate::stats::aggregator;
use crate::stats::period::{DateRange, MonthPeriod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub period: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySeries {
    pub category_id: Uuid,
    pub category_name: String,
    pub series: Vec<SeriesPoint>,
}

/// Builds series for a selection of categories. The parent lookup may cover
/// more categories than the selection, so a selected parent still collects
/// transactions booked on children that were not selected themselves.
pub struct MonthlySeriesBuilder {
    parents: HashMap<Uuid, Uuid>,
}

impl MonthlySeriesBuilder {
    pub fn new(lookup: &[Category]) -> Self {
        let parents = lookup
            .iter()
            .filter_map(|category| category.parent_id.map(|parent| (category.id, parent)))
            .collect();
        Self { parents }
    }

    /// Uses `categories` both as the selection and as the parent lookup.
    /// Bookings outside `[from, until]` are dropped before bucketing.
    pub fn build(
        categories: &[Category],
        transactions: &[Transaction],
        from: Option<&str>,
        until: Option<&str>,
    ) -> Result<Vec<CategorySeries>> {
        let range = DateRange::parse(from, until)?;
        let in_range: Vec<Transaction> = aggregator::filter_by_range(transactions, &range)
            .into_iter()
            .cloned()
            .collect();
        Self::new(categories).series(categories, &in_range, &range)
    }

    pub fn series(
        &self,
        selection: &[Category],
        transactions: &[Transaction],
        range: &DateRange,
    ) -> Result<Vec<CategorySeries>> {
        let periods = range.months()?;
        debug!(
            categories = selection.len(),
            periods = periods.len(),
            "building monthly series"
        );
        Ok(selection
            .iter()
            .map(|category| {
                let own = self.transactions_for(category.id, transactions);
                CategorySeries {
                    category_id: category.id,
                    category_name: category.name.clone(),
                    series: Self::points(&periods, &own),
                }
            })
            .collect())
    }

    /// Booked on the category or on one of its direct children; deeper
    /// descendants are not included.
    pub fn transactions_for<'a>(
        &self,
        category_id: Uuid,
        transactions: &'a [Transaction],
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| match txn.category_id() {
                Some(id) => id == category_id || self.parents.get(&id) == Some(&category_id),
                None => false,
            })
            .collect()
    }

    fn points(periods: &[MonthPeriod], transactions: &[&Transaction]) -> Vec<SeriesPoint> {
        periods
            .iter()
            .map(|period| SeriesPoint {
                period: period.key(),
                amount: aggregator::sum(aggregator::filter_by_period(
                    period,
                    transactions.iter().copied(),
                )),
            })
            .collect()
    }
}
