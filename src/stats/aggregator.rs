//! Signed sums and filters over transaction collections.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::{Amounted, BelongsToCategory, Transaction};
use crate::errors::Result;
use crate::stats::period::{belongs_to_period, DateRange, MonthPeriod};

/// Net contribution of one transaction: returns are subtracted.
pub fn signed_amount(transaction: &Transaction) -> i64 {
    transaction.signed_amount()
}

pub fn sum<'a, I>(transactions: I) -> i64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(signed_amount).sum()
}

/// Transactions booked on any of `category_ids`, in input order.
pub fn filter_by_category<'a>(
    transactions: &'a [Transaction],
    category_ids: &HashSet<Uuid>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| {
            txn.category_id()
                .map_or(false, |id| category_ids.contains(&id))
        })
        .collect()
}

pub fn filter_by_period<'a, I>(period: &MonthPeriod, transactions: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| belongs_to_period(period, txn.timestamp))
        .collect()
}

/// Keeps transactions inside the inclusive `[from, until]` bounds.
pub fn filter_by_date_range<'a>(
    transactions: &'a [Transaction],
    from: Option<&str>,
    until: Option<&str>,
) -> Result<Vec<&'a Transaction>> {
    let range = DateRange::parse(from, until)?;
    Ok(filter_by_range(transactions, &range))
}

pub fn filter_by_range<'a>(
    transactions: &'a [Transaction],
    range: &DateRange,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| range.contains(txn.timestamp))
        .collect()
}

/// Signed totals per directly booked category, in one pass.
pub fn sums_by_category<'a, I>(transactions: I) -> HashMap<Uuid, i64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = HashMap::new();
    for txn in transactions {
        if let Some(category_id) = txn.category_id() {
            *totals.entry(category_id).or_insert(0) += signed_amount(txn);
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    fn txn(kind: TransactionKind, category: Option<Uuid>, date: NaiveDateTime, amount: i64) -> Transaction {
        Transaction::new(kind, category, date, amount)
    }

    #[test]
    fn empty_collection_sums_to_zero() {
        assert_eq!(sum(&Vec::<Transaction>::new()), 0);
    }

    #[test]
    fn sum_inverts_returns() {
        let list = vec![
            txn(TransactionKind::Expense, None, at(2024, 1, 1), 500),
            txn(TransactionKind::ReturnExpense, None, at(2024, 1, 2), 200),
            txn(TransactionKind::Income, None, at(2024, 1, 3), 1000),
            txn(TransactionKind::ReturnIncome, None, at(2024, 1, 4), 100),
        ];
        assert_eq!(sum(&list), 500 - 200 + 1000 - 100);
    }

    #[test]
    fn category_filter_keeps_order_and_skips_uncategorised() {
        let food = Uuid::new_v4();
        let rent = Uuid::new_v4();
        let list = vec![
            txn(TransactionKind::Expense, Some(food), at(2024, 1, 1), 1),
            txn(TransactionKind::Transfer, None, at(2024, 1, 2), 2),
            txn(TransactionKind::Expense, Some(rent), at(2024, 1, 3), 3),
            txn(TransactionKind::Expense, Some(food), at(2024, 1, 4), 4),
        ];
        let ids: HashSet<Uuid> = [food].into_iter().collect();
        let amounts: Vec<i64> = filter_by_category(&list, &ids)
            .iter()
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![1, 4]);
    }

    #[test]
    fn period_filter_matches_month() {
        let list = vec![
            txn(TransactionKind::Expense, None, at(2024, 1, 31), 1),
            txn(TransactionKind::Expense, None, at(2024, 2, 1), 2),
            txn(TransactionKind::Expense, None, at(2025, 2, 1), 3),
        ];
        let feb = MonthPeriod { year: 2024, month: 2 };
        let hits = filter_by_period(&feb, &list);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].amount, 2);
    }

    #[test]
    fn date_range_includes_late_same_day_bookings() {
        let list = vec![
            txn(TransactionKind::Expense, None, at(2024, 3, 1), 1),
            txn(TransactionKind::Expense, None, at(2024, 3, 31), 2),
            txn(TransactionKind::Expense, None, at(2024, 4, 1), 3),
        ];
        let hits = filter_by_date_range(&list, Some("2024-03-01"), Some("2024-03-31")).unwrap();
        assert_eq!(hits.iter().map(|t| t.amount).collect::<Vec<_>>(), vec![1, 2]);

        let open = filter_by_date_range(&list, None, None).unwrap();
        assert_eq!(open.len(), 3);

        assert!(filter_by_date_range(&list, Some("03/01/2024"), None).is_err());
    }

    #[test]
    fn sums_by_category_groups_signed_amounts() {
        let food = Uuid::new_v4();
        let list = vec![
            txn(TransactionKind::Expense, Some(food), at(2024, 1, 1), 300),
            txn(TransactionKind::ReturnExpense, Some(food), at(2024, 1, 2), 50),
            txn(TransactionKind::Transfer, None, at(2024, 1, 3), 999),
        ];
        let totals = sums_by_category(&list);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&food], 250);
    }
}
