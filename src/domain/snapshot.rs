use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{category::Category, transaction::Transaction};
use crate::errors::{Result, StatsError};

/// One consistent view of a principal's categories and transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn new(categories: Vec<Category>, transactions: Vec<Transaction>) -> Self {
        Self {
            categories,
            transactions,
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Amounts must be non-negative; the sign comes from the transaction kind.
    pub fn validate(&self) -> Result<()> {
        match self.transactions.iter().find(|txn| txn.amount < 0) {
            Some(txn) => Err(StatsError::InvalidInput(format!(
                "transaction {} has negative amount {}",
                txn.id, txn.amount
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryKind, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn negative_amount_fails_validation() {
        let food = Category::new("Food", CategoryKind::Expense);
        let when = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut snapshot = LedgerSnapshot::new(
            vec![food.clone()],
            vec![Transaction::new(TransactionKind::Expense, Some(food.id), when, 500)],
        );
        assert!(snapshot.validate().is_ok());

        snapshot.transactions[0].amount = -500;
        assert!(matches!(snapshot.validate(), Err(StatsError::InvalidInput(_))));
    }
}
