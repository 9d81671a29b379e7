use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::CategoryKind;
use crate::domain::common::{Amounted, BelongsToCategory};

/// Flow tag attached to every transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Expense,
    Income,
    ReturnExpense,
    ReturnIncome,
    Transfer,
}

impl TransactionKind {
    /// Returns reverse a prior flow and therefore count negatively.
    pub fn is_return(self) -> bool {
        matches!(
            self,
            TransactionKind::ReturnExpense | TransactionKind::ReturnIncome
        )
    }

    /// The category kind this flow is booked against.
    pub fn category_kind(self) -> CategoryKind {
        match self {
            TransactionKind::Expense | TransactionKind::ReturnExpense => CategoryKind::Expense,
            TransactionKind::Income | TransactionKind::ReturnIncome => CategoryKind::Income,
            TransactionKind::Transfer => CategoryKind::Transfer,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
            TransactionKind::ReturnExpense => "Return (expense)",
            TransactionKind::ReturnIncome => "Return (income)",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

/// A dated movement of money, optionally booked on a category.
///
/// Transfers between own accounts carry no category and set `to_account`
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    /// Minor currency units, never negative; the sign comes from `kind`.
    pub amount: i64,
    pub kind: TransactionKind,
    pub timestamp: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category_id: Option<Uuid>,
        timestamp: NaiveDateTime,
        amount: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            timestamp,
            category_id,
            account_id: None,
            to_account: None,
            description: None,
        }
    }
}

impl BelongsToCategory for Transaction {
    fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }
}

impl Amounted for Transaction {
    fn signed_amount(&self) -> i64 {
        if self.kind.is_return() {
            -self.amount
        } else {
            self.amount
        }
    }
}
