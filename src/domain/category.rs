//! Domain types representing spending and income categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StatsError;

/// A user-defined label arranged in a shallow parent/child hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Position among siblings; ties fall back to the name.
    #[serde(default)]
    pub order: i32,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            parent_id: None,
            is_active: true,
            order: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Expense,
    Income,
    Transfer,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Expense => "Expense",
            CategoryKind::Income => "Income",
            CategoryKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = StatsError;

    /// Return tags collapse onto the flow they reverse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "expense" | "return_expense" => Ok(CategoryKind::Expense),
            "income" | "return_income" => Ok(CategoryKind::Income),
            "transfer" => Ok(CategoryKind::Transfer),
            other => Err(StatsError::InvalidInput(format!(
                "unknown category kind `{}`",
                other
            ))),
        }
    }
}
