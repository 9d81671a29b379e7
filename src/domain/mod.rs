pub mod category;
pub mod common;
pub mod snapshot;
pub mod transaction;

pub use category::{Category, CategoryKind};
pub use common::{Amounted, BelongsToCategory};
pub use snapshot::LedgerSnapshot;
pub use transaction::{Transaction, TransactionKind};
