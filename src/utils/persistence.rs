use std::{fs, path::Path};

use tracing::debug;

use crate::{domain::LedgerSnapshot, errors::Result};

/// Loads a ledger snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<LedgerSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
    snapshot.validate()?;
    debug!(
        path = %path.display(),
        categories = snapshot.categories.len(),
        transactions = snapshot.transactions.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Writes the snapshot atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &LedgerSnapshot, path: &Path) -> Result<()> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryKind};
    use crate::errors::StatsError;
    use tempfile::tempdir;

    #[test]
    fn saved_snapshot_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let snapshot = LedgerSnapshot::new(vec![Category::new("Food", CategoryKind::Expense)], vec![]);
        save_snapshot_to_file(&snapshot, &path).unwrap();

        let loaded = load_snapshot_from_file(&path).unwrap();
        assert_eq!(loaded.categories, snapshot.categories);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn negative_amount_is_rejected_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let category = uuid::Uuid::new_v4();
        let json = format!(
            r#"{{
                "categories": [{{"id": "{category}", "name": "Food", "kind": "EXPENSE"}}],
                "transactions": [{{
                    "id": "{txn}",
                    "amount": -500,
                    "kind": "EXPENSE",
                    "timestamp": "2024-01-05T09:00:00",
                    "category_id": "{category}"
                }}]
            }}"#,
            txn = uuid::Uuid::new_v4(),
        );
        std::fs::write(&path, json).unwrap();

        let err = load_snapshot_from_file(&path).unwrap_err();
        assert!(matches!(err, StatsError::InvalidInput(ref msg) if msg.contains("-500")));
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let err = load_snapshot_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StatsError::StorageError(_)));
    }
}
