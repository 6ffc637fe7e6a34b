// src/infrastructure/store_adapter.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Document stores cap batch writes; both adapters chunk at this size.
pub const BATCH_SIZE: usize = 500;

/// Fixed table list for backup. Order does not matter here, only for
/// restore.
pub const BACKUP_TABLES: [&str; 9] = [
    "profiles",
    "objectives",
    "objective_updates",
    "daily_work",
    "action_items",
    "action_item_closures",
    "action_item_verifications",
    "system_settings",
    "component_permissions",
];

/// Fixed restore order: parents before children.
pub const RESTORE_ORDER: [&str; 9] = [
    "profiles",
    "system_settings",
    "component_permissions",
    "objectives",
    "objective_updates",
    "daily_work",
    "action_items",
    "action_item_closures",
    "action_item_verifications",
];

pub fn is_known_table(table: &str) -> bool {
    BACKUP_TABLES.contains(&table)
}

/// Restore target selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePlatform {
    Supabase,
    Firebase,
}

impl RestorePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supabase => "supabase",
            Self::Firebase => "firebase",
        }
    }
}

impl Default for RestorePlatform {
    fn default() -> Self {
        Self::Supabase
    }
}

impl fmt::Display for RestorePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("document store error: {0}")]
    DocumentStore(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Seam between the restore algorithm and a concrete backing store.
/// Rows are opaque JSON objects; the engine never interprets them.
#[async_trait::async_trait]
pub trait StoreAdapter: Send + Sync {
    fn platform(&self) -> RestorePlatform;

    /// Target table/collection for a source table name; `None` when the
    /// store has no mapping for it.
    fn target_name(&self, table: &str) -> Option<String>;

    async fn fetch_all(&self, table: &str) -> Result<Vec<serde_json::Value>, StoreError>;

    async fn delete_all(&self, table: &str) -> Result<(), StoreError>;

    /// Inserts rows in chunks of at most `batch_size`; returns the number
    /// of rows written.
    async fn insert_many(
        &self,
        table: &str,
        rows: &[serde_json::Value],
        batch_size: usize,
    ) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_agree() {
        assert_eq!(BACKUP_TABLES.len(), RESTORE_ORDER.len());
        for table in BACKUP_TABLES {
            assert!(RESTORE_ORDER.contains(&table));
        }
    }

    #[test]
    fn test_restore_order_parents_first() {
        let position = |name: &str| {
            RESTORE_ORDER
                .iter()
                .position(|t| *t == name)
                .unwrap_or_else(|| panic!("{} missing from restore order", name))
        };

        assert!(position("profiles") < position("objectives"));
        assert!(position("objectives") < position("objective_updates"));
        assert!(position("profiles") < position("daily_work"));
        assert!(position("action_items") < position("action_item_closures"));
        assert!(position("action_items") < position("action_item_verifications"));
    }

    #[test]
    fn test_known_tables() {
        assert!(is_known_table("profiles"));
        assert!(is_known_table("component_permissions"));
        assert!(!is_known_table("tasks"));
        assert!(!is_known_table(""));
    }

    #[test]
    fn test_platform_serde() {
        let platform: RestorePlatform = serde_json::from_str(r#""firebase""#).unwrap();
        assert_eq!(platform, RestorePlatform::Firebase);
        assert_eq!(RestorePlatform::default(), RestorePlatform::Supabase);
        assert_eq!(
            serde_json::to_string(&RestorePlatform::Supabase).unwrap(),
            r#""supabase""#
        );
    }
}
