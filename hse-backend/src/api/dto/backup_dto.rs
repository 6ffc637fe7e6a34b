// src/api/dto/backup_dto.rs
use crate::infrastructure::store_adapter::RestorePlatform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The persisted backup wire format. Rows stay opaque JSON objects so a
/// backup round-trips byte-for-byte through a restore cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupDocument {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub tables: BTreeMap<String, Vec<serde_json::Value>>,
    pub metadata: BackupMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupMetadata {
    pub backup_by: Uuid,
    pub backup_by_email: String,
    pub total_tables: usize,
    pub total_rows: u64,
}

/// Restore request: the raw backup document plus the target platform.
/// The document arrives as untyped JSON and is validated before any
/// store access.
#[derive(Debug, Deserialize, Serialize)]
pub struct RestoreRequest {
    pub backup: serde_json::Value,
    #[serde(default)]
    pub platform: Option<RestorePlatform>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableRestoreResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_restored: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_restored: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreReport {
    pub success: bool,
    pub platform: String,
    pub message: String,
    pub results: BTreeMap<String, TableRestoreResult>,
    pub restored_by: String,
    pub restored_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backup_document_round_trip() {
        let mut tables = BTreeMap::new();
        tables.insert(
            "profiles".to_string(),
            vec![json!({ "id": "a", "email": "worker@example.com" })],
        );
        tables.insert("objectives".to_string(), vec![]);

        let document = BackupDocument {
            version: "1.0".to_string(),
            timestamp: Utc::now(),
            tables,
            metadata: BackupMetadata {
                backup_by: Uuid::new_v4(),
                backup_by_email: "superadmin@example.com".to_string(),
                total_tables: 2,
                total_rows: 1,
            },
        };

        let serialized = serde_json::to_string(&document).unwrap();
        let parsed: BackupDocument = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_restore_request_platform_defaults_to_none() {
        let request: RestoreRequest =
            serde_json::from_value(json!({ "backup": { "tables": {} } })).unwrap();
        assert!(request.platform.is_none());

        let request: RestoreRequest = serde_json::from_value(json!({
            "backup": { "tables": {} },
            "platform": "firebase"
        }))
        .unwrap();
        assert_eq!(request.platform, Some(RestorePlatform::Firebase));
    }
}
