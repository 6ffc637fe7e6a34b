// src/service/backup_service.rs
//
// Full-snapshot export of all application tables and its destructive
// re-import into either backing store. One restore algorithm runs
// against the `StoreAdapter` seam; the per-backend differences live in
// the adapters.

use super::require_at_least;
use crate::api::dto::backup_dto::{
    BackupDocument, BackupMetadata, RestoreReport, RestoreRequest, TableRestoreResult,
};
use crate::domain::role::Role;
use crate::error::{AppError, AppResult};
use crate::infrastructure::store_adapter::{
    RestorePlatform, StoreAdapter, StoreError, BACKUP_TABLES, BATCH_SIZE, RESTORE_ORDER,
};
use crate::utils::jwt::UserClaims;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

pub const BACKUP_VERSION: &str = "1.0";

pub struct BackupService {
    relational: Arc<dyn StoreAdapter>,
    document: Option<Arc<dyn StoreAdapter>>,
}

impl BackupService {
    pub fn new(relational: Arc<dyn StoreAdapter>, document: Option<Arc<dyn StoreAdapter>>) -> Self {
        Self {
            relational,
            document,
        }
    }

    /// Reads every table unfiltered. A single failing read aborts the
    /// whole backup; no partial document is ever returned.
    pub async fn backup(&self, caller: &UserClaims) -> AppResult<BackupDocument> {
        require_at_least(caller, Role::Superadmin)?;

        let mut tables = BTreeMap::new();
        let mut total_rows = 0u64;

        for table in BACKUP_TABLES {
            let rows = self.relational.fetch_all(table).await.map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "Backup aborted: failed to read table '{}': {}",
                    table, e
                ))
            })?;

            total_rows += rows.len() as u64;
            tables.insert(table.to_string(), rows);
        }

        info!(
            backup_by = %caller.user_id,
            total_tables = tables.len(),
            total_rows = total_rows,
            "Backup created"
        );

        Ok(BackupDocument {
            version: BACKUP_VERSION.to_string(),
            timestamp: Utc::now(),
            metadata: BackupMetadata {
                backup_by: caller.user_id,
                backup_by_email: caller.email.clone(),
                total_tables: tables.len(),
                total_rows,
            },
            tables,
        })
    }

    /// Destructive delete-then-insert restore in fixed dependency order.
    /// Each table is attempted independently; failures are recorded in
    /// the report and processing continues with the next table.
    pub async fn restore(
        &self,
        caller: &UserClaims,
        request: RestoreRequest,
    ) -> AppResult<RestoreReport> {
        require_at_least(caller, Role::Superadmin)?;

        let tables = request
            .backup
            .get("tables")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "Invalid backup document: missing 'tables' map".to_string(),
                )
            })?;

        let platform = request.platform.unwrap_or_default();
        let adapter = self.adapter_for(platform)?;

        let mut results: BTreeMap<String, TableRestoreResult> = BTreeMap::new();
        let mut restored_tables = 0usize;

        for table in RESTORE_ORDER {
            let Some(rows_value) = tables.get(table) else {
                continue; // table absent from this backup
            };

            let Some(rows) = rows_value.as_array() else {
                results.insert(
                    table.to_string(),
                    TableRestoreResult {
                        success: false,
                        error: Some(format!("table '{}' is not an array of rows", table)),
                        ..Default::default()
                    },
                );
                continue;
            };

            let collection = match platform {
                RestorePlatform::Supabase => None,
                RestorePlatform::Firebase => adapter.target_name(table),
            };

            match Self::restore_table(adapter.as_ref(), table, rows).await {
                Ok(written) => {
                    restored_tables += 1;
                    let mut entry = TableRestoreResult {
                        success: true,
                        collection: collection.clone(),
                        ..Default::default()
                    };
                    match platform {
                        RestorePlatform::Supabase => entry.rows_restored = Some(written),
                        RestorePlatform::Firebase => entry.documents_restored = Some(written),
                    }
                    results.insert(table.to_string(), entry);
                }
                Err(e) => {
                    warn!(table = table, error = %e, "Table restore failed");
                    results.insert(
                        table.to_string(),
                        TableRestoreResult {
                            success: false,
                            error: Some(e.to_string()),
                            collection,
                            ..Default::default()
                        },
                    );
                }
            }
        }

        let total = results.len();
        let success = restored_tables == total;

        info!(
            restored_by = %caller.user_id,
            platform = %platform,
            restored_tables = restored_tables,
            total_tables = total,
            "Restore finished"
        );

        Ok(RestoreReport {
            success,
            platform: platform.as_str().to_string(),
            message: format!("Restored {}/{} tables", restored_tables, total),
            results,
            restored_by: caller.email.clone(),
            restored_at: Utc::now(),
        })
    }

    fn adapter_for(&self, platform: RestorePlatform) -> AppResult<&Arc<dyn StoreAdapter>> {
        match platform {
            RestorePlatform::Supabase => Ok(&self.relational),
            RestorePlatform::Firebase => self.document.as_ref().ok_or_else(|| {
                AppError::ValidationError(
                    "Document-store restore target is not configured".to_string(),
                )
            }),
        }
    }

    async fn restore_table(
        adapter: &dyn StoreAdapter,
        table: &str,
        rows: &[serde_json::Value],
    ) -> Result<u64, StoreError> {
        adapter
            .target_name(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        adapter.delete_all(table).await?;
        adapter.insert_many(table, rows, BATCH_SIZE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory adapter recording every call, with optional per-table
    /// failure injection.
    struct MockStore {
        platform: RestorePlatform,
        data: Mutex<HashMap<String, Vec<Value>>>,
        failing_tables: HashSet<String>,
        fetch_calls: AtomicUsize,
        delete_calls: AtomicUsize,
        insert_calls: AtomicUsize,
        batch_sizes_seen: Mutex<Vec<usize>>,
    }

    impl MockStore {
        fn new(platform: RestorePlatform) -> Self {
            Self {
                platform,
                data: Mutex::new(HashMap::new()),
                failing_tables: HashSet::new(),
                fetch_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
                insert_calls: AtomicUsize::new(0),
                batch_sizes_seen: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, table: &str) -> Self {
            self.failing_tables.insert(table.to_string());
            self
        }

        fn seed(self, table: &str, rows: Vec<Value>) -> Self {
            self.data.lock().unwrap().insert(table.to_string(), rows);
            self
        }

        fn total_calls(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
                + self.delete_calls.load(Ordering::SeqCst)
                + self.insert_calls.load(Ordering::SeqCst)
        }

        fn rows(&self, table: &str) -> Vec<Value> {
            self.data
                .lock()
                .unwrap()
                .get(table)
                .cloned()
                .unwrap_or_default()
        }
    }

    #[async_trait::async_trait]
    impl StoreAdapter for MockStore {
        fn platform(&self) -> RestorePlatform {
            self.platform
        }

        fn target_name(&self, table: &str) -> Option<String> {
            match self.platform {
                RestorePlatform::Supabase => Some(table.to_string()),
                RestorePlatform::Firebase => {
                    crate::infrastructure::document_store::collection_for_table(table)
                        .map(String::from)
                }
            }
        }

        async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_tables.contains(table) {
                return Err(StoreError::DocumentStore(format!(
                    "injected read failure on {}",
                    table
                )));
            }
            Ok(self.rows(table))
        }

        async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.data.lock().unwrap().remove(table);
            Ok(())
        }

        async fn insert_many(
            &self,
            table: &str,
            rows: &[Value],
            batch_size: usize,
        ) -> Result<u64, StoreError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            self.batch_sizes_seen.lock().unwrap().push(batch_size);
            if self.failing_tables.contains(table) {
                return Err(StoreError::DocumentStore(format!(
                    "injected write failure on {}",
                    table
                )));
            }
            self.data
                .lock()
                .unwrap()
                .insert(table.to_string(), rows.to_vec());
            Ok(rows.len() as u64)
        }
    }

    fn claims(role: Role) -> UserClaims {
        UserClaims {
            user_id: Uuid::new_v4(),
            email: "superadmin@example.com".to_string(),
            full_name: "System Administrator".to_string(),
            role,
        }
    }

    fn profile_row(n: u32) -> Value {
        json!({
            "id": format!("00000000-0000-4000-8000-{:012}", n),
            "email": format!("user{}@example.com", n),
            "full_name": format!("User {}", n),
            "role": "user"
        })
    }

    fn seeded_store() -> MockStore {
        MockStore::new(RestorePlatform::Supabase)
            .seed("profiles", vec![profile_row(1), profile_row(2)])
            .seed(
                "objectives",
                vec![json!({ "id": "o1", "title": "Zero incidents", "num_activities": 10 })],
            )
            .seed(
                "objective_updates",
                vec![json!({ "id": "u1", "objective_id": "o1", "achieved_count": 3 })],
            )
            .seed("daily_work", vec![json!({ "id": "d1", "description": "Patrol" })])
            .seed("system_settings", vec![json!({ "id": "s1", "key": "updates_enabled", "value": true })])
    }

    fn restore_request(backup: &BackupDocument, platform: Option<&str>) -> RestoreRequest {
        let mut value = serde_json::to_value(backup).unwrap();
        if let Some(platform) = platform {
            value = json!({ "backup": value, "platform": platform });
        } else {
            value = json!({ "backup": value });
        }
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_backup_collects_all_tables() {
        let source = Arc::new(seeded_store());
        let service = BackupService::new(source.clone(), None);

        let backup = service.backup(&claims(Role::Superadmin)).await.unwrap();

        assert_eq!(backup.version, BACKUP_VERSION);
        assert_eq!(backup.tables.len(), BACKUP_TABLES.len());
        assert_eq!(backup.tables["profiles"].len(), 2);
        assert_eq!(backup.tables["action_items"].len(), 0);
        assert_eq!(backup.metadata.total_tables, BACKUP_TABLES.len());
        assert_eq!(backup.metadata.total_rows, 6);
        assert_eq!(backup.metadata.backup_by_email, "superadmin@example.com");
        // One read per table, nothing else
        assert_eq!(
            source.fetch_calls.load(Ordering::SeqCst),
            BACKUP_TABLES.len()
        );
        assert_eq!(source.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backup_aborts_on_single_read_failure() {
        let source = Arc::new(seeded_store().failing_on("daily_work"));
        let service = BackupService::new(source, None);

        let error = service.backup(&claims(Role::Superadmin)).await.unwrap_err();
        let message = error.to_string();
        assert!(message.contains("daily_work"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_backup_requires_superadmin() {
        for role in [Role::User, Role::Admin] {
            let source = Arc::new(seeded_store());
            let service = BackupService::new(source.clone(), None);

            let result = service.backup(&claims(role)).await;
            assert!(matches!(result, Err(AppError::Forbidden(_))));
            // The gate short-circuits before any store access
            assert_eq!(source.total_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_restore_requires_superadmin() {
        let source = Arc::new(seeded_store());
        let backup_service = BackupService::new(source, None);
        let backup = backup_service
            .backup(&claims(Role::Superadmin))
            .await
            .unwrap();

        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let service = BackupService::new(target.clone(), None);

        let result = service
            .restore(&claims(Role::Admin), restore_request(&backup, None))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(target.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_restore_rejects_document_without_tables() {
        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let service = BackupService::new(target.clone(), None);

        let request: RestoreRequest =
            serde_json::from_value(json!({ "backup": { "version": "1.0" } })).unwrap();

        let result = service.restore(&claims(Role::Superadmin), request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(target.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_backup_restore_round_trip() {
        let superadmin = claims(Role::Superadmin);

        let source = Arc::new(seeded_store());
        let original = BackupService::new(source, None)
            .backup(&superadmin)
            .await
            .unwrap();

        // Restore into an empty store of the same kind
        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let report = BackupService::new(target.clone(), None)
            .restore(&superadmin, restore_request(&original, None))
            .await
            .unwrap();
        assert!(report.success);
        assert_eq!(report.platform, "supabase");

        // A second backup must reproduce the original tables map
        let second = BackupService::new(target, None)
            .backup(&superadmin)
            .await
            .unwrap();
        assert_eq!(second.tables, original.tables);
    }

    #[tokio::test]
    async fn test_restore_is_rerunnable() {
        let superadmin = claims(Role::Superadmin);
        let backup = BackupService::new(Arc::new(seeded_store()), None)
            .backup(&superadmin)
            .await
            .unwrap();

        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let service = BackupService::new(target.clone(), None);

        for _ in 0..2 {
            let report = service
                .restore(&superadmin, restore_request(&backup, None))
                .await
                .unwrap();
            assert!(report.success);
        }

        assert_eq!(target.rows("profiles").len(), 2);
    }

    #[tokio::test]
    async fn test_restore_partial_failure_isolation() {
        let superadmin = claims(Role::Superadmin);
        let backup = BackupService::new(Arc::new(seeded_store()), None)
            .backup(&superadmin)
            .await
            .unwrap();

        // daily_work sits between objectives and action_items in the
        // restore order
        let target = Arc::new(MockStore::new(RestorePlatform::Supabase).failing_on("daily_work"));
        let report = BackupService::new(target.clone(), None)
            .restore(&superadmin, restore_request(&backup, None))
            .await
            .unwrap();

        assert!(!report.success);

        let failed = &report.results["daily_work"];
        assert!(!failed.success);
        assert!(failed.error.as_deref().unwrap().contains("daily_work"));
        assert!(failed.rows_restored.is_none());

        // Tables before and after the failure still restored with
        // correct counts
        assert!(report.results["profiles"].success);
        assert_eq!(report.results["profiles"].rows_restored, Some(2));
        assert!(report.results["objective_updates"].success);
        assert_eq!(report.results["objective_updates"].rows_restored, Some(1));
        assert!(report.results["action_items"].success);

        assert_eq!(target.rows("profiles").len(), 2);
        assert!(target.rows("daily_work").is_empty());
    }

    #[tokio::test]
    async fn test_restore_to_document_store_maps_collections() {
        let superadmin = claims(Role::Superadmin);
        let backup = BackupService::new(Arc::new(seeded_store()), None)
            .backup(&superadmin)
            .await
            .unwrap();

        let relational = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let document = Arc::new(MockStore::new(RestorePlatform::Firebase));
        let service = BackupService::new(relational, Some(document.clone()));

        let report = service
            .restore(&superadmin, restore_request(&backup, Some("firebase")))
            .await
            .unwrap();

        assert!(report.success);
        assert_eq!(report.platform, "firebase");

        let profiles = &report.results["profiles"];
        assert_eq!(profiles.collection.as_deref(), Some("users"));
        assert_eq!(profiles.documents_restored, Some(2));
        assert!(profiles.rows_restored.is_none());

        assert_eq!(
            report.results["objective_updates"].collection.as_deref(),
            Some("updates")
        );
        // Every write was chunked at the 500-item ceiling
        assert!(document
            .batch_sizes_seen
            .lock()
            .unwrap()
            .iter()
            .all(|&size| size == BATCH_SIZE));
    }

    #[tokio::test]
    async fn test_restore_to_unconfigured_document_store_fails() {
        let superadmin = claims(Role::Superadmin);
        let backup = BackupService::new(Arc::new(seeded_store()), None)
            .backup(&superadmin)
            .await
            .unwrap();

        let relational = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let service = BackupService::new(relational.clone(), None);

        let result = service
            .restore(&superadmin, restore_request(&backup, Some("firebase")))
            .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(relational.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restore_skips_tables_absent_from_backup() {
        let superadmin = claims(Role::Superadmin);

        let request: RestoreRequest = serde_json::from_value(json!({
            "backup": {
                "tables": { "profiles": [profile_row(1)] }
            }
        }))
        .unwrap();

        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let report = BackupService::new(target, None)
            .restore(&superadmin, request)
            .await
            .unwrap();

        assert_eq!(report.results.len(), 1);
        assert!(report.results.contains_key("profiles"));
        assert!(report.success);
    }

    #[tokio::test]
    async fn test_restore_rejects_non_array_table() {
        let superadmin = claims(Role::Superadmin);

        let request: RestoreRequest = serde_json::from_value(json!({
            "backup": {
                "tables": {
                    "profiles": [profile_row(1)],
                    "objectives": "not-an-array"
                }
            }
        }))
        .unwrap();

        let target = Arc::new(MockStore::new(RestorePlatform::Supabase));
        let report = BackupService::new(target, None)
            .restore(&superadmin, request)
            .await
            .unwrap();

        assert!(!report.success);
        assert!(report.results["profiles"].success);
        assert!(!report.results["objectives"].success);
    }
}
