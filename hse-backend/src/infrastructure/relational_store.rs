// src/infrastructure/relational_store.rs

use super::store_adapter::{is_known_table, RestorePlatform, StoreAdapter, StoreError};
use sea_orm::{ConnectionTrait, DatabaseBackend, DbConn, Statement};

/// Postgres-backed adapter. Rows move as opaque JSON: reads go through
/// `row_to_json`, writes through `jsonb_populate_recordset`, so no
/// per-table column knowledge lives here. Table names are checked
/// against the fixed list before being interpolated.
pub struct RelationalStoreAdapter {
    db: DbConn,
}

impl RelationalStoreAdapter {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn check_table(table: &str) -> Result<(), StoreError> {
        if is_known_table(table) {
            Ok(())
        } else {
            Err(StoreError::UnknownTable(table.to_string()))
        }
    }
}

#[async_trait::async_trait]
impl StoreAdapter for RelationalStoreAdapter {
    fn platform(&self) -> RestorePlatform {
        RestorePlatform::Supabase
    }

    fn target_name(&self, table: &str) -> Option<String> {
        is_known_table(table).then(|| table.to_string())
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<serde_json::Value>, StoreError> {
        Self::check_table(table)?;

        let statement = Statement::from_string(
            DatabaseBackend::Postgres,
            format!(r#"SELECT row_to_json(t) AS row FROM "{}" t"#, table),
        );

        let results = self.db.query_all(statement).await?;
        let mut rows = Vec::with_capacity(results.len());
        for result in results {
            let row: serde_json::Value = result.try_get("", "row")?;
            rows.push(row);
        }

        Ok(rows)
    }

    async fn delete_all(&self, table: &str) -> Result<(), StoreError> {
        Self::check_table(table)?;

        self.db
            .execute(Statement::from_string(
                DatabaseBackend::Postgres,
                format!(r#"DELETE FROM "{}""#, table),
            ))
            .await?;

        Ok(())
    }

    async fn insert_many(
        &self,
        table: &str,
        rows: &[serde_json::Value],
        batch_size: usize,
    ) -> Result<u64, StoreError> {
        Self::check_table(table)?;

        let mut written = 0u64;
        for chunk in rows.chunks(batch_size.max(1)) {
            let statement = Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                format!(
                    r#"INSERT INTO "{0}" SELECT * FROM jsonb_populate_recordset(NULL::"{0}", $1)"#,
                    table
                ),
                [serde_json::Value::Array(chunk.to_vec()).into()],
            );

            self.db.execute(statement).await?;
            written += chunk.len() as u64;
        }

        Ok(written)
    }
}
