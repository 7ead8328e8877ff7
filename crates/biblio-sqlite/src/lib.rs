// File: crates/biblio-sqlite/src/lib.rs
// Summary: rusqlite-backed LibraryStore adapter for a Zotero-compatible library file.

pub mod sql;

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::info;

use biblio_core::store::{LibraryStore, RecordFilter, StoreError, StoreResult};
use biblio_core::types::{DayCountRow, LibraryScope, TagId};

/// Connection wrapper satisfying the async store boundary. SQLite work
/// is short and local, so each call runs the statement synchronously
/// under the connection lock.
pub struct LibraryDatabase {
    connection: Mutex<Connection>,
}

impl LibraryDatabase {
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        info!(path = %path.display(), "library database opened");
        Ok(Self { connection: Mutex::new(connection) })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let connection =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { connection: Mutex::new(connection) })
    }

    /// Run a statement against the raw connection; the test fixtures
    /// use this to create and seed a schema.
    pub fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(query_err)
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".into()))
    }

    fn column<T: rusqlite::types::FromSql>(
        &self,
        sql: &str,
        params: Vec<Value>,
    ) -> StoreResult<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(query_err)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| row.get::<_, T>(0))
            .map_err(query_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
    }
}

fn query_err(err: rusqlite::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

fn tag_params(tag_ids: &[TagId], scope: LibraryScope) -> Vec<Value> {
    let mut params: Vec<Value> = tag_ids.iter().map(|id| Value::Integer(*id)).collect();
    params.push(Value::Integer(scope.library_id));
    params
}

#[async_trait]
impl LibraryStore for LibraryDatabase {
    async fn day_counts(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
        focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<DayCountRow>> {
        let with_focal = !focal_tag_ids.is_empty();
        let sql = sql::fused_day_counts(filter, focal_tag_ids.len());
        let params = tag_params(focal_tag_ids, scope);

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql).map_err(query_err)?;
        let rows = stmt
            .query_map(params_from_iter(params), |row| {
                Ok(DayCountRow {
                    day: row.get(0)?,
                    added_count: row.get(1)?,
                    focal_added_count: if with_focal { Some(row.get(2)?) } else { None },
                })
            })
            .map_err(query_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(query_err)
    }

    async fn day_column(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.column(&sql::day_column(filter), vec![Value::Integer(scope.library_id)])
    }

    async fn added_count_column(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<i64>> {
        self.column(
            &sql::added_count_column(filter),
            vec![Value::Integer(scope.library_id)],
        )
    }

    async fn focal_count_column(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
        focal_tag_ids: &[TagId],
    ) -> StoreResult<Vec<i64>> {
        if focal_tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.column(
            &sql::focal_count_column(filter, focal_tag_ids.len()),
            tag_params(focal_tag_ids, scope),
        )
    }

    async fn resolve_tag_ids(&self, names: &[String]) -> StoreResult<Vec<TagId>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let params: Vec<Value> = names.iter().map(|n| Value::Text(n.clone())).collect();
        self.column(&sql::tag_ids(names.len()), params)
    }

    async fn publish_dates(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.column(
            &sql::publish_dates(filter),
            vec![Value::Integer(scope.library_id)],
        )
    }

    async fn added_timestamps(
        &self,
        scope: LibraryScope,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<String>> {
        self.column(
            &sql::added_timestamps(filter),
            vec![Value::Integer(scope.library_id)],
        )
    }
}
