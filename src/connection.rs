//! DuckDB connection wrapper used to read snapshot CSV files.
//!
//! Snapshots are read with every column as VARCHAR so that type coercion
//! happens in one place, the normalizer, instead of in DuckDB's sniffer.

use std::collections::HashMap;
use std::path::Path;

use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use log::debug;

use crate::error::Result;
use crate::models::RawRecord;

/// Wraps an in-memory DuckDB connection.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open an in-memory DuckDB database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available after the query has run
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| {
                s.column_names()
                    .into_iter()
                    .map(|c| c.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Read a snapshot CSV into raw records, all values as strings or null.
    pub fn read_csv(&self, path: &Path) -> Result<Vec<RawRecord>> {
        let sql = format!("SELECT * FROM {}", csv_source(path));
        let rows = self.execute(&sql, &[])?;
        debug!("Read {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    /// Column names of a snapshot CSV, in file order.
    ///
    /// Only sniffs the header, no data is materialized.
    pub fn csv_columns(&self, path: &Path) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE SELECT * FROM {})",
            csv_source(path)
        ))?;

        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            columns.push(name);
        }
        Ok(columns)
    }
}

/// `read_csv(...)` table function for a path, quoted for SQL.
fn csv_source(path: &Path) -> String {
    // Forward slashes for DuckDB on Windows, doubled quotes for the SQL literal
    let path_str = path.to_string_lossy().replace('\\', "/").replace('\'', "''");
    format!(
        "read_csv('{}', header = true, delim = ',', quote = '\"', all_varchar = true)",
        path_str
    )
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Snapshots are read with `all_varchar`, so a cell is either text or null.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        _ => serde_json::Value::Null,
    }
}
