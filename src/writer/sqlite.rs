use anyhow::{Context, Result};
use rusqlite::{Connection, DatabaseName};
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{error, info, warn};

use super::schema_gen::{generate_create_table, generate_indexes, generate_view};
use crate::config::{DatabaseUrl, LoadOptions};
use crate::error::PipelineError;
use crate::parser::{parse_record, resolve_columns, ParsedRow};
use crate::schema::{TableSchema, ALL_TABLES, ALL_VIEWS, FILE_MAPPINGS, NAMESPACE};
use crate::ui::Ui;

const BATCH_SIZE: usize = 1000;

/// Outcome of loading one source file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub table: &'static str,
    pub rows_read: u64,
    pub rows_committed: u64,
    pub error: Option<String>,
}

impl FileReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Row count of one destination table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: u64,
}

/// Outcome of a full directory load
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub files: Vec<FileReport>,
    pub counts: Vec<TableCount>,
}

impl LoadReport {
    /// True only when every mapped file loaded
    pub fn success(&self) -> bool {
        self.files.iter().all(FileReport::succeeded)
    }

    pub fn files_loaded(&self) -> usize {
        self.files.iter().filter(|f| f.succeeded()).count()
    }

    pub fn count(&self, table: &str) -> Option<u64> {
        self.counts.iter().find(|c| c.table == table).map(|c| c.rows)
    }
}

/// Destination store: a SQLite file attached under the `nba` schema name
pub struct SqliteStore {
    conn: Connection,
    url: DatabaseUrl,
}

impl SqliteStore {
    pub fn connect(url: &DatabaseUrl) -> Result<Self, PipelineError> {
        let connectivity = |source| PipelineError::Connectivity {
            url: url.to_string(),
            source,
        };

        if let Some(parent) = url.path().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                // A directory that cannot be created surfaces as an attach failure
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Cannot create database directory {:?}: {}", parent, e);
                }
            }
        }

        let conn = Connection::open_in_memory().map_err(connectivity)?;
        conn.execute(
            &format!("ATTACH DATABASE ?1 AS {}", NAMESPACE),
            [url.path().to_string_lossy().into_owned()],
        )
        .map_err(connectivity)?;
        conn.pragma_update(Some(DatabaseName::Attached(NAMESPACE)), "synchronous", "NORMAL")
            .map_err(connectivity)?;

        let store = Self {
            conn,
            url: url.clone(),
        };
        store.ping()?;

        Ok(store)
    }

    /// Run a trivial query against the attached database
    pub fn ping(&self) -> Result<(), PipelineError> {
        self.conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}.sqlite_master", NAMESPACE),
                [],
                |row| row.get::<_, i64>(0),
            )
            .map(|_| ())
            .map_err(|source| PipelineError::Connectivity {
                url: self.url.to_string(),
                source,
            })
    }

    /// Create tables and indexes that do not exist yet
    pub fn ensure_schema(&self) -> Result<(), PipelineError> {
        for schema in ALL_TABLES {
            self.conn
                .execute(&generate_create_table(schema), [])
                .map_err(|source| PipelineError::Schema {
                    object: schema.qualified_name(),
                    source,
                })?;

            for (index, sql) in schema.indexes.iter().zip(generate_indexes(schema)) {
                self.conn
                    .execute(&sql, [])
                    .map_err(|source| PipelineError::Schema {
                        object: format!("{}.{}", NAMESPACE, index.name),
                        source,
                    })?;
            }
        }

        info!("Database schema ready");
        Ok(())
    }

    /// Delete every row from the destination tables
    pub fn clear_tables(&self) -> Result<()> {
        for schema in ALL_TABLES {
            let deleted = self
                .conn
                .execute(&format!("DELETE FROM {}", schema.qualified_name()), [])
                .with_context(|| format!("Failed to clear {}", schema.qualified_name()))?;
            info!("Cleared {} rows from {}", deleted, schema.qualified_name());
        }
        Ok(())
    }

    /// Load one CSV file into `schema`'s table inside its own transaction.
    ///
    /// Failures are captured in the report rather than returned.
    pub fn import_file(
        &mut self,
        path: &Path,
        schema: &'static TableSchema,
        ui: &mut impl Ui,
    ) -> FileReport {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut report = FileReport {
            file: file.clone(),
            table: schema.name,
            rows_read: 0,
            rows_committed: 0,
            error: None,
        };

        info!("Loading {} into {}", file, schema.qualified_name());

        let outcome = read_rows(path, schema, &mut report.rows_read).and_then(|(columns, rows)| {
            info!("Read {} records from {}", rows.len(), file);
            self.insert_rows(schema, &columns, &rows, &file, ui)
        });

        match outcome {
            Ok(committed) => {
                report.rows_committed = committed;
                info!("Loaded {} records into {}", committed, schema.qualified_name());
            }
            Err(e) => {
                let err = PipelineError::FileLoad {
                    file: file.clone(),
                    reason: format!("{:#}", e),
                };
                error!("{}", err);
                report.error = Some(err.to_string());
            }
        }

        report
    }

    fn insert_rows(
        &mut self,
        schema: &TableSchema,
        columns: &[String],
        rows: &[ParsedRow],
        label: &str,
        ui: &mut impl Ui,
    ) -> Result<u64> {
        if rows.is_empty() {
            warn!("No data in {}", label);
            return Ok(0);
        }

        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.qualified_name(),
            columns.join(", "),
            placeholders.join(", ")
        );

        let total = rows.len() as u64;
        let tx = self.conn.transaction()?;
        let mut count: u64 = 0;

        for batch in rows.chunks(BATCH_SIZE) {
            insert_batch(&tx, &insert_sql, batch)?;
            count += batch.len() as u64;
            ui.set_progress(count, total, label);
        }

        tx.commit()
            .with_context(|| format!("Failed to commit {}", label))?;
        ui.clear_progress();

        Ok(count)
    }

    /// Drop and recreate the reporting views
    pub fn create_views(&self) -> Result<(), PipelineError> {
        for view in ALL_VIEWS {
            for sql in generate_view(view) {
                self.conn
                    .execute(&sql, [])
                    .map_err(|source| PipelineError::Schema {
                        object: format!("{}.{}", NAMESPACE, view.name),
                        source,
                    })?;
            }
        }
        info!("Database views created");
        Ok(())
    }

    /// Row count per destination table
    pub fn table_counts(&self) -> Result<Vec<TableCount>> {
        ALL_TABLES
            .iter()
            .map(|schema| {
                let rows: i64 = self
                    .conn
                    .query_row(
                        &format!("SELECT COUNT(*) FROM {}", schema.qualified_name()),
                        [],
                        |row| row.get(0),
                    )
                    .with_context(|| format!("Failed to count {}", schema.qualified_name()))?;
                Ok::<_, anyhow::Error>(TableCount {
                    table: schema.name,
                    rows: rows as u64,
                })
            })
            .collect()
    }

    /// Refresh planner statistics after a bulk load
    pub fn finalize(&self) -> Result<()> {
        self.conn
            .execute_batch(&format!("ANALYZE {};", NAMESPACE))
            .context("Failed to analyze database")?;
        Ok(())
    }

    /// Direct access for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Read a CSV file, counting records as they parse
fn read_rows(
    path: &Path,
    schema: &TableSchema,
    rows_read: &mut u64,
) -> Result<(Vec<String>, Vec<ParsedRow>)> {
    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().context("Failed to read CSV headers")?.clone();
    let columns = resolve_columns(&headers, schema)?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed row {}", line + 1))?;
        let row = parse_record(&record, &columns, schema)
            .with_context(|| format!("Failed to parse row {}", line + 1))?;
        rows.push(row);
        *rows_read += 1;
    }

    Ok((columns, rows))
}

/// Insert a batch of rows into the database
fn insert_batch(tx: &rusqlite::Transaction, sql: &str, batch: &[ParsedRow]) -> Result<()> {
    let mut stmt = tx.prepare_cached(sql)?;

    for row in batch {
        for (idx, value) in row.values.iter().enumerate() {
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;
    }

    Ok(())
}

/// Log row counts the way operators expect to read them
pub fn log_counts(counts: &[TableCount]) {
    info!("Table record counts:");
    for count in counts {
        info!("  {:20}: {} records", count.table, count.rows);
    }
}

/// Load every mapped CSV from `data_dir` into the destination.
///
/// Connectivity and schema failures abort; per-file failures are recorded in
/// the report and the remaining files still load.
pub fn load_directory(
    url: &DatabaseUrl,
    data_dir: &Path,
    options: &LoadOptions,
    ui: &mut impl Ui,
) -> Result<LoadReport> {
    if !data_dir.is_dir() {
        return Err(PipelineError::MissingInput(data_dir.to_path_buf()).into());
    }

    let mut store = SqliteStore::connect(url)?;
    info!("Database connection established: {}", url);

    store.ensure_schema()?;

    if options.clear_existing {
        info!("Clearing existing data...");
        store.clear_tables()?;
    }

    let mut files = Vec::with_capacity(FILE_MAPPINGS.len());
    for (file_name, schema) in FILE_MAPPINGS {
        let path = data_dir.join(file_name);

        if !path.exists() {
            let err = PipelineError::MissingInput(path);
            warn!("{}", err);
            files.push(FileReport {
                file: file_name.to_string(),
                table: schema.name,
                rows_read: 0,
                rows_committed: 0,
                error: Some(err.to_string()),
            });
            continue;
        }

        ui.log(format!("Loading {}", file_name));
        files.push(store.import_file(&path, schema, ui));
    }

    let loaded = files.iter().filter(|f| f.succeeded()).count();
    info!("Loaded {}/{} files successfully", loaded, files.len());
    ui.log(format!("Loaded {}/{} files", loaded, files.len()));

    store.create_views()?;
    store.finalize()?;

    let counts = store.table_counts()?;
    log_counts(&counts);

    Ok(LoadReport { files, counts })
}
