use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use crate::logging;
use crate::weights::UsageWeights;

const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS usage_weight (path TEXT PRIMARY KEY, count INTEGER NOT NULL)";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Sqlite(error) => write!(f, "sqlite error: {error}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

pub fn open_memory() -> Result<Connection, StoreError> {
    let db = Connection::open_in_memory()?;
    db.execute(SCHEMA, [])?;
    Ok(db)
}

pub fn open_at(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Connection::open(path)?;
    db.execute(SCHEMA, [])?;
    Ok(db)
}

pub fn load_counts(db: &Connection) -> Result<HashMap<String, u64>, StoreError> {
    let mut statement = db.prepare("SELECT path, count FROM usage_weight")?;
    let mut rows = statement.query([])?;

    let mut counts = HashMap::new();
    while let Some(row) = rows.next()? {
        let path: String = row.get(0)?;
        let count: i64 = row.get(1)?;
        counts.insert(path, count.max(0) as u64);
    }
    Ok(counts)
}

pub fn save_counts(db: &Connection, weights: &UsageWeights) -> Result<(), StoreError> {
    let mut statement = db.prepare(
        "INSERT INTO usage_weight (path, count) VALUES (?1, ?2)
         ON CONFLICT(path) DO UPDATE SET count=excluded.count",
    )?;
    for (path, count) in weights.counts() {
        statement.execute(params![path, *count as i64])?;
    }
    Ok(())
}

/// Loads weights from `path`, falling back to an empty map when the store
/// is missing or unreadable. A broken weight store degrades ranking to
/// alphabetical order; it never stops the launcher.
pub fn load_or_default(path: &Path) -> UsageWeights {
    match open_at(path).and_then(|db| load_counts(&db)) {
        Ok(counts) => UsageWeights::from_counts(counts),
        Err(error) => {
            logging::warn(&format!(
                "weight store unavailable at {}; starting empty: {error}",
                path.display()
            ));
            UsageWeights::new()
        }
    }
}
