//! Database layer for passfinder.
//!
//! Provides a read-only `FacilityStore` over a single SQLite table. Each
//! read opens its own connection and drops it before returning, so calls
//! are independent and need no coordination.

mod error;
mod facility;

pub use error::StoreError;
pub use facility::Facility;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Params};

/// Default store file name, expected next to the application.
pub const DEFAULT_DB_FILE: &str = "osaka_pass.db";

/// Default facilities table.
pub const DEFAULT_TABLE: &str = "facilities";

/// Location of the store and the table to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub table: String,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}

/// Read-only facility repository.
#[derive(Debug, Clone)]
pub struct FacilityStore {
    config: StoreConfig,
}

impl FacilityStore {
    /// Create a store for the given config.
    ///
    /// The table name is interpolated into SQL, so it must be a plain
    /// identifier. The file itself is not touched until the first read.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        if !is_identifier(&config.table) {
            return Err(StoreError::InvalidTable(config.table));
        }
        Ok(Self { config })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Every facility, ordered by `name_ko` ascending.
    pub fn fetch_all(&self) -> Result<Vec<Facility>, StoreError> {
        let sql = format!("SELECT * FROM {} ORDER BY name_ko", self.config.table);
        self.read(&sql, [])
    }

    /// Facilities whose name, English name, category or address contains
    /// `query` (case-insensitive), ordered like [`fetch_all`](Self::fetch_all).
    ///
    /// `None` and the empty string return everything.
    pub fn search(&self, query: Option<&str>) -> Result<Vec<Facility>, StoreError> {
        let term = match query {
            Some(term) if !term.is_empty() => term,
            _ => return self.fetch_all(),
        };

        let sql = format!(
            r"SELECT * FROM {} WHERE
                name_ko LIKE ?1 ESCAPE '\' OR
                name_en LIKE ?1 ESCAPE '\' OR
                category LIKE ?1 ESCAPE '\' OR
                address LIKE ?1 ESCAPE '\'
            ORDER BY name_ko",
            self.config.table
        );
        self.read(&sql, [like_pattern(term)])
    }

    /// Run one query on a fresh connection. The connection is dropped on
    /// every exit path.
    fn read<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Facility>, StoreError> {
        let conn = self.connect()?;
        let facilities = collect_rows(&conn, sql, params).map_err(|e| self.unavailable(e))?;

        tracing::debug!(
            table = %self.config.table,
            rows = facilities.len(),
            "facility query completed"
        );

        Ok(facilities)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Connection::open_with_flags(
            &self.config.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.unavailable(e))
    }

    fn unavailable(&self, source: rusqlite::Error) -> StoreError {
        tracing::warn!(path = %self.config.path.display(), error = %source, "store unavailable");
        StoreError::Unavailable {
            path: self.config.path.clone(),
            source,
        }
    }
}

fn collect_rows<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Facility>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let rows = stmt.query_map(params, |row| Facility::from_row(row, &columns))?;

    let mut facilities = Vec::new();
    for row in rows {
        facilities.push(row?);
    }

    Ok(facilities)
}

/// Wrap a literal term for `LIKE ... ESCAPE '\'`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &TempDir, rows: &[(&str, &str, &str, &str)]) -> StoreConfig {
        let path = dir.path().join(DEFAULT_DB_FILE);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE facilities (
                name_ko TEXT, name_en TEXT, category TEXT, address TEXT, included TEXT
            );",
        )
        .unwrap();
        for (name_ko, name_en, category, address) in rows {
            conn.execute(
                "INSERT INTO facilities VALUES (?1, ?2, ?3, ?4, 'yes')",
                rusqlite::params![name_ko, name_en, category, address],
            )
            .unwrap();
        }
        StoreConfig::new(path)
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("오사카"), "%오사카%");
        assert_eq!(like_pattern("100%"), r"%100\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\"), r"%c:\\%");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("facilities"));
        assert!(is_identifier("_tbl2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2tbl"));
        assert!(!is_identifier("facilities; DROP TABLE x"));
        assert!(!is_identifier("시설"));
    }

    #[test]
    fn test_invalid_table_rejected() {
        let err = FacilityStore::new(StoreConfig::default().with_table("bad name")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTable(ref t) if t == "bad name"));
    }

    #[test]
    fn test_fetch_all_ordered() {
        let dir = TempDir::new().unwrap();
        let config = seed(
            &dir,
            &[
                ("우메다 스카이빌딩", "Umeda Sky Building", "전망대", "오사카시 기타구"),
                ("오사카성", "Osaka Castle", "관광", "오사카시 주오구"),
                ("덴포잔 대관람차", "Tempozan Ferris Wheel", "관광", "오사카시 미나토구"),
            ],
        );
        let store = FacilityStore::new(config).unwrap();

        let all = store.fetch_all().unwrap();
        let names: Vec<_> = all.iter().map(|f| f.name_ko.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["덴포잔 대관람차", "오사카성", "우메다 스카이빌딩"]);
    }

    #[test]
    fn test_search_each_column() {
        let dir = TempDir::new().unwrap();
        let config = seed(
            &dir,
            &[
                ("오사카성", "Osaka Castle", "관광", "오사카시 주오구"),
                ("역사박물관", "History Museum", "박물관", "오사카시 주오구 오테마에"),
            ],
        );
        let store = FacilityStore::new(config).unwrap();

        assert_eq!(store.search(Some("성")).unwrap().len(), 1);
        assert_eq!(store.search(Some("castle")).unwrap().len(), 1);
        assert_eq!(store.search(Some("MUSEUM")).unwrap().len(), 1);
        assert_eq!(store.search(Some("박물관")).unwrap().len(), 1);
        assert_eq!(store.search(Some("주오구")).unwrap().len(), 2);
        assert!(store.search(Some("교토")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_matches_fetch_all() {
        let dir = TempDir::new().unwrap();
        let config = seed(&dir, &[("오사카성", "Osaka Castle", "관광", "주오구")]);
        let store = FacilityStore::new(config).unwrap();

        let all = store.fetch_all().unwrap();
        assert_eq!(store.search(None).unwrap(), all);
        assert_eq!(store.search(Some("")).unwrap(), all);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = FacilityStore::new(StoreConfig::new(dir.path().join("absent.db"))).unwrap();

        let err = store.fetch_all().unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
        // Opening read-only must not create the file
        assert!(!dir.path().join("absent.db").exists());
    }
}
