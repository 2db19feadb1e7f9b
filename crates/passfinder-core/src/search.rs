//! One request: fetch from the store, then build the view.

use std::time::Instant;

use passfinder_db::{FacilityStore, StoreError};
use passfinder_logging::{LogEvent, Logger};

use crate::view::ResultsView;

/// Run a query against the store and build its results view.
///
/// Storage failures are logged and returned as-is so the caller can show
/// the message verbatim. There is no retry.
pub fn run_search(
    store: &FacilityStore,
    query: Option<&str>,
    logger: &Logger,
) -> Result<ResultsView, StoreError> {
    let query = query.filter(|q| !q.is_empty());
    logger.log(&LogEvent::SearchStarted {
        query: query.map(str::to_string),
        store: store.path().to_path_buf(),
    });

    let started = Instant::now();
    match store.search(query) {
        Ok(results) => {
            logger.log(&LogEvent::SearchCompleted {
                query: query.map(str::to_string),
                results: results.len(),
                duration_ms: started.elapsed().as_secs_f64() * 1000.0,
            });
            Ok(ResultsView::build(query, &results))
        }
        Err(e) => {
            logger.log(&LogEvent::StoreUnavailable {
                store: store.path().to_path_buf(),
                error: e.to_string(),
            });
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passfinder_db::StoreConfig;
    use rusqlite::Connection;
    use tempfile::TempDir;

    #[test]
    fn test_run_search_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("osaka_pass.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                r#"
                CREATE TABLE facilities (name_ko TEXT, name_en TEXT, category TEXT, address TEXT, included TEXT);
                INSERT INTO facilities VALUES ('오사카성', NULL, '관광', NULL, '예');
                "#,
            )
            .unwrap();

        let store = FacilityStore::new(StoreConfig::new(path)).unwrap();
        let logger = Logger::silent();

        let view = run_search(&store, Some("오사카"), &logger).unwrap();
        assert_eq!(view.cards().len(), 1);
        assert_eq!(view.cards()[0].title, "오사카성");

        let empty = run_search(&store, Some("museum"), &logger).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_run_search_surfaces_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = FacilityStore::new(StoreConfig::new(dir.path().join("missing.db"))).unwrap();

        let err = run_search(&store, None, &Logger::silent()).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
