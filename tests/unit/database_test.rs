//! Unit tests for the database layer: schema creation and reopen behaviour.

use pqdi_launcher::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use pqdi_launcher::database::Database;
use tempfile::TempDir;

#[test]
fn test_in_memory_database_has_window_state_table() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let tables: Vec<String> = {
        let mut stmt = db
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect()
    };
    assert!(tables.contains(&"window_state".to_string()));
    assert!(tables.contains(&"schema_version".to_string()));
}

#[test]
fn test_schema_version_is_current() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

/// Reopening an existing file must not re-run migrations or lose rows.
#[test]
fn test_reopen_file_database_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("launcher.db");

    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO window_state (key, value, updated_at) VALUES ('window_state', 'true', 0)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let value: String = db
        .connection()
        .query_row("SELECT value FROM window_state WHERE key = 'window_state'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "true");

    let versions: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}
