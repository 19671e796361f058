//! Persistence of the launcher window record.
//!
//! The record is three keys in the `window_state` table:
//! `window_position` (JSON `[x, y]`), `window_state` (`"true"` / `"false"`)
//! and `current_url` (absent when there is none). A save rewrites all three
//! inside one transaction so no reader ever sees a half-written record.

use rusqlite::{params, OptionalExtension};
use tracing::trace;

use crate::database::Database;
use crate::types::errors::{LauncherError, Result};
use crate::types::geometry::Point;
use crate::types::window_state::WindowState;

pub const KEY_POSITION: &str = "window_position";
pub const KEY_EXPANDED: &str = "window_state";
pub const KEY_URL: &str = "current_url";

/// Storage for the persisted [`WindowState`].
///
/// `load` returns [`WindowState::default`] when nothing has been saved yet.
pub trait PositionStore {
    fn load(&self) -> Result<WindowState>;
    fn save(&mut self, state: &WindowState) -> Result<()>;
}

impl<T: PositionStore + ?Sized> PositionStore for Box<T> {
    fn load(&self) -> Result<WindowState> {
        (**self).load()
    }

    fn save(&mut self, state: &WindowState) -> Result<()> {
        (**self).save(state)
    }
}

/// SQLite-backed store used by the application.
pub struct SqlitePositionStore {
    db: Database,
}

impl SqlitePositionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn read_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM window_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl PositionStore for SqlitePositionStore {
    fn load(&self) -> Result<WindowState> {
        let position = match self.read_value(KEY_POSITION)? {
            Some(raw) => Some(decode_position(&raw)?),
            None => None,
        };
        let expanded = match self.read_value(KEY_EXPANDED)? {
            Some(raw) => decode_bool(&raw)?,
            None => false,
        };
        let current_url = self.read_value(KEY_URL)?.filter(|url| !url.is_empty());

        Ok(WindowState {
            position,
            expanded,
            current_url,
        })
    }

    fn save(&mut self, state: &WindowState) -> Result<()> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        let tx = self.db.connection_mut().transaction()?;
        {
            let mut upsert = tx.prepare_cached(
                "INSERT INTO window_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?;

            match state.position {
                Some(pos) => {
                    upsert.execute(params![KEY_POSITION, encode_position(pos), now])?;
                }
                None => {
                    tx.execute("DELETE FROM window_state WHERE key = ?1", params![KEY_POSITION])?;
                }
            }

            upsert.execute(params![KEY_EXPANDED, state.expanded.to_string(), now])?;

            match &state.current_url {
                Some(url) => {
                    upsert.execute(params![KEY_URL, url, now])?;
                }
                None => {
                    tx.execute("DELETE FROM window_state WHERE key = ?1", params![KEY_URL])?;
                }
            }
        }
        tx.commit()?;

        trace!(?state, "window state saved");
        Ok(())
    }
}

/// In-memory store for tests and headless runs.
///
/// `set_available(false)` makes every call fail with
/// [`LauncherError::PersistenceUnavailable`], simulating a broken backend.
#[derive(Debug)]
pub struct MemoryPositionStore {
    state: Option<WindowState>,
    available: bool,
    saves: usize,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self {
            state: None,
            available: true,
            saves: 0,
        }
    }

    pub fn with_state(state: WindowState) -> Self {
        Self {
            state: Some(state),
            ..Self::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Last successfully saved record, if any.
    pub fn saved(&self) -> Option<&WindowState> {
        self.state.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Default for MemoryPositionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionStore for MemoryPositionStore {
    fn load(&self) -> Result<WindowState> {
        if !self.available {
            return Err(LauncherError::PersistenceUnavailable("memory store offline".to_string()));
        }
        Ok(self.state.clone().unwrap_or_default())
    }

    fn save(&mut self, state: &WindowState) -> Result<()> {
        if !self.available {
            return Err(LauncherError::PersistenceUnavailable("memory store offline".to_string()));
        }
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

fn encode_position(pos: Point) -> String {
    format!("[{},{}]", pos.x, pos.y)
}

fn decode_position(raw: &str) -> Result<Point> {
    let [x, y]: [i32; 2] = serde_json::from_str(raw).map_err(|e| {
        LauncherError::PersistenceUnavailable(format!("corrupt {} '{}': {}", KEY_POSITION, raw, e))
    })?;
    Ok(Point::new(x, y))
}

fn decode_bool(raw: &str) -> Result<bool> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(LauncherError::PersistenceUnavailable(format!(
            "corrupt {} '{}'",
            KEY_EXPANDED, other
        ))),
    }
}
