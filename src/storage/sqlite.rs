//! SQLite storage implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::saved_search::{NewSavedQuery, Owner, SavedQuery, SavedQueryId};
use super::schema::{self, SAVED_SEARCH_COLUMNS};

/// SQLite-backed storage for saved searches.
///
/// Every operation is a single statement, so each mutation is atomic on its
/// own. List results are never cached in-process.
pub struct SavedSearchStore {
    conn: Mutex<Connection>,
}

impl SavedSearchStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn();
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // every operation is one statement, so a poisoned guard is still consistent
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ========== Saved Search Operations ==========

    /// Every stored saved search, in ascending id order
    pub fn list_all(&self) -> Result<Vec<SavedQuery>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM saved_searches ORDER BY id",
            SAVED_SEARCH_COLUMNS
        ))?;

        let saved = stmt
            .query_map([], row_to_saved_query)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Listed {} saved searches", saved.len());
        Ok(saved)
    }

    /// Get a saved search by id
    pub fn get(&self, id: SavedQueryId) -> Result<Option<SavedQuery>> {
        self.conn()
            .query_row(
                &format!("SELECT {} FROM saved_searches WHERE id = ?1", SAVED_SEARCH_COLUMNS),
                [id.0],
                row_to_saved_query,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a new saved search and return it with its assigned id.
    ///
    /// The owner kind is validated and stored in lowercase.
    pub fn create(&self, new: &NewSavedQuery) -> Result<SavedQuery> {
        let owner = new.owner()?;

        let saved = self.conn().query_row(
            &format!(
                r#"
                INSERT INTO saved_searches (description, query, notify_owner, notify_slack, owner_kind, user_id, org_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                RETURNING {}
                "#,
                SAVED_SEARCH_COLUMNS
            ),
            params![
                new.description,
                new.query,
                new.notify,
                new.notify_slack,
                owner.kind().as_str(),
                owner.user_id(),
                owner.org_id(),
            ],
            row_to_saved_query,
        )?;

        tracing::debug!("Created saved search {} owned by {}", saved.id, saved.owner);
        Ok(saved)
    }

    /// Replace every mutable field of an existing saved search.
    ///
    /// The id never changes; `updated_at` is refreshed.
    pub fn update(&self, id: SavedQueryId, new: &NewSavedQuery) -> Result<SavedQuery> {
        let owner = new.owner()?;

        let saved = self
            .conn()
            .query_row(
                &format!(
                    r#"
                    UPDATE saved_searches
                    SET description = ?1,
                        query = ?2,
                        notify_owner = ?3,
                        notify_slack = ?4,
                        owner_kind = ?5,
                        user_id = ?6,
                        org_id = ?7,
                        updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                    WHERE id = ?8
                    RETURNING {}
                    "#,
                    SAVED_SEARCH_COLUMNS
                ),
                params![
                    new.description,
                    new.query,
                    new.notify,
                    new.notify_slack,
                    owner.kind().as_str(),
                    owner.user_id(),
                    owner.org_id(),
                    id.0,
                ],
                row_to_saved_query,
            )
            .optional()?;

        match saved {
            Some(saved) => {
                tracing::debug!("Updated saved search {}", saved.id);
                Ok(saved)
            }
            None => {
                tracing::warn!("Update of unknown saved search {}", id);
                Err(Error::NotFound(id))
            }
        }
    }

    /// Delete a saved search by id
    pub fn delete(&self, id: SavedQueryId) -> Result<()> {
        let removed = self
            .conn()
            .execute("DELETE FROM saved_searches WHERE id = ?1", [id.0])?;

        if removed == 0 {
            tracing::warn!("Delete of unknown saved search {}", id);
            return Err(Error::NotFound(id));
        }

        tracing::debug!("Deleted saved search {}", id);
        Ok(())
    }
}

/// Helper to convert a row to a SavedQuery
fn row_to_saved_query(row: &rusqlite::Row) -> rusqlite::Result<SavedQuery> {
    let owner_kind: String = row.get(5)?;
    let user_id: Option<i32> = row.get(6)?;
    let org_id: Option<i32> = row.get(7)?;

    let owner = Owner::from_parts(&owner_kind, user_id, org_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(SavedQuery {
        id: SavedQueryId(row.get(0)?),
        description: row.get(1)?,
        query: row.get(2)?,
        notify: row.get(3)?,
        notify_slack: row.get(4)?,
        owner,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
