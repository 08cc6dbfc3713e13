//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - saved_searches(id, description, query, notify_owner, notify_slack, owner_kind, user_id, org_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::SavedSearchStore;
