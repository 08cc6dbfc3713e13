//! Database schema definitions

/// SQL to create the saved_searches table.
/// The CHECK constraints mirror `Owner`: exactly the identity column that
/// matches `owner_kind` is populated.
pub const CREATE_SAVED_SEARCHES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS saved_searches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    query TEXT NOT NULL,
    notify_owner INTEGER NOT NULL DEFAULT 0,
    notify_slack INTEGER NOT NULL DEFAULT 0,
    owner_kind TEXT NOT NULL CHECK (owner_kind IN ('user', 'org')),
    user_id INTEGER,
    org_id INTEGER,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    CHECK (
        (owner_kind = 'user' AND user_id IS NOT NULL AND org_id IS NULL)
        OR (owner_kind = 'org' AND org_id IS NOT NULL AND user_id IS NULL)
    )
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_saved_searches_user ON saved_searches(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_saved_searches_org ON saved_searches(org_id)",
];

/// Columns selected (and returned) for a full saved search row, in
/// the order `row_to_saved_query` reads them
pub const SAVED_SEARCH_COLUMNS: &str =
    "id, description, query, notify_owner, notify_slack, owner_kind, user_id, org_id, created_at, updated_at";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_SAVED_SEARCHES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
