//! SQL query constants for the URL shortener application.
//!
//! Centralizes all SQL queries for better maintainability and consistency.

/// Schema-related queries for database setup and migrations.
pub struct Schema;

impl Schema {
    pub const CREATE_USERS_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (datetime('now'))
        )";

    pub const CREATE_LINKS_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS links (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            original_url      TEXT NOT NULL,
            short_code        TEXT NOT NULL UNIQUE,
            custom_short_code TEXT,
            password_hash     TEXT,
            description       TEXT,
            is_active         INTEGER NOT NULL DEFAULT 1,
            user_id           INTEGER,
            created_at        TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
        )";

    pub const CREATE_SHORT_CODE_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS idx_links_short_code ON links (short_code)";

    pub const CREATE_CUSTOM_CODE_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS idx_links_custom_short_code ON links (custom_short_code)";
}

/// User-related queries.
pub struct Users;

impl Users {
    pub const INSERT: &'static str =
        "INSERT INTO users (email, password_hash) VALUES (?1, ?2)";

    pub const SELECT_BY_EMAIL: &'static str =
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1";

    pub const COUNT_BY_EMAIL: &'static str = "SELECT COUNT(*) FROM users WHERE email = ?1";
}

/// Link-related queries for CRUD and resolution.
pub struct Links;

impl Links {
    pub const INSERT: &'static str = "
        INSERT INTO links (original_url, short_code, custom_short_code, password_hash,
                           description, is_active, user_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

    pub const SELECT_BY_ID: &'static str = "
        SELECT id, original_url, short_code, custom_short_code, password_hash, description,
               is_active, user_id, created_at
        FROM links WHERE id = ?1";

    /// Resolution lookup: a link is addressable by either its short code or
    /// its custom alias.
    pub const SELECT_BY_CODE: &'static str = "
        SELECT id, original_url, short_code, custom_short_code, password_hash, description,
               is_active, user_id, created_at
        FROM links WHERE short_code = ?1 OR custom_short_code = ?1";

    pub const LIST_BY_USER: &'static str = "
        SELECT id, original_url, short_code, custom_short_code, password_hash, description,
               is_active, user_id, created_at
        FROM links WHERE user_id = ?1
        ORDER BY created_at DESC";

    pub const COUNT_BY_SHORT_CODE: &'static str =
        "SELECT COUNT(*) FROM links WHERE short_code = ?1";

    pub const COUNT_BY_SHORT_CODE_AND_USER: &'static str =
        "SELECT COUNT(*) FROM links WHERE short_code = ?1 AND user_id = ?2";

    pub const UPDATE_BY_ID: &'static str = "
        UPDATE links
        SET original_url = ?1, description = ?2, is_active = ?3, password_hash = ?4
        WHERE id = ?5";

    pub const DELETE_BY_ID: &'static str = "DELETE FROM links WHERE id = ?1";
}
