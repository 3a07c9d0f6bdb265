//! SQL schema for the Atrium SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Written once by the submission gateway. Status changes happen elsewhere.
CREATE TABLE IF NOT EXISTS contact_submissions (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    message     TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'new',   -- 'new' | 'in_progress' | 'resolved'
    created_at  TEXT NOT NULL                  -- RFC 3339 UTC, fixed precision
);

CREATE TABLE IF NOT EXISTS services (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    icon        TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,
    updated_at  TEXT
);

CREATE INDEX IF NOT EXISTS submissions_created_idx ON contact_submissions(created_at);
CREATE INDEX IF NOT EXISTS services_active_idx     ON services(is_active, created_at);

PRAGMA user_version = 1;
";
