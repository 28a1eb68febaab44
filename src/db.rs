// ==========================================
// Install Orders - SQLite connection setup
// ==========================================
// Single place for Connection::open so PRAGMA behavior and
// busy_timeout are uniform across all repositories.
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the uniform per-connection PRAGMAs.
///
/// foreign_keys and busy_timeout are per-connection settings and
/// must be re-applied on every open.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection with the uniform configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the schema if it does not exist yet. Used by tests and
/// first-run bootstrap; production migrations live outside the crate.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            company_id       TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            contact_person   TEXT,
            contact_phone    TEXT,
            operator_kind    TEXT NOT NULL DEFAULT 'STANDARD',
            sole_operator_id TEXT
        );

        CREATE TABLE IF NOT EXISTS persons (
            person_id  TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            role       TEXT NOT NULL,
            company_id TEXT REFERENCES companies(company_id),
            services   TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS orders (
            order_id            TEXT PRIMARY KEY,
            order_no            TEXT NOT NULL UNIQUE,
            store_id            TEXT NOT NULL,
            client_name         TEXT NOT NULL,
            client_phone        TEXT,
            client_address      TEXT NOT NULL,
            service_type        TEXT NOT NULL,
            with_transport      INTEGER NOT NULL,
            installation_status TEXT NOT NULL,
            transport_status    TEXT,
            company_id          TEXT NOT NULL REFERENCES companies(company_id),
            company_name        TEXT NOT NULL,
            installer_id        TEXT,
            installer_name      TEXT,
            transporter_id      TEXT,
            transporter_name    TEXT,
            installation_date   TEXT,
            transport_date      TEXT,
            complaint_notes     TEXT,
            complaint_photos    TEXT NOT NULL DEFAULT '[]',
            notes               TEXT,
            invoice_issued      INTEGER NOT NULL DEFAULT 0,
            will_be_settled     INTEGER NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL,
            revision            INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_orders_company ON orders(company_id);
        CREATE INDEX IF NOT EXISTS idx_orders_installer ON orders(installer_id);
        CREATE INDEX IF NOT EXISTS idx_persons_company_role ON persons(company_id, role);

        -- Order numbers are allocated per year and never reused,
        -- even after an order is deleted.
        CREATE TABLE IF NOT EXISTS order_no_seq (
            year     INTEGER PRIMARY KEY,
            last_seq INTEGER NOT NULL
        );
        "#,
    )
}
