use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. Applied at most once, tracked in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_claims",
        description: "Created claims table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS claims (
            id                    TEXT PRIMARY KEY,
            name                  TEXT NOT NULL,
            email                 TEXT NOT NULL,
            paypal_email          TEXT NOT NULL,
            phone                 TEXT,
            country               TEXT NOT NULL,
            visit_count_at_claim  INTEGER NOT NULL,
            status                TEXT NOT NULL DEFAULT 'pending'
                                  CHECK(status IN ('pending','approved','rejected','paid')),
            admin_notes           TEXT,
            claimed_at            TEXT NOT NULL,
            processed_at          TEXT,
            CHECK((status = 'pending') = (processed_at IS NULL))
        );
        "#,
    },
    Migration {
        version: "20250301_0002_claims_indexes",
        description: "Added lookup indexes on claims",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_claims_status_processed ON claims(status, processed_at);
        CREATE INDEX IF NOT EXISTS idx_claims_email ON claims(email);
        CREATE INDEX IF NOT EXISTS idx_claims_paypal_email ON claims(paypal_email);
        "#,
    },
    Migration {
        version: "20250412_0003_add_claim_amount",
        description: "Added amount_cents and currency to claims",
        sql: r#"
        ALTER TABLE claims ADD COLUMN amount_cents INTEGER NOT NULL DEFAULT 0;
        ALTER TABLE claims ADD COLUMN currency TEXT NOT NULL DEFAULT 'USD';
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, in order.
///
/// Called by `db::initialize::init_db` and `db --migrate`. Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        tracing::info!(version = m.version, description = m.description, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
