use crate::errors::AppError;
use crate::models::claim::Claim;
use crate::models::claim_status::ClaimStatus;
use crate::models::identity::{CachedIdentity, Identity};
use crate::utils::date;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const CLAIM_COLUMNS: &str = "id, name, email, paypal_email, phone, country, visit_count_at_claim,
     amount_cents, currency, status, admin_notes, claimed_at, processed_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_ts(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    date::from_db(raw)
        .ok_or_else(|| conversion_error(idx, AppError::Other(format!("Invalid timestamp: {raw}"))))
}

pub fn map_row(row: &Row) -> Result<Claim> {
    let status_str: String = row.get("status")?;
    let status = ClaimStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(9, AppError::InvalidStatus(status_str.clone())))?;

    let claimed_raw: String = row.get("claimed_at")?;
    let claimed_at = parse_ts(11, &claimed_raw)?;

    let processed_at = match row.get::<_, Option<String>>("processed_at")? {
        Some(raw) => Some(parse_ts(12, &raw)?),
        None => None,
    };

    Ok(Claim {
        id: row.get("id")?,
        name: row.get("name")?,
        identity: Identity {
            email: row.get("email")?,
            paypal_email: row.get("paypal_email")?,
        },
        phone: row.get("phone")?,
        country: row.get("country")?,
        visit_count_at_claim: row.get::<_, i64>("visit_count_at_claim")?.max(0) as u64,
        amount_cents: row.get("amount_cents")?,
        currency: row.get("currency")?,
        status,
        admin_notes: row.get("admin_notes")?,
        claimed_at,
        processed_at,
    })
}

pub fn insert_claim(conn: &Connection, claim: &Claim) -> Result<()> {
    conn.execute(
        "INSERT INTO claims (id, name, email, paypal_email, phone, country, visit_count_at_claim,
                             amount_cents, currency, status, admin_notes, claimed_at, processed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            claim.id,
            claim.name,
            claim.identity.email,
            claim.identity.paypal_email,
            claim.phone,
            claim.country,
            claim.visit_count_at_claim as i64,
            claim.amount_cents,
            claim.currency,
            claim.status.to_db_str(),
            claim.admin_notes,
            date::to_db(&claim.claimed_at),
            claim.processed_at.as_ref().map(date::to_db),
        ],
    )?;
    Ok(())
}

pub fn load_claim(conn: &Connection, id: &str) -> Result<Option<Claim>> {
    let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1");
    conn.query_row(&sql, [id], map_row).optional()
}

/// All claims, newest first, optionally restricted to one status.
pub fn list_claims(conn: &Connection, status: Option<ClaimStatus>) -> Result<Vec<Claim>> {
    let mut out = Vec::new();

    match status {
        Some(s) => {
            let sql = format!(
                "SELECT {CLAIM_COLUMNS} FROM claims WHERE status = ?1 ORDER BY claimed_at DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([s.to_db_str()], map_row)? {
                out.push(r?);
            }
        }
        None => {
            let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims ORDER BY claimed_at DESC");
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Compare-and-set status change.
///
/// Only writes when the row is still in `expected`; returns whether it did.
/// `notes = None` keeps the existing admin notes.
pub fn cas_update_status(
    conn: &Connection,
    id: &str,
    expected: ClaimStatus,
    target: ClaimStatus,
    notes: Option<&str>,
    processed_at: &DateTime<Utc>,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE claims
         SET status = ?1,
             processed_at = ?2,
             admin_notes = COALESCE(?3, admin_notes)
         WHERE id = ?4 AND status = ?5",
        params![
            target.to_db_str(),
            date::to_db(processed_at),
            notes,
            id,
            expected.to_db_str(),
        ],
    )?;
    Ok(changed == 1)
}

pub fn update_notes(conn: &Connection, id: &str, notes: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE claims SET admin_notes = ?1 WHERE id = ?2",
        params![notes, id],
    )?;
    Ok(changed == 1)
}

/// Most recently approved claim for `identity` with `processed_at >= since`.
///
/// Email and PayPal address match independently (OR). Absent halves of the
/// identity never match anything.
pub fn find_latest_approved(
    conn: &Connection,
    identity: &CachedIdentity,
    since: &DateTime<Utc>,
) -> Result<Option<Claim>> {
    let sql = format!(
        "SELECT {CLAIM_COLUMNS} FROM claims
         WHERE status = 'approved'
           AND processed_at >= ?1
           AND ((?2 IS NOT NULL AND email = ?2) OR (?3 IS NOT NULL AND paypal_email = ?3))
         ORDER BY processed_at DESC
         LIMIT 1"
    );

    conn.query_row(
        &sql,
        params![
            date::to_db(since),
            identity.email.as_deref(),
            identity.paypal_email.as_deref(),
        ],
        map_row,
    )
    .optional()
}

/// (status, count) for every status, zeros included.
pub fn count_by_status(conn: &Connection) -> Result<Vec<(ClaimStatus, i64)>> {
    let mut stmt = conn.prepare_cached("SELECT COUNT(*) FROM claims WHERE status = ?1")?;

    let mut out = Vec::new();
    for s in ClaimStatus::ALL {
        let n: i64 = stmt.query_row([s.to_db_str()], |row| row.get(0))?;
        out.push((s, n));
    }
    Ok(out)
}
