//! Claim store backed by the SQLite claims table.

use crate::core::interfaces::{ClaimQuery, ClaimSink, ClaimTransitions, Transitioned};
use crate::db::initialize::init_db;
use crate::db::log::audit_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::claim::{Claim, NewClaim};
use crate::models::claim_status::{ClaimStatus, Transition};
use crate::models::identity::CachedIdentity;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct SqliteClaimStore {
    pool: DbPool,
}

impl SqliteClaimStore {
    /// Open the store at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn list(&self, status: Option<ClaimStatus>) -> AppResult<Vec<Claim>> {
        Ok(queries::list_claims(&self.pool.conn, status)?)
    }

    pub fn counts(&self) -> AppResult<Vec<(ClaimStatus, i64)>> {
        Ok(queries::count_by_status(&self.pool.conn)?)
    }

    fn load(&self, id: &str) -> AppResult<Claim> {
        queries::load_claim(&self.pool.conn, id)?
            .ok_or_else(|| AppError::ClaimNotFound(id.to_string()))
    }
}

impl ClaimSink for SqliteClaimStore {
    fn create(&self, new: NewClaim, claimed_at: DateTime<Utc>) -> AppResult<Claim> {
        let claim = Claim::from_new(Uuid::new_v4().to_string(), new, claimed_at);
        queries::insert_claim(&self.pool.conn, &claim)?;

        audit_or_warn(
            &self.pool.conn,
            "claim",
            &claim.id,
            &format!(
                "New claim by {} <{}> after {} visits",
                claim.name, claim.identity.email, claim.visit_count_at_claim
            ),
        );

        Ok(claim)
    }
}

impl ClaimQuery for SqliteClaimStore {
    fn latest_approved(
        &self,
        identity: &CachedIdentity,
        since: &DateTime<Utc>,
    ) -> AppResult<Option<Claim>> {
        queries::find_latest_approved(&self.pool.conn, identity, since)
            .map_err(|e| AppError::TransientQuery(e.to_string()))
    }
}

impl ClaimTransitions for SqliteClaimStore {
    fn get(&self, id: &str) -> AppResult<Claim> {
        self.load(id)
    }

    fn transition(
        &self,
        id: &str,
        target: ClaimStatus,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Transitioned> {
        // A lost compare-and-set means another writer moved the claim forward.
        // Statuses only move forward and the longest chain is two steps, so
        // re-checking ends after at most three passes.
        loop {
            let current = self.load(id)?;

            match current.status.check(target) {
                Transition::Illegal => {
                    return Err(AppError::StateConflict {
                        id: id.to_string(),
                        current: current.status,
                        target,
                    });
                }
                Transition::NoOp => {
                    // Same target again (double submit): status and processed_at stay.
                    // New notes, if any, are still kept.
                    let claim = match notes {
                        Some(n) if current.admin_notes.as_deref() != Some(n) => {
                            self.annotate(id, n)?
                        }
                        _ => current,
                    };
                    return Ok(Transitioned {
                        claim,
                        changed: false,
                    });
                }
                Transition::Apply => {
                    if queries::cas_update_status(
                        &self.pool.conn,
                        id,
                        current.status,
                        target,
                        notes,
                        &now,
                    )? {
                        audit_or_warn(
                            &self.pool.conn,
                            operation_for(target),
                            id,
                            &format!("{} → {}", current.status, target),
                        );
                        return Ok(Transitioned {
                            claim: self.load(id)?,
                            changed: true,
                        });
                    }
                    tracing::debug!(id, %target, "status changed concurrently, re-checking");
                }
            }
        }
    }

    fn annotate(&self, id: &str, notes: &str) -> AppResult<Claim> {
        if !queries::update_notes(&self.pool.conn, id, notes)? {
            return Err(AppError::ClaimNotFound(id.to_string()));
        }
        audit_or_warn(&self.pool.conn, "annotate", id, notes);
        self.load(id)
    }
}

fn operation_for(target: ClaimStatus) -> &'static str {
    match target {
        ClaimStatus::Approved => "approve",
        ClaimStatus::Rejected => "reject",
        ClaimStatus::Paid => "paid",
        ClaimStatus::Pending => "reopen",
    }
}
