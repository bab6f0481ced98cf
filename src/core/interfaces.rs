//! Seams between the client-side logic and the claim store.
//!
//! `SqliteClaimStore` implements all three; tests swap in failing or
//! counting doubles where needed.

use crate::errors::AppResult;
use crate::models::claim::{Claim, NewClaim};
use crate::models::claim_status::ClaimStatus;
use crate::models::identity::CachedIdentity;
use chrono::{DateTime, Utc};

/// Write side used by claim submission. Never touches existing claims.
pub trait ClaimSink {
    fn create(&self, new: NewClaim, claimed_at: DateTime<Utc>) -> AppResult<Claim>;
}

/// Read side used by the reconciler.
pub trait ClaimQuery: Send {
    /// At most one approved claim matching either identity field, with
    /// `processed_at >= since`, most recent first.
    fn latest_approved(
        &self,
        identity: &CachedIdentity,
        since: &DateTime<Utc>,
    ) -> AppResult<Option<Claim>>;
}

/// Outcome of a guarded status change.
#[derive(Debug, Clone)]
pub struct Transitioned {
    pub claim: Claim,
    /// `false` when the claim already was in the target state.
    pub changed: bool,
}

/// Mutation side used by admin review. The store enforces the state machine.
pub trait ClaimTransitions {
    fn get(&self, id: &str) -> AppResult<Claim>;

    fn transition(
        &self,
        id: &str,
        target: ClaimStatus,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Transitioned>;

    fn annotate(&self, id: &str, notes: &str) -> AppResult<Claim>;
}
