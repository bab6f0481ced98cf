//! Notification reconciler.
//!
//! The client has no push channel, so it polls the claim store for approved
//! claims matching the identity cached at submission time. A delivery marker
//! per claim id, written before the popup is rendered, makes the display
//! exactly-once per profile even though the query itself runs over and over.

pub mod retry;
pub mod task;

pub use retry::{ExponentialRetry, FixedInterval, RetryPolicy};
pub use task::{CancellationToken, PollingTask, run_loop};

use crate::config::{Config, RetryPolicyKind};
use crate::core::clock::Clock;
use crate::core::interfaces::ClaimQuery;
use crate::errors::AppResult;
use crate::models::identity::CachedIdentity;
use crate::models::notice::ApprovalNotice;
use crate::profile::{KvStore, keys};
use crate::utils::date;
use std::sync::Arc;

/// Renders the approval popup.
pub trait NoticeSink: Send {
    fn show(&mut self, notice: &ApprovalNotice) -> AppResult<()>;
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No identity cached locally; nothing was queried.
    NoIdentity,
    /// Query ran, no approved claim in the window.
    NothingNew,
    /// Latest approved claim already has a delivery marker.
    AlreadyDelivered(String),
    /// Marker written and popup rendered.
    Delivered(ApprovalNotice),
    /// Query or local storage failed; logged, retried next tick.
    QueryFailed(String),
}

impl TickOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TickOutcome::QueryFailed(_))
    }
}

pub struct Reconciler {
    query: Box<dyn ClaimQuery>,
    local: Arc<dyn KvStore>,
    sink: Box<dyn NoticeSink>,
    clock: Arc<dyn Clock>,
    window: chrono::Duration,
    showing: Option<String>,
}

pub const DEFAULT_WINDOW_HOURS: i64 = 24;

impl Reconciler {
    pub fn new(
        query: Box<dyn ClaimQuery>,
        local: Arc<dyn KvStore>,
        sink: Box<dyn NoticeSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            query,
            local,
            sink,
            clock,
            window: chrono::Duration::hours(DEFAULT_WINDOW_HOURS),
            showing: None,
        }
    }

    pub fn with_window(mut self, window: chrono::Duration) -> Self {
        self.window = window;
        self
    }

    /// Identity cached by the last successful submission on this profile.
    pub fn cached_identity(&self) -> AppResult<CachedIdentity> {
        Ok(CachedIdentity::new(
            self.local.get(keys::CLAIM_EMAIL)?,
            self.local.get(keys::CLAIM_PAYPAL_EMAIL)?,
        ))
    }

    /// One reconciliation pass. Never returns an error: failures are logged
    /// and reported as [`TickOutcome::QueryFailed`].
    pub fn tick(&mut self) -> TickOutcome {
        let identity = match self.cached_identity() {
            Ok(identity) => identity,
            Err(e) => return failed("reading cached identity", e.to_string()),
        };

        if identity.is_empty() {
            return TickOutcome::NoIdentity;
        }

        let now = self.clock.now();
        let since = now - self.window;

        let claim = match self.query.latest_approved(&identity, &since) {
            Ok(Some(claim)) => claim,
            Ok(None) => return TickOutcome::NothingNew,
            Err(e) => return failed("querying approved claims", e.to_string()),
        };

        let marker = keys::delivery_marker(&claim.id);
        match self.local.contains(&marker) {
            Ok(true) => return TickOutcome::AlreadyDelivered(claim.id),
            Ok(false) => {}
            Err(e) => return failed("checking delivery marker", e.to_string()),
        }

        let Some(notice) = ApprovalNotice::from_claim(&claim) else {
            tracing::warn!(id = %claim.id, "approved claim without processed_at, skipped");
            return TickOutcome::NothingNew;
        };

        // Marker first: a crash after this point loses the popup, never duplicates it.
        match self.local.set_if_absent(&marker, &date::to_db(&now)) {
            Ok(true) => {}
            Ok(false) => return TickOutcome::AlreadyDelivered(claim.id),
            Err(e) => return failed("writing delivery marker", e.to_string()),
        }

        self.showing = Some(claim.id.clone());
        if let Err(e) = self.sink.show(&notice) {
            tracing::warn!(id = %claim.id, error = %e, "approval popup could not be rendered");
        }
        tracing::info!(id = %claim.id, "approval notification delivered");

        TickOutcome::Delivered(notice)
    }

    /// Id of the popup currently on screen, if any.
    pub fn showing(&self) -> Option<&str> {
        self.showing.as_deref()
    }

    /// User closed the popup. The marker stays.
    pub fn dismiss(&mut self) {
        self.showing = None;
    }

    /// Claim ids this profile was already notified about.
    pub fn delivered_ids(&self) -> AppResult<Vec<String>> {
        Ok(self
            .local
            .keys_with_prefix(keys::MARKER_PREFIX)?
            .into_iter()
            .map(|k| k[keys::MARKER_PREFIX.len()..].to_string())
            .collect())
    }
}

fn failed(stage: &str, message: String) -> TickOutcome {
    tracing::warn!(stage, error = %message, "reconciler tick failed, will retry");
    TickOutcome::QueryFailed(message)
}

/// Retry policy selected in the configuration.
pub fn policy_from_config(cfg: &Config) -> Box<dyn RetryPolicy> {
    match cfg.retry_policy {
        RetryPolicyKind::Fixed => Box::new(FixedInterval::new(cfg.poll_interval())),
        RetryPolicyKind::Exponential => {
            Box::new(ExponentialRetry::new(cfg.poll_interval(), cfg.max_backoff()))
        }
    }
}
