//! Eligibility gate: counts page loads and decides when to surface the offer.

use crate::errors::AppResult;
use crate::models::visitor::VisitorState;
use crate::profile::{self, KvStore, keys};

pub const DEFAULT_OFFER_THRESHOLD: u64 = 50;

/// How the visitor reacted to the offer banner. Both close the offer for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferResponse {
    Shown,
    Dismissed,
}

pub struct EligibilityGate {
    threshold: u64,
}

impl Default for EligibilityGate {
    fn default() -> Self {
        Self::new(DEFAULT_OFFER_THRESHOLD)
    }
}

impl EligibilityGate {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn load(&self, store: &dyn KvStore) -> AppResult<VisitorState> {
        Ok(VisitorState {
            count: profile::get_u64(store, keys::VISIT_COUNT)?,
            has_seen_offer: profile::get_bool(store, keys::HAS_SEEN_OFFER)?,
            has_claimed_offer: profile::get_bool(store, keys::HAS_CLAIMED_OFFER)?,
        })
    }

    /// One page load: bump the counter by exactly one and persist it.
    pub fn record_visit(&self, store: &dyn KvStore) -> AppResult<VisitorState> {
        let mut state = self.load(store)?;
        state.count = state.count.saturating_add(1);
        store.set(keys::VISIT_COUNT, &state.count.to_string())?;
        Ok(state)
    }

    pub fn should_offer_claim(&self, state: &VisitorState) -> bool {
        state.count >= self.threshold && !state.has_seen_offer && !state.has_claimed_offer
    }

    /// Close the offer for this profile, whatever the reaction was.
    pub fn record_offer_response(
        &self,
        store: &dyn KvStore,
        state: &mut VisitorState,
        response: OfferResponse,
    ) -> AppResult<()> {
        tracing::debug!(?response, count = state.count, "offer closed");
        state.has_seen_offer = true;
        profile::set_bool(store, keys::HAS_SEEN_OFFER, true)
    }

    pub fn record_claimed(&self, store: &dyn KvStore, state: &mut VisitorState) -> AppResult<()> {
        state.has_claimed_offer = true;
        profile::set_bool(store, keys::HAS_CLAIMED_OFFER, true)
    }
}
