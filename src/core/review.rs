//! Admin review workflow: the only writer of non-pending states.

use crate::core::clock::Clock;
use crate::core::interfaces::{ClaimTransitions, Transitioned};
use crate::errors::{AppError, AppResult};
use crate::models::claim::Claim;
use crate::models::claim_status::ClaimStatus;
use std::sync::Arc;

pub struct AdminReview<'a> {
    store: &'a dyn ClaimTransitions,
    clock: Arc<dyn Clock>,
}

impl<'a> AdminReview<'a> {
    pub fn new(store: &'a dyn ClaimTransitions, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn approve(&self, id: &str, notes: Option<&str>) -> AppResult<Transitioned> {
        self.set_status(id, ClaimStatus::Approved, notes)
    }

    pub fn reject(&self, id: &str, notes: Option<&str>) -> AppResult<Transitioned> {
        self.set_status(id, ClaimStatus::Rejected, notes)
    }

    pub fn mark_paid(&self, id: &str, notes: Option<&str>) -> AppResult<Transitioned> {
        self.set_status(id, ClaimStatus::Paid, notes)
    }

    /// Raw status change, as from a status dropdown. Same gate as the buttons.
    pub fn set_status(
        &self,
        id: &str,
        target: ClaimStatus,
        notes: Option<&str>,
    ) -> AppResult<Transitioned> {
        let notes = clean_notes(notes);
        let result = self.store.transition(id, target, notes, self.clock.now());

        match &result {
            Ok(t) if t.changed => tracing::info!(id, %target, "claim status changed"),
            Ok(_) => tracing::info!(id, %target, "claim already in target state"),
            Err(AppError::StateConflict { current, .. }) => {
                tracing::warn!(id, %current, %target, "illegal transition rejected")
            }
            Err(_) => {}
        }

        result
    }

    /// Replace admin notes without touching the status.
    pub fn annotate(&self, id: &str, notes: &str) -> AppResult<Claim> {
        self.store.annotate(id, notes.trim())
    }

    pub fn get(&self, id: &str) -> AppResult<Claim> {
        self.store.get(id)
    }
}

fn clean_notes(notes: Option<&str>) -> Option<&str> {
    notes.map(str::trim).filter(|n| !n.is_empty())
}
