//! Claim submission: validate the offer form and persist a pending claim.

use crate::core::clock::Clock;
use crate::core::eligibility::EligibilityGate;
use crate::core::interfaces::ClaimSink;
use crate::errors::{AppError, AppResult};
use crate::models::claim::{Claim, NewClaim};
use crate::models::identity::Identity;
use crate::models::visitor::VisitorState;
use crate::profile::{KvStore, keys};
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Raw form input, as typed by the visitor.
#[derive(Debug, Clone, Default)]
pub struct ClaimForm {
    pub name: String,
    pub email: String,
    pub paypal_email: String,
    pub phone: Option<String>,
    pub country: String,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

pub fn is_valid_email(s: &str) -> bool {
    email_re().is_match(s)
}

fn required(field: &str, value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    Ok(v.to_string())
}

fn required_email(field: &str, value: &str) -> AppResult<String> {
    let v = required(field, value)?.to_lowercase();
    if !is_valid_email(&v) {
        return Err(AppError::validation(field, format!("'{v}' is not a valid email address")));
    }
    Ok(v)
}

impl ClaimForm {
    /// Field-level validation; the first failing field is reported.
    pub fn validate(
        &self,
        visit_count: u64,
        amount_cents: i64,
        currency: &str,
    ) -> AppResult<NewClaim> {
        let name = required("name", &self.name)?;
        let email = required_email("email", &self.email)?;
        let paypal_email = required_email("paypal_email", &self.paypal_email)?;
        let country = required("country", &self.country)?.to_uppercase();

        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(NewClaim {
            name,
            identity: Identity {
                email,
                paypal_email,
            },
            phone,
            country,
            visit_count_at_claim: visit_count,
            amount_cents,
            currency: currency.to_string(),
        })
    }
}

pub struct SubmissionService {
    gate: EligibilityGate,
    amount_cents: i64,
    currency: String,
    clock: Arc<dyn Clock>,
}

impl SubmissionService {
    pub fn new(
        gate: EligibilityGate,
        amount_cents: i64,
        currency: &str,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gate,
            amount_cents,
            currency: currency.to_string(),
            clock,
        }
    }

    /// Create a pending claim from `form`.
    ///
    /// Nothing is written anywhere unless every check passes. On success the
    /// profile is flagged as claimed and the identity cached for reconciliation.
    pub fn submit(
        &self,
        sink: &dyn ClaimSink,
        local: &dyn KvStore,
        state: &mut VisitorState,
        form: &ClaimForm,
    ) -> AppResult<Claim> {
        if state.has_claimed_offer {
            return Err(AppError::AlreadyClaimed);
        }
        if state.count < self.gate.threshold() {
            return Err(AppError::NotEligible {
                visits: state.count,
                threshold: self.gate.threshold(),
            });
        }

        let new = form.validate(state.count, self.amount_cents, &self.currency)?;
        let claim = sink.create(new, self.clock.now())?;

        tracing::info!(id = %claim.id, visits = claim.visit_count_at_claim, "claim submitted");

        // The claim exists now: a local write failure must not make the caller retry.
        if let Err(e) = self.remember_claim(local, state, &claim) {
            tracing::warn!(id = %claim.id, error = %e, "claim stored but profile not updated");
        }

        Ok(claim)
    }

    fn remember_claim(
        &self,
        local: &dyn KvStore,
        state: &mut VisitorState,
        claim: &Claim,
    ) -> AppResult<()> {
        self.gate.record_claimed(local, state)?;
        local.set(keys::CLAIM_EMAIL, &claim.identity.email)?;
        local.set(keys::CLAIM_PAYPAL_EMAIL, &claim.identity.paypal_email)?;
        Ok(())
    }
}
