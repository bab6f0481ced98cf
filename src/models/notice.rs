use super::claim::Claim;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the approval popup shows for a claim.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApprovalNotice {
    pub claim_id: String,
    pub amount_cents: i64,
    pub currency: String,
    pub paypal_email: String,
    pub processed_at: DateTime<Utc>,
}

impl ApprovalNotice {
    /// `None` for claims that were never processed.
    pub fn from_claim(claim: &Claim) -> Option<Self> {
        Some(Self {
            claim_id: claim.id.clone(),
            amount_cents: claim.amount_cents,
            currency: claim.currency.clone(),
            paypal_email: claim.identity.paypal_email.clone(),
            processed_at: claim.processed_at?,
        })
    }

    pub fn amount_display(&self) -> String {
        crate::utils::formatting::format_amount(self.amount_cents, &self.currency)
    }
}
