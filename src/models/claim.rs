use super::{claim_status::ClaimStatus, identity::Identity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A loyalty-reward claim as stored server-side.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Claim {
    pub id: String,                    // ⇔ claims.id (TEXT, uuid v4)
    pub name: String,                  // ⇔ claims.name
    pub identity: Identity,            // ⇔ claims.email / claims.paypal_email
    pub phone: Option<String>,         // ⇔ claims.phone (NULL)
    pub country: String,               // ⇔ claims.country
    pub visit_count_at_claim: u64,     // ⇔ claims.visit_count_at_claim
    pub amount_cents: i64,             // ⇔ claims.amount_cents
    pub currency: String,              // ⇔ claims.currency
    pub status: ClaimStatus,           // ⇔ claims.status
    pub admin_notes: Option<String>,   // ⇔ claims.admin_notes (NULL)
    pub claimed_at: DateTime<Utc>,     // ⇔ claims.claimed_at (RFC 3339)
    pub processed_at: Option<DateTime<Utc>>, // ⇔ claims.processed_at (NULL while pending)
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub name: String,
    pub identity: Identity,
    pub phone: Option<String>,
    pub country: String,
    pub visit_count_at_claim: u64,
    pub amount_cents: i64,
    pub currency: String,
}

impl Claim {
    /// Build the pending record for a fresh submission.
    pub fn from_new(id: String, new: NewClaim, claimed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            identity: new.identity,
            phone: new.phone,
            country: new.country,
            visit_count_at_claim: new.visit_count_at_claim,
            amount_cents: new.amount_cents,
            currency: new.currency,
            status: ClaimStatus::Pending,
            admin_notes: None,
            claimed_at,
            processed_at: None,
        }
    }

    pub fn amount_display(&self) -> String {
        crate::utils::formatting::format_amount(self.amount_cents, &self.currency)
    }
}
