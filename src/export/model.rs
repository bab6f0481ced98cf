// src/export/model.rs

use crate::models::claim::Claim;
use crate::utils::date;
use serde::Serialize;

/// Flat claim row for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct ClaimExport {
    pub id: String,
    pub name: String,
    pub email: String,
    pub paypal_email: String,
    pub phone: String,
    pub country: String,
    pub visit_count_at_claim: u64,
    pub amount: String,
    pub status: String,
    pub admin_notes: String,
    pub claimed_at: String,
    pub processed_at: String,
}

impl From<&Claim> for ClaimExport {
    fn from(c: &Claim) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            email: c.identity.email.clone(),
            paypal_email: c.identity.paypal_email.clone(),
            phone: c.phone.clone().unwrap_or_default(),
            country: c.country.clone(),
            visit_count_at_claim: c.visit_count_at_claim,
            amount: c.amount_display(),
            status: c.status.to_db_str().to_string(),
            admin_notes: c.admin_notes.clone().unwrap_or_default(),
            claimed_at: date::to_db(&c.claimed_at),
            processed_at: c.processed_at.as_ref().map(date::to_db).unwrap_or_default(),
        }
    }
}
