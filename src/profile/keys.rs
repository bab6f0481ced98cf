//! Key names used in the local profile store.

pub const VISIT_COUNT: &str = "visit_count";
pub const HAS_SEEN_OFFER: &str = "has_seen_offer";
pub const HAS_CLAIMED_OFFER: &str = "has_claimed_offer";
pub const CLAIM_EMAIL: &str = "claim_email";
pub const CLAIM_PAYPAL_EMAIL: &str = "claim_paypal_email";

pub const MARKER_PREFIX: &str = "notified_claim:";

pub fn delivery_marker(claim_id: &str) -> String {
    format!("{MARKER_PREFIX}{claim_id}")
}
