use serde::Serialize;

/// Per-profile visit counter plus the two one-shot offer flags.
///
/// Loaded from and saved to the local profile store by the eligibility gate;
/// never shared with the server except as `visit_count_at_claim`.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct VisitorState {
    pub count: u64,
    pub has_seen_offer: bool,
    pub has_claimed_offer: bool,
}
