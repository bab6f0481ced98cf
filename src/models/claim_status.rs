use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a claim.
///
/// ```text
/// pending ──► approved ──► paid
///    │
///    └──────► rejected
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

/// Result of checking a requested move against the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Legal move: status changes and `processed_at` is stamped.
    Apply,
    /// Target equals the current state: nothing is written.
    NoOp,
    /// Not reachable from the current state.
    Illegal,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Paid,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Paid => "paid",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ClaimStatus::Pending),
            "approved" => Some(ClaimStatus::Approved),
            "rejected" => Some(ClaimStatus::Rejected),
            "paid" => Some(ClaimStatus::Paid),
            _ => None,
        }
    }

    /// Lenient parser for CLI input ("Approved", " PAID ", ...).
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(s.trim().to_lowercase().as_str())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Paid)
    }

    /// The single gate every status change goes through.
    pub fn check(&self, target: ClaimStatus) -> Transition {
        use ClaimStatus::*;

        if *self == target {
            return Transition::NoOp;
        }

        match (self, target) {
            (Pending, Approved) | (Pending, Rejected) | (Approved, Paid) => Transition::Apply,
            _ => Transition::Illegal,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
