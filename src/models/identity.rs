use serde::{Deserialize, Serialize};

/// Submitter identity bound to a claim at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub paypal_email: String,
}

/// Identity as cached in the local profile after a submission.
///
/// Either half may be missing (partially cleared storage, older profiles).
/// Reconciliation matches a claim when *either* present field matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedIdentity {
    pub email: Option<String>,
    pub paypal_email: Option<String>,
}

impl CachedIdentity {
    pub fn new(email: Option<String>, paypal_email: Option<String>) -> Self {
        // blank values count as absent
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            email: clean(email),
            paypal_email: clean(paypal_email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.paypal_email.is_none()
    }
}
