pub mod backup;
pub mod clock;
pub mod eligibility;
pub mod interfaces;
pub mod log;
pub mod reconciler;
pub mod review;
pub mod submission;
