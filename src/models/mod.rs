pub mod claim;
pub mod claim_status;
pub mod identity;
pub mod notice;
pub mod visitor;
