use super::{list::print_claim, open_store, parse_status};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::review::AdminReview;
use crate::errors::AppResult;
use crate::models::claim_status::ClaimStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_status;
use std::sync::Arc;

/// approve / reject / paid / set-status / annotate
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (id, target, notes) = match cmd {
        Commands::Approve { id, notes } => (id, ClaimStatus::Approved, notes),
        Commands::Reject { id, notes } => (id, ClaimStatus::Rejected, notes),
        Commands::Paid { id, notes } => (id, ClaimStatus::Paid, notes),
        Commands::SetStatus { id, status, notes } => (id, parse_status(status)?, notes),
        Commands::Annotate { id, notes } => {
            let store = open_store(cfg)?;
            let review = AdminReview::new(&store, Arc::new(SystemClock));
            let claim = review.annotate(id, notes)?;
            success(format!("Notes updated for claim {}.", claim.id));
            print_claim(&claim);
            return Ok(());
        }
        _ => return Ok(()),
    };

    let store = open_store(cfg)?;
    let review = AdminReview::new(&store, Arc::new(SystemClock));
    let result = review.set_status(id, target, notes.as_deref())?;

    if result.changed {
        success(format!(
            "Claim {} is now {}.",
            result.claim.id,
            colorize_status(result.claim.status)
        ));
    } else {
        info(format!(
            "Claim {} already {}, nothing changed.",
            result.claim.id,
            colorize_status(result.claim.status)
        ));
    }
    print_claim(&result.claim);

    Ok(())
}
