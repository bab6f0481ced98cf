use super::open_profile;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::eligibility::{EligibilityGate, OfferResponse};
use crate::errors::AppResult;
use crate::ui::messages::{info, offer, warning};
use crate::utils::format_amount;

/// One page load. Local-storage trouble never fails the command.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Visit { dismiss } = cmd {
        let store = match open_profile(cfg) {
            Ok(s) => s,
            Err(e) => {
                warning(format!("Profile unavailable, visit not recorded: {}", e));
                return Ok(());
            }
        };

        let gate = EligibilityGate::new(cfg.offer_threshold);

        let mut state = match gate.record_visit(&store) {
            Ok(s) => s,
            Err(e) => {
                warning(format!("Visit not recorded: {}", e));
                return Ok(());
            }
        };

        info(format!("Visit #{}", state.count));

        if gate.should_offer_claim(&state) {
            let response = if *dismiss {
                OfferResponse::Dismissed
            } else {
                offer(format!(
                    "Thanks for {} visits! Claim your {} cash reward with `rcashoffer claim`.",
                    state.count,
                    format_amount(cfg.offer_amount_cents, &cfg.currency)
                ));
                OfferResponse::Shown
            };

            if let Err(e) = gate.record_offer_response(&store, &mut state, response) {
                warning(format!("Could not record the offer as seen: {}", e));
            }
            if *dismiss {
                info("Offer dismissed.");
            }
        }
    }

    Ok(())
}
