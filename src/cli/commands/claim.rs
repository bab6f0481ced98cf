use super::{open_profile, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::eligibility::EligibilityGate;
use crate::core::submission::{ClaimForm, SubmissionService};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Claim {
        name,
        email,
        paypal_email,
        phone,
        country,
    } = cmd
    {
        let profile = open_profile(cfg)?;
        let store = open_store(cfg)?;

        let gate = EligibilityGate::new(cfg.offer_threshold);
        let mut state = gate.load(&profile)?;

        let service = SubmissionService::new(
            gate,
            cfg.offer_amount_cents,
            &cfg.currency,
            Arc::new(SystemClock),
        );

        let form = ClaimForm {
            name: name.clone(),
            email: email.clone(),
            paypal_email: paypal_email.clone(),
            phone: phone.clone(),
            country: country.clone(),
        };

        let claim = service.submit(&store, &profile, &mut state, &form)?;

        success(format!(
            "Claim {} submitted for {} ({} visits).",
            claim.id,
            claim.amount_display(),
            claim.visit_count_at_claim
        ));
        info(format!(
            "You will be notified here once it is approved; payment goes to {}.",
            claim.identity.paypal_email
        ));
    }

    Ok(())
}
