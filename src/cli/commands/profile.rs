use super::open_profile;
use crate::config::Config;
use crate::core::eligibility::EligibilityGate;
use crate::errors::AppResult;
use crate::profile::{KvStore, keys};
use crate::utils::colors::colorize_optional;
use crate::utils::formatting::bold;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let store = open_profile(cfg)?;
    let gate = EligibilityGate::new(cfg.offer_threshold);
    let state = gate.load(&store)?;

    let yes_no = |b: bool| if b { "yes" } else { "no" };

    println!("{}", bold("Visitor profile"));
    println!("  visits        : {} (offer at {})", state.count, gate.threshold());
    println!("  offer seen    : {}", yes_no(state.has_seen_offer));
    println!("  offer claimed : {}", yes_no(state.has_claimed_offer));
    println!(
        "  claim email   : {}",
        colorize_optional(&store.get(keys::CLAIM_EMAIL)?.unwrap_or_default())
    );
    println!(
        "  claim PayPal  : {}",
        colorize_optional(&store.get(keys::CLAIM_PAYPAL_EMAIL)?.unwrap_or_default())
    );

    let notified = store.keys_with_prefix(keys::MARKER_PREFIX)?;
    println!("  notified for : {} claim(s)", notified.len());
    for k in notified {
        println!("    - {}", &k[keys::MARKER_PREFIX.len()..]);
    }

    Ok(())
}
