use super::{open_profile, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::reconciler::{
    CancellationToken, Reconciler, TickOutcome, policy_from_config, run_loop,
};
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::ui::popup::TerminalPopup;
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { once, ticks } = cmd {
        let store = open_store(cfg)?;
        let profile = open_profile(cfg)?;

        let mut reconciler = Reconciler::new(
            Box::new(store),
            Arc::new(profile),
            Box::new(TerminalPopup),
            Arc::new(SystemClock),
        )
        .with_window(cfg.notification_window());

        let max_ticks = if *once { Some(1) } else { *ticks };
        let mut policy = policy_from_config(cfg);

        if max_ticks != Some(1) {
            info(format!(
                "Watching for approvals every {}s ({} retry policy)…",
                cfg.poll_interval_secs,
                policy.name()
            ));
        }

        // Process teardown (Ctrl-C) is the only cancellation for an unbounded watch.
        let token = CancellationToken::new();
        run_loop(
            &mut reconciler,
            policy.as_mut(),
            &token,
            max_ticks,
            |rec, outcome| {
                report(outcome);
                // the terminal popup is not modal: consider it closed once printed
                rec.dismiss();
            },
        );
    }

    Ok(())
}

fn report(outcome: &TickOutcome) {
    match outcome {
        TickOutcome::NoIdentity => info("No claim on this profile, nothing to check."),
        TickOutcome::NothingNew => info("No new approvals."),
        TickOutcome::AlreadyDelivered(id) => info(format!("Already notified for claim {}.", id)),
        TickOutcome::Delivered(_) => {}
        TickOutcome::QueryFailed(msg) => warning(format!("Check failed, will retry: {}", msg)),
    }
}
