mod common;

use chrono::Duration as ChronoDuration;
use common::{FlakyQuery, RecordingSink, SharedStore, clock_at, form, profile_with_identity, t0};
use rcashoffer::config::{Config, RetryPolicyKind};
use rcashoffer::core::interfaces::ClaimSink;
use rcashoffer::core::reconciler::{
    CancellationToken, ExponentialRetry, FixedInterval, PollingTask, Reconciler, RetryPolicy,
    TickOutcome, policy_from_config, run_loop,
};
use rcashoffer::core::review::AdminReview;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::thread;
use std::time::{Duration, Instant};

fn millis(d: Duration) -> u128 {
    d.as_millis()
}

/// Zero delay; remembers what the loop reported.
struct RecordingPolicy {
    seen: Vec<bool>,
}

impl RetryPolicy for RecordingPolicy {
    fn next_delay(&mut self, last_tick_failed: bool) -> Duration {
        self.seen.push(last_tick_failed);
        Duration::ZERO
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn approved_setup() -> (SharedStore, String) {
    let shared = SharedStore::new();
    let id = {
        let store = shared.lock();
        let new = form("ada@example.com", "ada.pay@example.com")
            .validate(50, 500, "USD")
            .unwrap();
        let claim = store.create(new, t0()).unwrap();
        AdminReview::new(&*store, clock_at(t0()))
            .approve(&claim.id, None)
            .unwrap();
        claim.id
    };
    (shared, id)
}

#[test]
fn fixed_interval_ignores_failures() {
    let mut p = FixedInterval::new(Duration::from_secs(30));
    assert_eq!(p.next_delay(false), Duration::from_secs(30));
    assert_eq!(p.next_delay(true), Duration::from_secs(30));
    assert_eq!(p.next_delay(true), Duration::from_secs(30));
    assert_eq!(p.name(), "fixed");
}

#[test]
fn exponential_doubles_caps_and_resets() {
    let mut p = ExponentialRetry::new(Duration::from_secs(1), Duration::from_secs(5));

    assert_eq!(millis(p.next_delay(false)), 1000);
    assert_eq!(millis(p.next_delay(true)), 1000);
    assert_eq!(millis(p.next_delay(true)), 2000);
    assert_eq!(millis(p.next_delay(true)), 4000);
    assert_eq!(millis(p.next_delay(true)), 5000);
    assert_eq!(millis(p.next_delay(true)), 5000);

    assert_eq!(millis(p.next_delay(false)), 1000);
    assert_eq!(millis(p.next_delay(true)), 1000);
    assert_eq!(p.name(), "exponential");
}

#[test]
fn policy_follows_config() {
    let mut cfg = Config::default();
    assert_eq!(policy_from_config(&cfg).name(), "fixed");

    cfg.retry_policy = RetryPolicyKind::Exponential;
    assert_eq!(policy_from_config(&cfg).name(), "exponential");
}

#[test]
fn cancelled_token_runs_no_ticks() {
    let token = CancellationToken::new();
    token.cancel();

    let sink = RecordingSink::default();
    let mut r = Reconciler::new(
        Box::new(SharedStore::new()),
        Arc::new(rcashoffer::profile::MemoryKvStore::new()),
        Box::new(sink),
        clock_at(t0()),
    );
    let mut policy = FixedInterval::new(Duration::ZERO);

    assert_eq!(run_loop(&mut r, &mut policy, &token, None, |_, _| {}), 0);
}

#[test]
fn zero_tick_bound_runs_nothing() {
    let (shared, _) = approved_setup();
    let sink = RecordingSink::default();
    let mut r = Reconciler::new(
        Box::new(shared),
        profile_with_identity(Some("ada@example.com"), None),
        Box::new(sink.clone()),
        clock_at(t0()),
    );
    let mut policy = FixedInterval::new(Duration::ZERO);
    let token = CancellationToken::new();

    let mut called = 0;
    let ticks = run_loop(&mut r, &mut policy, &token, Some(0), |_, _| called += 1);

    assert_eq!(ticks, 0);
    assert_eq!(called, 0);
    assert_eq!(sink.count(), 0);
    assert!(r.delivered_ids().unwrap().is_empty());
}

#[test]
fn run_loop_reports_failures_to_the_policy() {
    let (shared, id) = approved_setup();
    let query = FlakyQuery {
        inner: shared,
        failures: Arc::new(AtomicUsize::new(1)),
        calls: Arc::new(AtomicUsize::new(0)),
    };
    let sink = RecordingSink::default();
    let mut r = Reconciler::new(
        Box::new(query),
        profile_with_identity(Some("ada@example.com"), None),
        Box::new(sink.clone()),
        clock_at(t0() + ChronoDuration::minutes(1)),
    );
    let mut policy = RecordingPolicy { seen: Vec::new() };
    let token = CancellationToken::new();

    let mut outcomes = Vec::new();
    let ticks = run_loop(&mut r, &mut policy, &token, Some(3), |_, o| {
        outcomes.push(o.clone())
    });

    assert_eq!(ticks, 3);
    assert!(outcomes[0].is_failure());
    assert!(matches!(outcomes[1], TickOutcome::Delivered(_)));
    assert_eq!(outcomes[2], TickOutcome::AlreadyDelivered(id));
    // No delay is asked for after the last tick.
    assert_eq!(policy.seen, vec![true, false]);
    assert_eq!(sink.count(), 1);
}

#[test]
fn wait_timeout_wakes_on_cancel() {
    let token = CancellationToken::new();
    let other = token.clone();

    let started = Instant::now();
    let handle = thread::spawn(move || other.wait_timeout(Duration::from_secs(30)));
    thread::sleep(Duration::from_millis(50));
    token.cancel();

    assert!(handle.join().unwrap());
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(token.is_cancelled());
}

#[test]
fn wait_timeout_elapses_when_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.wait_timeout(Duration::from_millis(10)));
}

#[test]
fn background_task_delivers_and_stops() {
    let (shared, id) = approved_setup();
    let sink = RecordingSink::default();
    let reconciler = Reconciler::new(
        Box::new(shared),
        profile_with_identity(Some("ada@example.com"), None),
        Box::new(sink.clone()),
        clock_at(t0() + ChronoDuration::minutes(1)),
    );

    let task = PollingTask::spawn(
        reconciler,
        Box::new(FixedInterval::new(Duration::from_millis(5))),
        CancellationToken::new(),
    )
    .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while sink.count() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    // Let it tick a few more times.
    thread::sleep(Duration::from_millis(50));

    let reconciler = task.stop().expect("loop thread returned");
    assert_eq!(sink.count(), 1);
    assert_eq!(reconciler.delivered_ids().unwrap(), vec![id]);
}
