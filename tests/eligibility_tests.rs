mod common;

use common::profile_with_visits;
use rcashoffer::core::eligibility::{EligibilityGate, OfferResponse};
use rcashoffer::profile::{KvStore, MemoryKvStore, SqliteKvStore, keys};

#[test]
fn each_visit_adds_exactly_one() {
    let store = MemoryKvStore::new();
    let gate = EligibilityGate::default();

    for expected in 1..=10u64 {
        let state = gate.record_visit(&store).unwrap();
        assert_eq!(state.count, expected);
    }
    assert_eq!(store.get(keys::VISIT_COUNT).unwrap().as_deref(), Some("10"));
}

#[test]
fn counter_is_monotonic_and_survives_reload() {
    let path = common::temp_path("eligibility_reload", "sqlite");
    let gate = EligibilityGate::new(3);

    {
        let store = SqliteKvStore::open(&path).unwrap();
        gate.record_visit(&store).unwrap();
        gate.record_visit(&store).unwrap();
    }

    let store = SqliteKvStore::open(&path).unwrap();
    let mut last = gate.load(&store).unwrap().count;
    assert_eq!(last, 2);
    for _ in 0..5 {
        let now = gate.record_visit(&store).unwrap().count;
        assert!(now > last);
        last = now;
    }
}

#[test]
fn offer_below_threshold_is_never_shown() {
    let store = MemoryKvStore::new();
    let gate = EligibilityGate::default();

    for _ in 0..49 {
        let state = gate.record_visit(&store).unwrap();
        assert!(!gate.should_offer_claim(&state), "offered at {}", state.count);
    }

    let state = gate.record_visit(&store).unwrap();
    assert_eq!(state.count, 50);
    assert!(gate.should_offer_claim(&state));
}

#[test]
fn offer_is_shown_at_most_once() {
    let store = profile_with_visits(49);
    let gate = EligibilityGate::default();

    let mut shown = 0;
    for _ in 0..20 {
        let mut state = gate.record_visit(store.as_ref()).unwrap();
        if gate.should_offer_claim(&state) {
            shown += 1;
            gate.record_offer_response(store.as_ref(), &mut state, OfferResponse::Shown)
                .unwrap();
        }
    }
    assert_eq!(shown, 1);
}

#[test]
fn dismissal_closes_the_offer_for_good() {
    let store = profile_with_visits(60);
    let gate = EligibilityGate::default();

    let mut state = gate.load(store.as_ref()).unwrap();
    assert!(gate.should_offer_claim(&state));

    gate.record_offer_response(store.as_ref(), &mut state, OfferResponse::Dismissed)
        .unwrap();

    let reloaded = gate.load(store.as_ref()).unwrap();
    assert!(reloaded.has_seen_offer);
    assert!(!gate.should_offer_claim(&reloaded));
}

#[test]
fn claimed_profile_is_not_offered_again() {
    let store = profile_with_visits(75);
    let gate = EligibilityGate::default();

    let mut state = gate.load(store.as_ref()).unwrap();
    gate.record_claimed(store.as_ref(), &mut state).unwrap();

    let state = gate.record_visit(store.as_ref()).unwrap();
    assert!(state.has_claimed_offer);
    assert!(!gate.should_offer_claim(&state));
}

#[test]
fn garbage_counter_reads_as_zero() {
    let store = MemoryKvStore::new();
    store.set(keys::VISIT_COUNT, "not-a-number").unwrap();

    let state = EligibilityGate::default().record_visit(&store).unwrap();
    assert_eq!(state.count, 1);
}
