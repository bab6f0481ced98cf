mod common;

use common::{SharedStore, clock_at, form, profile_with_visits, t0};
use rcashoffer::core::eligibility::EligibilityGate;
use rcashoffer::core::submission::{ClaimForm, SubmissionService, is_valid_email};
use rcashoffer::errors::AppError;
use rcashoffer::models::claim_status::ClaimStatus;
use rcashoffer::profile::{KvStore, keys};

fn service() -> SubmissionService {
    SubmissionService::new(EligibilityGate::default(), 500, "USD", clock_at(t0()))
}

#[test]
fn email_shape() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last+tag@example.org"));
    assert!(!is_valid_email("plainaddress"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.de"));
    assert!(!is_valid_email("@c.de"));
}

#[test]
fn validate_normalizes_fields() {
    let f = ClaimForm {
        name: "  Grace Hopper ".into(),
        email: " Grace@Example.COM ".into(),
        paypal_email: "PAY@example.com".into(),
        phone: Some("   ".into()),
        country: " us ".into(),
    };

    let new = f.validate(50, 500, "USD").unwrap();
    assert_eq!(new.name, "Grace Hopper");
    assert_eq!(new.identity.email, "grace@example.com");
    assert_eq!(new.identity.paypal_email, "pay@example.com");
    assert_eq!(new.phone, None);
    assert_eq!(new.country, "US");
    assert_eq!(new.visit_count_at_claim, 50);
}

#[test]
fn validate_reports_first_bad_field() {
    let mut f = form("a@b.co", "p@b.co");
    f.name = " ".into();
    match f.validate(50, 500, "USD") {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "name"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let f = form("a@b.co", "not-an-email");
    match f.validate(50, 500, "USD") {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "paypal_email"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut f = form("a@b.co", "p@b.co");
    f.country = String::new();
    match f.validate(50, 500, "USD") {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "country"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn submit_creates_pending_claim_and_caches_identity() {
    let shared = SharedStore::new();
    let local = profile_with_visits(50);
    let svc = service();
    let gate = EligibilityGate::default();
    let mut state = gate.load(local.as_ref()).unwrap();

    let claim = svc
        .submit(
            &*shared.lock(),
            local.as_ref(),
            &mut state,
            &form("Ada@Example.com", "ada.pay@example.com"),
        )
        .unwrap();

    assert_eq!(claim.status, ClaimStatus::Pending);
    assert_eq!(claim.processed_at, None);
    assert_eq!(claim.visit_count_at_claim, 50);
    assert_eq!(claim.amount_cents, 500);
    assert_eq!(claim.currency, "USD");
    assert_eq!(claim.claimed_at, t0());

    assert!(state.has_claimed_offer);
    assert_eq!(
        local.get(keys::CLAIM_EMAIL).unwrap().as_deref(),
        Some("ada@example.com")
    );
    assert_eq!(
        local.get(keys::CLAIM_PAYPAL_EMAIL).unwrap().as_deref(),
        Some("ada.pay@example.com")
    );
    assert_eq!(local.get(keys::HAS_CLAIMED_OFFER).unwrap().as_deref(), Some("true"));

    let stored = shared.lock().list(None).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, claim.id);
}

#[test]
fn second_submission_from_same_profile_is_refused() {
    let shared = SharedStore::new();
    let local = profile_with_visits(50);
    let svc = service();
    let mut state = EligibilityGate::default().load(local.as_ref()).unwrap();

    svc.submit(&*shared.lock(), local.as_ref(), &mut state, &form("a@b.co", "p@b.co"))
        .unwrap();

    let again = svc.submit(&*shared.lock(), local.as_ref(), &mut state, &form("x@y.co", "z@y.co"));
    assert!(matches!(again, Err(AppError::AlreadyClaimed)));
    assert_eq!(shared.lock().list(None).unwrap().len(), 1);
}

#[test]
fn below_threshold_is_not_eligible() {
    let shared = SharedStore::new();
    let local = profile_with_visits(12);
    let mut state = EligibilityGate::default().load(local.as_ref()).unwrap();

    let res = service().submit(&*shared.lock(), local.as_ref(), &mut state, &form("a@b.co", "p@b.co"));
    match res {
        Err(AppError::NotEligible { visits, threshold }) => {
            assert_eq!(visits, 12);
            assert_eq!(threshold, 50);
        }
        other => panic!("expected NotEligible, got {other:?}"),
    }
    assert!(shared.lock().list(None).unwrap().is_empty());
}

#[test]
fn invalid_form_writes_nothing() {
    let shared = SharedStore::new();
    let local = profile_with_visits(50);
    let mut state = EligibilityGate::default().load(local.as_ref()).unwrap();

    let res = service().submit(&*shared.lock(), local.as_ref(), &mut state, &form("broken", "p@b.co"));
    assert!(matches!(res, Err(AppError::Validation { .. })));

    assert!(shared.lock().list(None).unwrap().is_empty());
    assert!(!state.has_claimed_offer);
    assert_eq!(local.get(keys::CLAIM_EMAIL).unwrap(), None);
    assert_eq!(local.get(keys::HAS_CLAIMED_OFFER).unwrap(), None);
}
