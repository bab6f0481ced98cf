mod common;

use chrono::Duration;
use common::{SharedStore, clock_at, form, t0, temp_path};
use rcashoffer::core::interfaces::{ClaimQuery, ClaimSink};
use rcashoffer::core::review::AdminReview;
use rcashoffer::db::claim_store::SqliteClaimStore;
use rcashoffer::db::migrate::{applied_versions, run_pending_migrations};
use rcashoffer::models::claim_status::ClaimStatus;
use rcashoffer::models::identity::CachedIdentity;
use rcashoffer::profile::{KvStore, SqliteKvStore, keys};

#[test]
fn migrations_run_once() {
    let store = SqliteClaimStore::in_memory().unwrap();
    let conn = &store.pool().conn;

    let versions = applied_versions(conn).unwrap();
    assert_eq!(versions.len(), 3);
    assert!(versions[0].ends_with("create_claims"));

    assert_eq!(run_pending_migrations(conn).unwrap(), 0);
    assert_eq!(applied_versions(conn).unwrap(), versions);
}

#[test]
fn reopening_a_file_keeps_claims() {
    let path = temp_path("store_reopen", "sqlite");
    let id = {
        let store = SqliteClaimStore::open(&path).unwrap();
        let new = form("a@b.co", "p@b.co").validate(50, 500, "USD").unwrap();
        store.create(new, t0()).unwrap().id
    };

    let store = SqliteClaimStore::open(&path).unwrap();
    let claims = store.list(None).unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].id, id);
    assert_eq!(claims[0].claimed_at, t0());
}

#[test]
fn schema_rejects_processed_pending_claims() {
    let store = SqliteClaimStore::in_memory().unwrap();
    let res = store.pool().conn.execute(
        "INSERT INTO claims (id, name, email, paypal_email, country, visit_count_at_claim,
                             status, claimed_at, processed_at)
         VALUES ('x', 'n', 'a@b.co', 'p@b.co', 'IT', 50, 'pending', ?1, ?1)",
        [t0().to_rfc3339()],
    );
    assert!(res.is_err());

    let res = store.pool().conn.execute(
        "INSERT INTO claims (id, name, email, paypal_email, country, visit_count_at_claim,
                             status, claimed_at)
         VALUES ('y', 'n', 'a@b.co', 'p@b.co', 'IT', 50, 'refunded', ?1)",
        [t0().to_rfc3339()],
    );
    assert!(res.is_err());
}

#[test]
fn list_filters_by_status_newest_first() {
    let shared = SharedStore::new();
    let store = shared.lock();
    let mut ids = Vec::new();
    for i in 0..3 {
        let new = form("a@b.co", "p@b.co").validate(50, 500, "USD").unwrap();
        ids.push(store.create(new, t0() + Duration::minutes(i)).unwrap().id);
    }
    AdminReview::new(&*store, clock_at(t0()))
        .approve(&ids[1], None)
        .unwrap();

    let all = store.list(None).unwrap();
    assert_eq!(all.iter().map(|c| c.id.clone()).collect::<Vec<_>>(), vec![
        ids[2].clone(),
        ids[1].clone(),
        ids[0].clone()
    ]);

    let approved = store.list(Some(ClaimStatus::Approved)).unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, ids[1]);

    let counts = store.counts().unwrap();
    assert!(counts.contains(&(ClaimStatus::Pending, 2)));
    assert!(counts.contains(&(ClaimStatus::Approved, 1)));
    assert!(counts.contains(&(ClaimStatus::Paid, 0)));
}

#[test]
fn empty_identity_matches_nothing() {
    let shared = SharedStore::new();
    let store = shared.lock();
    let new = form("a@b.co", "p@b.co").validate(50, 500, "USD").unwrap();
    let claim = store.create(new, t0()).unwrap();
    AdminReview::new(&*store, clock_at(t0()))
        .approve(&claim.id, None)
        .unwrap();

    let since = t0() - Duration::hours(24);
    let none = CachedIdentity::new(None, None);
    assert!(store.latest_approved(&none, &since).unwrap().is_none());

    let paypal_only = CachedIdentity::new(None, Some("p@b.co".into()));
    assert_eq!(
        store.latest_approved(&paypal_only, &since).unwrap().map(|c| c.id),
        Some(claim.id)
    );
}

#[test]
fn profile_store_basics() {
    let store = SqliteKvStore::in_memory().unwrap();

    assert_eq!(store.get(keys::VISIT_COUNT).unwrap(), None);
    store.set(keys::VISIT_COUNT, "3").unwrap();
    store.set(keys::VISIT_COUNT, "4").unwrap();
    assert_eq!(store.get(keys::VISIT_COUNT).unwrap().as_deref(), Some("4"));

    let marker = keys::delivery_marker("abc");
    assert!(store.set_if_absent(&marker, "t1").unwrap());
    assert!(!store.set_if_absent(&marker, "t2").unwrap());
    assert_eq!(store.get(&marker).unwrap().as_deref(), Some("t1"));

    store.set_if_absent(&keys::delivery_marker("xyz"), "t3").unwrap();
    assert_eq!(
        store.keys_with_prefix(keys::MARKER_PREFIX).unwrap(),
        vec![keys::delivery_marker("abc"), keys::delivery_marker("xyz")]
    );
}

#[test]
fn profile_markers_are_shared_between_handles() {
    let path = temp_path("profile_shared", "sqlite");
    let tab_a = SqliteKvStore::open(&path).unwrap();
    let tab_b = SqliteKvStore::open(&path).unwrap();

    let marker = keys::delivery_marker("claim-1");
    assert!(tab_a.set_if_absent(&marker, "now").unwrap());
    assert!(!tab_b.set_if_absent(&marker, "now").unwrap());
    assert!(tab_b.contains(&marker).unwrap());
}
