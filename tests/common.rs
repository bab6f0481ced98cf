#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use rcashoffer::core::clock::FixedClock;
use rcashoffer::core::interfaces::ClaimQuery;
use rcashoffer::core::reconciler::NoticeSink;
use rcashoffer::core::submission::ClaimForm;
use rcashoffer::db::claim_store::SqliteClaimStore;
use rcashoffer::errors::{AppError, AppResult};
use rcashoffer::models::claim::Claim;
use rcashoffer::models::identity::CachedIdentity;
use rcashoffer::models::notice::ApprovalNotice;
use rcashoffer::profile::{KvStore, MemoryKvStore, keys};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

pub fn rco() -> Command {
    cargo_bin_cmd!("rcashoffer")
}

/// Unique file path inside the system temp dir; any existing file is removed.
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcashoffer.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// 2025-03-14 12:00:00 UTC
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
}

pub fn clock_at(now: DateTime<Utc>) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now))
}

pub fn form(email: &str, paypal: &str) -> ClaimForm {
    ClaimForm {
        name: "Ada Visitor".into(),
        email: email.into(),
        paypal_email: paypal.into(),
        phone: None,
        country: "it".into(),
    }
}

/// Profile that has already seen `visits` page loads.
pub fn profile_with_visits(visits: u64) -> Arc<MemoryKvStore> {
    let store = Arc::new(MemoryKvStore::new());
    store
        .set(keys::VISIT_COUNT, &visits.to_string())
        .expect("set visits");
    store
}

/// Profile whose cached identity is (`email`, `paypal`).
pub fn profile_with_identity(email: Option<&str>, paypal: Option<&str>) -> Arc<MemoryKvStore> {
    let store = Arc::new(MemoryKvStore::new());
    if let Some(e) = email {
        store.set(keys::CLAIM_EMAIL, e).unwrap();
    }
    if let Some(p) = paypal {
        store.set(keys::CLAIM_PAYPAL_EMAIL, p).unwrap();
    }
    store
}

/// One in-memory claim store reachable from both the admin and the reconciler.
#[derive(Clone)]
pub struct SharedStore(pub Arc<Mutex<SqliteClaimStore>>);

impl SharedStore {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(
            SqliteClaimStore::in_memory().expect("in-memory store"),
        )))
    }

    pub fn lock(&self) -> MutexGuard<'_, SqliteClaimStore> {
        self.0.lock().unwrap()
    }
}

impl ClaimQuery for SharedStore {
    fn latest_approved(
        &self,
        identity: &CachedIdentity,
        since: &DateTime<Utc>,
    ) -> AppResult<Option<Claim>> {
        self.lock().latest_approved(identity, since)
    }
}

/// Query double that fails the first `failures` calls, then delegates.
pub struct FlakyQuery {
    pub inner: SharedStore,
    pub failures: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

impl ClaimQuery for FlakyQuery {
    fn latest_approved(
        &self,
        identity: &CachedIdentity,
        since: &DateTime<Utc>,
    ) -> AppResult<Option<Claim>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures.load(Ordering::SeqCst);
        if left > 0 {
            self.failures.store(left - 1, Ordering::SeqCst);
            return Err(AppError::TransientQuery("connection reset".into()));
        }
        self.inner.latest_approved(identity, since)
    }
}

/// Notice sink that records what would have been shown.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub shown: Arc<Mutex<Vec<ApprovalNotice>>>,
}

impl RecordingSink {
    pub fn count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<ApprovalNotice> {
        self.shown.lock().unwrap().clone()
    }
}

impl NoticeSink for RecordingSink {
    fn show(&mut self, notice: &ApprovalNotice) -> AppResult<()> {
        self.shown.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Init a CLI database + profile pair in test mode.
pub fn init_cli(name: &str) -> (String, String) {
    let db = temp_path(&format!("{name}_db"), "sqlite");
    let profile = temp_path(&format!("{name}_profile"), "sqlite");

    rco()
        .args(["--db", &db, "--profile", &profile, "--test", "init"])
        .assert()
        .success();

    (db, profile)
}
