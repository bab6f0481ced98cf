pub mod backup;
pub mod claim;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod profile;
pub mod review;
pub mod visit;
pub mod watch;

use crate::config::Config;
use crate::db::claim_store::SqliteClaimStore;
use crate::errors::{AppError, AppResult};
use crate::models::claim_status::ClaimStatus;
use crate::profile::SqliteKvStore;

pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteClaimStore> {
    SqliteClaimStore::open(&cfg.database)
}

pub(crate) fn open_profile(cfg: &Config) -> AppResult<SqliteKvStore> {
    SqliteKvStore::open(&cfg.profile)
}

pub(crate) fn parse_status(s: &str) -> AppResult<ClaimStatus> {
    ClaimStatus::parse(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))
}

pub(crate) fn parse_status_opt(s: &Option<String>) -> AppResult<Option<ClaimStatus>> {
    s.as_deref().map(parse_status).transpose()
}
