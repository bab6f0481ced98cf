use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Which delay policy the reconciler uses between ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetryPolicyKind {
    /// Fixed poll interval, failures retried on the next regular tick.
    #[default]
    Fixed,
    /// Back off exponentially while queries keep failing.
    Exponential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Claim store (server side)
    pub database: String,
    /// Local visitor profile (client side)
    pub profile: String,
    #[serde(default = "default_offer_threshold")]
    pub offer_threshold: u64,
    #[serde(default = "default_offer_amount_cents")]
    pub offer_amount_cents: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_notification_window_hours")]
    pub notification_window_hours: i64,
    #[serde(default)]
    pub retry_policy: RetryPolicyKind,
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

fn default_offer_threshold() -> u64 {
    50
}
fn default_offer_amount_cents() -> i64 {
    500
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_poll_interval_secs() -> u64 {
    30
}
fn default_notification_window_hours() -> i64 {
    24
}
fn default_max_backoff_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            profile: Self::profile_file().to_string_lossy().to_string(),
            offer_threshold: default_offer_threshold(),
            offer_amount_cents: default_offer_amount_cents(),
            currency: default_currency(),
            poll_interval_secs: default_poll_interval_secs(),
            notification_window_hours: default_notification_window_hours(),
            retry_policy: RetryPolicyKind::default(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rcashoffer")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rcashoffer")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcashoffer.conf")
    }

    /// Return the full path of the claim store
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcashoffer.sqlite")
    }

    /// Return the full path of the local visitor profile
    pub fn profile_file() -> PathBuf {
        Self::config_dir().join("profile.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.profile = expand_tilde(&cfg.profile).to_string_lossy().to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make the gate or the reconciler misbehave.
    pub fn validate(&self) -> AppResult<()> {
        if self.offer_threshold == 0 {
            return Err(AppError::Config("offer_threshold must be > 0".into()));
        }
        if self.poll_interval_secs == 0 {
            return Err(AppError::Config("poll_interval_secs must be > 0".into()));
        }
        if self.notification_window_hours <= 0 {
            return Err(AppError::Config(
                "notification_window_hours must be > 0".into(),
            ));
        }
        if self.offer_amount_cents < 0 {
            return Err(AppError::Config("offer_amount_cents must be >= 0".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs.max(self.poll_interval_secs))
    }

    pub fn notification_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.notification_window_hours)
    }

    /// Initialize configuration directory, config file and empty DB files.
    ///
    /// Relative `custom_db` / `custom_profile` names are placed in the config dir.
    pub fn init_all(
        custom_db: Option<String>,
        custom_profile: Option<String>,
        is_test: bool,
    ) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let resolve = |custom: Option<String>, default: PathBuf| match custom {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => default,
        };

        let db_path = resolve(custom_db, Self::database_file());
        let profile_path = resolve(custom_profile, Self::profile_file());

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            profile: profile_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        for p in [&db_path, &profile_path] {
            if let Some(parent) = p.parent() {
                fs::create_dir_all(parent)?;
            }
            if !p.exists() {
                fs::File::create(p)?;
            }
        }

        Ok(config)
    }
}
