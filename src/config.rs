//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use chrono::{DateTime, Utc};
use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub users_file: String,
    pub submissions_file: String,
    pub upload_dir: String,
    pub deadline: DateTime<Utc>,
    pub late_penalty: i32,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub notify_webhook_url: Option<String>,
    pub notify_timeout_seconds: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. It panics
    /// if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "eduvault".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "eduvault=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "eduvault.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a valid port number"),
            users_file: env::var("USERS_FILE").unwrap_or_else(|_| "users.json".into()),
            submissions_file: env::var("SUBMISSIONS_FILE")
                .unwrap_or_else(|_| "submissions.json".into()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            deadline: env::var("DEADLINE")
                .unwrap_or_else(|_| "2026-03-01T09:30:00Z".into())
                .parse()
                .expect("DEADLINE must be a valid RFC 3339 timestamp"),
            late_penalty: env::var("LATE_PENALTY")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .expect("LATE_PENALTY must be a valid integer"),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "eduvault-secret-key".into()),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("JWT_DURATION_MINUTES must be a valid integer"),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok().filter(|v| !v.is_empty()),
            notify_timeout_seconds: env::var("NOTIFY_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .expect("NOTIFY_TIMEOUT_SECONDS must be a valid integer"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    pub fn set_users_file(value: impl Into<String>) {
        Self::set_field(|c| c.users_file = value.into());
    }

    pub fn set_submissions_file(value: impl Into<String>) {
        Self::set_field(|c| c.submissions_file = value.into());
    }

    pub fn set_upload_dir(value: impl Into<String>) {
        Self::set_field(|c| c.upload_dir = value.into());
    }

    pub fn set_deadline(value: DateTime<Utc>) {
        Self::set_field(|c| c.deadline = value);
    }

    pub fn set_late_penalty(value: i32) {
        Self::set_field(|c| c.late_penalty = value);
    }

    pub fn set_notify_webhook_url(value: Option<String>) {
        Self::set_field(|c| c.notify_webhook_url = value);
    }
}

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn users_file() -> String {
    AppConfig::global().users_file.clone()
}

pub fn submissions_file() -> String {
    AppConfig::global().submissions_file.clone()
}

pub fn upload_dir() -> String {
    AppConfig::global().upload_dir.clone()
}

/// The fixed assignment cutoff instant. Handlers read it here and pass it
/// into the domain layer as a parameter; the core never touches the global.
pub fn deadline() -> DateTime<Utc> {
    AppConfig::global().deadline
}

/// Points deducted when an instructor accepts a late submission for grading.
pub fn late_penalty() -> i32 {
    AppConfig::global().late_penalty
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn notify_webhook_url() -> Option<String> {
    AppConfig::global().notify_webhook_url.clone()
}

pub fn notify_timeout_seconds() -> u64 {
    AppConfig::global().notify_timeout_seconds
}
