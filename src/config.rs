use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key of the single record holding the persisted session.
pub const SESSION_KEY: &str = "medcare_session";

/// Refills this many days out (or fewer) are flagged as due soon.
pub const REFILL_DUE_SOON_DAYS: i64 = 7;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MEDCARE_HOME";

/// Get the application data directory.
/// `$MEDCARE_HOME` when set, otherwise ~/MedCare/.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the path of the SQLite database backing the session store
pub fn session_db_path() -> PathBuf {
    app_data_dir().join("session.db")
}

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "medcare=debug,medcare_lib=debug"
    } else {
        "medcare=info,medcare_lib=info"
    }
}
