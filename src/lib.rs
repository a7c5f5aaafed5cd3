pub mod config;
pub mod db;
pub mod delivery; // Delivery status engine
pub mod error;
pub mod medications; // Medication cards
pub mod models;
pub mod notify; // Reminder-due notification seam
pub mod refill; // Refill status engine
pub mod reminders; // Reminder status engine
pub mod session; // Session/collection store + lifecycle
pub mod store; // Session persistence

use chrono::Local;
use tracing_subscriber::EnvFilter;

pub use error::CoreError;
pub use session::{Session, SessionManager};

/// Entry point of the `medcare` binary.
///
/// Restores the stored session, signals due reminders, prints today's
/// dashboard as JSON and saves the session back.
pub fn run() -> Result<(), CoreError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::session_db_path();
    let store = store::SqliteSessionStore::open(&db_path)?;
    let mut manager = SessionManager::new(store);

    let now = Local::now().naive_local();
    let Some(session) = manager.load()? else {
        tracing::info!(path = %db_path.display(), "Nobody is signed in");
        return Ok(());
    };

    let sent = session.dispatch_due(now, &notify::TracingNotifier);
    tracing::debug!(sent, "Due reminders dispatched");

    let dashboard = session.dashboard(now.date());
    let json = serde_json::to_string_pretty(&dashboard).map_err(db::DatabaseError::from)?;
    println!("{json}");

    manager.save()
}
