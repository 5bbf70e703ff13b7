//! Recurring background jobs. Call `spawn_all` once during startup.

use crate::database::DbSessionStore;

const SESSION_PURGE_INTERVAL_SECS: u64 = 3600;

/// Spawn all background tasks. Detaches via `tokio::spawn`; does not block.
pub fn spawn_all(session_store: DbSessionStore) {
    // expired session rows, hourly
    tokio::spawn(async move {
        loop {
            match session_store.purge_expired().await {
                Ok(n) if n > 0 => log::info!("Expired sessions purged: {n}"),
                Ok(_) => {}
                Err(e) => log::error!("Failed to purge expired sessions: {e:?}"),
            }
            tokio::time::sleep(std::time::Duration::from_secs(SESSION_PURGE_INTERVAL_SECS)).await;
        }
    });
}
