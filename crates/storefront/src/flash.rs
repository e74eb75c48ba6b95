//! Session-backed flash notices.
//!
//! Mutating handlers push a notice and redirect; the next rendered page
//! drains and displays them. Session failures are logged rather than
//! failing the request - a lost notice is not worth a 500.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue a notice for the next rendered page.
pub async fn notify(session: &Session, message: impl Into<String>) {
    let mut pending: Vec<String> = session
        .get(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    pending.push(message.into());
    if let Err(e) = session.insert(session_keys::FLASH, pending).await {
        tracing::warn!("Failed to store flash notice: {e}");
    }
}

/// Take all pending notices, clearing them from the session.
pub async fn drain(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
