use tracing::{debug, info};

use super::{AccountRegistry, Session};

/// Try each auto-connectable identity in registry order until one authenticates.
///
/// Attempts are sequential and the first success returns immediately. Per-identity
/// failures are logged and skipped; `None` means no identity could connect.
pub async fn auto_connect<R>(registry: &R) -> Option<Session>
where
    R: AccountRegistry + ?Sized,
{
    let accounts = registry.list_accounts().await;
    for identity in accounts.iter().filter(|identity| identity.can_auto_connect()) {
        match registry.create_session(identity).await {
            Ok(session) => {
                info!(account = %identity.label, "Auto-connected");
                return Some(session);
            }
            Err(e) => {
                debug!(account = %identity.label, error = %e, "Auto-connect attempt failed");
            }
        }
    }
    None
}

/// Use the active session if there is one, otherwise fall back to `auto_connect`
pub async fn resolve_session<R>(registry: &R) -> Option<Session>
where
    R: AccountRegistry + ?Sized,
{
    if let Some(session) = registry.active_session().await {
        return Some(session);
    }
    auto_connect(registry).await
}

// ============================================================================
// Tests
// ============================================================================
