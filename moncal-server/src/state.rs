use anyhow::Result;
use moncal_core::config::MoncalConfig;
use moncal_core::controller::EventController;
use moncal_core::session::Session;
use moncal_core::store::RemoteStore;

/// Shared application state.
///
/// The config and session are loaded once at startup; store clients and
/// controllers are rebuilt per request, so a reload always reflects
/// current server state.
#[derive(Clone)]
pub struct AppState {
    config: MoncalConfig,
    session: Session,
}

impl AppState {
    /// Requires a persisted CLI session — the server serves exactly one
    /// signed-in user.
    pub fn new() -> Result<Self> {
        if !Session::exists() {
            anyhow::bail!(
                "No session found. Sign in first with:\n  moncal login"
            );
        }

        Ok(AppState {
            config: MoncalConfig::load()?,
            session: Session::load()?,
        })
    }

    pub fn controller(&self) -> EventController<RemoteStore> {
        let store = RemoteStore::new(&self.config, &self.session);
        EventController::new(store, &self.session.user_id)
    }
}
