use crate::config::Config;
use crate::gateway::Gateway;
use crate::interview::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// One gateway per process, shared by every session.
    pub gateway: Gateway,
    pub sessions: SessionStore,
    pub config: Config,
}
