use crate::config::Config;
use crate::providers::Providers;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds configuration and stateless collaborator handles only; each pipeline
/// run builds its own data from scratch.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub providers: Providers,
}
