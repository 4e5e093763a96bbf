// rest_api/src/state.rs

use std::sync::Arc;

use security::RolesConfig;
use storage::HospitalStore;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HospitalStore>,
    pub roles: Arc<RolesConfig>,
    pub jwt_secret: Arc<Vec<u8>>,
    pub jwt_ttl_secs: u64,
}

impl AppState {
    pub fn new(
        store: Arc<dyn HospitalStore>,
        roles: RolesConfig,
        jwt_secret: Vec<u8>,
        jwt_ttl_secs: u64,
    ) -> Self {
        AppState {
            store,
            roles: Arc::new(roles),
            jwt_secret: Arc::new(jwt_secret),
            jwt_ttl_secs,
        }
    }
}
