pub mod bootstrap;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

pub use services::UserDirectory;
pub use utils::AppConfig;

/// Application shared state
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State around a fresh, empty directory
    pub fn new(config: AppConfig) -> Self {
        Self {
            directory: Arc::new(UserDirectory::new()),
            config: Arc::new(config),
        }
    }
}
