// Re-export network modules
pub mod api_client;
pub mod config;

pub use api_client::{ApiError, BackendApi, HttpApiClient};
pub use config::ApiConfig;
