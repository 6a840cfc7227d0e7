pub mod app_config;
pub mod config;
pub mod health;
pub mod listing;
pub mod request;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use health::{calculate_health_score, HealthInputs, HealthScore};
pub use listing::{AppListing, Platform};
pub use request::{load_request, AppUrls, CompetitorRef, ReportRequest};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
