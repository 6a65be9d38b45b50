mod app;
mod config;
mod http;
mod metrics;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use metrics::MetricsError;
pub use validation::ValidationError;
