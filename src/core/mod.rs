//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod rate_limiter;
pub mod utils;
pub mod validation;
pub mod web_server;

// Re-exports for convenience
pub use config::BotConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logger;
pub use web_server::{create_router, start_web_server, WebState};
