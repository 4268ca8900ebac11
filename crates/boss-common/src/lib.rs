//! # boss-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_refresh_token, hash_password, hash_refresh_token, validate_password_strength,
    verify_password, AccessToken, Claims, JwtService, TokenType,
};
pub use config::{
    AppConfig, AppSettings, CatalogConfig, ConfigError, CookieConfig, CorsConfig,
    DatabaseConfig, Environment, GameConfig, JwtConfig, RateLimitConfig, ServerConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
