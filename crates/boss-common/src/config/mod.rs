//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CatalogConfig, ConfigError, CookieConfig, CorsConfig,
    DatabaseConfig, Environment, GameConfig, JwtConfig, RateLimitConfig, ServerConfig,
    MIN_JWT_SECRET_LENGTH,
};
