//! Session cookies
//!
//! Both tokens travel as HttpOnly, SameSite=Lax cookies scoped to `/`.
//! `Secure` follows `COOKIE_SECURE`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use boss_common::AppConfig;
use boss_service::TokenPair;
use time::Duration;

/// Cookie carrying the short-lived access JWT
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the opaque refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Attributes shared by the session cookies
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub secure: bool,
    /// Access cookie Max-Age in seconds
    pub access_max_age: i64,
    /// Refresh cookie Max-Age in seconds
    pub refresh_max_age: i64,
}

impl CookieSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            secure: config.cookies.secure,
            access_max_age: config.jwt.access_token_expiry,
            refresh_max_age: config.jwt.refresh_token_expiry,
        }
    }

    #[must_use]
    pub fn access_cookie(&self, token: String) -> Cookie<'static> {
        self.build(ACCESS_TOKEN_COOKIE, token, self.access_max_age)
    }

    #[must_use]
    pub fn refresh_cookie(&self, token: String) -> Cookie<'static> {
        self.build(REFRESH_TOKEN_COOKIE, token, self.refresh_max_age)
    }

    /// Add both session cookies for a freshly issued token pair
    #[must_use]
    pub fn set_session(&self, jar: CookieJar, tokens: TokenPair) -> CookieJar {
        jar.add(self.access_cookie(tokens.access.token))
            .add(self.refresh_cookie(tokens.refresh_token))
    }

    /// Overwrite both session cookies with empty, immediately expiring ones
    #[must_use]
    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.build(ACCESS_TOKEN_COOKIE, String::new(), 0))
            .add(self.build(REFRESH_TOKEN_COOKIE, String::new(), 0))
    }

    fn build(&self, name: &'static str, value: String, max_age: i64) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::seconds(max_age))
            .build()
    }
}

/// Non-empty cookie value
pub(crate) fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
