//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests
//! with a per-client cookie store.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use boss_api::{create_app, create_app_state};
use boss_common::AppConfig;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Starting balance for companies founded in tests, in thousandths
pub const TEST_INITIAL_MONEY: i64 = 50_000_000;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A browser-like client that keeps its own session cookies
    pub fn client(&self) -> Result<TestClient> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(TestClient {
            base_url: self.base_url(),
            client,
        })
    }
}

/// HTTP client bound to one test server
pub struct TestClient {
    base_url: String,
    client: Client,
}

impl TestClient {
    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        Ok(self.client.post(&url).send().await?)
    }
}

/// Create a test configuration
///
/// Reads the environment, points the catalog at the workspace `data/` files
/// and gives new companies enough money to trade unless overridden.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let data_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");
    let config = AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| match key {
            "RESOURCES_FILE" => Some(format!("{data_dir}/resources.json")),
            "PRODUCTION_BUILDINGS_FILE" => Some(format!("{data_dir}/production_buildings.json")),
            "INITIAL_COMPANY_MONEY" => Some(TEST_INITIAL_MONEY.to_string()),
            "RATE_LIMIT_BURST" => Some("1000".to_string()),
            _ => None,
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
