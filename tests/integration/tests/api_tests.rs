//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestClient, TestServer,
    TEST_INITIAL_MONEY,
};
use reqwest::StatusCode;

/// Register a fresh user on a cookie-keeping client
async fn signed_in(server: &TestServer) -> (TestClient, RegisterRequest) {
    let client = server.client().expect("Failed to build client");
    let request = RegisterRequest::unique();
    let response = client.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    (client, request)
}

/// Register a user and found a company for it
async fn with_company(server: &TestServer) -> TestClient {
    let (client, _) = signed_in(server).await;
    let response = client
        .post("/api/companies", &CreateCompanyRequest::named("Integration Works"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    client
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_sets_session_cookies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let request = RegisterRequest::unique();

    let response = client.post("/api/auth/register", &request).await.unwrap();
    let cookies: Vec<String> = response
        .cookies()
        .map(|c| c.name().to_string())
        .collect();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert!(cookies.contains(&"access_token".to_string()));
    assert!(cookies.contains(&"refresh_token".to_string()));

    // The cookie store carries the session
    let response = client.get("/api/auth/me").await.unwrap();
    let me: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user.id, auth.user.id);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, request) = signed_in(&server).await;

    let response = client.post("/api/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let mut request = RegisterRequest::unique();
    request.password = "abc".to_string();

    let response = client.post("/api/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "WEAK_PASSWORD");
}

#[tokio::test]
async fn test_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, register_req) = signed_in(&server).await;

    let client = server.client().unwrap();
    let login_req = LoginRequest::from_register(&register_req);
    let response = client.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, register_req.username);

    let response = client.get("/api/auth/me").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let login_req = LoginRequest {
        username: unique_username(),
        password: "wrongpass".to_string(),
    };

    let response = client.post("/api/auth/login", &login_req).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_ends_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = signed_in(&server).await;

    let response = client.post_empty("/api/auth/logout").await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "logged out successfully");

    let response = client.get("/api/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_unauthenticated_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();
    let response = client.get("/api/companies/me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTH");
}

// ============================================================================
// Company Tests
// ============================================================================

#[tokio::test]
async fn test_create_company() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = signed_in(&server).await;

    let response = client
        .post("/api/companies", &CreateCompanyRequest::named("  Acme  "))
        .await
        .unwrap();
    let company: CompanyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(company.name, "Acme");
    assert_eq!(company.money, TEST_INITIAL_MONEY);

    let response = client.get("/api/companies/me").await.unwrap();
    let mine: CompanyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.id, company.id);
}

#[tokio::test]
async fn test_create_second_company() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    let response = client
        .post("/api/companies", &CreateCompanyRequest::named("Another"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "COMPANY_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_company_name_too_short() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = signed_in(&server).await;

    let response = client
        .post("/api/companies", &CreateCompanyRequest::named(" a "))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_COMPANY_NAME");
}

#[tokio::test]
async fn test_no_company_yet() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (client, _) = signed_in(&server).await;

    let response = client.get("/api/companies/me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_COMPANY");
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_resources_are_seeded() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client.get("/api/resources").await.unwrap();
    let resources: Vec<ResourceResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let wood = resources.iter().find(|r| r.id == WOOD).expect("Wood is seeded");
    assert_eq!(wood.name, "Wood");
    assert_eq!(wood.pack_size, 10);
    assert!(resources.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_production_buildings_are_nested() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client().unwrap();

    let response = client.get("/api/production-buildings").await.unwrap();
    let buildings: Vec<ProductionBuildingResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    let sawmill = buildings
        .iter()
        .find(|b| b.name == "Sawmill")
        .expect("Sawmill is seeded");
    let process = &sawmill.processes[0];
    assert!(process
        .resources
        .iter()
        .any(|f| f.resource_name == "Wood" && f.direction == "input"));
}

// ============================================================================
// Market Tests
// ============================================================================

#[tokio::test]
async fn test_buy_and_sell() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    let response = client
        .post("/api/market/buy", &TradeRequest::packs(WOOD, 3))
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Resource purchased successfully");

    let response = client.get("/api/inventory").await.unwrap();
    let inventory: Vec<InventoryItemResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let wood = inventory.iter().find(|i| i.resource_id == WOOD).unwrap();
    assert_eq!(wood.quantity, 30);

    let response = client
        .post("/api/market/sell", &TradeRequest::packs(WOOD, 3))
        .await
        .unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "Resource sold successfully");

    // A full round trip at one price leaves the balance unchanged
    let response = client.get("/api/companies/me").await.unwrap();
    let company: CompanyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(company.money, TEST_INITIAL_MONEY);
}

#[tokio::test]
async fn test_sell_more_than_held() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    client
        .post("/api/market/buy", &TradeRequest::packs(WOOD, 1))
        .await
        .unwrap();
    let response = client
        .post("/api/market/sell", &TradeRequest::packs(WOOD, 2))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INSUFFICIENT_STOCK");

    let response = client.get("/api/inventory").await.unwrap();
    let inventory: Vec<InventoryItemResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(inventory[0].quantity, 10);
}

#[tokio::test]
async fn test_buy_beyond_balance() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    let response = client
        .post("/api/market/buy", &TradeRequest::packs(WOOD, 1_000_000))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INSUFFICIENT_FUNDS");

    let response = client.get("/api/companies/me").await.unwrap();
    let company: CompanyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(company.money, TEST_INITIAL_MONEY);
}

#[tokio::test]
async fn test_invalid_pack_count() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    let response = client
        .post("/api/market/buy", &TradeRequest::packs(WOOD, 0))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PACK_COUNT");
}

#[tokio::test]
async fn test_unknown_resource() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client = with_company(&server).await;

    let response = client
        .post("/api/market/buy", &TradeRequest::packs(999_999, 1))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_RESOURCE");
}
