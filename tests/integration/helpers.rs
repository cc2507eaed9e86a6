//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use backoffice_api::{AppState, build_app};
use backoffice_auth::PasswordHasher;
use backoffice_core::config::AppConfig;
use backoffice_database::DatabasePool;
use backoffice_database::repositories::UserRepository;

pub const TEST_EMAIL: &str = "admin@example.com";
pub const TEST_PASSWORD: &str = "correct horse battery";

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused"

[auth]
jwt_secret = "integration-test-secret"
token_ttl_hours = 1
"#;

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Bearer token of the seeded account
    pub token: String,
}

impl TestApp {
    /// Build the app on a freshly migrated `#[sqlx::test]` pool and log in
    /// the seeded account.
    pub async fn new(db_pool: PgPool) -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        let state = AppState::new(config, DatabasePool::from_pool(db_pool.clone()));

        let hash = PasswordHasher::new()
            .hash_password(TEST_PASSWORD)
            .expect("Failed to hash password");
        UserRepository::new(db_pool.clone())
            .create(TEST_EMAIL, &hash)
            .await
            .expect("Failed to create test user");

        let mut app = Self {
            router: build_app(state),
            db_pool,
            token: String::new(),
        };

        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);
        app.token = response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string();

        app
    }

    /// Authenticated request with the seeded account's token.
    pub async fn call(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(&self.token)).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let raw = self.send(method, path, body, token).await;
        let body: Value = serde_json::from_slice(&raw.bytes).unwrap_or(Value::Null);
        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Make a request and keep the raw response headers and body.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> RawResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        RawResponse {
            status,
            headers,
            bytes,
        }
    }

    /// Create a customer and return its ID.
    pub async fn customer(&self, name: &str) -> i64 {
        let response = self
            .call("POST", "/api/customers", Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response.body)
    }

    /// Create a category and return its ID.
    pub async fn category(&self, name: &str) -> i64 {
        let response = self
            .call(
                "POST",
                "/api/products/categories",
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response.body)
    }

    /// Create a catalog product and return its ID.
    pub async fn product(&self, name: &str, category_id: i64, price: f64) -> i64 {
        let response = self
            .call(
                "POST",
                "/api/products",
                Some(json!({ "name": name, "category_id": category_id, "price": price })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        id_of(&response.body)
    }

    /// Attach a product and return the response.
    pub async fn attach(&self, customer_id: i64, product_id: i64, quantity: i64) -> TestResponse {
        self.call(
            "POST",
            "/api/customer-products",
            Some(json!({
                "customer_id": customer_id,
                "product_id": product_id,
                "quantity": quantity,
            })),
        )
        .await
    }
}

/// The `id` field of a JSON object.
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("response has no numeric id")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Unparsed response
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body bytes
    pub bytes: Vec<u8>,
}
