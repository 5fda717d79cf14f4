//! In-memory app harness for handler tests.

use actix_web::{App, dev::ServiceResponse, test};
use serde_json::{Value, json};

use bloglist_infra::JwtConfig;

use crate::state::AppState;

pub(crate) struct TestApp {
    state: AppState,
}

pub(crate) fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("bearer {token}"))
}

impl TestApp {
    pub(crate) async fn spawn() -> Self {
        Self {
            state: AppState::in_memory(JwtConfig {
                secret: "test-secret".to_string(),
                ..JwtConfig::default()
            }),
        }
    }

    pub(crate) async fn call(&self, req: test::TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new().configure(super::configure_app(self.state.clone())),
        )
        .await;

        test::call_service(&app, req.to_request())
            .await
            .map_into_boxed_body()
    }

    /// Register `username` (password "bimat") and log in. Returns `(user id, token)`.
    pub(crate) async fn login(&self, username: &str) -> (String, String) {
        let resp = self
            .call(test::TestRequest::post().uri("/api/users").set_json(json!({
                "username": username,
                "name": "Test User",
                "password": "bimat"
            })))
            .await;
        assert!(resp.status().is_success(), "register failed: {}", resp.status());
        let user: Value = test::read_body_json(resp).await;

        let resp = self
            .call(test::TestRequest::post().uri("/api/login").set_json(json!({
                "username": username,
                "password": "bimat"
            })))
            .await;
        assert!(resp.status().is_success(), "login failed: {}", resp.status());
        let login: Value = test::read_body_json(resp).await;

        (
            user["id"].as_str().unwrap_or_default().to_string(),
            login["token"].as_str().unwrap_or_default().to_string(),
        )
    }

    /// Create a blog and return its id.
    pub(crate) async fn create_blog(&self, token: &str, body: Value) -> String {
        let resp = self
            .call(
                test::TestRequest::post()
                    .uri("/api/blogs")
                    .insert_header(bearer(token))
                    .set_json(body),
            )
            .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let blog: Value = test::read_body_json(resp).await;

        blog["id"].as_str().unwrap_or_default().to_string()
    }

    pub(crate) async fn blogs(&self) -> Vec<Value> {
        let resp = self.call(test::TestRequest::get().uri("/api/blogs")).await;
        test::read_body_json(resp).await
    }

    pub(crate) async fn users(&self) -> Vec<Value> {
        let resp = self.call(test::TestRequest::get().uri("/api/users")).await;
        test::read_body_json(resp).await
    }
}
