//! Login handler.

use actix_web::{HttpResponse, web};

use bloglist_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let outcome = state.users.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: outcome.token,
        expires_in: outcome.expires_in,
        username: outcome.username,
        name: outcome.name,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::handlers::test_support::TestApp;

    #[actix_rt::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = TestApp::spawn().await;
        app.login("root").await;

        let resp = app
            .call(test::TestRequest::post().uri("/api/login").set_json(json!({
                "username": "root",
                "password": "wrong"
            })))
            .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid username or password");
    }

    #[actix_rt::test]
    async fn test_login_returns_token_and_profile() {
        let app = TestApp::spawn().await;
        app.login("root").await;

        let resp = app
            .call(test::TestRequest::post().uri("/api/login").set_json(json!({
                "username": "root",
                "password": "bimat"
            })))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["username"], "root");
        assert_eq!(body["name"], "Test User");
        assert_eq!(body["expires_in"], 3600);
    }
}
