//! Bearer-token authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use bloglist_core::domain::Principal;
use bloglist_core::ports::AuthError;
use bloglist_shared::ErrorResponse;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.0.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

impl Identity {
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new("token expired"),
            AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                ErrorResponse::new("token missing or invalid")
            }
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

/// Pull the token out of `Authorization: Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(AuthError::InvalidToken("Expected Bearer token".to_string())),
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::Internal(
                "AppState not found in app data".to_string(),
            )
            .into()));
        };

        let result: Result<Self, Self::Error> = bearer_token(req)
            .and_then(|token| state.tokens.validate_token(token))
            .map(|claims| Identity(Principal::from(claims)))
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AuthenticationError(e).into()
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};
    use serde_json::Value;

    use super::Identity;
    use crate::handlers::test_support::bearer;

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.principal().username.clone())
    }

    #[actix_rt::test]
    async fn test_missing_state_is_server_error() {
        let app =
            test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(bearer("whatever"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "internal server error");
    }

    #[actix_rt::test]
    async fn test_missing_header_is_unauthorized() {
        let app = crate::handlers::test_support::TestApp::spawn().await;

        let resp = app
            .call(test::TestRequest::post().uri("/api/blogs"))
            .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "token missing or invalid");
    }
}
