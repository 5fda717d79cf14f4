//! Blog handlers.

use actix_web::{HttpResponse, web};

use bloglist_core::domain::{CreateBlogInput, UpdateBlogInput};
use bloglist_shared::dto::BlogRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, parse_id};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let blogs = state.blogs.list().await?;
    Ok(HttpResponse::Ok().json(blogs))
}

/// GET /api/blogs/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let blog = state.blogs.get(id).await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// POST /api/blogs - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = CreateBlogInput {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
        summary: req.summary,
    };

    let blog = state.blogs.create(identity.principal(), input).await?;
    Ok(HttpResponse::Created().json(blog))
}

/// PUT /api/blogs/{id} - Protected route
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<BlogRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();
    let input = UpdateBlogInput {
        title: req.title,
        author: req.author,
        url: req.url,
        likes: req.likes,
        summary: req.summary,
    };

    let blog = state.blogs.update(identity.principal(), id, input).await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// DELETE /api/blogs/{id} - Protected route
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.blogs.delete(identity.principal(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::handlers::test_support::{TestApp, bearer};

    fn new_blog() -> Value {
        json!({
            "title": "Finnish Spring",
            "author": "Hang Kaijanaho",
            "url": "https://hang.kaijanaho.fi/?p=117",
            "likes": 10,
            "summary": "Testing blog ahihi"
        })
    }

    #[actix_rt::test]
    async fn test_blogs_are_returned_as_json() {
        let app = TestApp::spawn().await;

        let resp = app
            .call(test::TestRequest::get().uri("/api/blogs"))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[actix_rt::test]
    async fn test_valid_blog_can_be_added() {
        let app = TestApp::spawn().await;
        let (user_id, token) = app.login("root").await;

        let resp = app
            .call(
                test::TestRequest::post()
                    .uri("/api/blogs")
                    .insert_header(bearer(&token))
                    .set_json(new_blog()),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["creator"], json!(user_id));

        let blogs = app.blogs().await;
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0]["title"], "Finnish Spring");
        assert_eq!(blogs[0]["creator"]["username"], "root");
    }

    #[actix_rt::test]
    async fn test_missing_likes_defaults_to_zero() {
        let app = TestApp::spawn().await;
        let (_, token) = app.login("root").await;

        let resp = app
            .call(
                test::TestRequest::post()
                    .uri("/api/blogs")
                    .insert_header(bearer(&token))
                    .set_json(json!({
                        "title": "Blog without likes",
                        "author": "Leo Minh",
                        "url": "https://hang.kaijanaho.fi/?p=117"
                    })),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["likes"], 0);
    }

    #[actix_rt::test]
    async fn test_blog_without_title_and_url_is_rejected() {
        let app = TestApp::spawn().await;
        let (_, token) = app.login("root").await;

        let resp = app
            .call(
                test::TestRequest::post()
                    .uri("/api/blogs")
                    .insert_header(bearer(&token))
                    .set_json(json!({ "author": "Hang Kaijanaho", "likes": 10 })),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert!(app.blogs().await.is_empty());
    }

    #[actix_rt::test]
    async fn test_create_without_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let resp = app
            .call(
                test::TestRequest::post()
                    .uri("/api/blogs")
                    .set_json(new_blog()),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(app.blogs().await.is_empty());
    }

    #[actix_rt::test]
    async fn test_specific_blog_can_be_viewed() {
        let app = TestApp::spawn().await;
        let (_, token) = app.login("root").await;
        let id = app.create_blog(&token, new_blog()).await;

        let resp = app
            .call(test::TestRequest::get().uri(&format!("/api/blogs/{id}")))
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let blog: Value = test::read_body_json(resp).await;
        assert_eq!(blog["id"], id);
        assert_eq!(blog["summary"], "Testing blog ahihi");
    }

    #[actix_rt::test]
    async fn test_unknown_and_malformed_ids() {
        let app = TestApp::spawn().await;

        let missing = app
            .call(test::TestRequest::get().uri(&format!("/api/blogs/{}", uuid::Uuid::new_v4())))
            .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert!(test::read_body(missing).await.is_empty());

        let malformed = app
            .call(test::TestRequest::get().uri("/api/blogs/not-an-id"))
            .await;
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(malformed).await;
        assert_eq!(body["error"], "malformatted id");
    }

    #[actix_rt::test]
    async fn test_creator_can_update_blog() {
        let app = TestApp::spawn().await;
        let (_, token) = app.login("root").await;
        let id = app.create_blog(&token, new_blog()).await;

        let resp = app
            .call(
                test::TestRequest::put()
                    .uri(&format!("/api/blogs/{id}"))
                    .insert_header(bearer(&token))
                    .set_json(json!({
                        "title": "Happy life",
                        "author": "Hanna Kaijanaho",
                        "url": "https://hang.kaijanaho.fi/?p=91",
                        "likes": 10
                    })),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .call(test::TestRequest::get().uri(&format!("/api/blogs/{id}")))
            .await;
        let blog: Value = test::read_body_json(resp).await;
        assert_eq!(blog["title"], "Happy life");
        assert_eq!(blog["likes"], 10);
    }

    #[actix_rt::test]
    async fn test_other_user_cannot_update_blog() {
        let app = TestApp::spawn().await;
        let (_, owner) = app.login("root").await;
        let (_, intruder) = app.login("intruder").await;
        let id = app.create_blog(&owner, new_blog()).await;

        let resp = app
            .call(
                test::TestRequest::put()
                    .uri(&format!("/api/blogs/{id}"))
                    .insert_header(bearer(&intruder))
                    .set_json(json!({ "title": "Stolen", "url": "https://evil.example" })),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "user can only update its own blog");
        assert_eq!(app.blogs().await[0]["title"], "Finnish Spring");
    }

    #[actix_rt::test]
    async fn test_creator_can_delete_blog() {
        let app = TestApp::spawn().await;
        let (_, token) = app.login("root").await;
        let id = app.create_blog(&token, new_blog()).await;

        let resp = app
            .call(
                test::TestRequest::delete()
                    .uri(&format!("/api/blogs/{id}"))
                    .insert_header(bearer(&token)),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        assert!(app.blogs().await.is_empty());
        let users = app.users().await;
        assert_eq!(users[0]["blogs"], json!([]));
    }

    #[actix_rt::test]
    async fn test_other_user_cannot_delete_blog() {
        let app = TestApp::spawn().await;
        let (_, owner) = app.login("root").await;
        let (_, intruder) = app.login("intruder").await;
        let id = app.create_blog(&owner, new_blog()).await;

        let resp = app
            .call(
                test::TestRequest::delete()
                    .uri(&format!("/api/blogs/{id}"))
                    .insert_header(bearer(&intruder)),
            )
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "user can only delete its own blog");
        assert_eq!(app.blogs().await.len(), 1);
        let users = app.users().await;
        let root = users.iter().find(|u| u["username"] == "root").unwrap();
        assert_eq!(root["blogs"][0]["id"], id);
    }
}
