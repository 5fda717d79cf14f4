//! User directory handlers.

use actix_web::{HttpResponse, web};

use bloglist_core::domain::{Blog, NewUserInput, User};
use bloglist_shared::dto::{CreateUserRequest, UserBlogResponse, UserResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: User, blogs: Vec<Blog>) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        blogs: blogs
            .into_iter()
            .map(|b| UserBlogResponse {
                id: b.id,
                title: b.title,
                author: b.author,
                url: b.url,
                likes: b.likes,
            })
            .collect(),
    }
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(|u| user_response(u.user, u.blogs))
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .register(NewUserInput {
            username: req.username,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(user_response(user, Vec::new())))
}
