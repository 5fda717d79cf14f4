//! HTTP handlers and route configuration.

mod blogs;
mod health;
mod login;
mod users;

#[cfg(test)]
pub(crate) mod test_support;

use actix_web::web;

use crate::middleware::error::{json_config, unknown_endpoint};
use crate::state::AppState;

/// Register state, extractor config, routes and the unknown-endpoint fallback.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .configure(configure_routes)
            .default_service(web::to(unknown_endpoint));
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/login", web::post().to(login::login))
            .service(
                web::resource("/users")
                    .route(web::get().to(users::list))
                    .route(web::post().to(users::create)),
            )
            // Reads are public, writes need a bearer token
            .service(
                web::resource("/blogs")
                    .route(web::get().to(blogs::list))
                    .route(web::post().to(blogs::create)),
            )
            .service(
                web::resource("/blogs/{id}")
                    .route(web::get().to(blogs::get))
                    .route(web::put().to(blogs::update))
                    .route(web::delete().to(blogs::delete)),
            ),
    );
}
