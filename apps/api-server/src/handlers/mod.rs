//! HTTP handlers and route configuration.

mod account;
mod auth;
mod engagement;
mod feed;
mod health;
mod profiles;
mod tweets;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/feed", web::get().to(feed::feed))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Tweet lifecycle and engagement
            .service(
                web::scope("/tweets")
                    .route("", web::post().to(feed::compose))
                    .route("/{id}", web::get().to(tweets::show))
                    .route("/{id}", web::put().to(tweets::edit))
                    .route("/{id}", web::delete().to(tweets::delete))
                    .route("/{id}/like", web::post().to(engagement::like))
                    .route("/{id}/comments", web::post().to(engagement::comment)),
            )
            // Social graph
            .service(
                web::scope("/profiles")
                    .route("", web::get().to(profiles::list))
                    .route("/{user_id}", web::get().to(profiles::show))
                    .route("/{user_id}/follow", web::post().to(profiles::follow))
                    .route("/{user_id}/unfollow", web::post().to(profiles::unfollow))
                    .route("/{user_id}/followers", web::get().to(profiles::followers))
                    .route("/{user_id}/following", web::get().to(profiles::following)),
            )
            // Account management
            .service(
                web::scope("/account")
                    .route("", web::get().to(account::show))
                    .route("", web::put().to(account::update)),
            ),
    );
}
