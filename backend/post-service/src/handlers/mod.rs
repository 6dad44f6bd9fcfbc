/// HTTP handlers and route wiring
///
/// - `posts`: CRUD and reorder under `/posts`
/// - `health`: liveness and readiness probes
pub mod health;
pub mod posts;

use crate::config::CorsConfig;
use crate::error::AppError;
use actix_cors::Cors;
use actix_web::{http::header, web};

pub use health::{liveness_check, readiness_check};
pub use posts::{create_post, delete_post, get_post, list_posts, reorder_posts, update_post};

/// Largest accepted JSON body. A reorder carries the whole collection.
const JSON_BODY_LIMIT: usize = 4 * 1024 * 1024;

/// JSON extractor config that turns body errors into `{message}` 400 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| AppError::MalformedRequest(err.to_string()).into())
}

/// CORS policy: configured origins, GET/POST/PUT/DELETE, `Content-Type` header.
pub fn cors_policy(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    match config.origins() {
        None => cors = cors.allow_any_origin().send_wildcard(),
        Some(origins) => {
            for origin in origins {
                cors = cors.allowed_origin(origin);
            }
        }
    }
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// Register every route. Expects `web::Data<PostCollection>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(liveness_check))
        .route("/health/ready", web::get().to(readiness_check))
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .service(
            web::scope("/posts")
                .service(
                    web::resource("")
                        .route(web::get().to(list_posts))
                        .route(web::post().to(create_post))
                        .route(web::put().to(reorder_posts)),
                )
                .service(
                    web::resource("/{post_id}")
                        .route(web::get().to(get_post))
                        .route(web::put().to(update_post))
                        .route(web::delete().to(delete_post)),
                ),
        );
}
