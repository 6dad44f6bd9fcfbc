/// Health probes
use crate::services::PostCollection;
use actix_web::{web, HttpResponse};
use chrono::Utc;

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "post-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready when the persisted sequence can be read.
pub async fn readiness_check(posts: web::Data<PostCollection>) -> HttpResponse {
    match posts.check_ready().await {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "ready": true,
            "posts": count,
            "store": posts.store_location(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "ready": false,
                "error": e.to_string(),
                "store": posts.store_location(),
                "timestamp": Utc::now().to_rfc3339(),
            }))
        }
    }
}
