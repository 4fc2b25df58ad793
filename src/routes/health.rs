use actix_web::{get, HttpResponse};
use serde_json::json;

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "SoFly waitlist proxy is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
