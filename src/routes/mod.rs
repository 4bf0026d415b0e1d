use actix_web::HttpResponse;

use crate::services::ServiceError;

pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod products;

/// Map a service failure onto the JSON error response the API exposes.
pub(crate) fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "not found" }))
        }
        ServiceError::Form(message) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
