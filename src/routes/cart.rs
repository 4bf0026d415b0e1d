use actix_web::{HttpResponse, Responder, post, web};

use crate::routes::error_response;
use crate::services::cart::{self, CartTotalsRequest};

#[post("/v1/cart/total")]
/// Aggregate totals for a cart of pre-priced lines.
pub async fn cart_total(form: web::Json<CartTotalsRequest>) -> impl Responder {
    match cart::calculate_totals(form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to total cart", err),
    }
}
