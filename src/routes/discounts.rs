use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::forms::discounts::{AddDiscountForm, EditDiscountForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::discounts::{self, DiscountsQuery};

#[get("/v1/discounts")]
/// Return a JSON page of discounts for the admin back-office.
pub async fn list_discounts(
    params: web::Query<DiscountsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match discounts::load_discounts_page(repo.get_ref(), params.0) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response("Failed to list discounts", err),
    }
}

#[get("/v1/discounts/{id}")]
/// Return one discount with the ids of its linked products.
pub async fn show_discount(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match discounts::get_discount(repo.get_ref(), path.into_inner()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(err) => error_response("Failed to fetch discount", err),
    }
}

#[post("/v1/discounts")]
/// Create a discount and link it to products.
pub async fn add_discount(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddDiscountForm>,
) -> impl Responder {
    match discounts::create_discount(repo.get_ref(), form.into_inner()) {
        Ok(discount) => HttpResponse::Created().json(discount),
        Err(err) => error_response("Failed to create discount", err),
    }
}

#[patch("/v1/discounts/{id}")]
/// Apply a partial update to a discount, optionally replacing its links.
pub async fn edit_discount(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditDiscountForm>,
) -> impl Responder {
    match discounts::update_discount(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(discount) => HttpResponse::Ok().json(discount),
        Err(err) => error_response("Failed to update discount", err),
    }
}

#[delete("/v1/discounts/{id}")]
/// Delete a discount and its product links.
pub async fn delete_discount(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match discounts::delete_discount(repo.get_ref(), path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response("Failed to delete discount", err),
    }
}
