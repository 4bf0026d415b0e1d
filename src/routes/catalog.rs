use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::catalog::{self, CatalogQuery};

#[get("/v1/products")]
/// Return a JSON page of catalog products with discounts resolved.
pub async fn list_products(
    params: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::load_catalog_page(repo.get_ref(), params.0) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response("Failed to list products", err),
    }
}

#[get("/v1/products/{id}")]
/// Return a single product with its discount resolved.
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::get_product(repo.get_ref(), path.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => error_response("Failed to fetch product", err),
    }
}

#[get("/v1/specials")]
/// Return only the products that currently have a winning discount.
pub async fn list_specials(
    params: web::Query<CatalogQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match catalog::load_specials_page(repo.get_ref(), params.0) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response("Failed to list specials", err),
    }
}
