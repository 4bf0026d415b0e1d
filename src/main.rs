use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use lavka_storefront::db::establish_connection_pool;
use lavka_storefront::repository::DieselRepository;
use lavka_storefront::routes::cart::cart_total;
use lavka_storefront::routes::catalog::{list_products, list_specials, show_product};
use lavka_storefront::routes::discounts::{
    add_discount, delete_discount, edit_discount, list_discounts, show_discount,
};
use lavka_storefront::routes::products::{add_product, delete_product, edit_product};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(list_products)
            .service(show_product)
            .service(list_specials)
            .service(add_product)
            .service(edit_product)
            .service(delete_product)
            .service(list_discounts)
            .service(show_discount)
            .service(add_discount)
            .service(edit_discount)
            .service(delete_discount)
            .service(cart_total)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
