use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::discount::DiscountKind;
use crate::domain::product::ProductListQuery;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::pricing::{self, PricedProduct, format_cents};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the catalog endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Short form of the discount that won for a product.
#[derive(Debug, Serialize)]
pub struct DiscountSummary {
    pub id: i32,
    pub name: String,
    pub kind: DiscountKind,
    pub value: i64,
    pub ends_at: NaiveDateTime,
}

/// View model for a catalog product, priced against a single instant.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price_cents: i64,
    pub price_formatted: String,
    pub currency: String,
    pub discounted_price_cents: i64,
    pub discounted_price_formatted: String,
    pub discount_amount_cents: i64,
    pub discount_percentage: i64,
    pub discount: Option<DiscountSummary>,
}

impl ProductView {
    fn from_priced(priced: PricedProduct) -> Self {
        let PricedProduct {
            product,
            pricing,
            discount,
        } = priced;

        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            description: product.description,
            price_cents: product.price_cents,
            price_formatted: format_cents(product.price_cents),
            currency: product.currency,
            discounted_price_cents: pricing.discounted_price_cents,
            discounted_price_formatted: format_cents(pricing.discounted_price_cents),
            discount_amount_cents: pricing.discount_amount_cents,
            discount_percentage: pricing.discount_percentage,
            discount: discount.map(|discount| DiscountSummary {
                id: discount.id,
                name: discount.name,
                kind: discount.kind,
                value: discount.value,
                ends_at: discount.ends_at,
            }),
        }
    }
}

/// Data returned by the catalog listing endpoints.
#[derive(Debug, Serialize)]
pub struct CatalogPageData {
    /// Paginated list of priced products.
    pub products: Paginated<ProductView>,
    /// Search query echoed back when present.
    pub search: Option<String>,
}

/// Loads a page of the catalog with discounts resolved.
///
/// `now` is captured once here, so every product on the page is priced
/// against the same instant.
pub fn load_catalog_page<R>(repo: &R, query: CatalogQuery) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + ?Sized,
{
    let now = chrono::Local::now().naive_utc();
    let CatalogQuery { search, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let view_items: Vec<ProductView> = pricing::price_products(items, now)
        .into_iter()
        .map(ProductView::from_priced)
        .collect();

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CatalogPageData {
        products: Paginated::new(view_items, page, total_pages),
        search,
    })
}

/// Loads a single product with its discount resolved.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    let now = chrono::Local::now().naive_utc();

    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(ProductView::from_priced(pricing::price_product(
        product, now,
    )))
}

/// Loads the specials page: only products whose resolved discount actually
/// saves something right now.
///
/// The query only returns products with a discount usable at `now`, so the
/// page counts track the specials themselves. The amount check afterwards
/// drops the rare product whose usable discount still saves nothing, such as
/// a percentage discount on a zero price.
pub fn load_specials_page<R>(repo: &R, query: CatalogQuery) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + ?Sized,
{
    let now = chrono::Local::now().naive_utc();
    let CatalogQuery { search, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new()
        .discounted_at(now)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let view_items: Vec<ProductView> = pricing::price_products(items, now)
        .into_iter()
        .filter(|priced| priced.pricing.discount_amount_cents > 0)
        .map(ProductView::from_priced)
        .collect();

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(CatalogPageData {
        products: Paginated::new(view_items, page, total_pages),
        search,
    })
}
