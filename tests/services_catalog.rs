use chrono::{NaiveDate, NaiveDateTime};

use lavka_storefront::forms::discounts::AddDiscountForm;
use lavka_storefront::forms::products::AddProductForm;
use lavka_storefront::repository::DieselRepository;
use lavka_storefront::services::catalog::{self, CatalogQuery};
use lavka_storefront::services::discounts;
use lavka_storefront::services::products;

mod common;

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

fn product_form(name: &str, price: &str) -> AddProductForm {
    AddProductForm {
        name: name.to_string(),
        sku: None,
        description: None,
        price: price.to_string(),
        currency: "UAH".to_string(),
    }
}

fn discount_form(name: &str, kind: &str, value: i64, product_ids: Vec<i32>) -> AddDiscountForm {
    AddDiscountForm {
        name: name.to_string(),
        description: None,
        kind: kind.to_string(),
        value,
        starts_at: datetime(2000, 1, 1),
        ends_at: datetime(2100, 1, 1),
        min_order_cents: None,
        max_discount_cents: None,
        usage_limit: None,
        product_ids,
    }
}

#[test]
fn catalog_prices_products_against_linked_discounts() {
    let test_db = common::TestDb::new("service_catalog_prices_products.db");
    let repo = DieselRepository::new(test_db.pool());

    let coffee = products::create_product(&repo, product_form("Coffee", "10.00"))
        .expect("create coffee");
    let tea = products::create_product(&repo, product_form("Tea", "5.00")).expect("create tea");

    // Both discounts target the coffee; the fixed one saves more and must win.
    discounts::create_discount(
        &repo,
        discount_form("Ten percent", "percentage", 10, vec![coffee.id]),
    )
    .expect("create percentage discount");
    let fixed = discounts::create_discount(
        &repo,
        discount_form("Flat 1.50 off", "fixed", 150, vec![coffee.id]),
    )
    .expect("create fixed discount");

    let data = catalog::load_catalog_page(&repo, CatalogQuery::default())
        .expect("load catalog page");

    assert_eq!(data.products.items.len(), 2);

    let coffee_view = data
        .products
        .items
        .iter()
        .find(|view| view.id == coffee.id)
        .expect("coffee should be listed");
    assert_eq!(coffee_view.price_cents, 1_000);
    assert_eq!(coffee_view.discounted_price_cents, 850);
    assert_eq!(coffee_view.discount_amount_cents, 150);
    assert_eq!(coffee_view.discounted_price_formatted, "8.50");
    assert_eq!(
        coffee_view.discount.as_ref().map(|summary| summary.id),
        Some(fixed.id)
    );

    let tea_view = data
        .products
        .items
        .iter()
        .find(|view| view.id == tea.id)
        .expect("tea should be listed");
    assert_eq!(tea_view.discounted_price_cents, 500);
    assert!(tea_view.discount.is_none());
}

#[test]
fn specials_list_only_discounted_products() {
    let test_db = common::TestDb::new("service_specials_only_discounted.db");
    let repo = DieselRepository::new(test_db.pool());

    let coffee = products::create_product(&repo, product_form("Coffee", "10.00"))
        .expect("create coffee");
    products::create_product(&repo, product_form("Tea", "5.00")).expect("create tea");

    discounts::create_discount(
        &repo,
        discount_form("Ten percent", "percentage", 10, vec![coffee.id]),
    )
    .expect("create discount");

    let data = catalog::load_specials_page(&repo, CatalogQuery::default())
        .expect("load specials page");

    assert_eq!(data.products.items.len(), 1);
    assert_eq!(data.products.items[0].id, coffee.id);
    assert_eq!(data.products.items[0].discount_amount_cents, 100);
}

#[test]
fn expired_discounts_do_not_change_prices() {
    let test_db = common::TestDb::new("service_expired_discount_ignored.db");
    let repo = DieselRepository::new(test_db.pool());

    let coffee = products::create_product(&repo, product_form("Coffee", "10.00"))
        .expect("create coffee");

    let mut expired = discount_form("Old promo", "percentage", 50, vec![coffee.id]);
    expired.starts_at = datetime(2020, 1, 1);
    expired.ends_at = datetime(2020, 2, 1);
    discounts::create_discount(&repo, expired).expect("create expired discount");

    let view = catalog::get_product(&repo, coffee.id).expect("get coffee");

    assert_eq!(view.discounted_price_cents, 1_000);
    assert_eq!(view.discount_amount_cents, 0);
    assert!(view.discount.is_none());
}
