use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::discount::{Discount, DiscountKind, DiscountListQuery};
use crate::forms::discounts::{AddDiscountForm, EditDiscountForm, check_rule, check_window};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::pricing::is_discount_active;
use crate::repository::{DiscountReader, DiscountWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the admin discounts index.
#[derive(Debug, Default, Deserialize)]
pub struct DiscountsQuery {
    /// Optional search string entered by the admin.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// View model for a discount row in the admin index.
#[derive(Debug, Serialize)]
pub struct DiscountView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub kind: DiscountKind,
    pub value: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_enabled: bool,
    /// Whether the discount is usable at the moment the page was built.
    pub is_currently_active: bool,
    pub min_order_cents: Option<i64>,
    pub max_discount_cents: Option<i64>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
}

impl DiscountView {
    fn from_discount(discount: Discount, now: NaiveDateTime) -> Self {
        let is_currently_active = is_discount_active(&discount, now);
        Self {
            id: discount.id,
            name: discount.name,
            description: discount.description,
            kind: discount.kind,
            value: discount.value,
            starts_at: discount.starts_at,
            ends_at: discount.ends_at,
            is_enabled: discount.is_enabled,
            is_currently_active,
            min_order_cents: discount.min_order_cents,
            max_discount_cents: discount.max_discount_cents,
            usage_limit: discount.usage_limit,
            usage_count: discount.usage_count,
        }
    }
}

/// Data returned by the admin discounts index.
#[derive(Debug, Serialize)]
pub struct DiscountsPageData {
    pub discounts: Paginated<DiscountView>,
    pub search: Option<String>,
}

/// A single discount with its product associations.
#[derive(Debug, Serialize)]
pub struct DiscountDetail {
    pub discount: DiscountView,
    pub product_ids: Vec<i32>,
}

/// Loads the admin discounts overview.
pub fn load_discounts_page<R>(repo: &R, query: DiscountsQuery) -> ServiceResult<DiscountsPageData>
where
    R: DiscountReader + ?Sized,
{
    let now = chrono::Local::now().naive_utc();
    let DiscountsQuery { search, page } = query;

    let page = page.unwrap_or(1);
    let mut list_query = DiscountListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }

    let (total, items) = repo.list_discounts(list_query).map_err(ServiceError::from)?;

    let view_items: Vec<DiscountView> = items
        .into_iter()
        .map(|discount| DiscountView::from_discount(discount, now))
        .collect();

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(DiscountsPageData {
        discounts: Paginated::new(view_items, page, total_pages),
        search,
    })
}

/// Loads one discount with the ids of the products it is linked to.
pub fn get_discount<R>(repo: &R, discount_id: i32) -> ServiceResult<DiscountDetail>
where
    R: DiscountReader + ?Sized,
{
    let now = chrono::Local::now().naive_utc();

    let discount = repo
        .get_discount_by_id(discount_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let product_ids = repo
        .list_discount_product_ids(discount_id)
        .map_err(ServiceError::from)?;

    Ok(DiscountDetail {
        discount: DiscountView::from_discount(discount, now),
        product_ids,
    })
}

/// Creates a discount and links it to the requested products.
///
/// When linking fails the freshly created discount is rolled back so that a
/// half-linked promotion never becomes visible.
pub fn create_discount<R>(repo: &R, form: AddDiscountForm) -> ServiceResult<Discount>
where
    R: DiscountWriter + ?Sized,
{
    let (payload, product_ids) = form
        .into_new_discount()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_discount(&payload).map_err(ServiceError::from)?;

    if product_ids.is_empty() {
        return Ok(created);
    }

    if let Err(err) = repo.replace_discount_products(created.id, &product_ids) {
        log::error!(
            "Failed to attach products to discount {}: {err}",
            created.id
        );
        if let Err(delete_err) = repo.delete_discount(created.id) {
            log::error!(
                "Failed to roll back discount {} after linking error: {delete_err}",
                created.id
            );
        }
        return Err(ServiceError::from(err));
    }

    Ok(created)
}

/// Applies an admin patch to an existing discount, optionally replacing its
/// product associations.
///
/// A patch may change `kind` and `value` independently, so the definition
/// that would result from the merge is validated against the stored discount
/// before anything is written. A patch that would leave, say, a percentage
/// discount above 100% is rejected here.
pub fn update_discount<R>(
    repo: &R,
    discount_id: i32,
    form: EditDiscountForm,
) -> ServiceResult<Discount>
where
    R: DiscountReader + DiscountWriter + ?Sized,
{
    let (updates, product_ids) = form
        .into_update_discount()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_discount_by_id(discount_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let merged_kind = updates.kind.unwrap_or(current.kind);
    let merged_value = updates.value.unwrap_or(current.value);
    check_rule(merged_kind, merged_value).map_err(|err| ServiceError::Form(err.to_string()))?;

    let merged_starts_at = updates.starts_at.unwrap_or(current.starts_at);
    let merged_ends_at = updates.ends_at.unwrap_or(current.ends_at);
    check_window(merged_starts_at, merged_ends_at)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_discount(discount_id, &updates)
        .map_err(ServiceError::from)?;

    if let Some(product_ids) = product_ids {
        repo.replace_discount_products(discount_id, &product_ids)
            .map_err(ServiceError::from)?;
    }

    Ok(updated)
}

/// Deletes a discount and its product links.
pub fn delete_discount<R>(repo: &R, discount_id: i32) -> ServiceResult<()>
where
    R: DiscountWriter + ?Sized,
{
    repo.delete_discount(discount_id)
        .map_err(ServiceError::from)
}
