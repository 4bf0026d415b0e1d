use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::discount::{
    Discount as DomainDiscount, DiscountKind, NewDiscount as DomainNewDiscount,
    UpdateDiscount as DomainUpdateDiscount,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::discounts)]
pub struct Discount {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub value: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_enabled: bool,
    pub min_order_cents: Option<i64>,
    pub max_discount_cents: Option<i64>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::discounts)]
pub struct NewDiscount<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub kind: &'a str,
    pub value: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_enabled: bool,
    pub min_order_cents: Option<i64>,
    pub max_discount_cents: Option<i64>,
    pub usage_limit: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::discounts)]
pub struct UpdateDiscount<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub kind: Option<&'a str>,
    pub value: Option<i64>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub is_enabled: Option<bool>,
    pub min_order_cents: Option<Option<i64>>,
    pub max_discount_cents: Option<Option<i64>>,
    pub usage_limit: Option<Option<i32>>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_discounts)]
pub struct NewProductDiscount {
    pub product_id: i32,
    pub discount_id: i32,
}

/// Parse the stored kind string.
///
/// The set of kinds is closed; an unknown value here means corrupted data,
/// and continuing would silently mis-price, so refuse to proceed.
fn parse_kind(kind: &str) -> DiscountKind {
    match kind {
        "percentage" => DiscountKind::Percentage,
        "fixed" => DiscountKind::FixedAmount,
        other => panic!("unknown discount kind `{other}` in database"),
    }
}

impl From<Discount> for DomainDiscount {
    fn from(value: Discount) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            kind: parse_kind(&value.kind),
            value: value.value,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            is_enabled: value.is_enabled,
            min_order_cents: value.min_order_cents,
            max_discount_cents: value.max_discount_cents,
            usage_limit: value.usage_limit,
            usage_count: value.usage_count,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewDiscount> for NewDiscount<'a> {
    fn from(value: &'a DomainNewDiscount) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            kind: value.kind.as_str(),
            value: value.value,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            is_enabled: value.is_enabled,
            min_order_cents: value.min_order_cents,
            max_discount_cents: value.max_discount_cents,
            usage_limit: value.usage_limit,
        }
    }
}

impl<'a> From<&'a DomainUpdateDiscount> for UpdateDiscount<'a> {
    fn from(value: &'a DomainUpdateDiscount) -> Self {
        Self {
            name: value.name.as_deref(),
            description: value
                .description
                .as_ref()
                .map(|description| description.as_ref().map(String::as_str)),
            kind: value.kind.map(|kind| kind.as_str()),
            value: value.value,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            is_enabled: value.is_enabled,
            min_order_cents: value.min_order_cents,
            max_discount_cents: value.max_discount_cents,
            usage_limit: value.usage_limit,
            updated_at: value.updated_at,
        }
    }
}
