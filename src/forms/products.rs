use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

/// ISO 4217 currency codes are three ASCII alphabetic characters.
const CURRENCY_CODE_LEN: usize = 3;
const CURRENCY_CODE_LEN_VALIDATOR: u64 = CURRENCY_CODE_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided currency code is invalid.
    #[error("invalid currency code `{value}`")]
    InvalidCurrency { value: String },
    /// The provided price could not be parsed as a non-negative amount.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
}

/// JSON payload accepted when creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the admin.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional SKU supplied by the admin.
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: Option<String>,
    /// Optional longer description.
    pub description: Option<String>,
    /// List price in major units, e.g. `"12.34"`.
    pub price: String,
    /// ISO 4217 currency code (e.g. `UAH`).
    #[validate(length(equal = CURRENCY_CODE_LEN_VALIDATOR))]
    pub currency: String,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price_cents =
            parse_price_cents(&self.price).ok_or_else(|| ProductFormError::InvalidPrice {
                value: self.price.clone(),
            })?;

        let currency = sanitize_currency(&self.currency)?;

        let mut new_product = NewProduct::new(sanitized_name, price_cents, currency);

        if let Some(sku) = self
            .sku
            .as_deref()
            .map(sanitize_sku)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_sku(sku);
        }

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        Ok(new_product)
    }
}

/// JSON payload accepted when editing an existing product.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    /// Optional new name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Optional SKU update (empty string clears the existing SKU).
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    pub sku: Option<String>,
    /// Optional description update (empty string clears the existing description).
    pub description: Option<String>,
    /// Optional new price in major units.
    pub price: Option<String>,
    /// Optional currency update.
    pub currency: Option<String>,
    /// Optional archive flag toggle.
    pub is_archived: Option<bool>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(sku) = self.sku {
            let sanitized = sanitize_sku(&sku);
            updates = updates.sku((!sanitized.is_empty()).then_some(sanitized));
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            updates = updates.description((!sanitized.is_empty()).then_some(sanitized));
        }

        if let Some(price) = self.price {
            let price_cents = parse_price_cents(&price)
                .ok_or(ProductFormError::InvalidPrice { value: price })?;
            updates = updates.price_cents(price_cents);
        }

        if let Some(currency) = self.currency {
            updates = updates.currency(sanitize_currency(&currency)?);
        }

        if let Some(is_archived) = self.is_archived {
            updates = updates.archived(is_archived);
        }

        Ok(updates)
    }
}

/// Parse a major-unit amount such as `"12.34"` into minor units.
///
/// Accepts an optional fractional part of one or two digits, with `.` or `,`
/// as the separator. Returns `None` for anything else, including negatives.
pub(crate) fn parse_price_cents(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (major, minor) = match trimmed.split_once(['.', ',']) {
        Some((major, minor)) => (major, minor),
        None => (trimmed, ""),
    };

    if !major.chars().all(|ch| ch.is_ascii_digit()) || major.is_empty() {
        return None;
    }
    if !minor.chars().all(|ch| ch.is_ascii_digit()) || minor.len() > 2 {
        return None;
    }

    let major: i64 = major.parse().ok()?;
    let minor_cents: i64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<i64>().ok()? * 10,
        _ => minor.parse().ok()?,
    };

    major.checked_mul(100)?.checked_add(minor_cents)
}

/// Collapse runs of whitespace and strip control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Trim and strip control characters while keeping line breaks.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| !ch.is_control() || *ch == '\n')
        .collect()
}

/// SKUs keep no internal whitespace at all.
pub(crate) fn sanitize_sku(input: &str) -> String {
    input.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// Normalize a currency code to three uppercase ASCII letters.
pub(crate) fn sanitize_currency(input: &str) -> ProductFormResult<String> {
    let trimmed = input.trim();
    if trimmed.len() != CURRENCY_CODE_LEN || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(ProductFormError::InvalidCurrency {
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_ascii_uppercase())
}
