use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::discount::{DiscountKind, NewDiscount, UpdateDiscount};
use crate::forms::products::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a discount name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the discount form helpers.
pub type DiscountFormResult<T> = Result<T, DiscountFormError>;

/// Errors that can occur while processing discount forms.
///
/// These checks are the write-path guard for the pricing engine's
/// preconditions: an invalid definition must be rejected here, since the
/// engine itself does not re-validate its inputs.
#[derive(Debug, Error)]
pub enum DiscountFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("discount name cannot be empty")]
    EmptyName,
    /// The kind string is neither `percentage` nor `fixed`.
    #[error("unknown discount kind `{value}`")]
    UnknownKind { value: String },
    /// The discount value must be strictly positive.
    #[error("discount value must be positive")]
    NonPositiveValue,
    /// A percentage discount cannot exceed 100%.
    #[error("percentage discount cannot exceed 100%")]
    PercentageTooLarge,
    /// The window ends before it starts.
    #[error("discount window ends before it starts")]
    InvalidWindow,
    /// A monetary field carries a negative amount.
    #[error("`{field}` cannot be negative")]
    NegativeAmount { field: &'static str },
}

fn parse_kind(value: &str) -> DiscountFormResult<DiscountKind> {
    match value {
        "percentage" => Ok(DiscountKind::Percentage),
        "fixed" => Ok(DiscountKind::FixedAmount),
        other => Err(DiscountFormError::UnknownKind {
            value: other.to_string(),
        }),
    }
}

/// JSON payload accepted when creating a discount.
#[derive(Debug, Deserialize, Validate)]
pub struct AddDiscountForm {
    /// Name entered by the admin.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// `"percentage"` or `"fixed"`.
    pub kind: String,
    /// Whole percent for percentage discounts, minor units for fixed ones.
    pub value: i64,
    /// Start of the active window, inclusive.
    pub starts_at: NaiveDateTime,
    /// End of the active window, inclusive.
    pub ends_at: NaiveDateTime,
    /// Optional minimum order amount in minor units.
    pub min_order_cents: Option<i64>,
    /// Optional cap on the absolute savings, in minor units.
    pub max_discount_cents: Option<i64>,
    /// Optional redemption limit.
    pub usage_limit: Option<i32>,
    /// Products the discount applies to.
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl AddDiscountForm {
    /// Validates and sanitizes the payload into a domain `NewDiscount` plus
    /// the product ids to link.
    pub fn into_new_discount(self) -> DiscountFormResult<(NewDiscount, Vec<i32>)> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(DiscountFormError::EmptyName);
        }

        let kind = parse_kind(&self.kind)?;
        check_rule(kind, self.value)?;
        check_window(self.starts_at, self.ends_at)?;
        check_amount("min_order_cents", self.min_order_cents)?;
        check_amount("max_discount_cents", self.max_discount_cents)?;

        let mut new_discount = NewDiscount::new(
            sanitized_name,
            kind,
            self.value,
            self.starts_at,
            self.ends_at,
        );

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_discount = new_discount.with_description(description);
        }

        if let Some(min_order_cents) = self.min_order_cents {
            new_discount = new_discount.with_min_order_cents(min_order_cents);
        }

        if let Some(max_discount_cents) = self.max_discount_cents {
            new_discount = new_discount.with_max_discount_cents(max_discount_cents);
        }

        if let Some(usage_limit) = self.usage_limit {
            new_discount = new_discount.with_usage_limit(usage_limit);
        }

        Ok((new_discount, self.product_ids))
    }
}

/// JSON payload accepted when editing an existing discount.
#[derive(Debug, Deserialize, Validate)]
pub struct EditDiscountForm {
    /// Optional new name.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Optional description update (empty string clears the existing one).
    pub description: Option<String>,
    /// Optional kind update.
    pub kind: Option<String>,
    /// Optional value update.
    pub value: Option<i64>,
    /// Optional window start update.
    pub starts_at: Option<NaiveDateTime>,
    /// Optional window end update.
    pub ends_at: Option<NaiveDateTime>,
    /// Optional on/off switch.
    pub is_enabled: Option<bool>,
    /// Optional minimum order update; absent or `null` leaves the field unchanged.
    pub min_order_cents: Option<i64>,
    /// Optional savings cap update.
    pub max_discount_cents: Option<i64>,
    /// Optional usage limit update.
    pub usage_limit: Option<i32>,
    /// When present, replaces the full set of product associations.
    pub product_ids: Option<Vec<i32>>,
}

impl EditDiscountForm {
    /// Validates and sanitizes the payload into a domain `UpdateDiscount`
    /// plus the replacement product ids, when supplied.
    pub fn into_update_discount(self) -> DiscountFormResult<(UpdateDiscount, Option<Vec<i32>>)> {
        self.validate()?;

        let kind = self.kind.as_deref().map(parse_kind).transpose()?;

        // Only self-contained violations can be caught here; the patch merged
        // with the stored discount is re-checked in the service.
        if let Some(value) = self.value {
            if value <= 0 {
                return Err(DiscountFormError::NonPositiveValue);
            }
            if kind == Some(DiscountKind::Percentage) && value > 100 {
                return Err(DiscountFormError::PercentageTooLarge);
            }
        }

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            check_window(starts_at, ends_at)?;
        }

        check_amount("min_order_cents", self.min_order_cents)?;
        check_amount("max_discount_cents", self.max_discount_cents)?;

        let mut updates = UpdateDiscount::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(DiscountFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            updates = updates.description((!sanitized.is_empty()).then_some(sanitized));
        }

        if let Some(kind) = kind {
            updates = updates.kind(kind);
        }

        if let Some(value) = self.value {
            updates = updates.value(value);
        }

        if let Some(starts_at) = self.starts_at {
            updates = updates.starts_at(starts_at);
        }

        if let Some(ends_at) = self.ends_at {
            updates = updates.ends_at(ends_at);
        }

        if let Some(is_enabled) = self.is_enabled {
            updates = updates.enabled(is_enabled);
        }

        if let Some(min_order_cents) = self.min_order_cents {
            updates = updates.min_order_cents(Some(min_order_cents));
        }

        if let Some(max_discount_cents) = self.max_discount_cents {
            updates = updates.max_discount_cents(Some(max_discount_cents));
        }

        if let Some(usage_limit) = self.usage_limit {
            updates = updates.usage_limit(Some(usage_limit));
        }

        Ok((updates, self.product_ids))
    }
}

/// Validate a kind/value pair as one definition.
///
/// Edit patches may carry only one of the two fields, so the service re-runs
/// this on the pair merged with the stored discount.
pub(crate) fn check_rule(kind: DiscountKind, value: i64) -> DiscountFormResult<()> {
    if value <= 0 {
        return Err(DiscountFormError::NonPositiveValue);
    }
    if kind == DiscountKind::Percentage && value > 100 {
        return Err(DiscountFormError::PercentageTooLarge);
    }
    Ok(())
}

pub(crate) fn check_window(starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> DiscountFormResult<()> {
    if ends_at < starts_at {
        return Err(DiscountFormError::InvalidWindow);
    }
    Ok(())
}

fn check_amount(field: &'static str, amount: Option<i64>) -> DiscountFormResult<()> {
    if let Some(amount) = amount {
        if amount < 0 {
            return Err(DiscountFormError::NegativeAmount { field });
        }
    }
    Ok(())
}
