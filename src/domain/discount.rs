use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// How the discount `value` is interpreted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `value` is a whole percentage of the product price, in `(0, 100]`.
    Percentage,
    /// `value` is an absolute amount in the smallest currency unit.
    #[serde(rename = "fixed")]
    FixedAmount,
}

impl DiscountKind {
    /// The string stored in the database and used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed",
        }
    }
}

/// Domain representation of a promotional rule.
///
/// A discount is usable only while `is_enabled` holds and the current time
/// falls inside the inclusive `[starts_at, ends_at]` window; that check lives
/// in [`crate::pricing::is_discount_active`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Discount {
    /// Unique identifier of the discount.
    pub id: i32,
    /// Human-readable name shown to shoppers and admins.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Whether `value` is a percentage or a fixed amount.
    pub kind: DiscountKind,
    /// Percentage (whole percent) or amount in the smallest currency unit.
    pub value: i64,
    /// Start of the active window, inclusive.
    pub starts_at: NaiveDateTime,
    /// End of the active window, inclusive.
    pub ends_at: NaiveDateTime,
    /// Manual on/off switch, checked in addition to the window.
    pub is_enabled: bool,
    /// Minimum order amount required for the discount, in the smallest currency unit.
    pub min_order_cents: Option<i64>,
    /// Cap on the absolute savings a single application can produce.
    pub max_discount_cents: Option<i64>,
    /// Maximum number of redemptions, when limited.
    pub usage_limit: Option<i32>,
    /// Redemptions so far; maintained by order processing, never by pricing.
    pub usage_count: i32,
    /// Timestamp for when the discount record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the discount record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new discount.
#[derive(Debug, Clone)]
pub struct NewDiscount {
    pub name: String,
    pub description: Option<String>,
    pub kind: DiscountKind,
    pub value: i64,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub is_enabled: bool,
    pub min_order_cents: Option<i64>,
    pub max_discount_cents: Option<i64>,
    pub usage_limit: Option<i32>,
}

impl NewDiscount {
    /// Build a new enabled discount payload with the supplied rule and window.
    pub fn new(
        name: impl Into<String>,
        kind: DiscountKind,
        value: i64,
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            value,
            starts_at,
            ends_at,
            is_enabled: true,
            min_order_cents: None,
            max_discount_cents: None,
            usage_limit: None,
        }
    }

    /// Attach a descriptive text to the discount payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Require a minimum order amount for the discount to apply.
    pub fn with_min_order_cents(mut self, min_order_cents: i64) -> Self {
        self.min_order_cents = Some(min_order_cents);
        self
    }

    /// Cap the absolute savings a single application can produce.
    pub fn with_max_discount_cents(mut self, max_discount_cents: i64) -> Self {
        self.max_discount_cents = Some(max_discount_cents);
        self
    }

    /// Limit the number of redemptions.
    pub fn with_usage_limit(mut self, usage_limit: i32) -> Self {
        self.usage_limit = Some(usage_limit);
        self
    }

    /// Create the discount switched off.
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }
}

/// Patch data applied when updating an existing discount.
#[derive(Debug, Clone)]
pub struct UpdateDiscount {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update, using `None` to clear an existing value.
    pub description: Option<Option<String>>,
    /// Optional kind update.
    pub kind: Option<DiscountKind>,
    /// Optional value update.
    pub value: Option<i64>,
    /// Optional window start update.
    pub starts_at: Option<NaiveDateTime>,
    /// Optional window end update.
    pub ends_at: Option<NaiveDateTime>,
    /// Optional on/off switch update.
    pub is_enabled: Option<bool>,
    /// Optional minimum order update, using `None` to clear an existing value.
    pub min_order_cents: Option<Option<i64>>,
    /// Optional savings cap update, using `None` to clear an existing value.
    pub max_discount_cents: Option<Option<i64>>,
    /// Optional usage limit update, using `None` to clear an existing value.
    pub usage_limit: Option<Option<i32>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateDiscount {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateDiscount {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            description: None,
            kind: None,
            value: None,
            starts_at: None,
            ends_at: None,
            is_enabled: None,
            min_order_cents: None,
            max_discount_cents: None,
            usage_limit: None,
            updated_at: now,
        }
    }

    /// Update the discount name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Update the discount kind.
    pub fn kind(mut self, kind: DiscountKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Update the discount value.
    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Update the start of the active window.
    pub fn starts_at(mut self, starts_at: NaiveDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    /// Update the end of the active window.
    pub fn ends_at(mut self, ends_at: NaiveDateTime) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    /// Switch the discount on or off.
    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    /// Update the minimum order amount, using `None` to clear the value.
    pub fn min_order_cents(mut self, min_order_cents: Option<i64>) -> Self {
        self.min_order_cents = Some(min_order_cents);
        self
    }

    /// Update the savings cap, using `None` to clear the value.
    pub fn max_discount_cents(mut self, max_discount_cents: Option<i64>) -> Self {
        self.max_discount_cents = Some(max_discount_cents);
        self
    }

    /// Update the usage limit, using `None` to clear the value.
    pub fn usage_limit(mut self, usage_limit: Option<i32>) -> Self {
        self.usage_limit = Some(usage_limit);
        self
    }
}

/// Query definition used to list discounts.
#[derive(Debug, Clone)]
pub struct DiscountListQuery {
    /// Optional name or description search term.
    pub search: Option<String>,
    /// When set, only discounts enabled and inside their window at this instant.
    pub active_at: Option<NaiveDateTime>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for DiscountListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountListQuery {
    /// Construct a query that targets all discounts.
    pub fn new() -> Self {
        Self {
            search: None,
            active_at: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the name or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Keep only discounts that are enabled and inside their window at `now`.
    pub fn active_at(mut self, now: NaiveDateTime) -> Self {
        self.active_at = Some(now);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
