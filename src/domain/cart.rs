use serde::{Deserialize, Serialize};

/// A single cart line as captured by the cart/session store.
///
/// The price is the one recorded at add-to-cart time; when a discount was
/// applied on the catalog path, `discounted_price_cents` carries the reduced
/// per-unit price. Cart aggregation sums these pre-priced lines and does not
/// re-resolve discounts.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartLine {
    /// Identifier of the product behind the line.
    pub product_id: i32,
    /// Per-unit list price in the smallest currency unit.
    pub price_cents: i64,
    /// Per-unit discounted price, when a discount applied at add time.
    pub discounted_price_cents: Option<i64>,
    /// Number of units in the line.
    pub quantity: i32,
}
