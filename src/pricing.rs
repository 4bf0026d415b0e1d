//! Discount pricing engine.
//!
//! Pure, synchronous computations over products, discounts and cart lines.
//! Nothing in this module performs I/O or mutates its inputs; every function
//! is deterministic for a fixed `now`. Callers capture `now` once per logical
//! operation (a catalog page, a cart view) so that a single pricing decision
//! is judged against one consistent instant.
//!
//! All monetary quantities are `i64` amounts in the smallest currency unit;
//! no floating point is used anywhere in the calculations.

use chrono::NaiveDateTime;

use crate::domain::cart::CartLine;
use crate::domain::discount::{Discount, DiscountKind};
use crate::domain::product::Product;

/// The computed effect of one discount on one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPricing {
    /// Price after the discount, never negative.
    pub discounted_price_cents: i64,
    /// Absolute savings in the smallest currency unit.
    pub discount_amount_cents: i64,
    /// Savings as a rounded integer percentage of the original price.
    pub discount_percentage: i64,
}

impl DiscountPricing {
    /// The no-discount result for a given price.
    pub fn identity(price_cents: i64) -> Self {
        Self {
            discounted_price_cents: price_cents,
            discount_amount_cents: 0,
            discount_percentage: 0,
        }
    }
}

/// The winning discount for a product together with its computed effect.
#[derive(Debug, Clone)]
pub struct BestDiscount {
    pub discount: Discount,
    pub pricing: DiscountPricing,
}

/// A product augmented with the outcome of discount resolution.
///
/// Derived on demand and never persisted; activity windows are
/// time-dependent, so the result must be recomputed whenever displayed.
#[derive(Debug, Clone)]
pub struct PricedProduct {
    pub product: Product,
    pub pricing: DiscountPricing,
    /// The discount that produced `pricing`, when one applied.
    pub discount: Option<Discount>,
}

/// Totals for a collection of pre-priced cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of list prices times quantities.
    pub original_total_cents: i64,
    /// Savings across the whole cart.
    pub discount_amount_cents: i64,
    /// Amount actually payable.
    pub final_total_cents: i64,
    /// Cart-level savings as a rounded integer percentage.
    pub savings_percentage: i64,
}

/// Round-half-up division for non-negative operands.
fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}

/// Whether `discount` is usable at the instant `now`.
///
/// The flag and the inclusive `[starts_at, ends_at]` window must both hold.
pub fn is_discount_active(discount: &Discount, now: NaiveDateTime) -> bool {
    if !discount.is_enabled {
        return false;
    }
    discount.starts_at <= now && now <= discount.ends_at
}

/// Whether `order_cents` satisfies the discount's minimum order amount.
pub fn meets_minimum_order(order_cents: i64, discount: &Discount) -> bool {
    match discount.min_order_cents {
        Some(min) => order_cents >= min,
        None => true,
    }
}

/// Compute the effect of one discount on one price.
///
/// Inactive discounts yield the identity result, so callers may invoke this
/// without pre-filtering. Percentage amounts are rounded half-up and clamped
/// by `max_discount_cents` when set; the cap is not consulted for fixed
/// discounts, which are instead clamped to the price itself. The discounted
/// price never drops below zero, and a zero original price yields 0% rather
/// than dividing by zero.
pub fn calculate_discount(
    price_cents: i64,
    discount: &Discount,
    now: NaiveDateTime,
) -> DiscountPricing {
    if !is_discount_active(discount, now) {
        return DiscountPricing::identity(price_cents);
    }

    let amount = match discount.kind {
        DiscountKind::Percentage => {
            let raw = round_half_up(price_cents * discount.value, 100);
            match discount.max_discount_cents {
                Some(cap) if raw > cap => cap,
                _ => raw,
            }
        }
        DiscountKind::FixedAmount => discount.value.min(price_cents),
    };

    let discounted_price_cents = (price_cents - amount).max(0);
    let discount_percentage = if price_cents > 0 {
        round_half_up(amount * 100, price_cents)
    } else {
        0
    };

    DiscountPricing {
        discounted_price_cents,
        discount_amount_cents: amount,
        discount_percentage,
    }
}

/// Pick the discount with the greatest absolute savings among the active ones.
///
/// Candidates are scored in input order with a strict `>` comparison against
/// the running best, so the first discount to reach a given amount keeps
/// winning; later candidates with an equal amount do not replace it. Returns
/// `None` when no discount is active or the best amount is zero.
pub fn best_discount(
    price_cents: i64,
    discounts: &[Discount],
    now: NaiveDateTime,
) -> Option<BestDiscount> {
    let mut best: Option<BestDiscount> = None;
    let mut best_amount = 0i64;

    for discount in discounts {
        if !is_discount_active(discount, now) {
            continue;
        }

        let pricing = calculate_discount(price_cents, discount, now);
        if pricing.discount_amount_cents > best_amount {
            best_amount = pricing.discount_amount_cents;
            best = Some(BestDiscount {
                discount: discount.clone(),
                pricing,
            });
        }
    }

    best
}

/// Resolve the best discount for a product and attach the result.
pub fn price_product(product: Product, now: NaiveDateTime) -> PricedProduct {
    match best_discount(product.price_cents, &product.discounts, now) {
        Some(best) => PricedProduct {
            pricing: best.pricing,
            discount: Some(best.discount),
            product,
        },
        None => PricedProduct {
            pricing: DiscountPricing::identity(product.price_cents),
            discount: None,
            product,
        },
    }
}

/// Price every product in a collection against the same instant.
///
/// Order is preserved and products do not interact.
pub fn price_products(products: Vec<Product>, now: NaiveDateTime) -> Vec<PricedProduct> {
    products
        .into_iter()
        .map(|product| price_product(product, now))
        .collect()
}

/// Aggregate totals over pre-priced cart lines.
///
/// Each line must already carry its resolved per-unit prices; this function
/// only sums, it does not resolve discounts.
pub fn cart_totals(lines: &[CartLine]) -> CartTotals {
    let mut original_total_cents = 0i64;
    let mut final_total_cents = 0i64;

    for line in lines {
        let quantity = i64::from(line.quantity);
        original_total_cents += line.price_cents * quantity;
        final_total_cents += line.discounted_price_cents.unwrap_or(line.price_cents) * quantity;
    }

    let discount_amount_cents = original_total_cents - final_total_cents;
    let savings_percentage = if original_total_cents > 0 {
        round_half_up(discount_amount_cents * 100, original_total_cents)
    } else {
        0
    };

    CartTotals {
        original_total_cents,
        discount_amount_cents,
        final_total_cents,
        savings_percentage,
    }
}

/// Format an amount in the smallest currency unit as a fixed two-decimal
/// string, e.g. `1234` -> `"12.34"`.
///
/// Used wherever a priced result is shown to a user and for the major-unit
/// amount handed to the payment gateway.
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_discount(id: i32, kind: DiscountKind, value: i64) -> Discount {
        Discount {
            id,
            name: format!("Discount {id}"),
            description: None,
            kind,
            value,
            starts_at: datetime(2020, 1, 1),
            ends_at: datetime(2030, 1, 1),
            is_enabled: true,
            min_order_cents: None,
            max_discount_cents: None,
            usage_limit: None,
            usage_count: 0,
            created_at: datetime(2020, 1, 1),
            updated_at: datetime(2020, 1, 1),
        }
    }

    fn sample_product(id: i32, price_cents: i64, discounts: Vec<Discount>) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            sku: None,
            description: None,
            price_cents,
            currency: "UAH".to_string(),
            is_archived: false,
            discounts,
            created_at: datetime(2020, 1, 1),
            updated_at: datetime(2020, 1, 1),
        }
    }

    #[test]
    fn disabled_discount_yields_identity() {
        let mut discount = sample_discount(1, DiscountKind::Percentage, 20);
        discount.is_enabled = false;

        let result = calculate_discount(10_000, &discount, datetime(2025, 6, 1));

        assert_eq!(result, DiscountPricing::identity(10_000));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let mut discount = sample_discount(1, DiscountKind::Percentage, 10);
        discount.starts_at = datetime(2025, 1, 1);
        discount.ends_at = datetime(2025, 2, 1);

        assert!(is_discount_active(&discount, discount.starts_at));
        assert!(is_discount_active(&discount, discount.ends_at));
        assert!(!is_discount_active(
            &discount,
            discount.starts_at - Duration::milliseconds(1)
        ));
        assert!(!is_discount_active(
            &discount,
            discount.ends_at + Duration::milliseconds(1)
        ));
    }

    #[test]
    fn percentage_discount_is_rounded_half_up() {
        // 15% of 999 is 149.85, rounds to 150.
        let discount = sample_discount(1, DiscountKind::Percentage, 15);

        let result = calculate_discount(999, &discount, datetime(2025, 6, 1));

        assert_eq!(result.discount_amount_cents, 150);
        assert_eq!(result.discounted_price_cents, 849);
        assert_eq!(result.discount_percentage, 15);
    }

    #[test]
    fn percentage_discount_respects_max_cap() {
        let mut discount = sample_discount(1, DiscountKind::Percentage, 20);
        discount.max_discount_cents = Some(1_000);

        let result = calculate_discount(10_000, &discount, datetime(2025, 6, 1));

        assert_eq!(result.discount_amount_cents, 1_000);
        assert_eq!(result.discounted_price_cents, 9_000);
        assert_eq!(result.discount_percentage, 10);
    }

    #[test]
    fn max_cap_is_ignored_for_fixed_discounts() {
        let mut discount = sample_discount(1, DiscountKind::FixedAmount, 300);
        discount.max_discount_cents = Some(100);

        let result = calculate_discount(1_000, &discount, datetime(2025, 6, 1));

        assert_eq!(result.discount_amount_cents, 300);
    }

    #[test]
    fn fixed_discount_is_clamped_to_price() {
        let discount = sample_discount(1, DiscountKind::FixedAmount, 700);

        let result = calculate_discount(500, &discount, datetime(2025, 6, 1));

        assert_eq!(result.discount_amount_cents, 500);
        assert_eq!(result.discounted_price_cents, 0);
        assert_eq!(result.discount_percentage, 100);
    }

    #[test]
    fn zero_price_yields_zero_percentage() {
        let discount = sample_discount(1, DiscountKind::Percentage, 50);

        let result = calculate_discount(0, &discount, datetime(2025, 6, 1));

        assert_eq!(result.discount_amount_cents, 0);
        assert_eq!(result.discounted_price_cents, 0);
        assert_eq!(result.discount_percentage, 0);
    }

    #[test]
    fn best_discount_picks_largest_amount() {
        let percentage = sample_discount(1, DiscountKind::Percentage, 10);
        let fixed = sample_discount(2, DiscountKind::FixedAmount, 150);

        let best = best_discount(1_000, &[percentage, fixed], datetime(2025, 6, 1))
            .expect("a discount should win");

        assert_eq!(best.discount.id, 2);
        assert_eq!(best.pricing.discount_amount_cents, 150);
        assert_eq!(best.pricing.discounted_price_cents, 850);
    }

    #[test]
    fn best_discount_ties_go_to_first_in_input_order() {
        // Both produce an amount of 100 on a price of 1000.
        let percentage = sample_discount(1, DiscountKind::Percentage, 10);
        let fixed = sample_discount(2, DiscountKind::FixedAmount, 100);

        let best = best_discount(
            1_000,
            &[percentage.clone(), fixed.clone()],
            datetime(2025, 6, 1),
        )
        .expect("a discount should win");
        assert_eq!(best.discount.id, 1);

        let best = best_discount(1_000, &[fixed, percentage], datetime(2025, 6, 1))
            .expect("a discount should win");
        assert_eq!(best.discount.id, 2);
    }

    #[test]
    fn best_discount_skips_inactive_candidates() {
        let mut expired = sample_discount(1, DiscountKind::FixedAmount, 500);
        expired.ends_at = datetime(2021, 1, 1);
        let active = sample_discount(2, DiscountKind::FixedAmount, 100);

        let best = best_discount(1_000, &[expired, active], datetime(2025, 6, 1))
            .expect("the active discount should win");

        assert_eq!(best.discount.id, 2);
    }

    #[test]
    fn best_discount_returns_none_without_active_candidates() {
        let mut disabled = sample_discount(1, DiscountKind::Percentage, 50);
        disabled.is_enabled = false;

        assert!(best_discount(1_000, &[], datetime(2025, 6, 1)).is_none());
        assert!(best_discount(1_000, &[disabled], datetime(2025, 6, 1)).is_none());
    }

    #[test]
    fn best_discount_returns_none_when_best_amount_is_zero() {
        let discount = sample_discount(1, DiscountKind::FixedAmount, 0);

        assert!(best_discount(1_000, &[discount], datetime(2025, 6, 1)).is_none());
    }

    #[test]
    fn best_discount_does_not_mutate_candidates() {
        let discounts = vec![
            sample_discount(1, DiscountKind::Percentage, 10),
            sample_discount(2, DiscountKind::FixedAmount, 150),
        ];
        let before: Vec<i32> = discounts.iter().map(|d| d.usage_count).collect();
        let values: Vec<i64> = discounts.iter().map(|d| d.value).collect();

        let _ = best_discount(1_000, &discounts, datetime(2025, 6, 1));

        assert_eq!(
            discounts.iter().map(|d| d.usage_count).collect::<Vec<_>>(),
            before
        );
        assert_eq!(discounts.iter().map(|d| d.value).collect::<Vec<_>>(), values);
    }

    #[test]
    fn price_product_without_discounts_yields_identity() {
        let product = sample_product(1, 2_500, Vec::new());

        let priced = price_product(product, datetime(2025, 6, 1));

        assert_eq!(priced.pricing, DiscountPricing::identity(2_500));
        assert!(priced.discount.is_none());
    }

    #[test]
    fn price_product_attaches_winning_discount() {
        let product = sample_product(
            1,
            1_000,
            vec![
                sample_discount(1, DiscountKind::Percentage, 10),
                sample_discount(2, DiscountKind::FixedAmount, 150),
            ],
        );

        let priced = price_product(product, datetime(2025, 6, 1));

        assert_eq!(priced.pricing.discounted_price_cents, 850);
        assert_eq!(priced.pricing.discount_amount_cents, 150);
        assert_eq!(priced.discount.as_ref().map(|d| d.id), Some(2));
    }

    #[test]
    fn price_product_is_idempotent_for_a_fixed_instant() {
        let now = datetime(2025, 6, 1);
        let product = sample_product(
            1,
            1_000,
            vec![sample_discount(1, DiscountKind::Percentage, 25)],
        );

        let first = price_product(product.clone(), now);
        let second = price_product(product, now);

        assert_eq!(first.pricing, second.pricing);
        assert_eq!(
            first.discount.as_ref().map(|d| d.id),
            second.discount.as_ref().map(|d| d.id)
        );
    }

    #[test]
    fn price_products_preserves_order() {
        let now = datetime(2025, 6, 1);
        let products = vec![
            sample_product(3, 1_000, Vec::new()),
            sample_product(1, 2_000, Vec::new()),
            sample_product(2, 3_000, Vec::new()),
        ];

        let priced = price_products(products, now);

        let ids: Vec<i32> = priced.iter().map(|p| p.product.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn cart_totals_aggregates_pre_priced_lines() {
        let lines = vec![
            CartLine {
                product_id: 1,
                price_cents: 1_000,
                discounted_price_cents: Some(800),
                quantity: 2,
            },
            CartLine {
                product_id: 2,
                price_cents: 500,
                discounted_price_cents: None,
                quantity: 1,
            },
        ];

        let totals = cart_totals(&lines);

        assert_eq!(totals.original_total_cents, 2_500);
        assert_eq!(totals.discount_amount_cents, 400);
        assert_eq!(totals.final_total_cents, 2_100);
        assert_eq!(totals.savings_percentage, 16);
    }

    #[test]
    fn cart_totals_of_empty_cart_are_zero() {
        let totals = cart_totals(&[]);

        assert_eq!(totals.original_total_cents, 0);
        assert_eq!(totals.discount_amount_cents, 0);
        assert_eq!(totals.final_total_cents, 0);
        assert_eq!(totals.savings_percentage, 0);
    }

    #[test]
    fn meets_minimum_order_defaults_to_true() {
        let discount = sample_discount(1, DiscountKind::Percentage, 10);

        assert!(meets_minimum_order(1, &discount));
    }

    #[test]
    fn meets_minimum_order_compares_inclusively() {
        let mut discount = sample_discount(1, DiscountKind::Percentage, 10);
        discount.min_order_cents = Some(5_000);

        assert!(meets_minimum_order(5_000, &discount));
        assert!(!meets_minimum_order(4_999, &discount));
    }

    #[test]
    fn format_cents_pads_fractional_part() {
        assert_eq!(format_cents(1_234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
    }
}
