use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLine;
use crate::pricing::{self, format_cents};
use crate::services::{ServiceError, ServiceResult};

/// JSON payload accepted by the cart totals endpoint.
#[derive(Debug, Deserialize)]
pub struct CartTotalsRequest {
    /// Pre-priced cart lines in display order.
    pub lines: Vec<CartLine>,
}

/// Totals for a cart, with formatted amounts for display and the major-unit
/// amount handed to the payment gateway.
#[derive(Debug, Serialize)]
pub struct CartTotalsView {
    pub original_total_cents: i64,
    pub original_total_formatted: String,
    pub discount_amount_cents: i64,
    pub final_total_cents: i64,
    pub final_total_formatted: String,
    pub savings_percentage: i64,
    /// `final_total_cents` expressed in major units for the gateway boundary.
    pub payment_amount: String,
}

/// Validates the submitted lines and aggregates their totals.
///
/// Lines must already carry their resolved prices; this service does not
/// re-resolve discounts (re-pricing on read is the catalog path's job).
pub fn calculate_totals(request: CartTotalsRequest) -> ServiceResult<CartTotalsView> {
    for (index, line) in request.lines.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(ServiceError::Form(format!(
                "line {index} has non-positive quantity"
            )));
        }
        if line.price_cents < 0 {
            return Err(ServiceError::Form(format!(
                "line {index} has a negative price"
            )));
        }
        if let Some(discounted) = line.discounted_price_cents {
            if discounted < 0 || discounted > line.price_cents {
                return Err(ServiceError::Form(format!(
                    "line {index} has a discounted price outside [0, price]"
                )));
            }
        }
    }

    let totals = pricing::cart_totals(&request.lines);

    Ok(CartTotalsView {
        original_total_cents: totals.original_total_cents,
        original_total_formatted: format_cents(totals.original_total_cents),
        discount_amount_cents: totals.discount_amount_cents,
        final_total_cents: totals.final_total_cents,
        final_total_formatted: format_cents(totals.final_total_cents),
        savings_percentage: totals.savings_percentage,
        payment_amount: format_cents(totals.final_total_cents),
    })
}
