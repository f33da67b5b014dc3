//! Pricing
//!
//! Checked money arithmetic shared by basket lines and baskets.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating costs.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A multiplication left the representable decimal range.
    #[error("cost calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the undiscounted cost of `count` units at `price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product cannot be represented.
pub fn line_subtotal<'a>(
    price: &Money<'a, Currency>,
    count: usize,
) -> Result<Money<'a, Currency>, PricingError> {
    let amount = price
        .amount()
        .checked_mul(Decimal::from(count))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_decimal(amount, price.currency()))
}

/// Scales a cost by a ratio, e.g. `0.75` keeps three quarters of the cost.
pub fn apply_ratio<'a>(cost: &Money<'a, Currency>, ratio: Decimal) -> Money<'a, Currency> {
    let amount = Percentage::from(ratio) * *cost.amount();

    Money::from_decimal(amount, cost.currency())
}

/// Sums a sequence of costs, starting from zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Money`]: a cost was in a different currency.
pub fn sum<'a>(
    costs: impl IntoIterator<Item = Money<'a, Currency>>,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let total = costs
        .into_iter()
        .try_fold(Money::from_major(0, currency), |acc, cost| acc.add(cost))?;

    Ok(total)
}
