//! Basket

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    coupons::{BasketCoupon, Coupon, CouponError, Discount, ItemCoupon},
    items::Item,
    operations::BasketOperation,
    pricing::{PricingError, sum},
    report::{self, ReportError},
};

pub mod line;

pub use line::BasketLine;

/// Errors related to basket mutation or totals.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// A coupon was invalid or had the wrong scope.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// An item's currency differs from the basket currency.
    #[error("Item {item} has currency {found}, but basket has currency {expected}")]
    CurrencyMismatch {
        /// Name of the rejected item
        item: String,

        /// Basket currency code
        expected: &'static str,

        /// Item currency code
        found: &'static str,
    },

    /// Error calculating a cost.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// An ordered collection of basket lines with an optional basket coupon.
///
/// Lines keep insertion order and there is at most one line per item. Cloning a basket copies
/// every line, so a clone can be mutated without affecting the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Basket<'a> {
    lines: Vec<BasketLine<'a>>,
    coupon: Option<BasketCoupon>,
    currency: &'static Currency,
}

impl<'a> Basket<'a> {
    /// Create a new empty basket in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Basket {
            lines: Vec::new(),
            coupon: None,
            currency,
        }
    }

    /// Returns the basket coupon, if any
    pub fn coupon(&self) -> Option<&BasketCoupon> {
        self.coupon.as_ref()
    }

    /// Replace the basket coupon. `None` clears it.
    pub fn set_coupon(&mut self, coupon: Option<BasketCoupon>) {
        self.coupon = coupon;
    }

    /// Replace the basket coupon from a coupon of unknown scope.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::TypeMismatch`] if the coupon is item-scoped. The basket is left
    /// unchanged in that case.
    pub fn try_set_coupon(&mut self, coupon: Option<Coupon>) -> Result<(), CouponError> {
        let coupon = coupon.map(BasketCoupon::try_from).transpose()?;

        self.set_coupon(coupon);

        Ok(())
    }

    /// Index of the line holding `item`, if any.
    pub fn find_line_index(&self, item: &Item<'_>) -> Option<usize> {
        self.lines.iter().position(|line| line.item() == item)
    }

    /// The line holding `item`, if any.
    pub fn find_line(&self, item: &Item<'_>) -> Option<&BasketLine<'a>> {
        self.lines.iter().find(|line| line.item() == item)
    }

    /// Add `count` units of `item`.
    ///
    /// An existing line for the item grows; otherwise a new line is appended. A `coupon`
    /// replaces the line's item coupon, while `None` leaves the current one in place. Adding
    /// zero units of an item that is not in the basket creates no line.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::CurrencyMismatch`] if the item is priced in another currency.
    pub fn add(
        &mut self,
        item: Item<'a>,
        count: usize,
        coupon: Option<ItemCoupon>,
    ) -> Result<(), BasketError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(BasketError::CurrencyMismatch {
                item: item.name().to_string(),
                expected: self.currency.iso_alpha_code,
                found: item_currency.iso_alpha_code,
            });
        }

        let line = match self.find_line_index(&item) {
            Some(idx) => self.lines.get_mut(idx),
            None if count == 0 => None,
            None => {
                self.lines.push(BasketLine::new(item, 0, None));
                self.lines.last_mut()
            }
        };

        if let Some(line) = line {
            line.increase(count);

            if coupon.is_some() {
                line.set_coupon(coupon);
            }
        }

        Ok(())
    }

    /// Remove up to `count` units of `item`, dropping the line once it is empty.
    ///
    /// Removing an item that is not in the basket does nothing.
    pub fn remove(&mut self, item: &Item<'_>, count: usize) {
        let Some(idx) = self.find_line_index(item) else {
            return;
        };

        if let Some(line) = self.lines.get_mut(idx) {
            line.decrease(count);

            if line.count() == 0 {
                self.lines.remove(idx);
            }
        }
    }

    /// Set the number of units of `item`. Zero removes the line.
    ///
    /// Does nothing if the item is not in the basket.
    pub fn set_count(&mut self, item: &Item<'_>, count: usize) {
        let Some(idx) = self.find_line_index(item) else {
            return;
        };

        if count == 0 {
            self.lines.remove(idx);
        } else if let Some(line) = self.lines.get_mut(idx) {
            line.set_count(count);
        }
    }

    /// Apply an operation to the basket.
    ///
    /// Coupon scopes and currencies are checked before anything changes, so a failed
    /// operation leaves the basket as it was.
    ///
    /// # Errors
    ///
    /// - [`BasketError::Coupon`]: a coupon has the wrong scope for its target.
    /// - [`BasketError::CurrencyMismatch`]: an added item is priced in another currency.
    pub fn apply(&mut self, operation: BasketOperation<'a>) -> Result<(), BasketError> {
        match operation {
            BasketOperation::Add {
                item,
                count,
                coupon,
            } => {
                let coupon = coupon.map(ItemCoupon::try_from).transpose()?;

                self.add(item, count, coupon)?;
            }
            BasketOperation::Remove { item, count } => self.remove(&item, count),
            BasketOperation::SetCount { item, count } => self.set_count(&item, count),
            BasketOperation::SetCoupon(coupon) => self.try_set_coupon(coupon)?,
        }

        Ok(())
    }

    /// Sum of the line costs, before the basket coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line cost cannot be calculated.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        let costs = self
            .lines
            .iter()
            .map(BasketLine::cost)
            .collect::<Result<Vec<_>, _>>()?;

        sum(costs, self.currency)
    }

    /// Total cost: the subtotal, discounted once by the basket coupon if present.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line cost cannot be calculated.
    pub fn total_cost(&self) -> Result<Money<'a, Currency>, PricingError> {
        let subtotal = self.subtotal()?;

        Ok(match &self.coupon {
            Some(coupon) => coupon.apply(&subtotal),
            None => subtotal,
        })
    }

    /// Render the basket as a plain text report.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if a cost cannot be calculated.
    pub fn report(&self) -> Result<String, ReportError> {
        report::render(self)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &BasketLine<'a>> {
        self.lines.iter()
    }

    /// The lines in insertion order.
    pub fn lines(&self) -> &[BasketLine<'a>] {
        &self.lines
    }

    /// Get the number of lines in the basket.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the basket.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
