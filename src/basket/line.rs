//! Basket Lines

use rusty_money::{Money, iso::Currency};

use crate::{
    coupons::{Coupon, CouponError, Discount, ItemCoupon},
    items::Item,
    pricing::{PricingError, line_subtotal},
};

/// A quantity of one item, optionally discounted by an item coupon.
#[derive(Clone, Debug, PartialEq)]
pub struct BasketLine<'a> {
    item: Item<'a>,
    count: usize,
    coupon: Option<ItemCoupon>,
}

impl<'a> BasketLine<'a> {
    /// Create a new line.
    pub fn new(item: Item<'a>, count: usize, coupon: Option<ItemCoupon>) -> Self {
        Self {
            item,
            count,
            coupon,
        }
    }

    /// Returns the item on this line
    pub fn item(&self) -> &Item<'a> {
        &self.item
    }

    /// Returns the number of units on this line
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the item coupon, if any
    pub fn coupon(&self) -> Option<&ItemCoupon> {
        self.coupon.as_ref()
    }

    /// Replace the item coupon. `None` clears it.
    pub fn set_coupon(&mut self, coupon: Option<ItemCoupon>) {
        self.coupon = coupon;
    }

    /// Replace the item coupon from a coupon of unknown scope.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::TypeMismatch`] if the coupon is basket-scoped. The line is left
    /// unchanged in that case.
    pub fn try_set_coupon(&mut self, coupon: Option<Coupon>) -> Result<(), CouponError> {
        let coupon = coupon.map(ItemCoupon::try_from).transpose()?;

        self.set_coupon(coupon);

        Ok(())
    }

    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    /// Add `count` units.
    pub fn increase(&mut self, count: usize) {
        self.count = self.count.saturating_add(count);
    }

    /// Take away `count` units, stopping at zero.
    pub fn decrease(&mut self, count: usize) {
        self.count = self.count.saturating_sub(count);
    }

    /// Cost of the line: unit price times count, then the item coupon if present.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the subtotal cannot be represented.
    pub fn cost(&self) -> Result<Money<'a, Currency>, PricingError> {
        let subtotal = line_subtotal(self.item.price(), self.count)?;

        Ok(match &self.coupon {
            Some(coupon) => coupon.apply(&subtotal),
            None => subtotal,
        })
    }
}

impl<'a> From<Item<'a>> for BasketLine<'a> {
    fn from(item: Item<'a>) -> Self {
        Self::new(item, 1, None)
    }
}
