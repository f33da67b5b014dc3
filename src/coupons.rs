//! Coupons
//!
//! Named percentage discounts. An [`ItemCoupon`] may only be attached to a basket line and a
//! [`BasketCoupon`] only to a whole basket. The [`Coupon`] union carries either kind where the
//! scope is only known at runtime, and converting it back into a scoped coupon is where a scope
//! mismatch is detected.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::pricing::apply_ratio;

/// Errors related to coupon construction or attachment.
#[derive(Debug, Error, PartialEq)]
pub enum CouponError {
    /// The discount ratio is outside `[0, 1]`.
    #[error("invalid coupon ratio: {0}")]
    InvalidRatio(Decimal),

    /// A coupon of one scope was supplied where the other scope is required.
    #[error("expected {expected} coupon, got {found} coupon")]
    TypeMismatch {
        /// Scope required by the receiver
        expected: CouponScope,

        /// Scope of the supplied coupon
        found: CouponScope,
    },
}

/// Where a coupon may be attached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CouponScope {
    /// Valid on a single basket line
    Item,

    /// Valid on the whole basket
    Basket,
}

impl fmt::Display for CouponScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponScope::Item => f.write_str("item"),
            CouponScope::Basket => f.write_str("basket"),
        }
    }
}

/// Shared behaviour of scoped coupons.
pub trait Discount {
    /// Coupon name
    fn name(&self) -> &str;

    /// Fraction of the cost that remains payable, in `[0, 1]`.
    fn ratio(&self) -> Decimal;

    /// Discount a cost by this coupon's ratio.
    fn apply<'a>(&self, cost: &Money<'a, Currency>) -> Money<'a, Currency> {
        apply_ratio(cost, self.ratio())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Terms {
    name: String,
    ratio: Decimal,
}

impl Terms {
    fn new(name: impl Into<String>, ratio: Decimal) -> Result<Self, CouponError> {
        if ratio < Decimal::ZERO || ratio > Decimal::ONE {
            return Err(CouponError::InvalidRatio(ratio));
        }

        Ok(Self {
            name: name.into(),
            ratio,
        })
    }
}

/// A discount applied to the subtotal of one basket line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCoupon(Terms);

impl ItemCoupon {
    /// Create a new item coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidRatio`] if `ratio` is outside `[0, 1]`.
    pub fn new(name: impl Into<String>, ratio: Decimal) -> Result<Self, CouponError> {
        Terms::new(name, ratio).map(Self)
    }
}

impl Discount for ItemCoupon {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn ratio(&self) -> Decimal {
        self.0.ratio
    }
}

impl fmt::Display for ItemCoupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item coupon name: {}", self.0.name)?;
        writeln!(f, "Item coupon ratio: {}", self.0.ratio.normalize())
    }
}

/// A discount applied once to the summed cost of a basket.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketCoupon(Terms);

impl BasketCoupon {
    /// Create a new basket coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidRatio`] if `ratio` is outside `[0, 1]`.
    pub fn new(name: impl Into<String>, ratio: Decimal) -> Result<Self, CouponError> {
        Terms::new(name, ratio).map(Self)
    }
}

impl Discount for BasketCoupon {
    fn name(&self) -> &str {
        &self.0.name
    }

    fn ratio(&self) -> Decimal {
        self.0.ratio
    }
}

impl fmt::Display for BasketCoupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basket coupon name: {}", self.0.name)?;
        writeln!(f, "Basket coupon ratio: {}", self.0.ratio.normalize())
    }
}

/// A coupon of either scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Coupon {
    /// Item-scoped coupon
    Item(ItemCoupon),

    /// Basket-scoped coupon
    Basket(BasketCoupon),
}

impl Coupon {
    /// Create a coupon of the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidRatio`] if `ratio` is outside `[0, 1]`.
    pub fn new(
        scope: CouponScope,
        name: impl Into<String>,
        ratio: Decimal,
    ) -> Result<Self, CouponError> {
        match scope {
            CouponScope::Item => ItemCoupon::new(name, ratio).map(Coupon::Item),
            CouponScope::Basket => BasketCoupon::new(name, ratio).map(Coupon::Basket),
        }
    }

    /// Returns where this coupon may be attached.
    pub fn scope(&self) -> CouponScope {
        match self {
            Coupon::Item(_) => CouponScope::Item,
            Coupon::Basket(_) => CouponScope::Basket,
        }
    }
}

impl From<ItemCoupon> for Coupon {
    fn from(coupon: ItemCoupon) -> Self {
        Coupon::Item(coupon)
    }
}

impl From<BasketCoupon> for Coupon {
    fn from(coupon: BasketCoupon) -> Self {
        Coupon::Basket(coupon)
    }
}

impl TryFrom<Coupon> for ItemCoupon {
    type Error = CouponError;

    fn try_from(coupon: Coupon) -> Result<Self, Self::Error> {
        match coupon {
            Coupon::Item(coupon) => Ok(coupon),
            Coupon::Basket(_) => Err(CouponError::TypeMismatch {
                expected: CouponScope::Item,
                found: CouponScope::Basket,
            }),
        }
    }
}

impl TryFrom<Coupon> for BasketCoupon {
    type Error = CouponError;

    fn try_from(coupon: Coupon) -> Result<Self, Self::Error> {
        match coupon {
            Coupon::Basket(coupon) => Ok(coupon),
            Coupon::Item(_) => Err(CouponError::TypeMismatch {
                expected: CouponScope::Basket,
                found: CouponScope::Item,
            }),
        }
    }
}
