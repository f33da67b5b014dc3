//! Basket History prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError, BasketLine},
    coupons::{BasketCoupon, Coupon, CouponError, CouponScope, Discount, ItemCoupon},
    fixtures::{Fixture, FixtureError, sessions::SessionStep},
    history::BasketHistory,
    items::Item,
    operations::BasketOperation,
    pricing::PricingError,
    report::ReportError,
};
