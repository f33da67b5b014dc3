//! Basket Operations
//!
//! Mutations expressed as values, so they can be scripted, logged and replayed. Coupons carried by
//! an operation have a runtime scope; applying the operation checks it.

use std::fmt;

use crate::{coupons::Coupon, items::Item};

/// A single basket mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum BasketOperation<'a> {
    /// Add `count` units of `item`, optionally replacing the line's item coupon.
    Add {
        /// Item to add
        item: Item<'a>,

        /// Units to add
        count: usize,

        /// Coupon for the line; `None` keeps the existing one
        coupon: Option<Coupon>,
    },

    /// Remove up to `count` units of `item`.
    Remove {
        /// Item to remove
        item: Item<'a>,

        /// Units to remove
        count: usize,
    },

    /// Set the number of units of `item`; zero removes the line.
    SetCount {
        /// Item to update
        item: Item<'a>,

        /// New unit count
        count: usize,
    },

    /// Replace the basket coupon; `None` clears it.
    SetCoupon(Option<Coupon>),
}

impl<'a> BasketOperation<'a> {
    /// Add a single unit of `item` without touching its coupon.
    pub fn add(item: Item<'a>) -> Self {
        BasketOperation::Add {
            item,
            count: 1,
            coupon: None,
        }
    }

    /// Remove a single unit of `item`.
    pub fn remove(item: Item<'a>) -> Self {
        BasketOperation::Remove { item, count: 1 }
    }

    /// Short name of the operation, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BasketOperation::Add { .. } => "add",
            BasketOperation::Remove { .. } => "remove",
            BasketOperation::SetCount { .. } => "set_count",
            BasketOperation::SetCoupon(_) => "set_coupon",
        }
    }
}

impl fmt::Display for BasketOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasketOperation::Add { item, count, .. }
            | BasketOperation::Remove { item, count }
            | BasketOperation::SetCount { item, count } => {
                write!(f, "{} {} x{count}", self.kind(), item.name())
            }
            BasketOperation::SetCoupon(Some(coupon)) => {
                write!(f, "{} {}", self.kind(), coupon.scope())
            }
            BasketOperation::SetCoupon(None) => write!(f, "{} none", self.kind()),
        }
    }
}
