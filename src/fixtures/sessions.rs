//! Session Fixtures
//!
//! A session is a scripted sequence of basket operations, undos and redos.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    basket::BasketError,
    coupons::Coupon,
    fixtures::FixtureError,
    history::BasketHistory,
    items::Item,
    operations::BasketOperation,
};

/// Wrapper for session steps in YAML
#[derive(Debug, Deserialize)]
pub struct SessionFixture {
    /// Steps in the order they run
    pub steps: Vec<StepFixture>,
}

/// A session step from YAML, referencing items and coupons by key
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepFixture {
    /// Add units of an item
    Add {
        /// Item key
        item: String,

        /// Units to add
        #[serde(default = "one")]
        count: usize,

        /// Item coupon key
        #[serde(default)]
        coupon: Option<String>,
    },

    /// Remove units of an item
    Remove {
        /// Item key
        item: String,

        /// Units to remove
        #[serde(default = "one")]
        count: usize,
    },

    /// Set the unit count of an item
    SetCount {
        /// Item key
        item: String,

        /// New unit count
        count: usize,
    },

    /// Replace the basket coupon
    SetCoupon {
        /// Basket coupon key; absent clears the coupon
        #[serde(default)]
        coupon: Option<String>,
    },

    /// Step back one snapshot
    Undo,

    /// Step forward one snapshot
    Redo,
}

fn one() -> usize {
    1
}

impl StepFixture {
    /// Resolve item and coupon keys into a runnable step.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ItemNotFound`] or [`FixtureError::CouponNotFound`] for unknown keys.
    pub fn resolve<'a>(
        self,
        items: &FxHashMap<String, Item<'a>>,
        coupons: &FxHashMap<String, Coupon>,
    ) -> Result<SessionStep<'a>, FixtureError> {
        let item = |key: &str| {
            items
                .get(key)
                .cloned()
                .ok_or_else(|| FixtureError::ItemNotFound(key.to_string()))
        };

        let coupon = |key: Option<String>| {
            key.map(|key| {
                coupons
                    .get(&key)
                    .cloned()
                    .ok_or(FixtureError::CouponNotFound(key))
            })
            .transpose()
        };

        let operation = match self {
            StepFixture::Add {
                item: key,
                count,
                coupon: coupon_key,
            } => BasketOperation::Add {
                item: item(&key)?,
                count,
                coupon: coupon(coupon_key)?,
            },
            StepFixture::Remove { item: key, count } => BasketOperation::Remove {
                item: item(&key)?,
                count,
            },
            StepFixture::SetCount { item: key, count } => BasketOperation::SetCount {
                item: item(&key)?,
                count,
            },
            StepFixture::SetCoupon { coupon: coupon_key } => {
                BasketOperation::SetCoupon(coupon(coupon_key)?)
            }
            StepFixture::Undo => return Ok(SessionStep::Undo),
            StepFixture::Redo => return Ok(SessionStep::Redo),
        };

        Ok(SessionStep::Apply(operation))
    }
}

/// A runnable session step.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStep<'a> {
    /// Apply an operation in a new snapshot
    Apply(BasketOperation<'a>),

    /// Step back one snapshot
    Undo,

    /// Step forward one snapshot
    Redo,
}

impl<'a> SessionStep<'a> {
    /// Run the step against a history.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError`] if an operation is rejected.
    pub fn run(&self, history: &mut BasketHistory<'a>) -> Result<(), BasketError> {
        match self {
            SessionStep::Apply(operation) => {
                history.apply(operation.clone())?;
            }
            SessionStep::Undo => {
                history.undo();
            }
            SessionStep::Redo => {
                history.redo();
            }
        }

        Ok(())
    }
}
