//! Coupon Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponScope},
    fixtures::FixtureError,
};

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Map of coupon key -> coupon fixture
    pub coupons: FxHashMap<String, CouponFixture>,
}

/// Coupon Fixture
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Where the coupon may be attached
    pub scope: ScopeFixture,

    /// Coupon name
    pub name: String,

    /// Payable ratio (e.g., "0.75" or "75%")
    pub ratio: String,
}

/// Coupon scope in YAML
#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeFixture {
    /// Item-scoped coupon
    Item,

    /// Basket-scoped coupon
    Basket,
}

impl From<ScopeFixture> for CouponScope {
    fn from(scope: ScopeFixture) -> Self {
        match scope {
            ScopeFixture::Item => CouponScope::Item,
            ScopeFixture::Basket => CouponScope::Basket,
        }
    }
}

impl TryFrom<CouponFixture> for Coupon {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let ratio = parse_ratio(&fixture.ratio)?;

        Ok(Coupon::new(fixture.scope.into(), fixture.name, ratio)?)
    }
}

/// Parse ratio string (e.g., "75%" or "0.75") into a decimal ratio
///
/// Accepts two formats:
/// - Percentage format: "75%" for 0.75
/// - Decimal format: "0.75"
///
/// Range checking is left to coupon construction.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as a decimal.
pub fn parse_ratio(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        let value = percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidRatio(s.to_string()))?;

        value
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(|| FixtureError::InvalidRatio(s.to_string()))
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidRatio(s.to_string()))
    }
}
