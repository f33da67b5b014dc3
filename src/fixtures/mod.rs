//! Fixtures
//!
//! YAML-described item catalogs, coupons and scripted sessions.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::BasketError,
    coupons::{Coupon, CouponError},
    fixtures::{
        coupons::CouponsFixture,
        items::ItemsFixture,
        sessions::{SessionFixture, SessionStep},
    },
    history::BasketHistory,
    items::Item,
};

pub mod coupons;
pub mod items;
pub mod sessions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid ratio format
    #[error("Invalid ratio format: {0}")]
    InvalidRatio(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Currency mismatch between items
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No items loaded yet
    #[error("No items loaded yet; currency unknown")]
    NoCurrency,

    /// Not enough steps in the session
    #[error("Not enough steps in session, available: {available}, requested: {requested}")]
    NotEnoughSteps {
        /// Number of steps defined in the fixture
        available: usize,
        /// Number of steps requested
        requested: usize,
    },

    /// Invalid coupon definition
    #[error("Invalid coupon: {0}")]
    Coupon(#[from] CouponError),

    /// A session step was rejected by the basket
    #[error("Session step failed: {0}")]
    Basket(#[from] BasketError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Items by key
    items: FxHashMap<String, Item<'a>>,

    /// Coupons by key
    coupons: FxHashMap<String, Coupon>,

    /// Resolved session steps
    steps: Vec<SessionStep<'a>>,

    /// Currency shared by every item
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            items: FxHashMap::default(),
            coupons: FxHashMap::default(),
            steps: Vec::new(),
            currency: None,
        }
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "Reading fixture");

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ItemsFixture = serde_norway::from_str(&self.read("items", name)?)?;

        for (key, item_fixture) in fixture.items {
            // Parse to get currency first (before creating Item)
            let (_amount, currency) = items::parse_price(&item_fixture.price)?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.items.insert(key, Item::try_from(item_fixture)?);
        }

        Ok(self)
    }

    /// Load coupons from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a ratio is invalid.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CouponsFixture = serde_norway::from_str(&self.read("coupons", name)?)?;

        for (key, coupon_fixture) in fixture.coupons {
            self.coupons.insert(key, Coupon::try_from(coupon_fixture)?);
        }

        Ok(self)
    }

    /// Load a session from a YAML fixture file
    ///
    /// Items and coupons referenced by the session must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a step references an
    /// unknown item or coupon.
    pub fn load_session(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: SessionFixture = serde_norway::from_str(&self.read("sessions", name)?)?;

        for step in fixture.steps {
            let step = step.resolve(&self.items, &self.coupons)?;

            self.steps.push(step);
        }

        Ok(self)
    }

    /// Load a complete fixture set (items, coupons, and session with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_items(name)?
            .load_coupons(name)?
            .load_session(name)?;

        Ok(fixture)
    }

    /// Get an item by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn item(&self, key: &str) -> Result<&Item<'a>, FixtureError> {
        self.items
            .get(key)
            .ok_or_else(|| FixtureError::ItemNotFound(key.to_string()))
    }

    /// Get a coupon by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon(&self, key: &str) -> Result<&Coupon, FixtureError> {
        self.coupons
            .get(key)
            .ok_or_else(|| FixtureError::CouponNotFound(key.to_string()))
    }

    /// Get the resolved session steps
    pub fn steps(&self) -> &[SessionStep<'a>] {
        &self.steps
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no items have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Create an empty history in the fixture currency
    ///
    /// # Errors
    ///
    /// Returns an error if no items have been loaded yet.
    pub fn history(&self) -> Result<BasketHistory<'a>, FixtureError> {
        Ok(BasketHistory::new(self.currency()?))
    }

    /// Run the first `n` session steps (or all of them) against a history
    ///
    /// # Errors
    ///
    /// Returns an error if more steps are requested than the session holds, or the first
    /// error raised by a step. Steps before the failing one stay applied.
    pub fn replay(
        &self,
        history: &mut BasketHistory<'a>,
        n: Option<usize>,
    ) -> Result<(), FixtureError> {
        if let Some(n) = n
            && n > self.steps.len()
        {
            return Err(FixtureError::NotEnoughSteps {
                requested: n,
                available: self.steps.len(),
            });
        }

        for step in self.steps.iter().take(n.unwrap_or(self.steps.len())) {
            step.run(history)?;
        }

        debug!(position = history.position(), "Replayed session");

        Ok(())
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusty_money::{Money, iso::GBP};
    use testresult::TestResult;

    use crate::coupons::CouponScope;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_items_coupons_and_session() -> TestResult {
        let mut fixture = Fixture::new();

        fixture
            .load_items("kitchen")?
            .load_coupons("kitchen")?
            .load_session("kitchen")?;

        assert_eq!(fixture.items.len(), 2);
        assert_eq!(
            fixture.item("teapot")?,
            &Item::new("Teapot", Money::from_major(1000, GBP))
        );

        assert_eq!(fixture.coupons.len(), 2);
        assert_eq!(fixture.coupon("half_price")?.scope(), CouponScope::Item);
        assert_eq!(
            fixture.coupon("christmas_sale")?.scope(),
            CouponScope::Basket
        );

        assert_eq!(fixture.steps().len(), 7);
        assert_eq!(fixture.currency()?, GBP);

        Ok(())
    }

    #[test]
    fn fixture_replay_runs_all_steps() -> TestResult {
        let fixture = Fixture::from_set("kitchen")?;
        let mut history = fixture.history()?;

        fixture.replay(&mut history, None)?;

        assert_eq!(history.position(), 7);
        assert_eq!(history.total_cost()?, Money::from_major(5625, GBP));

        Ok(())
    }

    #[test]
    fn fixture_replay_runs_first_n_steps() -> TestResult {
        let fixture = Fixture::from_set("kitchen")?;
        let mut history = fixture.history()?;

        fixture.replay(&mut history, Some(3))?;

        assert_eq!(history.position(), 3);
        assert_eq!(history.total_cost()?, Money::from_major(4000, GBP));

        Ok(())
    }

    #[test]
    fn fixture_replay_rejects_request_for_too_many_steps() -> TestResult {
        let fixture = Fixture::from_set("kitchen")?;
        let mut history = fixture.history()?;

        let result = fixture.replay(&mut history, Some(100));

        assert!(matches!(
            result,
            Err(FixtureError::NotEnoughSteps {
                requested: 100,
                available: 7
            })
        ));
        assert_eq!(history.position(), 0);

        Ok(())
    }

    #[test]
    fn fixture_replay_stops_at_scope_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "items",
            "wrong_scope",
            "items:\n  mug:\n    name: Mug\n    price: 4.50 GBP\n",
        )?;

        write_fixture(
            dir.path(),
            "coupons",
            "wrong_scope",
            "coupons:\n  sale:\n    scope: basket\n    name: Sale\n    ratio: 90%\n",
        )?;

        write_fixture(
            dir.path(),
            "sessions",
            "wrong_scope",
            "steps:\n  - op: add\n    item: mug\n  - op: add\n    item: mug\n    coupon: sale\n  - op: add\n    item: mug\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture
            .load_items("wrong_scope")?
            .load_coupons("wrong_scope")?
            .load_session("wrong_scope")?;

        let mut history = fixture.history()?;
        let result = fixture.replay(&mut history, None);

        assert!(matches!(
            result,
            Err(FixtureError::Basket(BasketError::Coupon(
                CouponError::TypeMismatch { .. }
            )))
        ));
        assert_eq!(history.position(), 1);
        assert_eq!(history.len(), 2);

        Ok(())
    }

    #[test]
    fn fixture_load_items_rejects_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "items",
            "usd_set",
            "items:\n  apple:\n    name: Apple\n    price: 1.00 USD\n",
        )?;

        write_fixture(
            dir.path(),
            "items",
            "gbp_set",
            "items:\n  banana:\n    name: Banana\n    price: 1.00 GBP\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_items("usd_set")?;

        let result = fixture.load_items("gbp_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_session_with_unknown_item_fails() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "sessions",
            "orphan",
            "steps:\n  - op: remove\n    item: ghost\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_session("orphan");

        assert!(matches!(result, Err(FixtureError::ItemNotFound(key)) if key == "ghost"));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(
            fixture.load_items("kitchen"),
            Err(FixtureError::Io(_))
        ));
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
        assert!(matches!(fixture.history(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_lookup_not_found_returns_error() {
        let fixture = Fixture::default();

        assert!(matches!(
            fixture.item("nonexistent"),
            Err(FixtureError::ItemNotFound(_))
        ));
        assert!(matches!(
            fixture.coupon("nonexistent"),
            Err(FixtureError::CouponNotFound(_))
        ));
        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
    }
}
