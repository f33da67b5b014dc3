//! Item Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{fixtures::FixtureError, items::Item};

/// Wrapper for items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Map of item key -> item fixture
    pub items: FxHashMap<String, ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Item name
    pub name: String,

    /// Item price (e.g., "1000 GBP")
    pub price: String,
}

impl TryFrom<ItemFixture> for Item<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&fixture.price)?;

        Ok(Item::new(fixture.name, Money::from_decimal(amount, currency)))
    }
}

/// Parse price string (e.g., "2.99 GBP") into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((amount, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (amount, currency) = parse_price("2.99 GBP")?;

        assert_eq!(amount, Decimal::new(299, 2));
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_bad_format() {
        assert!(matches!(
            parse_price("2.99"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("cheap GBP"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("1 XYZ"),
            Err(FixtureError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn item_fixture_converts_to_item() -> TestResult {
        let fixture = ItemFixture {
            name: "Teapot".to_string(),
            price: "1000 GBP".to_string(),
        };

        let item = Item::try_from(fixture)?;

        assert_eq!(item, Item::new("Teapot", Money::from_major(1000, GBP)));

        Ok(())
    }
}
