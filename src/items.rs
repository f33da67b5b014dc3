//! Items

use std::fmt;

use rusty_money::{Money, iso::Currency};

/// A catalog entry that can be placed in a basket.
///
/// Items compare by value: two items with the same name and price are the same item.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<'a> {
    name: String,
    price: Money<'a, Currency>,
}

impl<'a> Item<'a> {
    /// Creates a new item with the given name and unit price.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Returns the name of the item
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price of the item
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item name: {}", self.name)?;
        writeln!(f, "Item price: {}", self.price.amount().normalize())
    }
}
