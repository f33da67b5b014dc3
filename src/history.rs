//! Basket History
//!
//! A linear undo/redo history of basket snapshots.
//!
//! Every mutation clones the current snapshot, applies the change to the clone and appends it
//! after the current position. Snapshots after the current position are discarded first, so
//! making a change after an undo loses the redo path. A mutation that fails leaves the history
//! exactly as it was.

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    basket::{Basket, BasketError},
    coupons::{BasketCoupon, ItemCoupon},
    items::Item,
    operations::BasketOperation,
    pricing::PricingError,
    report::ReportError,
};

/// Snapshot history of a basket with a current position.
#[derive(Clone, Debug)]
pub struct BasketHistory<'a> {
    snapshots: Vec<Basket<'a>>,
    position: usize,
}

impl<'a> BasketHistory<'a> {
    /// Create a history holding a single empty basket.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            snapshots: vec![Basket::new(currency)],
            position: 0,
        }
    }

    /// Index of the current snapshot.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of snapshots, including any that can be redone.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least its initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The current snapshot.
    pub fn current(&self) -> &Basket<'a> {
        self.snapshot_at(self.position)
    }

    /// The snapshot at `idx`, if it exists.
    pub fn snapshot(&self, idx: usize) -> Option<&Basket<'a>> {
        self.snapshots.get(idx)
    }

    /// Iterate over every snapshot, oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &Basket<'a>> {
        self.snapshots.iter()
    }

    /// Add `count` units of `item` in a new snapshot. See [`Basket::add`].
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::CurrencyMismatch`] if the item is priced in another currency; no
    /// snapshot is recorded.
    pub fn add(
        &mut self,
        item: Item<'a>,
        count: usize,
        coupon: Option<ItemCoupon>,
    ) -> Result<&Basket<'a>, BasketError> {
        self.try_commit("add", |basket| basket.add(item, count, coupon))
    }

    /// Remove up to `count` units of `item` in a new snapshot. See [`Basket::remove`].
    pub fn remove(&mut self, item: &Item<'_>, count: usize) -> &Basket<'a> {
        self.commit("remove", |basket| basket.remove(item, count))
    }

    /// Set the unit count of `item` in a new snapshot. See [`Basket::set_count`].
    pub fn set_count(&mut self, item: &Item<'_>, count: usize) -> &Basket<'a> {
        self.commit("set_count", |basket| basket.set_count(item, count))
    }

    /// Replace the basket coupon in a new snapshot.
    pub fn set_coupon(&mut self, coupon: Option<BasketCoupon>) -> &Basket<'a> {
        self.commit("set_coupon", |basket| basket.set_coupon(coupon))
    }

    /// Apply an operation in a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`BasketError`] if the operation is rejected; no snapshot is recorded.
    pub fn apply(&mut self, operation: BasketOperation<'a>) -> Result<&Basket<'a>, BasketError> {
        let kind = operation.kind();

        self.try_commit(kind, |basket| basket.apply(operation))
    }

    /// Whether there is an earlier snapshot to return to.
    pub fn has_undo(&self) -> bool {
        self.position > 0
    }

    /// Whether there is a later snapshot to return to.
    pub fn has_redo(&self) -> bool {
        self.position + 1 < self.snapshots.len()
    }

    /// Step back one snapshot. At the first snapshot this does nothing.
    pub fn undo(&mut self) -> &Basket<'a> {
        if self.has_undo() {
            self.position -= 1;

            debug!(position = self.position, "Undo");
        }

        self.current()
    }

    /// Step forward one snapshot. At the last snapshot this does nothing.
    pub fn redo(&mut self) -> &Basket<'a> {
        if self.has_redo() {
            self.position += 1;

            debug!(position = self.position, "Redo");
        }

        self.current()
    }

    /// Total cost of the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a cost cannot be calculated.
    pub fn total_cost(&self) -> Result<Money<'a, Currency>, PricingError> {
        self.current().total_cost()
    }

    /// Plain text report of the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if a cost cannot be calculated.
    pub fn report(&self) -> Result<String, ReportError> {
        self.current().report()
    }

    fn commit(&mut self, kind: &str, mutate: impl FnOnce(&mut Basket<'a>)) -> &Basket<'a> {
        let mut next = self.current().clone();

        mutate(&mut next);

        self.push(kind, next)
    }

    fn try_commit(
        &mut self,
        kind: &str,
        mutate: impl FnOnce(&mut Basket<'a>) -> Result<(), BasketError>,
    ) -> Result<&Basket<'a>, BasketError> {
        let mut next = self.current().clone();

        if let Err(err) = mutate(&mut next) {
            debug!(kind, position = self.position, error = %err, "Rejected basket mutation");

            return Err(err);
        }

        Ok(self.push(kind, next))
    }

    fn push(&mut self, kind: &str, next: Basket<'a>) -> &Basket<'a> {
        let discarded = self.snapshots.len() - (self.position + 1);

        self.snapshots.truncate(self.position + 1);
        self.snapshots.push(next);
        self.position += 1;

        debug!(
            kind,
            position = self.position,
            discarded,
            lines = self.current().len(),
            "Committed basket snapshot"
        );

        self.current()
    }

    fn snapshot_at(&self, idx: usize) -> &Basket<'a> {
        // `position` always indexes an existing snapshot.
        match self.snapshots.get(idx) {
            Some(basket) => basket,
            None => unreachable!("history position {idx} out of bounds"),
        }
    }
}
