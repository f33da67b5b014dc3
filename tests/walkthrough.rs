//! Integration test for the teapot & kettle walkthrough.
//!
//! Builds a basket one mutation at a time, then undoes every mutation and redoes them all,
//! checking the report at the interesting snapshots:
//!
//! 1. Teapot x1 (£1000)
//! 2. Kettle x1 (£2500)
//! 3. Teapot x2 with "Half price" (0.5) -> Teapot line 3 x 1000 x 0.5 = 1500, total 4000
//! 4. Remove one teapot -> 1000 + 2500 = 3500
//! 5. Kettle count set to 3 -> 1000 + 7500 = 8500
//! 6. Remove two teapots -> only Kettle x3 remains, 7500
//! 7. "Christmas sale" basket coupon (0.75) -> 5625

use rust_decimal::Decimal;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use basket_history::prelude::*;

fn report(lines: &[&str]) -> String {
    let mut report = lines.join("\n");

    report.push('\n');

    report
}

#[test]
fn teapot_and_kettle_walkthrough() -> TestResult {
    let teapot = Item::new("Teapot", Money::from_major(1000, GBP));
    let kettle = Item::new("Kettle", Money::from_major(2500, GBP));
    let half_price = ItemCoupon::new("Half price", Decimal::new(5, 1))?;
    let christmas_sale = BasketCoupon::new("Christmas sale", Decimal::new(75, 2))?;

    assert_eq!(teapot.to_string(), "Item name: Teapot\nItem price: 1000\n");
    assert_eq!(kettle.to_string(), "Item name: Kettle\nItem price: 2500\n");

    let mut history = BasketHistory::new(GBP);

    assert_eq!(
        history.report()?,
        report(&["=== Basket begin ===", "Total cost: 0", "=== Basket end ==="])
    );

    history.add(teapot.clone(), 1, None)?;
    history.add(kettle.clone(), 1, None)?;
    history.add(teapot.clone(), 2, Some(half_price))?;

    let after_coupon = report(&[
        "=== Basket begin ===",
        "Item name: Teapot",
        "Item price: 1000",
        "Number of items: 3",
        "Item coupon name: Half price",
        "Item coupon ratio: 0.5",
        "Cost: 1500",
        "Item name: Kettle",
        "Item price: 2500",
        "Number of items: 1",
        "Cost: 2500",
        "Total cost: 4000",
        "=== Basket end ===",
    ]);

    assert_eq!(history.report()?, after_coupon);
    assert_eq!(history.total_cost()?, Money::from_major(4000, GBP));

    history.remove(&teapot, 1);

    assert_eq!(
        history.report()?,
        report(&[
            "=== Basket begin ===",
            "Item name: Teapot",
            "Item price: 1000",
            "Number of items: 2",
            "Item coupon name: Half price",
            "Item coupon ratio: 0.5",
            "Cost: 1000",
            "Item name: Kettle",
            "Item price: 2500",
            "Number of items: 1",
            "Cost: 2500",
            "Total cost: 3500",
            "=== Basket end ===",
        ])
    );

    history.set_count(&kettle, 3);

    let after_set_count = report(&[
        "=== Basket begin ===",
        "Item name: Teapot",
        "Item price: 1000",
        "Number of items: 2",
        "Item coupon name: Half price",
        "Item coupon ratio: 0.5",
        "Cost: 1000",
        "Item name: Kettle",
        "Item price: 2500",
        "Number of items: 3",
        "Cost: 7500",
        "Total cost: 8500",
        "=== Basket end ===",
    ]);

    assert_eq!(history.report()?, after_set_count);

    history.remove(&teapot, 2);

    assert_eq!(
        history.report()?,
        report(&[
            "=== Basket begin ===",
            "Item name: Kettle",
            "Item price: 2500",
            "Number of items: 3",
            "Cost: 7500",
            "Total cost: 7500",
            "=== Basket end ===",
        ])
    );

    history.set_coupon(Some(christmas_sale));

    let final_report = report(&[
        "=== Basket begin ===",
        "Item name: Kettle",
        "Item price: 2500",
        "Number of items: 3",
        "Cost: 7500",
        "Basket coupon name: Christmas sale",
        "Basket coupon ratio: 0.75",
        "Total cost: 5625",
        "=== Basket end ===",
    ]);

    assert_eq!(history.report()?, final_report);
    assert_eq!(history.position(), 7);

    while history.has_undo() {
        history.undo();

        if history.position() == 5 {
            assert_eq!(history.report()?, after_set_count);
        }
    }

    assert_eq!(history.position(), 0);
    assert_eq!(
        history.report()?,
        report(&["=== Basket begin ===", "Total cost: 0", "=== Basket end ==="])
    );

    while history.has_redo() {
        history.redo();

        if history.position() == 3 {
            assert_eq!(history.report()?, after_coupon);
        }
    }

    assert_eq!(history.position(), 7);
    assert_eq!(history.report()?, final_report);
    assert_eq!(history.total_cost()?, Money::from_major(5625, GBP));

    Ok(())
}

#[test]
fn walkthrough_fixture_matches_hand_built_history() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let mut replayed = fixture.history()?;

    fixture.replay(&mut replayed, None)?;

    let mut built = BasketHistory::new(GBP);
    let teapot = fixture.item("teapot")?.clone();
    let kettle = fixture.item("kettle")?.clone();

    built.add(teapot.clone(), 1, None)?;
    built.add(kettle.clone(), 1, None)?;
    built.apply(BasketOperation::Add {
        item: teapot.clone(),
        count: 2,
        coupon: Some(fixture.coupon("half_price")?.clone()),
    })?;
    built.remove(&teapot, 1);
    built.set_count(&kettle, 3);
    built.remove(&teapot, 2);
    built.apply(BasketOperation::SetCoupon(Some(
        fixture.coupon("christmas_sale")?.clone(),
    )))?;

    assert_eq!(replayed.len(), built.len());
    assert!(replayed.snapshots().eq(built.snapshots()));

    Ok(())
}
