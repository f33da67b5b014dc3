//! Report
//!
//! Text renderings of a basket. [`render`] produces the stable line-oriented report used by
//! callers and tests; [`write_table`] produces a boxed table for terminals.

use std::{fmt, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    basket::{Basket, BasketLine},
    coupons::Discount,
    pricing::PricingError,
};

/// Errors that can occur when rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error calculating a cost.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error writing to a formatter.
    #[error("Format error")]
    Format(#[from] fmt::Error),

    /// Error writing to an output stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Render the plain text report for a basket.
///
/// # Errors
///
/// Returns a [`ReportError`] if a cost cannot be calculated.
pub fn render(basket: &Basket<'_>) -> Result<String, ReportError> {
    let mut out = String::new();

    write_report(&mut out, basket)?;

    Ok(out)
}

/// Write the plain text report for a basket.
///
/// # Errors
///
/// Returns a [`ReportError`] if a cost cannot be calculated or the writer fails.
pub fn write_report(out: &mut impl fmt::Write, basket: &Basket<'_>) -> Result<(), ReportError> {
    writeln!(out, "=== Basket begin ===")?;

    for line in basket.iter() {
        write_line(out, line)?;
    }

    if let Some(coupon) = basket.coupon() {
        write!(out, "{coupon}")?;
    }

    writeln!(out, "Total cost: {}", amount(&basket.total_cost()?))?;
    writeln!(out, "=== Basket end ===")?;

    Ok(())
}

fn write_line(out: &mut impl fmt::Write, line: &BasketLine<'_>) -> Result<(), ReportError> {
    write!(out, "{}", line.item())?;
    writeln!(out, "Number of items: {}", line.count())?;

    if let Some(coupon) = line.coupon() {
        write!(out, "{coupon}")?;
    }

    writeln!(out, "Cost: {}", amount(&line.cost()?))?;

    Ok(())
}

/// Write the basket as a table followed by subtotal and total.
///
/// # Errors
///
/// Returns a [`ReportError`] if a cost cannot be calculated or the writer fails.
pub fn write_table(mut out: impl io::Write, basket: &Basket<'_>) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Price", "Qty", "Cost", "Coupon"]);

    for (idx, line) in basket.iter().enumerate() {
        let coupon = line
            .coupon()
            .map(|coupon| format!("{} ({})", coupon.name(), coupon.ratio().normalize()))
            .unwrap_or_default();

        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.item().name().to_string(),
            amount(line.item().price()).to_string(),
            line.count().to_string(),
            amount(&line.cost()?).to_string(),
            coupon,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Subtotal: {}", amount(&basket.subtotal()?))?;

    if let Some(coupon) = basket.coupon() {
        writeln!(
            out,
            " Coupon:   {} ({})",
            coupon.name(),
            coupon.ratio().normalize()
        )?;
    }

    writeln!(out, " Total:    {}", amount(&basket.total_cost()?))?;

    Ok(())
}

/// Plain decimal amount without currency symbol or trailing zeros.
fn amount(money: &Money<'_, Currency>) -> Decimal {
    money.amount().normalize()
}
