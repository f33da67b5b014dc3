//! Basket History
//!
//! A shopping basket with item and basket coupons, and a linear undo/redo history of basket
//! snapshots.

pub mod basket;
pub mod coupons;
pub mod fixtures;
pub mod history;
pub mod items;
pub mod operations;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod utils;
