//! Common types used across the application.

pub mod money;

pub use money::{AMOUNT_SCALE, format_amount, format_count, round_amount};
