//! Exact currency arithmetic.
//!
//! Amounts are `rust_decimal::Decimal` everywhere. Nothing here rounds except
//! [`format_amount`], which only affects display.

use rust_decimal::{Decimal, RoundingStrategy};

/// `unit_price × quantity`, exact.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `amounts`; zero when empty.
pub fn sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| acc + amount)
}

/// Renders `amount` with two decimals after `symbol`, e.g. `$12.25`.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let mut shown = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    shown.rescale(2);
    format!("{symbol}{shown}")
}
