use crate::types::{Premium, Price};
use rust_decimal::Decimal;

/// Compute the percentage premium of a domestic quote over the
/// fx-converted reference quote.
///
/// Formula: `((local / (reference * fx_rate)) - 1) * 100`.
///
/// If the reference price or the fx rate is zero the result is defined as
/// `0.0`. Callers must treat that value as "unknown", not "parity": a zero
/// input means an upstream feed was down, and the guard only exists so a
/// dead feed cannot poison the capture with a division by zero.
pub fn premium(local: Price, reference: Price, fx_rate: Decimal) -> Premium {
    if reference.is_zero() || fx_rate.is_zero() {
        return Premium::ZERO;
    }
    let converted = reference * fx_rate;
    Premium::new((local / converted - Decimal::ONE) * Decimal::ONE_HUNDRED)
}
