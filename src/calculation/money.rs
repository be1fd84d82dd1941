//! Monetary rounding.
//!
//! Every amount on a payslip goes through [`round_money`] exactly once, at the
//! point it is computed. Sums of rounded amounts are exact and never rounded
//! again.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to the cent, half away from zero.
///
/// The result always carries two decimal places, so `3000` becomes `3000.00`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// assert_eq!(round_money(dec("156.006")), dec("156.01"));
/// assert_eq!(round_money(dec("22.505")), dec("22.51"));
/// assert_eq!(round_money(dec("22.504")), dec("22.50"));
/// assert_eq!(round_money(dec("0")).to_string(), "0.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Turns a positive contribution into a deduction.
///
/// Zero stays an unsigned zero so that a `0.00` deduction never renders as
/// `-0.00`.
pub fn as_deduction(amount: Decimal) -> Decimal {
    if amount.is_zero() {
        Decimal::new(0, MONEY_SCALE)
    } else {
        -amount
    }
}
