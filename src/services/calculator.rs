//! Money/distance math
//!
//! Pure conversions from odometer deltas and unit prices to totals and
//! per-person shares. All monetary rounding is half-up to two decimals,
//! matching the currency's minor unit.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::utils::errors::{AppError, AppResult};

/// Total cost of a usage event: distance consumed times the unit price.
///
/// The odometer counts down while driving, so `before` must be strictly
/// greater than `after`. Integer distance times a two-decimal price is
/// already exact, no rounding is applied.
pub fn compute_usage_cost(before: i64, after: i64, unit_price: Decimal) -> AppResult<Decimal> {
    if before <= after {
        return Err(AppError::InvalidOdometerRange { before, after });
    }
    Ok(Decimal::from(before - after) * unit_price)
}

/// Effective unit price of a refill: money paid divided by range gained,
/// rounded half-up to two decimals.
pub fn compute_refill_unit_price(total_money: Decimal, before: i64, after: i64) -> AppResult<Decimal> {
    if after <= before {
        return Err(AppError::InvalidOdometerRange { before, after });
    }
    let gained = Decimal::from(after - before);
    Ok(round_money(total_money / gained))
}

/// Even split of a total across `n` participants, rounded half-up to two
/// decimals per share.
///
/// Every participant is charged the identical rounded amount. When the
/// total is not evenly divisible the leftover cents are not redistributed;
/// the drift is economically insignificant and untracked.
pub fn split_evenly(total: Decimal, n: usize) -> AppResult<Decimal> {
    if n == 0 {
        return Err(AppError::InvalidParticipantCount(n));
    }
    Ok(round_money(total / Decimal::from(n as u64)))
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
