//! Boost arithmetic and the boost admission rule.
//!
//! Kept free of storage so the rule can be exercised with plain numbers.

use crate::types::BoostParams;

/// Floor of the square root of `n`, by Newton's method on integers.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = n / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Reputation granted by one boost from an account holding `reputation`.
pub fn boost_power(reputation: u64, params: &BoostParams) -> u64 {
    isqrt(reputation).saturating_add(params.baseline_power)
}

/// Seconds left before an account that last boosted at `last_boost_at` may
/// boost again. Accounts that never boosted have no cooldown.
pub fn cooldown_remaining(last_boost_at: Option<u64>, now: u64, cooldown: u64) -> u64 {
    match last_boost_at {
        Some(last) => last.saturating_add(cooldown).saturating_sub(now),
        None => 0,
    }
}

/// Why a boost was refused, with the numbers a caller needs to react.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BoostDenied {
    SelfBoost,
    InsufficientReputation { required: u64, actual: u64 },
    CooldownNotExpired { remaining: u64 },
}

/// Apply the boost preconditions in order and return the power on success.
pub fn check_boost(
    is_self: bool,
    reputation: u64,
    last_boost_at: Option<u64>,
    now: u64,
    params: &BoostParams,
) -> Result<u64, BoostDenied> {
    if is_self {
        return Err(BoostDenied::SelfBoost);
    }
    if reputation < params.min_rep_to_boost {
        return Err(BoostDenied::InsufficientReputation {
            required: params.min_rep_to_boost,
            actual: reputation,
        });
    }
    let remaining = cooldown_remaining(last_boost_at, now, params.cooldown);
    if remaining > 0 {
        return Err(BoostDenied::CooldownNotExpired { remaining });
    }
    Ok(boost_power(reputation, params))
}
