//! # Types
//!
//! Records kept by the reputation ledger.
//!
//! An account's score is split in two components that always add up to the
//! total:
//!
//! ```text
//! reputation = genesis (admin/awarder credited) + boost (peer credited)
//! ```

use soroban_sdk::{contracttype, String};

/// One immutable entry of an account's genesis history.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisAward {
    pub amount: u64,
    /// Free-form bucket such as `"hackathon"`, `"medal"` or `"inspiration"`.
    pub category: String,
    pub reason: String,
    pub timestamp: u64,
}

/// Per-account balances and boost bookkeeping.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Standing {
    pub reputation: u64,
    pub genesis: u64,
    pub boost: u64,
    /// `None` until the account boosts someone for the first time.
    pub last_boost_at: Option<u64>,
}

/// Global boost parameters, replaced atomically by `set_params`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostParams {
    /// Seconds an account must wait between two boosts.
    pub cooldown: u64,
    /// Flat amount added on top of `isqrt(reputation)`.
    pub baseline_power: u64,
    /// Minimum reputation an account needs before it may boost.
    pub min_rep_to_boost: u64,
}

impl Default for BoostParams {
    fn default() -> Self {
        BoostParams {
            cooldown: 86_400,
            baseline_power: 1,
            min_rep_to_boost: 10,
        }
    }
}

/// Read-only snapshot of whether `account` could boost right now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostStatus {
    pub reputation: u64,
    pub required: u64,
    pub power: u64,
    pub cooldown_remaining: u64,
    pub can_boost: bool,
}
