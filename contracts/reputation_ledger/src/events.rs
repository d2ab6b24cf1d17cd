//! Notifications published by the reputation ledger.
//!
//! | Topic                  | Data             |
//! |------------------------|------------------|
//! | `(genesis, recipient)` | `GenesisAwarded` |
//! | `(boost, recipient)`   | `BoostGiven`     |
//! | `(params,)`            | `ParamsUpdated`  |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenesisAwarded {
    pub recipient: Address,
    pub amount: u64,
    pub category: String,
    pub reason: String,
    pub awarded_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostGiven {
    pub booster: Address,
    pub recipient: Address,
    pub power: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamsUpdated {
    pub caller: Address,
    pub cooldown: u64,
    pub baseline_power: u64,
    pub min_rep_to_boost: u64,
}

pub fn emit_genesis_awarded(env: &Env, data: GenesisAwarded) {
    env.events()
        .publish((symbol_short!("genesis"), data.recipient.clone()), data);
}

pub fn emit_boost_given(env: &Env, data: BoostGiven) {
    env.events()
        .publish((symbol_short!("boost"), data.recipient.clone()), data);
}

pub fn emit_params_updated(env: &Env, data: ParamsUpdated) {
    env.events().publish((symbol_short!("params"),), data);
}
