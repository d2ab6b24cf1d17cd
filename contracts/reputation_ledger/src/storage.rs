//! # Storage
//!
//! ## Instance storage
//!
//! | Key       | Type          | Description                |
//! |-----------|---------------|----------------------------|
//! | `Params`  | `BoostParams` | Global boost parameters    |
//!
//! Role entries written by `access_control` share the instance tier.
//!
//! ## Persistent storage
//!
//! | Key                | Type                | Description                   |
//! |--------------------|---------------------|-------------------------------|
//! | `Standing(addr)`   | `Standing`          | Balances + last boost time    |
//! | `History(addr)`    | `Vec<GenesisAward>` | Append-only genesis history   |
//!
//! `Standing` is read on every boost by both parties, while the history only
//! grows on genesis awards, so the two are kept in separate entries.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{BoostParams, GenesisAward, Standing};

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Params,
    Standing(Address),
    History(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_params(env: &Env) -> BoostParams {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .unwrap_or_default()
}

pub fn save_params(env: &Env, params: &BoostParams) {
    env.storage().instance().set(&DataKey::Params, params);
    bump_instance(env);
}

/// Load an account's standing; unknown accounts start from zero.
pub fn load_standing(env: &Env, account: &Address) -> Standing {
    let key = DataKey::Standing(account.clone());
    match env.storage().persistent().get(&key) {
        Some(standing) => {
            bump_persistent(env, &key);
            standing
        }
        None => Standing::default(),
    }
}

pub fn save_standing(env: &Env, account: &Address, standing: &Standing) {
    let key = DataKey::Standing(account.clone());
    env.storage().persistent().set(&key, standing);
    bump_persistent(env, &key);
}

pub fn load_history(env: &Env, account: &Address) -> Vec<GenesisAward> {
    let key = DataKey::History(account.clone());
    match env.storage().persistent().get(&key) {
        Some(history) => {
            bump_persistent(env, &key);
            history
        }
        None => Vec::new(env),
    }
}

pub fn append_history(env: &Env, account: &Address, award: GenesisAward) {
    let key = DataKey::History(account.clone());
    let mut history = load_history(env, account);
    history.push_back(award);
    env.storage().persistent().set(&key, &history);
    bump_persistent(env, &key);
}
