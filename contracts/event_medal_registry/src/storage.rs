//! # Storage
//!
//! | Key                    | Tier       | Type       |
//! |------------------------|------------|------------|
//! | `Ledger`               | Instance   | `Address`  |
//! | `EventCount`           | Instance   | `u64`      |
//! | `MedalCount`           | Instance   | `u64`      |
//! | `Event(id)`            | Persistent | `Event`    |
//! | `EventMedals(id)`      | Persistent | `Vec<u64>` |
//! | `Medal(id)`            | Persistent | `Medal`    |
//! | `Claimed(medal, acct)` | Persistent | `bool`     |
//!
//! Role entries live in instance storage through `access_control`.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Event, Medal};
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Ledger,
    EventCount,
    MedalCount,
    Event(u64),
    EventMedals(u64),
    Medal(u64),
    Claimed(u64, Address),
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

// ── Instance ─────────────────────────────────────────────────────────

pub fn has_ledger(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Ledger)
}

pub fn set_ledger(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
    bump_instance(env);
}

pub fn get_ledger(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .ok_or(Error::NotInitialized)
}

fn next_id(env: &Env, key: &DataKey) -> u64 {
    bump_instance(env);
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    env.storage().instance().set(key, &(current + 1));
    current
}

pub fn next_event_id(env: &Env) -> u64 {
    next_id(env, &DataKey::EventCount)
}

pub fn next_medal_id(env: &Env) -> u64 {
    next_id(env, &DataKey::MedalCount)
}

pub fn event_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::EventCount)
        .unwrap_or(0)
}

pub fn medal_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::MedalCount)
        .unwrap_or(0)
}

// ── Persistent ───────────────────────────────────────────────────────

pub fn load_event(env: &Env, id: u64) -> Option<Event> {
    let key = DataKey::Event(id);
    let event = env.storage().persistent().get(&key);
    if event.is_some() {
        bump_persistent(env, &key);
    }
    event
}

pub fn save_event(env: &Env, event: &Event) {
    let key = DataKey::Event(event.id);
    env.storage().persistent().set(&key, event);
    bump_persistent(env, &key);
}

pub fn load_event_medals(env: &Env, event_id: u64) -> Vec<u64> {
    let key = DataKey::EventMedals(event_id);
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => Vec::new(env),
    }
}

pub fn save_event_medals(env: &Env, event_id: u64, ids: &Vec<u64>) {
    let key = DataKey::EventMedals(event_id);
    env.storage().persistent().set(&key, ids);
    bump_persistent(env, &key);
}

pub fn load_medal(env: &Env, id: u64) -> Option<Medal> {
    let key = DataKey::Medal(id);
    let medal = env.storage().persistent().get(&key);
    if medal.is_some() {
        bump_persistent(env, &key);
    }
    medal
}

pub fn save_medal(env: &Env, medal: &Medal) {
    let key = DataKey::Medal(medal.id);
    env.storage().persistent().set(&key, medal);
    bump_persistent(env, &key);
}

pub fn has_claimed(env: &Env, medal_id: u64, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claimed(medal_id, account.clone()))
        .unwrap_or(false)
}

pub fn mark_claimed(env: &Env, medal_id: u64, account: &Address) {
    let key = DataKey::Claimed(medal_id, account.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
