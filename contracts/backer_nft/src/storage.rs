//! # Storage
//!
//! | Key                  | Tier       | Type          |
//! |----------------------|------------|---------------|
//! | `Minter`             | Instance   | `Address`     |
//! | `NextTokenId`        | Instance   | `u64`         |
//! | `Collection(pid)`    | Persistent | `Collection`  |
//! | `Token(id)`          | Persistent | `BackerToken` |
//! | `Owned(addr)`        | Persistent | `Vec<u64>`    |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{BackerToken, Collection};

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Minter,
    NextTokenId,
    Collection(u64),
    Token(u64),
    Owned(Address),
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

pub fn has_minter(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Minter)
}

pub fn set_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&DataKey::Minter, minter);
    bump_instance(env);
}

pub fn get_minter(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Minter)
}

/// Returns the id for the token being minted and advances the counter.
/// Token ids start at 1.
pub fn next_token_id(env: &Env) -> u64 {
    bump_instance(env);
    let id: u64 = env
        .storage()
        .instance()
        .get(&DataKey::NextTokenId)
        .unwrap_or(1);
    env.storage()
        .instance()
        .set(&DataKey::NextTokenId, &(id + 1));
    id
}

pub fn total_minted(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get::<_, u64>(&DataKey::NextTokenId)
        .map(|next| next - 1)
        .unwrap_or(0)
}

pub fn load_collection(env: &Env, project_id: u64) -> Option<Collection> {
    let key = DataKey::Collection(project_id);
    let collection = env.storage().persistent().get(&key);
    if collection.is_some() {
        bump_persistent(env, &key);
    }
    collection
}

pub fn save_collection(env: &Env, collection: &Collection) {
    let key = DataKey::Collection(collection.project_id);
    env.storage().persistent().set(&key, collection);
    bump_persistent(env, &key);
}

pub fn load_token(env: &Env, token_id: u64) -> Option<BackerToken> {
    let key = DataKey::Token(token_id);
    let token = env.storage().persistent().get(&key);
    if token.is_some() {
        bump_persistent(env, &key);
    }
    token
}

pub fn save_token(env: &Env, token: &BackerToken) {
    let key = DataKey::Token(token.id);
    env.storage().persistent().set(&key, token);
    bump_persistent(env, &key);
}

pub fn load_owned(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Owned(owner.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_owned(env: &Env, owner: &Address, owned: &Vec<u64>) {
    let key = DataKey::Owned(owner.clone());
    env.storage().persistent().set(&key, owned);
    bump_persistent(env, &key);
}
