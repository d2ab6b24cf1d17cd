//! Registry notifications.
//!
//! Event-level topics are `(symbol, event_id)`; medal-level topics are
//! `(symbol, medal_id)`.
//!
//! | Symbol      | Key        | Data              |
//! |-------------|------------|-------------------|
//! | `ev_submit` | `event_id` | `EventSubmitted`  |
//! | `ev_approv` | `event_id` | `EventApproved`   |
//! | `ev_reject` | `event_id` | `EventRejected`   |
//! | `medal_new` | `medal_id` | `MedalCreated`    |
//! | `medal_clm` | `medal_id` | `MedalClaimed`    |
//! | `medal_awd` | `medal_id` | `MedalAwarded`    |
//! | `medal_set` | `medal_id` | `MedalStatusChanged` |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventSubmitted {
    pub event_id: u64,
    pub creator: Address,
    pub title: String,
    pub datetime: u64,
    pub medal_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventApproved {
    pub event_id: u64,
    pub approved_by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventRejected {
    pub event_id: u64,
    pub rejected_by: Address,
    pub reason: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedalCreated {
    pub medal_id: u64,
    pub event_id: u64,
    pub name: String,
    pub points: u64,
    pub max_claims: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedalClaimed {
    pub medal_id: u64,
    pub event_id: u64,
    pub account: Address,
    pub points: u64,
    pub claims_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedalAwarded {
    pub medal_id: u64,
    pub event_id: u64,
    pub awarded_by: Address,
    pub recipient: Address,
    pub points: u64,
    pub claims_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedalStatusChanged {
    pub medal_id: u64,
    pub changed_by: Address,
    pub active: bool,
}

pub fn emit_event_submitted(env: &Env, data: EventSubmitted) {
    env.events()
        .publish((symbol_short!("ev_submit"), data.event_id), data);
}

pub fn emit_event_approved(env: &Env, data: EventApproved) {
    env.events()
        .publish((symbol_short!("ev_approv"), data.event_id), data);
}

pub fn emit_event_rejected(env: &Env, data: EventRejected) {
    env.events()
        .publish((symbol_short!("ev_reject"), data.event_id), data);
}

pub fn emit_medal_created(env: &Env, data: MedalCreated) {
    env.events()
        .publish((symbol_short!("medal_new"), data.medal_id), data);
}

pub fn emit_medal_claimed(env: &Env, data: MedalClaimed) {
    env.events()
        .publish((symbol_short!("medal_clm"), data.medal_id), data);
}

pub fn emit_medal_awarded(env: &Env, data: MedalAwarded) {
    env.events()
        .publish((symbol_short!("medal_awd"), data.medal_id), data);
}

pub fn emit_medal_status_changed(env: &Env, data: MedalStatusChanged) {
    env.events()
        .publish((symbol_short!("medal_set"), data.medal_id), data);
}
