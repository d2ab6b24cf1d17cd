//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type       | Description                       |
//! |----------------|------------|-----------------------------------|
//! | `ProjectCount` | `u64`      | Auto-increment project ID counter |
//! | `Settings`     | `Settings` | Token, ledger and NFT addresses   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                         | Type             |
//! |-----------------------------|------------------|
//! | `ProjConfig(id)`            | `ProjectConfig`  |
//! | `ProjDetails(id)`           | `ProjectDetails` |
//! | `ProjState(id)`             | `ProjectState`   |
//! | `Contribution(id, backer)`  | `Contribution`   |
//! | `Refunded(id, backer)`      | `bool`           |
//! | `Contributors(id)`          | `Vec<Address>`   |
//! | `Cofounders(id)`            | `Vec<Cofounder>` |
//! | `Inspired(id, account)`     | `bool`           |
//! | `CreatorProjects(creator)`  | `Vec<u64>`       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{
    Cofounder, Contribution, Project, ProjectConfig, ProjectDetails, ProjectState, Settings,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    ProjectCount,
    Settings,
    ProjConfig(u64),
    ProjDetails(u64),
    ProjState(u64),
    Contribution(u64, Address),
    Refunded(u64, Address),
    Contributors(u64),
    Cofounders(u64),
    Inspired(u64, Address),
    CreatorProjects(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads, increments and stores the project counter.
/// Returns the ID for the project being created (pre-increment value).
pub fn get_and_increment_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

pub fn has_settings(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Settings)
}

pub fn save_settings(env: &Env, settings: &Settings) {
    env.storage().instance().set(&DataKey::Settings, settings);
    bump_instance(env);
}

pub fn load_settings(env: &Env) -> Result<Settings, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(Error::NotInitialized)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

/// Persist every entry of a freshly created project.
pub fn save_new_project(
    env: &Env,
    config: &ProjectConfig,
    details: &ProjectDetails,
    state: &ProjectState,
) {
    write(env, &DataKey::ProjConfig(config.id), config);
    write(env, &DataKey::ProjDetails(config.id), details);
    write(env, &DataKey::ProjState(config.id), state);

    let key = DataKey::CreatorProjects(config.creator.clone());
    let mut ids: Vec<u64> = read(env, &key).unwrap_or_else(|| Vec::new(env));
    ids.push_back(config.id);
    write(env, &key, &ids);
}

pub fn load_project_config(env: &Env, id: u64) -> Result<ProjectConfig, Error> {
    read(env, &DataKey::ProjConfig(id)).ok_or(Error::ProjectNotFound)
}

pub fn load_project_details(env: &Env, id: u64) -> Result<ProjectDetails, Error> {
    read(env, &DataKey::ProjDetails(id)).ok_or(Error::ProjectNotFound)
}

pub fn save_project_details(env: &Env, id: u64, details: &ProjectDetails) {
    write(env, &DataKey::ProjDetails(id), details);
}

pub fn load_project_state(env: &Env, id: u64) -> Result<ProjectState, Error> {
    read(env, &DataKey::ProjState(id)).ok_or(Error::ProjectNotFound)
}

pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    write(env, &DataKey::ProjState(id), state);
}

/// Config and state together, including deleted projects.
pub fn load_project_pair(env: &Env, id: u64) -> Result<(ProjectConfig, ProjectState), Error> {
    Ok((load_project_config(env, id)?, load_project_state(env, id)?))
}

/// Config and state of a project that has not been deleted.
pub fn load_live_project(env: &Env, id: u64) -> Result<(ProjectConfig, ProjectState), Error> {
    let (config, state) = load_project_pair(env, id)?;
    if state.deleted {
        return Err(Error::ProjectNotFound);
    }
    Ok((config, state))
}

/// Reconstruct the public [`Project`] view.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let (config, state) = load_live_project(env, id)?;
    let details = load_project_details(env, id)?;
    Ok(Project {
        id: config.id,
        creator: config.creator,
        creator_role: config.creator_role,
        title: details.title,
        description: details.description,
        image_url: details.image_url,
        category: details.category,
        goal: config.goal,
        deadline: config.deadline,
        created_at: config.created_at,
        funds_raised: state.funds_raised,
        total_refunded: state.total_refunded,
        claimed: state.claimed,
        contributor_count: state.contributor_count,
        inspirations: state.inspirations,
        cofounders: load_cofounders(env, id),
        nft_contract: config.nft_contract,
    })
}

pub fn load_creator_projects(env: &Env, creator: &Address) -> Vec<u64> {
    read(env, &DataKey::CreatorProjects(creator.clone())).unwrap_or_else(|| Vec::new(env))
}

// ── Contributions ────────────────────────────────────────────────────

/// `None` when `backer` never contributed to the project.
pub fn load_contribution(env: &Env, id: u64, backer: &Address) -> Option<Contribution> {
    read(env, &DataKey::Contribution(id, backer.clone()))
}

pub fn save_contribution(env: &Env, id: u64, backer: &Address, contribution: &Contribution) {
    write(env, &DataKey::Contribution(id, backer.clone()), contribution);
}

pub fn is_refunded(env: &Env, id: u64, backer: &Address) -> bool {
    read(env, &DataKey::Refunded(id, backer.clone())).unwrap_or(false)
}

pub fn mark_refunded(env: &Env, id: u64, backer: &Address) {
    write(env, &DataKey::Refunded(id, backer.clone()), &true);
}

pub fn load_contributors(env: &Env, id: u64) -> Vec<Address> {
    read(env, &DataKey::Contributors(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn push_contributor(env: &Env, id: u64, backer: &Address) {
    let mut contributors = load_contributors(env, id);
    contributors.push_back(backer.clone());
    write(env, &DataKey::Contributors(id), &contributors);
}

// ── Cofounders & inspiration ─────────────────────────────────────────

pub fn load_cofounders(env: &Env, id: u64) -> Vec<Cofounder> {
    read(env, &DataKey::Cofounders(id)).unwrap_or_else(|| Vec::new(env))
}

pub fn save_cofounders(env: &Env, id: u64, cofounders: &Vec<Cofounder>) {
    write(env, &DataKey::Cofounders(id), cofounders);
}

pub fn has_inspired(env: &Env, id: u64, account: &Address) -> bool {
    read(env, &DataKey::Inspired(id, account.clone())).unwrap_or(false)
}

pub fn mark_inspired(env: &Env, id: u64, account: &Address) {
    write(env, &DataKey::Inspired(id, account.clone()), &true);
}
