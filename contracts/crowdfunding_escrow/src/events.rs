//! Notifications published by the escrow.
//!
//! Every topic is `(symbol, project_id)` so an observer can route by project
//! without decoding the body.
//!
//! | Symbol      | Data               |
//! |-------------|--------------------|
//! | `created`   | `ProjectCreated`   |
//! | `funded`    | `ContributionMade` |
//! | `nft_mint`  | `NftMinted`        |
//! | `claimed`   | `FundsClaimed`     |
//! | `refunded`  | `RefundProcessed`  |
//! | `inspired`  | `ProjectInspired`  |
//! | `cofounder` | `CofounderAdded`   |
//! | `updated`   | `ProjectUpdated`   |
//! | `deleted`   | `ProjectDeleted`   |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub creator: Address,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
    pub nft_contract: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionMade {
    pub project_id: u64,
    pub backer: Address,
    pub amount: i128,
    pub is_anonymous: bool,
    /// Project total after this contribution.
    pub funds_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NftMinted {
    pub project_id: u64,
    pub token_id: u64,
    pub backer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsClaimed {
    pub project_id: u64,
    pub creator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundProcessed {
    pub project_id: u64,
    pub backer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectInspired {
    pub project_id: u64,
    pub account: Address,
    pub creator: Address,
    pub points: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CofounderAdded {
    pub project_id: u64,
    pub cofounder: Address,
    pub role: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectUpdated {
    pub project_id: u64,
    pub editor: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectDeleted {
    pub project_id: u64,
    pub creator: Address,
    /// Amount left in escrow for backers to reclaim.
    pub funds_raised: i128,
}

fn publish<D>(env: &Env, topic: Symbol, project_id: u64, data: D)
where
    D: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.events().publish((topic, project_id), data);
}

pub fn emit_project_created(env: &Env, data: ProjectCreated) {
    publish(env, symbol_short!("created"), data.project_id, data);
}

pub fn emit_contribution_made(env: &Env, data: ContributionMade) {
    publish(env, symbol_short!("funded"), data.project_id, data);
}

pub fn emit_nft_minted(env: &Env, data: NftMinted) {
    publish(env, symbol_short!("nft_mint"), data.project_id, data);
}

pub fn emit_funds_claimed(env: &Env, data: FundsClaimed) {
    publish(env, symbol_short!("claimed"), data.project_id, data);
}

pub fn emit_refund_processed(env: &Env, data: RefundProcessed) {
    publish(env, symbol_short!("refunded"), data.project_id, data);
}

pub fn emit_project_inspired(env: &Env, data: ProjectInspired) {
    publish(env, symbol_short!("inspired"), data.project_id, data);
}

pub fn emit_cofounder_added(env: &Env, data: CofounderAdded) {
    publish(env, symbol_short!("cofounder"), data.project_id, data);
}

pub fn emit_project_updated(env: &Env, data: ProjectUpdated) {
    publish(env, symbol_short!("updated"), data.project_id, data);
}

pub fn emit_project_deleted(env: &Env, data: ProjectDeleted) {
    publish(env, symbol_short!("deleted"), data.project_id, data);
}
