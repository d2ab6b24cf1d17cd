//! # Types
//!
//! ## Config / details / state split
//!
//! A project is stored as three ledger entries:
//!
//! - [`ProjectConfig`]: written once at creation, never mutated.
//! - [`ProjectDetails`]: display text, editable by the creator or a cofounder.
//! - [`ProjectState`]: written on every contribution, refund and claim.
//!
//! The public API returns the reconstructed [`Project`].
//!
//! ## Phases
//!
//! ```text
//! Active ──(deadline, goal met)──► Claimable ──claim_funds──► Claimed
//!    │
//!    ├──(deadline, goal missed)──► Refundable ──claim_refund (per backer)
//!    │
//!    └──delete_project (goal not met)──► Deleted (refundable at once)
//! ```

use soroban_sdk::{contracttype, Address, String, Vec};

/// Addresses the escrow talks to, fixed at `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Asset every contribution is made in.
    pub funding_token: Address,
    pub reputation_ledger: Address,
    pub backer_nft: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub creator: Address,
    /// How the creator describes their own role, e.g. "Founder & CEO".
    pub creator_role: String,
    pub goal: i128,
    pub deadline: u64,
    pub created_at: u64,
    /// Contract holding this project's backer NFT collection.
    pub nft_contract: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
}

/// Metadata of the backer NFT collection opened with a project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProjectState {
    /// Sum of all contributions; never decreases.
    pub funds_raised: i128,
    /// Sum of the refunds paid out so far.
    pub total_refunded: i128,
    pub claimed: bool,
    pub deleted: bool,
    pub contributor_count: u32,
    pub inspirations: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cofounder {
    pub address: Address,
    pub role: String,
}

/// A backer's running total on one project.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contribution {
    pub amount: i128,
    /// Hide the backer in public listings. The latest contribution decides.
    pub is_anonymous: bool,
}

/// Contribution as shown publicly: anonymous backers have no address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicContribution {
    pub backer: Option<Address>,
    pub amount: i128,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProjectPhase {
    Active,
    Claimable,
    Claimed,
    Refundable,
    Deleted,
}

impl ProjectPhase {
    pub fn of(config: &ProjectConfig, state: &ProjectState, now: u64) -> Self {
        if state.deleted {
            ProjectPhase::Deleted
        } else if state.claimed {
            ProjectPhase::Claimed
        } else if now < config.deadline {
            ProjectPhase::Active
        } else if state.funds_raised >= config.goal {
            ProjectPhase::Claimable
        } else {
            ProjectPhase::Refundable
        }
    }
}

/// Full project view returned by the public API.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub id: u64,
    pub creator: Address,
    pub creator_role: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub goal: i128,
    pub deadline: u64,
    pub created_at: u64,
    pub funds_raised: i128,
    pub total_refunded: i128,
    pub claimed: bool,
    pub contributor_count: u32,
    pub inspirations: u32,
    pub cofounders: Vec<Cofounder>,
    pub nft_contract: Address,
}
