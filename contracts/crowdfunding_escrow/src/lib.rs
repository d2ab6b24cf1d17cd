//! # Crowdfunding Escrow
//!
//! All-or-nothing fundraising campaigns. Contributions are held by this
//! contract until the deadline; the creator then claims the whole balance if
//! the goal was met, otherwise each backer reclaims their own contribution.
//!
//! | Phase        | Entry point(s)                                              |
//! |--------------|-------------------------------------------------------------|
//! | Bootstrap    | [`CrowdfundingEscrow::init`]                                |
//! | Role admin   | `grant_role`, `revoke_role`, `transfer_super_admin`         |
//! | Launch       | `create_project`, `add_cofounder`, `add_cofounders_batch`, `update_project_details` |
//! | Funding      | `fund_project`, `inspire_project`                           |
//! | Settlement   | `claim_funds`, `claim_refund`, `process_refunds`, `delete_project` |
//! | Queries      | `get_project`, `get_projects`, `get_contribution`, `project_phase`, … |
//!
//! Every contribution mints a backer NFT through [`external::NftClient`];
//! every inspiration credits the creator through
//! [`external::ReputationClient`]. Internal bookkeeping is always written
//! before value leaves the escrow.

#![no_std]

use access_control::AccessError;
pub use access_control::Role;
use soroban_sdk::{
    contract, contracterror, contractimpl, log, token, Address, Env, String, Vec,
};

pub mod events;
mod external;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test;
#[cfg(test)]
mod test_events;

use events::{
    CofounderAdded, ContributionMade, FundsClaimed, NftMinted, ProjectCreated, ProjectDeleted,
    ProjectInspired, ProjectUpdated, RefundProcessed,
};
use external::{NftClient, ReputationClient};
pub use types::{
    Cofounder, CollectionInfo, Contribution, Project, ProjectConfig, ProjectDetails, ProjectPhase,
    ProjectState, PublicContribution, Settings,
};

/// Reputation credited to a creator each time someone inspires their project.
pub const INSPIRE_POINTS: u64 = 3;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    MissingRole = 3,
    SuperAdminLocked = 4,
    ProjectNotFound = 5,
    InvalidGoal = 6,
    InvalidDuration = 7,
    DeadlinePassed = 8,
    DeadlineNotReached = 9,
    GoalNotReached = 10,
    GoalReached = 11,
    ZeroContribution = 12,
    NoContribution = 13,
    NotCreator = 14,
    NotCreatorOrCofounder = 15,
    AlreadyClaimed = 16,
    AlreadyCofounder = 17,
    AlreadyInspired = 18,
    AlreadyRefunded = 19,
    ArrayLengthMismatch = 20,
    CannotFundOwnProject = 21,
    CannotInspireOwnProject = 22,
    Overflow = 23,
}

impl From<AccessError> for Error {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::AlreadyInitialized => Error::AlreadyInitialized,
            AccessError::NotInitialized => Error::NotInitialized,
            AccessError::MissingRole => Error::MissingRole,
            AccessError::SuperAdminLocked => Error::SuperAdminLocked,
        }
    }
}

#[contract]
pub struct CrowdfundingEscrow;

#[contractimpl]
impl CrowdfundingEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation & roles
    // ─────────────────────────────────────────────────────────

    /// Wire the escrow to its funding asset, the reputation ledger and the
    /// backer NFT contract, and install the first SuperAdmin.
    ///
    /// The escrow must also be granted `Awarder` on the ledger and be the
    /// NFT contract's minter before projects can be inspired or funded.
    pub fn init(
        env: Env,
        super_admin: Address,
        funding_token: Address,
        reputation_ledger: Address,
        backer_nft: Address,
    ) -> Result<(), Error> {
        super_admin.require_auth();
        if storage::has_settings(&env) {
            return Err(Error::AlreadyInitialized);
        }
        access_control::init_super_admin(&env, &super_admin)?;
        storage::save_settings(
            &env,
            &Settings {
                funding_token,
                reputation_ledger,
                backer_nft,
            },
        );
        Ok(())
    }

    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        access_control::grant_role(&env, &caller, &target, role).map_err(Error::from)
    }

    pub fn revoke_role(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        access_control::revoke_role(&env, &caller, &target).map_err(Error::from)
    }

    pub fn transfer_super_admin(
        env: Env,
        current_super_admin: Address,
        new_super_admin: Address,
    ) -> Result<(), Error> {
        access_control::transfer_super_admin(&env, &current_super_admin, &new_super_admin)
            .map_err(Error::from)
    }

    pub fn role_of(env: Env, address: Address) -> Option<Role> {
        access_control::role_of(&env, &address)
    }

    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        access_control::has_role(&env, &address, role)
    }

    pub fn get_settings(env: Env) -> Result<Settings, Error> {
        storage::load_settings(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Launch
    // ─────────────────────────────────────────────────────────

    /// Open a campaign running for `duration_seconds` from now, together with
    /// its backer NFT collection. Returns the new project id.
    pub fn create_project(
        env: Env,
        creator: Address,
        details: ProjectDetails,
        goal: i128,
        duration_seconds: u64,
        collection: CollectionInfo,
        creator_role: String,
    ) -> Result<u64, Error> {
        creator.require_auth();
        let settings = storage::load_settings(&env)?;

        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if duration_seconds == 0 {
            return Err(Error::InvalidDuration);
        }

        let now = env.ledger().timestamp();
        let deadline = now.checked_add(duration_seconds).ok_or(Error::Overflow)?;
        let id = storage::get_and_increment_project_id(&env);

        let config = ProjectConfig {
            id,
            creator: creator.clone(),
            creator_role,
            goal,
            deadline,
            created_at: now,
            nft_contract: settings.backer_nft.clone(),
        };
        storage::save_new_project(&env, &config, &details, &ProjectState::default());

        NftClient::new(&env, &settings.backer_nft).create_collection(
            &id,
            &collection.name,
            &collection.symbol,
            &collection.base_uri,
        );

        events::emit_project_created(
            &env,
            ProjectCreated {
                project_id: id,
                creator,
                title: details.title,
                goal,
                deadline,
                nft_contract: settings.backer_nft,
            },
        );
        Ok(id)
    }

    /// Add one cofounder. Cofounders are listed with the project and may edit
    /// its display details; settlement stays with the creator.
    pub fn add_cofounder(
        env: Env,
        project_id: u64,
        caller: Address,
        cofounder: Address,
        role: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        let (config, _) = storage::load_live_project(&env, project_id)?;
        if caller != config.creator {
            return Err(Error::NotCreator);
        }

        let mut cofounders = storage::load_cofounders(&env, project_id);
        append_cofounder(&env, &config, &mut cofounders, cofounder, role)?;
        storage::save_cofounders(&env, project_id, &cofounders);
        Ok(())
    }

    /// Add several cofounders at once; any rejected entry aborts the batch.
    pub fn add_cofounders_batch(
        env: Env,
        project_id: u64,
        caller: Address,
        cofounders: Vec<Address>,
        roles: Vec<String>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let (config, _) = storage::load_live_project(&env, project_id)?;
        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if cofounders.len() != roles.len() {
            return Err(Error::ArrayLengthMismatch);
        }

        let mut current = storage::load_cofounders(&env, project_id);
        for (cofounder, role) in cofounders.iter().zip(roles.iter()) {
            append_cofounder(&env, &config, &mut current, cofounder, role)?;
        }
        storage::save_cofounders(&env, project_id, &current);
        Ok(())
    }

    /// Replace the display text of a project. Creator or cofounder only.
    pub fn update_project_details(
        env: Env,
        project_id: u64,
        caller: Address,
        title: String,
        description: String,
        image_url: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        let (config, _) = storage::load_live_project(&env, project_id)?;
        if caller != config.creator && !is_listed_cofounder(&env, project_id, &caller) {
            return Err(Error::NotCreatorOrCofounder);
        }

        let mut details = storage::load_project_details(&env, project_id)?;
        details.title = title;
        details.description = description;
        details.image_url = image_url;
        storage::save_project_details(&env, project_id, &details);

        events::emit_project_updated(
            &env,
            ProjectUpdated {
                project_id,
                editor: caller,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the funding asset. Repeated contributions
    /// accumulate. Returns the id of the backer NFT minted for this
    /// contribution.
    pub fn fund_project(
        env: Env,
        project_id: u64,
        backer: Address,
        amount: i128,
        is_anonymous: bool,
    ) -> Result<u64, Error> {
        backer.require_auth();
        let settings = storage::load_settings(&env)?;
        let (config, mut state) = storage::load_live_project(&env, project_id)?;

        if env.ledger().timestamp() >= config.deadline {
            return Err(Error::DeadlinePassed);
        }
        if amount <= 0 {
            return Err(Error::ZeroContribution);
        }
        if backer == config.creator {
            return Err(Error::CannotFundOwnProject);
        }

        token::Client::new(&env, &settings.funding_token).transfer(
            &backer,
            &env.current_contract_address(),
            &amount,
        );

        let existing = storage::load_contribution(&env, project_id, &backer);
        if existing.is_none() {
            storage::push_contributor(&env, project_id, &backer);
            state.contributor_count += 1;
        }
        let mut contribution = existing.unwrap_or_default();
        contribution.amount = contribution
            .amount
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        contribution.is_anonymous = is_anonymous;
        storage::save_contribution(&env, project_id, &backer, &contribution);

        state.funds_raised = state
            .funds_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::save_project_state(&env, project_id, &state);

        let token_id =
            NftClient::new(&env, &config.nft_contract).mint(&project_id, &backer, &amount);

        events::emit_contribution_made(
            &env,
            ContributionMade {
                project_id,
                backer: backer.clone(),
                amount,
                is_anonymous,
                funds_raised: state.funds_raised,
            },
        );
        events::emit_nft_minted(
            &env,
            NftMinted {
                project_id,
                token_id,
                backer,
                amount,
            },
        );
        Ok(token_id)
    }

    /// Signal support for a project without funding it. Each account may
    /// inspire a project once; the creator earns [`INSPIRE_POINTS`].
    pub fn inspire_project(env: Env, project_id: u64, account: Address) -> Result<(), Error> {
        account.require_auth();
        let settings = storage::load_settings(&env)?;
        let (config, mut state) = storage::load_live_project(&env, project_id)?;

        if account == config.creator {
            return Err(Error::CannotInspireOwnProject);
        }
        if storage::has_inspired(&env, project_id, &account) {
            return Err(Error::AlreadyInspired);
        }

        storage::mark_inspired(&env, project_id, &account);
        state.inspirations += 1;
        storage::save_project_state(&env, project_id, &state);

        let details = storage::load_project_details(&env, project_id)?;
        ReputationClient::new(&env, &settings.reputation_ledger).award_genesis(
            &env.current_contract_address(),
            &config.creator,
            &INSPIRE_POINTS,
            &String::from_str(&env, "inspiration"),
            &details.title,
        );

        events::emit_project_inspired(
            &env,
            ProjectInspired {
                project_id,
                account,
                creator: config.creator,
                points: INSPIRE_POINTS,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Pay the full balance to the creator once the deadline has passed with
    /// the goal met. One-shot: the `claimed` flag is stored before the
    /// transfer, and a failed transfer reverts both.
    pub fn claim_funds(env: Env, project_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let settings = storage::load_settings(&env)?;
        let (config, mut state) = storage::load_live_project(&env, project_id)?;

        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if env.ledger().timestamp() < config.deadline {
            return Err(Error::DeadlineNotReached);
        }
        if state.funds_raised < config.goal {
            return Err(Error::GoalNotReached);
        }
        if state.claimed {
            return Err(Error::AlreadyClaimed);
        }

        state.claimed = true;
        storage::save_project_state(&env, project_id, &state);

        let amount = state.funds_raised;
        token::Client::new(&env, &settings.funding_token).transfer(
            &env.current_contract_address(),
            &config.creator,
            &amount,
        );
        log!(&env, "funds claimed", project_id, amount);

        events::emit_funds_claimed(
            &env,
            FundsClaimed {
                project_id,
                creator: config.creator,
                amount,
            },
        );
        Ok(amount)
    }

    /// Return `backer`'s whole contribution of a failed or deleted project.
    pub fn claim_refund(env: Env, project_id: u64, backer: Address) -> Result<i128, Error> {
        backer.require_auth();
        let settings = storage::load_settings(&env)?;
        let (config, mut state) = storage::load_project_pair(&env, project_id)?;
        ensure_refundable(&env, &config, &state)?;

        if storage::is_refunded(&env, project_id, &backer) {
            return Err(Error::AlreadyRefunded);
        }
        let contribution = storage::load_contribution(&env, project_id, &backer)
            .filter(|c| c.amount > 0)
            .ok_or(Error::NoContribution)?;

        refund_backer(&env, &settings, project_id, &mut state, &backer, contribution)
    }

    /// Refund every backer of a failed or deleted project that still has a
    /// balance in escrow. Anyone may trigger it; money only goes back to the
    /// backers. Returns how many backers were paid.
    pub fn process_refunds(env: Env, project_id: u64) -> Result<u32, Error> {
        let settings = storage::load_settings(&env)?;
        let (config, mut state) = storage::load_project_pair(&env, project_id)?;
        ensure_refundable(&env, &config, &state)?;

        let mut paid = 0u32;
        for backer in storage::load_contributors(&env, project_id).iter() {
            if storage::is_refunded(&env, project_id, &backer) {
                continue;
            }
            let Some(contribution) = storage::load_contribution(&env, project_id, &backer)
                .filter(|c| c.amount > 0)
            else {
                continue;
            };
            refund_backer(&env, &settings, project_id, &mut state, &backer, contribution)?;
            paid += 1;
        }
        log!(&env, "bulk refunds processed", project_id, paid);
        Ok(paid)
    }

    /// Withdraw a running campaign that has not reached its goal. Backers can
    /// reclaim their contributions immediately afterwards.
    pub fn delete_project(env: Env, project_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let (config, mut state) = storage::load_live_project(&env, project_id)?;

        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        // Only an active campaign can be withdrawn.
        if env.ledger().timestamp() >= config.deadline {
            return Err(Error::DeadlinePassed);
        }
        if state.funds_raised >= config.goal {
            return Err(Error::GoalReached);
        }

        state.deleted = true;
        storage::save_project_state(&env, project_id, &state);

        events::emit_project_deleted(
            &env,
            ProjectDeleted {
                project_id,
                creator: config.creator,
                funds_raised: state.funds_raised,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a live project. Deleted projects are reported as not found.
    pub fn get_project(env: Env, project_id: u64) -> Result<Project, Error> {
        storage::load_project(&env, project_id)
    }

    /// Number of projects ever created, deleted ones included.
    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    /// Up to `limit` live projects with id `>= start`, in id order.
    pub fn get_projects(env: Env, start: u64, limit: u32) -> Vec<Project> {
        let mut projects = Vec::new(&env);
        let count = storage::project_count(&env);
        let mut id = start;
        while id < count && projects.len() < limit {
            if let Ok(project) = storage::load_project(&env, id) {
                projects.push_back(project);
            }
            id += 1;
        }
        projects
    }

    pub fn get_projects_by_creator(env: Env, creator: Address) -> Vec<u64> {
        storage::load_creator_projects(&env, &creator)
    }

    pub fn project_phase(env: Env, project_id: u64) -> Result<ProjectPhase, Error> {
        let (config, state) = storage::load_project_pair(&env, project_id)?;
        Ok(ProjectPhase::of(&config, &state, env.ledger().timestamp()))
    }

    /// Running total of `backer` on the project; zero when none.
    pub fn get_contribution(env: Env, project_id: u64, backer: Address) -> Contribution {
        storage::load_contribution(&env, project_id, &backer).unwrap_or_default()
    }

    /// Every backer in first-contribution order.
    pub fn get_contributors(env: Env, project_id: u64) -> Vec<Address> {
        storage::load_contributors(&env, project_id)
    }

    /// Backers as they may be displayed: anonymous backers are redacted.
    pub fn get_public_contributors(env: Env, project_id: u64) -> Vec<PublicContribution> {
        let mut out = Vec::new(&env);
        for backer in storage::load_contributors(&env, project_id).iter() {
            let contribution = storage::load_contribution(&env, project_id, &backer)
                .unwrap_or_default();
            out.push_back(PublicContribution {
                backer: if contribution.is_anonymous {
                    None
                } else {
                    Some(backer)
                },
                amount: contribution.amount,
            });
        }
        out
    }

    pub fn is_refunded(env: Env, project_id: u64, backer: Address) -> bool {
        storage::is_refunded(&env, project_id, &backer)
    }

    pub fn has_inspired(env: Env, project_id: u64, account: Address) -> bool {
        storage::has_inspired(&env, project_id, &account)
    }

    pub fn get_cofounders(env: Env, project_id: u64) -> Vec<Cofounder> {
        storage::load_cofounders(&env, project_id)
    }

    pub fn is_cofounder(env: Env, project_id: u64, account: Address) -> bool {
        is_listed_cofounder(&env, project_id, &account)
    }
}

fn is_listed_cofounder(env: &Env, project_id: u64, account: &Address) -> bool {
    storage::load_cofounders(env, project_id)
        .iter()
        .any(|c| c.address == *account)
}

fn append_cofounder(
    env: &Env,
    config: &ProjectConfig,
    cofounders: &mut Vec<Cofounder>,
    cofounder: Address,
    role: String,
) -> Result<(), Error> {
    if cofounder == config.creator || cofounders.iter().any(|c| c.address == cofounder) {
        return Err(Error::AlreadyCofounder);
    }
    cofounders.push_back(Cofounder {
        address: cofounder.clone(),
        role: role.clone(),
    });
    events::emit_cofounder_added(
        env,
        CofounderAdded {
            project_id: config.id,
            cofounder,
            role,
        },
    );
    Ok(())
}

/// Refunds open after a missed deadline, or at once for a deleted project.
fn ensure_refundable(env: &Env, config: &ProjectConfig, state: &ProjectState) -> Result<(), Error> {
    if state.deleted {
        return Ok(());
    }
    if env.ledger().timestamp() < config.deadline {
        return Err(Error::DeadlineNotReached);
    }
    if state.funds_raised >= config.goal {
        return Err(Error::GoalReached);
    }
    Ok(())
}

/// Zero the contribution, flag the backer and persist the project total
/// before sending the money back.
fn refund_backer(
    env: &Env,
    settings: &Settings,
    project_id: u64,
    state: &mut ProjectState,
    backer: &Address,
    mut contribution: Contribution,
) -> Result<i128, Error> {
    let amount = contribution.amount;

    contribution.amount = 0;
    storage::save_contribution(env, project_id, backer, &contribution);
    storage::mark_refunded(env, project_id, backer);
    state.total_refunded = state
        .total_refunded
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    storage::save_project_state(env, project_id, state);

    token::Client::new(env, &settings.funding_token).transfer(
        &env.current_contract_address(),
        backer,
        &amount,
    );

    events::emit_refund_processed(
        env,
        RefundProcessed {
            project_id,
            backer: backer.clone(),
            amount,
        },
    );
    Ok(amount)
}
