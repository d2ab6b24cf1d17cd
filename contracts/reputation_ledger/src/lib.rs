//! # Reputation Ledger
//!
//! Additive trust score per account. Two sources feed it:
//!
//! | Source   | Entry point(s)                          | Gate                          |
//! |----------|-----------------------------------------|-------------------------------|
//! | Genesis  | `award_genesis`, `award_genesis_batch`  | `SuperAdmin`, `Admin`, `Awarder` |
//! | Boost    | `boost`                                 | standing + cooldown           |
//!
//! The crowdfunding escrow and the event/medal registry hold the `Awarder`
//! role here and credit their users through `award_genesis`. Genesis awards
//! are never revoked.
//!
//! Authorization is delegated to [`access_control`], storage to [`storage`]
//! and the boost arithmetic to [`power`].

#![no_std]

use access_control::AccessError;
pub use access_control::Role;
use soroban_sdk::{contract, contracterror, contractimpl, log, Address, Env, String, Vec};

pub mod events;
pub mod power;
mod storage;
mod types;

#[cfg(test)]
mod test_events;

use events::{BoostGiven, GenesisAwarded, ParamsUpdated};
use power::BoostDenied;
pub use types::{BoostParams, BoostStatus, GenesisAward, Standing};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    MissingRole = 3,
    SuperAdminLocked = 4,
    InvalidAmount = 5,
    ArrayLengthMismatch = 6,
    CannotBoostSelf = 7,
    InsufficientReputation = 8,
    CooldownNotExpired = 9,
    Overflow = 10,
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

impl From<BoostDenied> for Error {
    fn from(denied: BoostDenied) -> Self {
        match denied {
            BoostDenied::SelfBoost => Error::CannotBoostSelf,
            BoostDenied::InsufficientReputation { .. } => Error::InsufficientReputation,
            BoostDenied::CooldownNotExpired { .. } => Error::CooldownNotExpired,
        }
    }
}

const AWARD_ROLES: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Awarder];

#[contract]
pub struct ReputationLedger;

#[contractimpl]
impl ReputationLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation & roles
    // ─────────────────────────────────────────────────────────

    /// Install the first SuperAdmin and the default boost parameters.
    pub fn init(env: Env, super_admin: Address) -> Result<(), Error> {
        super_admin.require_auth();
        access_control::init_super_admin(&env, &super_admin)?;
        storage::save_params(&env, &BoostParams::default());
        Ok(())
    }

    /// Grant `role` to `target`. Contracts that credit reputation get `Awarder`.
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

    // ─────────────────────────────────────────────────────────
    // Genesis awards
    // ─────────────────────────────────────────────────────────

    /// Credit `amount` genesis reputation to `recipient` and record it in the
    /// recipient's history. Returns the recipient's new total.
    pub fn award_genesis(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: u64,
        category: String,
        reason: String,
    ) -> Result<u64, Error> {
        caller.require_auth();
        access_control::require_any_of(&env, &caller, &AWARD_ROLES)?;
        credit_genesis(&env, &caller, &recipient, amount, category, reason)
    }

    /// Apply `award_genesis` to every slot of the four parallel vectors.
    /// Any invalid entry aborts the whole batch.
    pub fn award_genesis_batch(
        env: Env,
        caller: Address,
        recipients: Vec<Address>,
        amounts: Vec<u64>,
        categories: Vec<String>,
        reasons: Vec<String>,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_any_of(&env, &caller, &AWARD_ROLES)?;

        let len = recipients.len();
        if amounts.len() != len || categories.len() != len || reasons.len() != len {
            return Err(Error::ArrayLengthMismatch);
        }

        for i in 0..len {
            // Lengths were checked above, so every index is present.
            let (Some(recipient), Some(amount), Some(category), Some(reason)) = (
                recipients.get(i),
                amounts.get(i),
                categories.get(i),
                reasons.get(i),
            ) else {
                return Err(Error::ArrayLengthMismatch);
            };
            credit_genesis(&env, &caller, &recipient, amount, category, reason)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Boosts
    // ─────────────────────────────────────────────────────────

    /// Give `recipient` a boost worth `isqrt(reputation(caller)) + baseline`.
    ///
    /// Checks, in order: no self-boost, minimum standing, cooldown. The
    /// numeric detail of a refusal is written to the diagnostic log and is
    /// also available through [`ReputationLedger::boost_status`].
    pub fn boost(env: Env, caller: Address, recipient: Address) -> Result<u64, Error> {
        caller.require_auth();

        let params = storage::load_params(&env);
        let mut booster = storage::load_standing(&env, &caller);
        let now = env.ledger().timestamp();

        let power = power::check_boost(
            caller == recipient,
            booster.reputation,
            booster.last_boost_at,
            now,
            &params,
        )
        .map_err(|denied| {
            match denied {
                BoostDenied::InsufficientReputation { required, actual } => {
                    log!(&env, "boost refused: reputation below minimum", required, actual)
                }
                BoostDenied::CooldownNotExpired { remaining } => {
                    log!(&env, "boost refused: cooldown seconds remaining", remaining)
                }
                BoostDenied::SelfBoost => log!(&env, "boost refused: self boost"),
            }
            Error::from(denied)
        })?;

        booster.last_boost_at = Some(now);
        storage::save_standing(&env, &caller, &booster);

        let mut target = storage::load_standing(&env, &recipient);
        target.reputation = target.reputation.checked_add(power).ok_or(Error::Overflow)?;
        target.boost = target.boost.checked_add(power).ok_or(Error::Overflow)?;
        storage::save_standing(&env, &recipient, &target);

        events::emit_boost_given(
            &env,
            BoostGiven {
                booster: caller,
                recipient,
                power,
                timestamp: now,
            },
        );
        Ok(power)
    }

    /// Replace the global boost parameters. Applies to every later boost.
    pub fn set_params(
        env: Env,
        caller: Address,
        cooldown: u64,
        baseline_power: u64,
        min_rep_to_boost: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_admin_or_above(&env, &caller)?;

        storage::save_params(
            &env,
            &BoostParams {
                cooldown,
                baseline_power,
                min_rep_to_boost,
            },
        );
        events::emit_params_updated(
            &env,
            ParamsUpdated {
                caller,
                cooldown,
                baseline_power,
                min_rep_to_boost,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn reputation_of(env: Env, account: Address) -> u64 {
        storage::load_standing(&env, &account).reputation
    }

    pub fn genesis_reputation_of(env: Env, account: Address) -> u64 {
        storage::load_standing(&env, &account).genesis
    }

    pub fn boost_reputation_of(env: Env, account: Address) -> u64 {
        storage::load_standing(&env, &account).boost
    }

    /// Power a boost from `account` would carry under the current params.
    pub fn boost_power(env: Env, account: Address) -> u64 {
        let params = storage::load_params(&env);
        power::boost_power(storage::load_standing(&env, &account).reputation, &params)
    }

    /// Timestamp of the account's last boost, `0` if it never boosted.
    pub fn last_boost_at(env: Env, account: Address) -> u64 {
        storage::load_standing(&env, &account)
            .last_boost_at
            .unwrap_or(0)
    }

    pub fn cooldown_remaining(env: Env, account: Address) -> u64 {
        let params = storage::load_params(&env);
        let standing = storage::load_standing(&env, &account);
        power::cooldown_remaining(
            standing.last_boost_at,
            env.ledger().timestamp(),
            params.cooldown,
        )
    }

    pub fn boost_status(env: Env, account: Address) -> BoostStatus {
        let params = storage::load_params(&env);
        let standing = storage::load_standing(&env, &account);
        let cooldown_remaining = power::cooldown_remaining(
            standing.last_boost_at,
            env.ledger().timestamp(),
            params.cooldown,
        );
        BoostStatus {
            reputation: standing.reputation,
            required: params.min_rep_to_boost,
            power: power::boost_power(standing.reputation, &params),
            cooldown_remaining,
            can_boost: standing.reputation >= params.min_rep_to_boost && cooldown_remaining == 0,
        }
    }

    pub fn get_params(env: Env) -> BoostParams {
        storage::load_params(&env)
    }

    /// Every genesis award received by `account`, oldest first.
    pub fn get_genesis_history(env: Env, account: Address) -> Vec<GenesisAward> {
        storage::load_history(&env, &account)
    }

    /// Sum of the genesis awards of `account` filed under `category`.
    pub fn get_genesis_by_category(env: Env, account: Address, category: String) -> u64 {
        storage::load_history(&env, &account)
            .iter()
            .filter(|award| award.category == category)
            .fold(0u64, |total, award| total.saturating_add(award.amount))
    }
}

fn credit_genesis(
    env: &Env,
    caller: &Address,
    recipient: &Address,
    amount: u64,
    category: String,
    reason: String,
) -> Result<u64, Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }

    let mut standing = storage::load_standing(env, recipient);
    standing.reputation = standing.reputation.checked_add(amount).ok_or(Error::Overflow)?;
    standing.genesis = standing.genesis.checked_add(amount).ok_or(Error::Overflow)?;
    storage::save_standing(env, recipient, &standing);

    storage::append_history(
        env,
        recipient,
        GenesisAward {
            amount,
            category: category.clone(),
            reason: reason.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );

    events::emit_genesis_awarded(
        env,
        GenesisAwarded {
            recipient: recipient.clone(),
            amount,
            category,
            reason,
            awarded_by: caller.clone(),
        },
    );
    Ok(standing.reputation)
}
