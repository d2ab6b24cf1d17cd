//! # Event & Medal Registry
//!
//! Community events go through moderation before their medals become
//! claimable. Each medal credits a fixed amount of reputation on the
//! reputation ledger, at most once per account.
//!
//! ```text
//! submit_event ──► Pending ──approve_event──► Approved ──► claim_medal / award_medal
//!                     │
//!                     └──reject_event(reason)──► Rejected
//! ```
//!
//! The registry must hold the `Awarder` role on the ledger.

#![no_std]

use access_control::AccessError;
pub use access_control::Role;
use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

pub mod events;
mod external;
mod storage;
mod types;

#[cfg(test)]
mod test_events;

use events::{
    EventApproved, EventRejected, EventSubmitted, MedalAwarded, MedalClaimed, MedalCreated,
    MedalStatusChanged,
};
use external::ReputationClient;
pub use types::{Event, EventDetails, EventStatus, Medal};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    MissingRole = 3,
    SuperAdminLocked = 4,
    EventNotFound = 5,
    MedalNotFound = 6,
    InvalidStatus = 7,
    EmptyReason = 8,
    ArrayLengthMismatch = 9,
    InvalidPoints = 10,
    NotCreator = 11,
    EventNotApproved = 12,
    MedalInactive = 13,
    MedalCapacityReached = 14,
    AlreadyClaimed = 15,
    Overflow = 16,
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
pub struct EventMedalRegistry;

#[contractimpl]
impl EventMedalRegistry {
    pub fn init(env: Env, super_admin: Address, reputation_ledger: Address) -> Result<(), Error> {
        super_admin.require_auth();
        if storage::has_ledger(&env) {
            return Err(Error::AlreadyInitialized);
        }
        access_control::init_super_admin(&env, &super_admin)?;
        storage::set_ledger(&env, &reputation_ledger);
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

    pub fn reputation_ledger(env: Env) -> Result<Address, Error> {
        storage::get_ledger(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Submission & moderation
    // ─────────────────────────────────────────────────────────

    /// Submit an event together with its medals. The five medal arrays are
    /// read slot by slot and must have equal length; every medal must be
    /// worth at least one point. The event starts `Pending`; every medal
    /// starts active with no claims.
    pub fn submit_event(
        env: Env,
        creator: Address,
        details: EventDetails,
        medal_names: Vec<String>,
        medal_descriptions: Vec<String>,
        medal_icons: Vec<String>,
        medal_points: Vec<u64>,
        medal_max_claims: Vec<u32>,
    ) -> Result<u64, Error> {
        creator.require_auth();
        storage::get_ledger(&env)?;

        let n = medal_names.len();
        if medal_descriptions.len() != n
            || medal_icons.len() != n
            || medal_points.len() != n
            || medal_max_claims.len() != n
        {
            return Err(Error::ArrayLengthMismatch);
        }

        if medal_points.iter().any(|points| points == 0) {
            return Err(Error::InvalidPoints);
        }

        let event_id = storage::next_event_id(&env);
        let EventDetails {
            title,
            description,
            location,
            image_url,
            datetime,
            time_text,
        } = details;
        let event = Event {
            id: event_id,
            creator: creator.clone(),
            title: title.clone(),
            description,
            location,
            image_url,
            datetime,
            time_text,
            status: EventStatus::Pending,
            reject_reason: String::from_str(&env, ""),
            created_at: env.ledger().timestamp(),
        };
        storage::save_event(&env, &event);

        events::emit_event_submitted(
            &env,
            EventSubmitted {
                event_id,
                creator,
                title,
                datetime,
                medal_count: n,
            },
        );

        let mut medal_ids = Vec::new(&env);
        for i in 0..n {
            let medal = Medal {
                id: storage::next_medal_id(&env),
                event_id,
                name: medal_names.get_unchecked(i),
                description: medal_descriptions.get_unchecked(i),
                icon_url: medal_icons.get_unchecked(i),
                points: medal_points.get_unchecked(i),
                max_claims: medal_max_claims.get_unchecked(i),
                claims_count: 0,
                active: true,
            };
            storage::save_medal(&env, &medal);
            medal_ids.push_back(medal.id);

            events::emit_medal_created(
                &env,
                MedalCreated {
                    medal_id: medal.id,
                    event_id,
                    name: medal.name,
                    points: medal.points,
                    max_claims: medal.max_claims,
                },
            );
        }
        storage::save_event_medals(&env, event_id, &medal_ids);

        Ok(event_id)
    }

    /// Admin decision. Only a `Pending` event can be approved.
    pub fn approve_event(env: Env, caller: Address, event_id: u64) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_admin_or_above(&env, &caller)?;

        let mut event = pending_event(&env, event_id)?;
        event.status = EventStatus::Approved;
        storage::save_event(&env, &event);

        events::emit_event_approved(
            &env,
            EventApproved {
                event_id,
                approved_by: caller,
            },
        );
        Ok(())
    }

    /// Admin decision with a mandatory, displayed reason. Final.
    pub fn reject_event(
        env: Env,
        caller: Address,
        event_id: u64,
        reason: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_admin_or_above(&env, &caller)?;

        let mut event = pending_event(&env, event_id)?;
        if reason.is_empty() {
            return Err(Error::EmptyReason);
        }
        event.status = EventStatus::Rejected;
        event.reject_reason = reason.clone();
        storage::save_event(&env, &event);

        events::emit_event_rejected(
            &env,
            EventRejected {
                event_id,
                rejected_by: caller,
                reason,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Medals
    // ─────────────────────────────────────────────────────────

    /// Open or close a medal for new claims. Past claims are kept.
    pub fn set_medal_active(
        env: Env,
        caller: Address,
        medal_id: u64,
        active: bool,
    ) -> Result<(), Error> {
        caller.require_auth();
        let mut medal = storage::load_medal(&env, medal_id).ok_or(Error::MedalNotFound)?;
        let event = storage::load_event(&env, medal.event_id).ok_or(Error::EventNotFound)?;
        require_creator_or_admin(&env, &caller, &event)?;

        medal.active = active;
        storage::save_medal(&env, &medal);

        events::emit_medal_status_changed(
            &env,
            MedalStatusChanged {
                medal_id,
                changed_by: caller,
                active,
            },
        );
        Ok(())
    }

    /// Claim a medal for oneself. Returns the claimer's new reputation.
    pub fn claim_medal(env: Env, account: Address, medal_id: u64) -> Result<u64, Error> {
        account.require_auth();
        let (medal, reputation) = grant_medal(&env, medal_id, &account)?;

        events::emit_medal_claimed(
            &env,
            MedalClaimed {
                medal_id,
                event_id: medal.event_id,
                account,
                points: medal.points,
                claims_count: medal.claims_count,
            },
        );
        Ok(reputation)
    }

    /// Grant a medal to `to` on their behalf, e.g. for attendance recorded
    /// offline. Event creator or admin. Returns the recipient's new reputation.
    pub fn award_medal(env: Env, caller: Address, medal_id: u64, to: Address) -> Result<u64, Error> {
        caller.require_auth();
        let medal = storage::load_medal(&env, medal_id).ok_or(Error::MedalNotFound)?;
        let event = storage::load_event(&env, medal.event_id).ok_or(Error::EventNotFound)?;
        require_creator_or_admin(&env, &caller, &event)?;

        let (medal, reputation) = grant_medal(&env, medal_id, &to)?;

        events::emit_medal_awarded(
            &env,
            MedalAwarded {
                medal_id,
                event_id: medal.event_id,
                awarded_by: caller,
                recipient: to,
                points: medal.points,
                claims_count: medal.claims_count,
            },
        );
        Ok(reputation)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_event(env: Env, event_id: u64) -> Result<Event, Error> {
        storage::load_event(&env, event_id).ok_or(Error::EventNotFound)
    }

    /// `Unset` for ids that were never submitted.
    pub fn get_event_status(env: Env, event_id: u64) -> EventStatus {
        storage::load_event(&env, event_id)
            .map(|e| e.status)
            .unwrap_or(EventStatus::Unset)
    }

    pub fn get_medal(env: Env, medal_id: u64) -> Result<Medal, Error> {
        storage::load_medal(&env, medal_id).ok_or(Error::MedalNotFound)
    }

    pub fn get_event_medals(env: Env, event_id: u64) -> Vec<Medal> {
        let mut medals = Vec::new(&env);
        for id in storage::load_event_medals(&env, event_id).iter() {
            if let Some(medal) = storage::load_medal(&env, id) {
                medals.push_back(medal);
            }
        }
        medals
    }

    pub fn has_claimed(env: Env, medal_id: u64, account: Address) -> bool {
        storage::has_claimed(&env, medal_id, &account)
    }

    pub fn event_count(env: Env) -> u64 {
        storage::event_count(&env)
    }

    pub fn medal_count(env: Env) -> u64 {
        storage::medal_count(&env)
    }

    /// Up to `limit` events in `status`, scanning ids from `start`.
    pub fn get_events_by_status(env: Env, status: EventStatus, start: u64, limit: u32) -> Vec<Event> {
        let mut out = Vec::new(&env);
        let count = storage::event_count(&env);
        let mut id = start;
        while id < count && out.len() < limit {
            if let Some(event) = storage::load_event(&env, id) {
                if event.status == status {
                    out.push_back(event);
                }
            }
            id += 1;
        }
        out
    }
}

fn pending_event(env: &Env, event_id: u64) -> Result<Event, Error> {
    let event = storage::load_event(env, event_id).ok_or(Error::EventNotFound)?;
    if event.status != EventStatus::Pending {
        return Err(Error::InvalidStatus);
    }
    Ok(event)
}

fn require_creator_or_admin(env: &Env, caller: &Address, event: &Event) -> Result<(), Error> {
    if *caller == event.creator || access_control::require_admin_or_above(env, caller).is_ok() {
        Ok(())
    } else {
        Err(Error::NotCreator)
    }
}

/// Shared claim path: checks, flag, count, then the ledger credit. A ledger
/// failure reverts the flag and count with it.
fn grant_medal(env: &Env, medal_id: u64, account: &Address) -> Result<(Medal, u64), Error> {
    let ledger = storage::get_ledger(env)?;
    let mut medal = storage::load_medal(env, medal_id).ok_or(Error::MedalNotFound)?;
    let event = storage::load_event(env, medal.event_id).ok_or(Error::EventNotFound)?;

    if event.status != EventStatus::Approved {
        return Err(Error::EventNotApproved);
    }
    if !medal.active {
        return Err(Error::MedalInactive);
    }
    if storage::has_claimed(env, medal_id, account) {
        return Err(Error::AlreadyClaimed);
    }
    if !medal.has_capacity() {
        return Err(Error::MedalCapacityReached);
    }

    storage::mark_claimed(env, medal_id, account);
    medal.claims_count = medal.claims_count.checked_add(1).ok_or(Error::Overflow)?;
    storage::save_medal(env, &medal);

    let reputation = ReputationClient::new(env, &ledger).award_genesis(
        &env.current_contract_address(),
        account,
        &medal.points,
        &String::from_str(env, "medal"),
        &medal.name,
    );
    Ok((medal, reputation))
}
