//! # Access Control
//!
//! Role registry linked into every Kudos contract. Roles live in the
//! *calling* contract's instance storage, so each contract keeps its own
//! independent admin set and nothing is shared through a global.
//!
//! | Role         | May grant           | Typical holder                         |
//! |--------------|---------------------|----------------------------------------|
//! | `SuperAdmin` | `Admin`, `Awarder`  | deployer; exactly one at a time        |
//! | `Admin`      | `Awarder`           | moderators                             |
//! | `Awarder`    | none                | contracts allowed to credit reputation |
//!
//! Every guard returns an [`AccessError`]; contracts convert it into their
//! own `contracterror` enum and bubble it up with `?`.
//!
//! Instance keys written here are `RbacSuper` and `RbacRole(Address)`. A
//! contract's own `DataKey` must not reuse those variant names.

#![no_std]

use soroban_sdk::{contracttype, symbol_short, Address, Env};


const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// A capability held by an address inside one contract.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    SuperAdmin,
    Admin,
    Awarder,
}

/// Rejections raised by the registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessError {
    AlreadyInitialized,
    NotInitialized,
    MissingRole,
    /// The SuperAdmin can only change hands through `transfer_super_admin`.
    SuperAdminLocked,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum RbacKey {
    RbacSuper,
    RbacRole(Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn write_role(env: &Env, target: &Address, role: Role) {
    env.storage()
        .instance()
        .set(&RbacKey::RbacRole(target.clone()), &role);
    bump_instance(env);
}

fn emit_role_set(env: &Env, caller: &Address, target: &Address, role: Role) {
    env.events().publish(
        (symbol_short!("role_set"), target.clone()),
        (caller.clone(), role),
    );
}

/// Install the first SuperAdmin. Only succeeds once per contract.
pub fn init_super_admin(env: &Env, super_admin: &Address) -> Result<(), AccessError> {
    if is_initialized(env) {
        return Err(AccessError::AlreadyInitialized);
    }
    env.storage()
        .instance()
        .set(&RbacKey::RbacSuper, super_admin);
    write_role(env, super_admin, Role::SuperAdmin);
    emit_role_set(env, super_admin, super_admin, Role::SuperAdmin);
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&RbacKey::RbacSuper)
}

/// Current SuperAdmin address.
pub fn super_admin(env: &Env) -> Result<Address, AccessError> {
    env.storage()
        .instance()
        .get(&RbacKey::RbacSuper)
        .ok_or(AccessError::NotInitialized)
}

pub fn role_of(env: &Env, address: &Address) -> Option<Role> {
    env.storage()
        .instance()
        .get(&RbacKey::RbacRole(address.clone()))
}

pub fn has_role(env: &Env, address: &Address, role: Role) -> bool {
    role_of(env, address) == Some(role)
}

/// Succeeds when `address` holds one of `roles`.
pub fn require_any_of(env: &Env, address: &Address, roles: &[Role]) -> Result<(), AccessError> {
    if !is_initialized(env) {
        return Err(AccessError::NotInitialized);
    }
    match role_of(env, address) {
        Some(held) if roles.contains(&held) => Ok(()),
        _ => Err(AccessError::MissingRole),
    }
}

pub fn require_admin_or_above(env: &Env, address: &Address) -> Result<(), AccessError> {
    require_any_of(env, address, &[Role::SuperAdmin, Role::Admin])
}

/// Grant `role` to `target`, replacing any role it held before.
///
/// - `caller` must hold `SuperAdmin` or `Admin`.
/// - Only the SuperAdmin may grant `Admin`.
/// - `SuperAdmin` is never granted here, and the SuperAdmin's own role
///   cannot be overwritten.
pub fn grant_role(
    env: &Env,
    caller: &Address,
    target: &Address,
    role: Role,
) -> Result<(), AccessError> {
    caller.require_auth();
    require_admin_or_above(env, caller)?;

    if role == Role::SuperAdmin || super_admin(env)? == *target {
        return Err(AccessError::SuperAdminLocked);
    }
    if role == Role::Admin && !has_role(env, caller, Role::SuperAdmin) {
        return Err(AccessError::MissingRole);
    }

    write_role(env, target, role);
    emit_role_set(env, caller, target, role);
    Ok(())
}

/// Remove whatever role `target` holds.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address) -> Result<(), AccessError> {
    caller.require_auth();
    require_admin_or_above(env, caller)?;

    if super_admin(env)? == *target {
        return Err(AccessError::SuperAdminLocked);
    }
    // Admins cannot strip other admins.
    if has_role(env, target, Role::Admin) && !has_role(env, caller, Role::SuperAdmin) {
        return Err(AccessError::MissingRole);
    }

    env.storage()
        .instance()
        .remove(&RbacKey::RbacRole(target.clone()));
    bump_instance(env);
    env.events()
        .publish((symbol_short!("role_del"), target.clone()), caller.clone());
    Ok(())
}

/// Hand the SuperAdmin role to `new_super_admin`; the old holder keeps no role.
pub fn transfer_super_admin(
    env: &Env,
    current: &Address,
    new_super_admin: &Address,
) -> Result<(), AccessError> {
    current.require_auth();
    if super_admin(env)? != *current {
        return Err(AccessError::MissingRole);
    }

    env.storage()
        .instance()
        .remove(&RbacKey::RbacRole(current.clone()));
    env.storage()
        .instance()
        .set(&RbacKey::RbacSuper, new_super_admin);
    write_role(env, new_super_admin, Role::SuperAdmin);

    env.events()
        .publish((symbol_short!("role_del"), current.clone()), current.clone());
    emit_role_set(env, current, new_super_admin, Role::SuperAdmin);
    Ok(())
}
