//! # Backer NFT
//!
//! Commemorative tokens for crowdfunding backers. The escrow contract is the
//! single minter: it opens one collection per project when the project is
//! created and mints one token per contribution, carrying the contributed
//! amount.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

mod storage;
mod types;


pub use types::{BackerToken, Collection};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    CollectionExists = 3,
    CollectionNotFound = 4,
    TokenNotFound = 5,
    NotOwner = 6,
    InvalidAmount = 7,
}

#[contract]
pub struct BackerNft;

#[contractimpl]
impl BackerNft {
    /// Set the address allowed to open collections and mint.
    pub fn init(env: Env, minter: Address) -> Result<(), Error> {
        if storage::has_minter(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_minter(&env, &minter);
        Ok(())
    }

    /// Open the collection dedicated to `project_id`.
    pub fn create_collection(
        env: Env,
        project_id: u64,
        name: String,
        symbol: String,
        base_uri: String,
    ) -> Result<(), Error> {
        require_minter(&env)?;
        if storage::load_collection(&env, project_id).is_some() {
            return Err(Error::CollectionExists);
        }
        storage::save_collection(
            &env,
            &Collection {
                project_id,
                name,
                symbol,
                base_uri,
                minted: 0,
            },
        );
        Ok(())
    }

    /// Mint a token in `project_id`'s collection to `to`. Returns the token id.
    pub fn mint(env: Env, project_id: u64, to: Address, amount: i128) -> Result<u64, Error> {
        require_minter(&env)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut collection =
            storage::load_collection(&env, project_id).ok_or(Error::CollectionNotFound)?;
        collection.minted += 1;

        let token = BackerToken {
            id: storage::next_token_id(&env),
            project_id,
            serial: collection.minted,
            owner: to.clone(),
            amount,
            minted_at: env.ledger().timestamp(),
        };
        storage::save_token(&env, &token);
        storage::save_collection(&env, &collection);

        let mut owned = storage::load_owned(&env, &to);
        owned.push_back(token.id);
        storage::save_owned(&env, &to, &owned);

        Ok(token.id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, token_id: u64) -> Result<(), Error> {
        from.require_auth();
        let mut token = storage::load_token(&env, token_id).ok_or(Error::TokenNotFound)?;
        if token.owner != from {
            return Err(Error::NotOwner);
        }

        let mut from_owned = storage::load_owned(&env, &from);
        if let Some(index) = from_owned.first_index_of(token_id) {
            from_owned.remove(index);
        }
        storage::save_owned(&env, &from, &from_owned);

        let mut to_owned = storage::load_owned(&env, &to);
        to_owned.push_back(token_id);
        storage::save_owned(&env, &to, &to_owned);

        token.owner = to;
        storage::save_token(&env, &token);
        Ok(())
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        storage::load_token(&env, token_id)
            .map(|token| token.owner)
            .ok_or(Error::TokenNotFound)
    }

    pub fn get_token(env: Env, token_id: u64) -> Option<BackerToken> {
        storage::load_token(&env, token_id)
    }

    pub fn get_collection(env: Env, project_id: u64) -> Option<Collection> {
        storage::load_collection(&env, project_id)
    }

    pub fn tokens_of(env: Env, owner: Address) -> Vec<u64> {
        storage::load_owned(&env, &owner)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        storage::load_owned(&env, &owner).len()
    }

    pub fn total_supply(env: Env) -> u64 {
        storage::total_minted(&env)
    }

    pub fn minter(env: Env) -> Result<Address, Error> {
        storage::get_minter(&env).ok_or(Error::NotInitialized)
    }
}

fn require_minter(env: &Env) -> Result<(), Error> {
    let minter = storage::get_minter(env).ok_or(Error::NotInitialized)?;
    minter.require_auth();
    Ok(())
}
