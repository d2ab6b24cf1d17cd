//! Clients for the contracts the escrow calls into.
//!
//! Only the entry points the escrow uses are declared. A failure inside
//! either callee aborts the escrow call that made it.

use soroban_sdk::{contractclient, Address, Env, String};

#[allow(dead_code)]
#[contractclient(name = "ReputationClient")]
pub trait ReputationLedgerInterface {
    fn award_genesis(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: u64,
        category: String,
        reason: String,
    ) -> u64;
}

#[allow(dead_code)]
#[contractclient(name = "NftClient")]
pub trait BackerNftInterface {
    fn create_collection(env: Env, project_id: u64, name: String, symbol: String, base_uri: String);
    fn mint(env: Env, project_id: u64, to: Address, amount: i128) -> u64;
}
