use soroban_sdk::{contractclient, Address, Env, String};

/// The one ledger entry point the registry needs: medal points are recorded
/// as genesis awards in the `"medal"` category.
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
