use soroban_sdk::{contracttype, Address, String};

/// Token series dedicated to one crowdfunding project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collection {
    pub project_id: u64,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    /// Number of tokens minted in this collection so far.
    pub minted: u32,
}

/// One backer NFT; minted per contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackerToken {
    pub id: u64,
    pub project_id: u64,
    /// Position inside the project's collection, starting at 1.
    pub serial: u32,
    pub owner: Address,
    /// Contribution amount this token commemorates.
    pub amount: i128,
    pub minted_at: u64,
}
