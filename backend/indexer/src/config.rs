//! Application configuration loaded from environment variables.

use crate::errors::{IndexerError, Result};
use crate::events::Source;

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// Reputation ledger contract address (Strkey format)
    pub reputation_contract_id: Option<String>,
    /// Crowdfunding escrow contract address
    pub escrow_contract_id: Option<String>,
    /// Event/medal registry contract address
    pub registry_contract_id: Option<String>,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            rpc_url: var("RPC_URL")
                .unwrap_or_else(|| "https://soroban-testnet.stellar.org".to_string()),
            reputation_contract_id: var("REPUTATION_CONTRACT_ID"),
            escrow_contract_id: var("ESCROW_CONTRACT_ID"),
            registry_contract_id: var("REGISTRY_CONTRACT_ID"),
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:./kudos_events.db".to_string()),
            api_port: parse(var("API_PORT"), 3001, "API_PORT")?,
            poll_interval_secs: parse(var("POLL_INTERVAL_SECS"), 5, "POLL_INTERVAL_SECS")?,
            events_per_page: parse(var("EVENTS_PER_PAGE"), 100, "EVENTS_PER_PAGE")?,
            start_ledger: parse(var("START_LEDGER"), 0, "START_LEDGER")?,
        };

        if config.contract_ids().is_empty() {
            return Err(IndexerError::Config(
                "at least one of REPUTATION_CONTRACT_ID, ESCROW_CONTRACT_ID, \
                 REGISTRY_CONTRACT_ID is required"
                    .to_string(),
            ));
        }
        Ok(config)
    }

    /// Every configured contract, in a stable order.
    pub fn contract_ids(&self) -> Vec<String> {
        [
            &self.reputation_contract_id,
            &self.escrow_contract_id,
            &self.registry_contract_id,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// Which of the watched contracts `contract_id` is.
    pub fn source_of(&self, contract_id: &str) -> Source {
        let is = |id: &Option<String>| id.as_deref() == Some(contract_id);
        if is(&self.reputation_contract_id) {
            Source::Reputation
        } else if is(&self.escrow_contract_id) {
            Source::Escrow
        } else if is(&self.registry_contract_id) {
            Source::Registry
        } else {
            Source::Unknown
        }
    }
}

fn parse<T: std::str::FromStr>(raw: Option<String>, default: T, key: &str) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| IndexerError::Config(format!("Invalid {key}: {v}"))),
    }
}
