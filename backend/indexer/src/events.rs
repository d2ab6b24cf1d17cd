//! Notification kinds published by the Kudos contracts.
//!
//! Topics are `(symbol, key)`: the symbol picks the kind, the key is the
//! project id, event id, medal id or account the notification is about.

use serde::{Deserialize, Serialize};

/// Which watched contract emitted a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Reputation,
    Escrow,
    Registry,
    Unknown,
}

/// What the second topic entry identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Project,
    Gathering,
    Medal,
    Account,
    None,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Gathering => "gathering",
            Self::Medal => "medal",
            Self::Account => "account",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // Escrow
    ProjectCreated,
    ContributionMade,
    NftMinted,
    FundsClaimed,
    RefundProcessed,
    ProjectInspired,
    CofounderAdded,
    ProjectUpdated,
    ProjectDeleted,
    // Reputation ledger
    GenesisAwarded,
    BoostGiven,
    ParamsUpdated,
    // Registry
    EventSubmitted,
    EventApproved,
    EventRejected,
    MedalCreated,
    MedalClaimed,
    MedalAwarded,
    MedalStatusChanged,
    // Access control, any contract
    RoleSet,
    RoleDel,
    /// An event from a watched contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::ProjectCreated,
            "funded" => Self::ContributionMade,
            "nft_mint" => Self::NftMinted,
            "claimed" => Self::FundsClaimed,
            "refunded" => Self::RefundProcessed,
            "inspired" => Self::ProjectInspired,
            "cofounder" => Self::CofounderAdded,
            "updated" => Self::ProjectUpdated,
            "deleted" => Self::ProjectDeleted,
            "genesis" => Self::GenesisAwarded,
            "boost" => Self::BoostGiven,
            "params" => Self::ParamsUpdated,
            "ev_submit" => Self::EventSubmitted,
            "ev_approv" => Self::EventApproved,
            "ev_reject" => Self::EventRejected,
            "medal_new" => Self::MedalCreated,
            "medal_clm" => Self::MedalClaimed,
            "medal_awd" => Self::MedalAwarded,
            "medal_set" => Self::MedalStatusChanged,
            "role_set" => Self::RoleSet,
            "role_del" => Self::RoleDel,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column and accepted by `?kind=`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::ContributionMade => "contribution_made",
            Self::NftMinted => "nft_minted",
            Self::FundsClaimed => "funds_claimed",
            Self::RefundProcessed => "refund_processed",
            Self::ProjectInspired => "project_inspired",
            Self::CofounderAdded => "cofounder_added",
            Self::ProjectUpdated => "project_updated",
            Self::ProjectDeleted => "project_deleted",
            Self::GenesisAwarded => "genesis_awarded",
            Self::BoostGiven => "boost_given",
            Self::ParamsUpdated => "params_updated",
            Self::EventSubmitted => "event_submitted",
            Self::EventApproved => "event_approved",
            Self::EventRejected => "event_rejected",
            Self::MedalCreated => "medal_created",
            Self::MedalClaimed => "medal_claimed",
            Self::MedalAwarded => "medal_awarded",
            Self::MedalStatusChanged => "medal_status_changed",
            Self::RoleSet => "role_set",
            Self::RoleDel => "role_del",
            Self::Unknown => "unknown",
        }
    }

    pub fn subject(&self) -> SubjectKind {
        match self {
            Self::ProjectCreated
            | Self::ContributionMade
            | Self::NftMinted
            | Self::FundsClaimed
            | Self::RefundProcessed
            | Self::ProjectInspired
            | Self::CofounderAdded
            | Self::ProjectUpdated
            | Self::ProjectDeleted => SubjectKind::Project,
            Self::EventSubmitted | Self::EventApproved | Self::EventRejected => {
                SubjectKind::Gathering
            }
            Self::MedalCreated
            | Self::MedalClaimed
            | Self::MedalAwarded
            | Self::MedalStatusChanged => SubjectKind::Medal,
            Self::GenesisAwarded | Self::BoostGiven | Self::RoleSet | Self::RoleDel => {
                SubjectKind::Account
            }
            Self::ParamsUpdated | Self::Unknown => SubjectKind::None,
        }
    }

    /// The contract expected to emit this kind. Role events come from all.
    pub fn source(&self) -> Option<Source> {
        match self.subject() {
            SubjectKind::Project => Some(Source::Escrow),
            SubjectKind::Gathering | SubjectKind::Medal => Some(Source::Registry),
            _ => match self {
                Self::GenesisAwarded | Self::BoostGiven | Self::ParamsUpdated => {
                    Some(Source::Reputation)
                }
                _ => None,
            },
        }
    }

    /// Parse a stored `event_type` back.
    pub fn from_str_id(id: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.as_str() == id)
    }
}

pub const ALL_KINDS: [EventKind; 21] = [
    EventKind::ProjectCreated,
    EventKind::ContributionMade,
    EventKind::NftMinted,
    EventKind::FundsClaimed,
    EventKind::RefundProcessed,
    EventKind::ProjectInspired,
    EventKind::CofounderAdded,
    EventKind::ProjectUpdated,
    EventKind::ProjectDeleted,
    EventKind::GenesisAwarded,
    EventKind::BoostGiven,
    EventKind::ParamsUpdated,
    EventKind::EventSubmitted,
    EventKind::EventApproved,
    EventKind::EventRejected,
    EventKind::MedalCreated,
    EventKind::MedalClaimed,
    EventKind::MedalAwarded,
    EventKind::MedalStatusChanged,
    EventKind::RoleSet,
    EventKind::RoleDel,
];

/// A decoded notification, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KudosEvent {
    /// RPC event id; unique per notification.
    pub rpc_id: Option<String>,
    pub event_type: String,
    pub subject_kind: String,
    pub subject_id: Option<String>,
    /// Account that acted or received; `None` for anonymous backers.
    pub actor: Option<String>,
    /// Token amount or reputation points, as a decimal string.
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub rpc_id: Option<String>,
    pub event_type: String,
    pub subject_kind: String,
    pub subject_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
