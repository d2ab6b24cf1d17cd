use soroban_sdk::{contracttype, Address, String};

/// Moderation state of a submitted event.
///
/// `Unset` is only ever reported for ids that were never submitted.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EventStatus {
    Unset = 0,
    Pending = 1,
    Approved = 2,
    Rejected = 3,
}

/// What an organizer submits; the registry adds id, status and timestamps.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
    pub datetime: u64,
    pub time_text: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub location: String,
    pub image_url: String,
    /// Unix start time.
    pub datetime: u64,
    /// Free-form schedule text, e.g. "18:00 - 21:00 CET".
    pub time_text: String,
    pub status: EventStatus,
    /// Empty unless the event was rejected.
    pub reject_reason: String,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Medal {
    pub id: u64,
    pub event_id: u64,
    pub name: String,
    pub description: String,
    pub icon_url: String,
    /// Reputation credited per claim.
    pub points: u64,
    /// Zero means unlimited.
    pub max_claims: u32,
    pub claims_count: u32,
    pub active: bool,
}

impl Medal {
    pub fn has_capacity(&self) -> bool {
        self.max_claims == 0 || self.claims_count < self.max_claims
    }
}
