//! Soroban RPC client: polls `getEvents` for the watched Kudos contracts and
//! decodes their notifications.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, KudosEvent, Source};
use crate::xdr;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    /// Topic list as base64 XDR; empty when the node answered in JSON.
    #[serde(default)]
    pub topic: Vec<String>,
    /// Event data as base64 XDR; `Null` when the node answered in JSON.
    #[serde(default)]
    pub value: Value,
    /// Topic list as JSON `ScVal`s (`xdrFormat: "json"`).
    #[serde(rename = "topicJson")]
    pub topic_json: Option<Vec<Value>>,
    /// Event data as a JSON `ScVal` (`xdrFormat: "json"`).
    #[serde(rename = "valueJson")]
    pub value_json: Option<Value>,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `contract_ids` : contracts whose notifications are wanted.
/// * `start_ledger` : the ledger sequence to scan from (inclusive).
/// * `cursor`       : optional opaque pagination cursor from a previous response.
/// * `limit`        : maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_ids, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        match response {
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                continue;
            }
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("Rate-limited by RPC (will retry in {backoff}s)");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let body: RpcResponse = resp.json().await?;

                if let Some(err) = body.error {
                    // Code -32600 / -32601 are hard failures; everything else we retry
                    if err.code == -32600 || err.code == -32601 {
                        return Err(IndexerError::RpcRejected {
                            code: err.code,
                            message: err.message,
                        });
                    }
                    warn!(
                        "RPC soft error (will retry in {backoff}s): {} {}",
                        err.code, err.message
                    );
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    continue;
                }

                let result = body.result.ok_or(IndexerError::EmptyResult)?;

                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );

                return Ok((result.events, result.cursor, result.latest_ledger));
            }
        }
    }
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": contract_ids
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a page of raw RPC events.
///
/// `source_of` maps an emitting contract id to the watched contract it is.
/// A topic that does not belong to its emitter is stored as `unknown`.
/// Anonymous contributions are stored without an actor, and so is the
/// backer NFT minted in the same transaction.
pub fn decode_events<F>(
    raw: &[RawEvent],
    fallback_contract: &str,
    source_of: F,
) -> Vec<KudosEvent>
where
    F: Fn(&str) -> Source,
{
    let mut decoded: Vec<(KudosEvent, bool)> = raw
        .iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, fallback_contract, &source_of))
        .collect();

    let anonymous: HashSet<(Option<String>, Option<String>)> = decoded
        .iter()
        .filter(|(ev, anon)| *anon && ev.event_type == EventKind::ContributionMade.as_str())
        .map(|(ev, _)| (ev.tx_hash.clone(), ev.subject_id.clone()))
        .collect();

    for (ev, _) in decoded.iter_mut() {
        if ev.event_type == EventKind::NftMinted.as_str()
            && anonymous.contains(&(ev.tx_hash.clone(), ev.subject_id.clone()))
        {
            ev.actor = None;
        }
    }

    decoded.into_iter().map(|(ev, _)| ev).collect()
}

fn decode_single<F>(
    raw: &RawEvent,
    fallback_contract: &str,
    source_of: &F,
) -> Option<(KudosEvent, bool)>
where
    F: Fn(&str) -> Source,
{
    let topics = topic_texts(raw);
    let first_topic = topics.first()?;
    let contract_id = raw
        .contract_id
        .clone()
        .unwrap_or_else(|| fallback_contract.to_string());

    let mut kind = EventKind::from_topic(first_topic);
    if let Some(expected) = kind.source() {
        if source_of(&contract_id) != expected {
            warn!(
                "topic {:?} from unexpected contract {contract_id}",
                kind.as_str()
            );
            kind = EventKind::Unknown;
        }
    }

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let subject_id = topics.get(1).cloned();
    let value = raw
        .value_json
        .as_ref()
        .map(xdr::plain_value)
        .unwrap_or_else(|| raw.value.clone());
    let data = decode_data(&value, kind);

    let event = KudosEvent {
        rpc_id: raw.id.clone().or_else(|| raw.paging_token.clone()),
        event_type: kind.as_str().to_string(),
        subject_kind: kind.subject().as_str().to_string(),
        subject_id,
        actor: if data.anonymous { None } else { data.actor },
        amount: data.amount,
        ledger,
        timestamp,
        contract_id,
        tx_hash: raw.tx_hash.as_deref().map(normalize_tx_hash),
    };
    Some((event, data.anonymous))
}

#[derive(Debug, Default)]
struct Decoded {
    actor: Option<String>,
    amount: Option<String>,
    anonymous: bool,
}

/// Field names carrying the actor and the amount for each kind.
fn data_fields(kind: EventKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        EventKind::ProjectCreated => (&["creator"], &["goal"]),
        EventKind::ContributionMade | EventKind::NftMinted | EventKind::RefundProcessed => {
            (&["backer"], &["amount"])
        }
        EventKind::FundsClaimed => (&["creator"], &["amount"]),
        EventKind::ProjectInspired => (&["account"], &["points"]),
        EventKind::CofounderAdded => (&["cofounder"], &[]),
        EventKind::ProjectUpdated => (&["editor"], &[]),
        EventKind::ProjectDeleted => (&["creator"], &["funds_raised"]),
        EventKind::GenesisAwarded => (&["awarded_by"], &["amount"]),
        EventKind::BoostGiven => (&["booster"], &["power"]),
        EventKind::ParamsUpdated => (&["caller"], &[]),
        EventKind::EventSubmitted => (&["creator"], &[]),
        EventKind::EventApproved => (&["approved_by"], &[]),
        EventKind::EventRejected => (&["rejected_by"], &[]),
        EventKind::MedalCreated => (&[], &["points"]),
        EventKind::MedalClaimed => (&["account"], &["points"]),
        EventKind::MedalAwarded => (&["recipient"], &["points"]),
        EventKind::MedalStatusChanged => (&["changed_by"], &[]),
        EventKind::RoleSet | EventKind::RoleDel | EventKind::Unknown => (&[], &[]),
    }
}

/// Pull apart the JSON `value` blob that the RPC returns for event data.
fn decode_data(value: &Value, kind: EventKind) -> Decoded {
    match kind {
        // Data is the caller, alone or as the first element of `(caller, role)`.
        EventKind::RoleSet | EventKind::RoleDel => {
            let actor = value
                .as_str()
                .map(String::from)
                .or_else(|| value.get(0).and_then(scalar_text))
                .or_else(|| extract_field(value, &["caller", "address"]));
            Decoded {
                actor,
                ..Decoded::default()
            }
        }
        EventKind::Unknown => Decoded::default(),
        _ => {
            let (actor_keys, amount_keys) = data_fields(kind);
            let actor = actor_keys.first().and_then(|key| {
                extract_field(value, actor_keys).or_else(|| find_nested(value, key))
            });
            let amount = extract_field(value, amount_keys);
            let anonymous = kind == EventKind::ContributionMade
                && value
                    .get("is_anonymous")
                    .map(|v| v.as_bool() == Some(true) || v.as_str() == Some("true"))
                    .unwrap_or(false);
            Decoded {
                actor,
                amount,
                anonymous,
            }
        }
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(key))
        .find_map(scalar_text)
}

fn find_nested(value: &Value, key: &str) -> Option<String> {
    if let Value::Object(map) = value {
        for (k, v) in map {
            if k == key {
                return v.as_str().map(String::from);
            }
            if let Some(found) = find_nested(v, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Topic entries as text, from `topicJson` when present.
fn topic_texts(raw: &RawEvent) -> Vec<String> {
    match &raw.topic_json {
        Some(entries) => entries
            .iter()
            .map(|entry| {
                let plain = xdr::plain_value(entry);
                scalar_text(&plain).unwrap_or_else(|| plain.to_string())
            })
            .collect(),
        None => raw.topic.iter().map(|t| topic_text(t)).collect(),
    }
}

/// Text of a topic entry. The RPC may return `{"type":"symbol","value":"created"}`,
/// base64 XDR, or the bare value.
fn topic_text(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(text) = v.get("value").and_then(scalar_text) {
            return text;
        }
    }
    if let Some(decoded) = xdr::decode_topic(raw) {
        return decoded.render();
    }
    raw.to_string()
}

/// Lower-case hex when the hash is 32 bytes of hex, otherwise untouched.
fn normalize_tx_hash(raw: &str) -> String {
    match hex::decode(raw) {
        Ok(bytes) if bytes.len() == 32 => hex::encode(bytes),
        _ => raw.to_string(),
    }
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
