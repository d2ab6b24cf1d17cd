//! Database layer: migrations, queries, and cursor management.

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

use crate::errors::Result;
use crate::events::{EventRecord, KudosEvent, SubjectKind};

const SELECT_EVENTS: &str = r#"
    SELECT id, rpc_id, event_type, subject_kind, subject_id, actor, amount,
           ledger, timestamp, contract_id, tx_hash, created_at
    FROM   events
"#;

/// Open (creating if needed) the SQLite database and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events in one transaction. An event whose
/// `rpc_id` is already stored is skipped, so re-polling a range is harmless.
pub async fn insert_events(pool: &SqlitePool, events: &[KudosEvent]) -> Result<usize> {
    let mut tx = pool.begin().await?;
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (rpc_id, event_type, subject_kind, subject_id, actor, amount,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&ev.rpc_id)
        .bind(&ev.event_type)
        .bind(&ev.subject_kind)
        .bind(&ev.subject_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    tx.commit().await?;
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

/// All events, optionally of one `event_type`, in ledger order.
pub async fn get_events(pool: &SqlitePool, kind: Option<&str>) -> Result<Vec<EventRecord>> {
    let filter = if kind.is_some() {
        "WHERE event_type = ?1"
    } else {
        ""
    };
    let sql = format!("{SELECT_EVENTS} {filter} ORDER BY ledger ASC, id ASC");

    let mut query = sqlx::query_as::<_, EventRecord>(&sql);
    if let Some(kind) = kind {
        query = query.bind(kind);
    }
    Ok(query.fetch_all(pool).await?)
}

/// Events about one project, gathering, medal or account.
pub async fn get_events_for_subject(
    pool: &SqlitePool,
    subject: SubjectKind,
    subject_id: &str,
) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "{SELECT_EVENTS} WHERE subject_kind = ?1 AND subject_id = ?2 ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(subject.as_str())
        .bind(subject_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Everything an account did or received: events it acted in plus events
/// keyed by its address.
pub async fn get_events_for_account(pool: &SqlitePool, address: &str) -> Result<Vec<EventRecord>> {
    let sql = format!(
        "{SELECT_EVENTS} WHERE actor = ?1 OR (subject_kind = ?2 AND subject_id = ?1) \
         ORDER BY ledger ASC, id ASC"
    );
    let rows = sqlx::query_as::<_, EventRecord>(&sql)
        .bind(address)
        .bind(SubjectKind::Account.as_str())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
