//! Persistence for the two independent aggregates.
//!
//! Each store owns a dedicated SQLite database with a single table. Handlers
//! only ever talk to a store through its methods, never through raw SQL.

pub mod appointments;
pub mod reviews;
mod scalar;

use std::{str::FromStr, time::Duration};

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

pub use appointments::{Appointment, AppointmentStore, NewAppointment};
pub use reviews::{NewReview, Review, ReviewStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The store could not be opened at startup.
    #[error("{0} store is unavailable")]
    Unavailable(&'static str),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Opens a pool on `url`, creating the database file if needed, and applies
/// `migrator` to it. Safe to call against an already initialised database.
pub async fn open(
    url: &str,
    max_connections: u32,
    migrator: &Migrator,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrator.run(&pool).await?;

    Ok(pool)
}

/// Keeps a field only when it is present and non-empty.
///
/// Whitespace counts as content.
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Reads an id the way an INTEGER column compares against text: `7`,
/// `7.0` and `7e0` all name row 7. Anything else names no row.
pub fn row_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }

    let value: f64 = raw.parse().ok()?;
    let whole = value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0;
    whole.then_some(value as i64)
}
