use serde::{Deserialize, Serialize};
use sqlx::{migrate::Migrator, SqlitePool};

use super::{required, scalar, StoreError, StoreResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/appointments");

const APPOINTMENT_COLUMNS: &str = "id, name, phone, email, message, timestamp";

/// A booking request as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub timestamp: String,
}

/// A booking request as submitted. Every field may be absent so that the
/// store, not the decoder, decides what is missing.
#[derive(Debug, Default, Deserialize)]
pub struct NewAppointment {
    #[serde(default, deserialize_with = "scalar::truthy_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar::truthy_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar::truthy_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar::text")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct AppointmentStore {
    pool: Option<SqlitePool>,
}

impl AppointmentStore {
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = super::open(url, max_connections, &MIGRATOR).await?;
        Ok(Self { pool: Some(pool) })
    }

    /// A store that failed to open. Every operation reports a storage fault.
    pub fn unavailable() -> Self {
        Self { pool: None }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    fn pool(&self) -> StoreResult<&SqlitePool> {
        self.pool.as_ref().ok_or(StoreError::Unavailable("appointment"))
    }

    #[tracing::instrument(name = "Insert appointment", skip_all)]
    pub async fn create(&self, new: NewAppointment) -> StoreResult<i64> {
        let (Some(name), Some(phone), Some(email)) =
            (required(new.name), required(new.phone), required(new.email))
        else {
            return Err(StoreError::Validation("Name, phone and email are required."));
        };

        let id = sqlx::query("INSERT INTO appointments (name, phone, email, message) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(phone)
            .bind(email)
            .bind(new.message)
            .execute(self.pool()?)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    /// Most recent first. A non-empty `search` keeps rows whose name or phone
    /// contains it (ASCII case-insensitive).
    #[tracing::instrument(name = "List appointments", skip(self))]
    pub async fn list(&self, search: Option<&str>) -> StoreResult<Vec<Appointment>> {
        let pool = self.pool()?;

        let appointments = match search.filter(|term| !term.is_empty()) {
            Some(term) => {
                let sql = format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
                     WHERE name LIKE ? ESCAPE '\\' OR phone LIKE ? ESCAPE '\\' \
                     ORDER BY timestamp DESC, id DESC"
                );
                let pattern = like_pattern(term);
                sqlx::query_as::<_, Appointment>(&sql)
                    .bind(&pattern)
                    .bind(&pattern)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments ORDER BY timestamp DESC, id DESC"
                );
                sqlx::query_as::<_, Appointment>(&sql)
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(appointments)
    }

    #[tracing::instrument(name = "Delete appointment", skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(self.pool()?)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound("appointment"));
        }

        Ok(())
    }
}

/// `%term%` with the LIKE wildcards in `term` escaped, so the term only ever
/// matches literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
