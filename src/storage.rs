use chrono::NaiveDate;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::{subscriber::Subscriber, subscriber_email::SubscriberEmail};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The narrow storage contract the dispatch cycle depends on. The HTTP routes
/// talk to Postgres directly; the dispatcher goes through this trait so its
/// gating and failure-isolation logic can be tested against an in-memory
/// store.
#[allow(async_fn_in_trait)]
pub trait SubscriberStore {
    /// Snapshot of every active subscriber, taken once per cycle.
    async fn list_active(&self) -> Result<Vec<Subscriber>, StoreError>;

    /// Record a confirmed send. `local_date` is the calendar date in the
    /// subscriber's own timezone. Not retried by the caller.
    async fn mark_sent(&self, id: Uuid, local_date: NaiveDate) -> Result<(), StoreError>;
}

pub struct PgSubscriberStore {
    pool: PgPool,
}

impl PgSubscriberStore {
    pub fn new(pool: PgPool) -> PgSubscriberStore {
        PgSubscriberStore { pool }
    }
}

impl SubscriberStore for PgSubscriberStore {
    async fn list_active(&self) -> Result<Vec<Subscriber>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, latitude, longitude, location_name, subscribed_at, is_active, last_sent_date
            FROM subscribers
            WHERE is_active = TRUE
            ORDER BY subscribed_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        // A stored email that no longer parses is skipped with a warning, it
        // must not take the whole cycle down.
        let subscribers = rows
            .iter()
            .filter_map(|row: &PgRow| {
                let raw_email: String = row.get("email");
                match SubscriberEmail::parse(raw_email) {
                    Ok(email) => Some(Subscriber {
                        id: row.get("id"),
                        email,
                        latitude: row.get("latitude"),
                        longitude: row.get("longitude"),
                        location_name: row.get("location_name"),
                        subscribed_at: row.get("subscribed_at"),
                        is_active: row.get("is_active"),
                        last_sent_date: row.get("last_sent_date"),
                    }),
                    Err(error) => {
                        tracing::warn!(error = %error, "skipping subscriber with invalid stored email");
                        None
                    }
                }
            })
            .collect();

        Ok(subscribers)
    }

    async fn mark_sent(&self, id: Uuid, local_date: NaiveDate) -> Result<(), StoreError> {
        sqlx::query("UPDATE subscribers SET last_sent_date = $1 WHERE id = $2")
            .bind(local_date)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
