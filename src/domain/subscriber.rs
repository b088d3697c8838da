use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::subscriber_email::SubscriberEmail;

/// A subscriber row as read by the dispatch cycle and the admin view.
///
/// `last_sent_date` is the calendar date of the last successful digest in the
/// subscriber's own timezone; it is only ever written after a confirmed send.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: SubscriberEmail,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
    pub is_active: bool,
    pub last_sent_date: Option<NaiveDate>,
}
