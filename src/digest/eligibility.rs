use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

// Building the finder parses the embedded timezone polygon data, so share one
// instance for the whole process.
static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// Half-open range of local hours during which a digest may go out, e.g.
/// `[17, 19)` for the evening edition or `[7, 8)` for a morning one.
#[derive(Debug, Clone, Copy)]
pub struct SendWindow {
    start_hour: u32,
    end_hour: u32,
}

impl SendWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<SendWindow, String> {
        if end_hour > 24 {
            return Err(format!("{} is not a valid end hour", end_hour));
        }

        if start_hour >= end_hour {
            return Err(format!(
                "send window [{}, {}) is empty",
                start_hour, end_hour
            ));
        }

        Ok(SendWindow {
            start_hour,
            end_hour,
        })
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

/// Decide whether a digest may be sent right now to a subscriber at the given
/// coordinate.
///
/// Pure function: same inputs, same answer. Returns `true` iff the
/// coordinate resolves to an IANA timezone, the subscriber has not already
/// received a digest on the current *local* calendar date, and the local hour
/// falls inside `window`.
///
/// Fail-closed: an unresolvable timezone (open ocean, NaN or out-of-range
/// coordinates, unknown zone name) is never eligible. Sending at the wrong
/// local hour is exactly the failure this check exists to prevent.
pub fn should_send(
    latitude: f64,
    longitude: f64,
    last_sent_date: Option<NaiveDate>,
    now_utc: DateTime<Utc>,
    window: &SendWindow,
) -> bool {
    let local_time = match local_now(latitude, longitude, now_utc) {
        Some(local_time) => local_time,
        None => return false,
    };

    // At most one digest per local calendar day
    if last_sent_date == Some(local_time.date_naive()) {
        return false;
    }

    window.contains(local_time.hour())
}

/// `now_utc` shifted into the coordinate's local timezone, or `None` when no
/// zone can be resolved for the point.
pub fn local_now(latitude: f64, longitude: f64, now_utc: DateTime<Utc>) -> Option<DateTime<Tz>> {
    let zone = resolve_zone(latitude, longitude)?;
    Some(now_utc.with_timezone(&zone))
}

fn resolve_zone(latitude: f64, longitude: f64) -> Option<Tz> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    // tzf takes longitude first
    let zone_name = FINDER.get_tz_name(longitude, latitude);
    if zone_name.is_empty() {
        return None;
    }

    zone_name.parse::<Tz>().ok()
}
