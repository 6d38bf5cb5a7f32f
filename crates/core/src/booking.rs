//! Scheduling rules for the shared single-provider calendar.
//!
//! Everything here is pure: these checks run before any row is written,
//! so a request that fails them never reaches the store.

use chrono::{DateTime, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{Appointment, UpdateAppointmentRequest};

/// Half-open interval overlap test: `[a_start, a_end)` against
/// `[b_start, b_end)`. Intervals that merely touch at an endpoint do
/// not overlap.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

pub fn validate_service_name(service_name: &str) -> BookingResult<()> {
    if service_name.trim().is_empty() {
        return Err(BookingError::Validation(
            "Service name must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_interval(
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> BookingResult<()> {
    if end_time <= start_time {
        return Err(BookingError::Validation(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_future_start(
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> BookingResult<()> {
    if start_time <= now {
        return Err(BookingError::Validation(
            "Appointment start time cannot be in the past".to_string(),
        ));
    }
    Ok(())
}

/// Effective interval an update proposes: supplied times override the
/// stored ones, unset times fall back to them.
pub fn proposed_interval(
    stored: &Appointment,
    update: &UpdateAppointmentRequest,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        update.start_time.unwrap_or(stored.start_time),
        update.end_time.unwrap_or(stored.end_time),
    )
}

/// True when the update touches either end of the interval, in which
/// case the conflict check must be re-run against the merged interval.
pub fn reschedules(update: &UpdateAppointmentRequest) -> bool {
    update.start_time.is_some() || update.end_time.is_some()
}
