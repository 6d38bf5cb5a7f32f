use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle status. `PendingConfirmation` and `Confirmed`
/// occupy the shared calendar; the remaining statuses leave the
/// interval free for other bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    PendingConfirmation,
    Confirmed,
    CancelledByUser,
    CancelledByAdmin,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::PendingConfirmation => "pending_confirmation",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::CancelledByUser => "cancelled_by_user",
            AppointmentStatus::CancelledByAdmin => "cancelled_by_admin",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    /// The `valid_status` CHECK constraint keeps unknown strings out of
    /// the database, so the fallback arm is unreachable for stored rows.
    pub fn from_str(s: &str) -> Self {
        match s {
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled_by_user" => AppointmentStatus::CancelledByUser,
            "cancelled_by_admin" => AppointmentStatus::CancelledByAdmin,
            "completed" => AppointmentStatus::Completed,
            "no_show" => AppointmentStatus::NoShow,
            _ => AppointmentStatus::PendingConfirmation,
        }
    }

    /// Whether an appointment in this status blocks its interval.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::PendingConfirmation | AppointmentStatus::Confirmed
        )
    }
}

/// A booked slot on the shared provider calendar.
///
/// Intervals are half-open: an appointment occupies
/// `[start_time, end_time)`, so back-to-back bookings may share an
/// endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub owner_id: i64,
    pub service_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub service_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Partial update: unset fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub service_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}
