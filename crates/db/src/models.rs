use bookline_core::models::appointment::{Appointment, AppointmentStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub owner_id: i64,
    pub service_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbAppointment {
    pub fn status(&self) -> AppointmentStatus {
        AppointmentStatus::from_str(&self.status)
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            owner_id: row.owner_id,
            service_name: row.service_name,
            start_time: row.start_time,
            end_time: row.end_time,
            status: AppointmentStatus::from_str(&row.status),
            notes: row.notes,
        }
    }
}
