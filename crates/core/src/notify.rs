use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::appointment::{Appointment, AppointmentStatus};

/// Payload handed to the notification collaborator after a commit. For
/// cancellations this is the pre-deletion snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentNotice {
    pub id: i64,
    pub service_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl From<&Appointment> for AppointmentNotice {
    fn from(appointment: &Appointment) -> Self {
        AppointmentNotice {
            id: appointment.id,
            service_name: appointment.service_name.clone(),
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: appointment.status,
            notes: appointment.notes.clone(),
        }
    }
}

/// Delivery collaborator. Implementations report success as a boolean;
/// callers log failures and never fail the request over them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn appointment_created(&self, notice: &AppointmentNotice) -> bool;
    async fn appointment_updated(&self, notice: &AppointmentNotice) -> bool;
    async fn appointment_cancelled(&self, notice: &AppointmentNotice) -> bool;
}

/// No-op notifier for deployments without a delivery channel configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn appointment_created(&self, _notice: &AppointmentNotice) -> bool {
        true
    }

    async fn appointment_updated(&self, _notice: &AppointmentNotice) -> bool {
        true
    }

    async fn appointment_cancelled(&self, _notice: &AppointmentNotice) -> bool {
        true
    }
}
