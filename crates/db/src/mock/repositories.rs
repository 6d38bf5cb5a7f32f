use chrono::{DateTime, Utc};
use mockall::mock;

use crate::models::DbAppointment;

// Mock appointment store for handler tests
mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            owner_id: i64,
            service_name: String,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            notes: Option<String>,
        ) -> eyre::Result<DbAppointment>;

        pub async fn get_appointment(
            &self,
            id: i64,
            owner_id: i64,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn list_appointments_by_owner(
            &self,
            owner_id: i64,
            offset: i64,
            limit: i64,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn update_appointment(
            &self,
            id: i64,
            owner_id: i64,
            service_name: Option<String>,
            start_time: Option<DateTime<Utc>>,
            end_time: Option<DateTime<Utc>>,
            status: Option<String>,
            notes: Option<String>,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn delete_appointment(
            &self,
            id: i64,
            owner_id: i64,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn find_overlapping(
            &self,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
            exclude_id: Option<i64>,
        ) -> eyre::Result<Vec<DbAppointment>>;
    }
}
