//! Conflict checks layered on the appointment store.

use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;

use crate::models::DbAppointment;
use crate::repositories::appointment;

/// First blocking appointment overlapping the candidate interval, if
/// any. Used to name the offending slot in conflict errors.
pub async fn find_conflict(
    executor: impl PgExecutor<'_>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<Option<DbAppointment>> {
    let overlapping =
        appointment::find_overlapping(executor, start_time, end_time, exclude_id).await?;

    Ok(overlapping.into_iter().next())
}

pub async fn has_conflict(
    executor: impl PgExecutor<'_>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let conflict = find_conflict(executor, start_time, end_time, exclude_id).await?;

    Ok(conflict.is_some())
}

/// True when the error is the `no_double_booking` exclusion constraint
/// firing (SQLSTATE 23P01): a concurrent writer committed an
/// overlapping interval between our check and the write.
pub fn is_double_booking(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db_err| db_err.code().as_deref() == Some("23P01"))
        .unwrap_or(false)
}
