use crate::models::DbAppointment;
use bookline_core::models::appointment::AppointmentStatus;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;

/// Advisory lock key for the shared provider calendar. Check-then-write
/// sequences take this lock for the duration of their transaction,
/// serializing concurrent booking attempts against the single resource.
const CALENDAR_LOCK_KEY: i64 = 0x626f_6f6b_6c69_6e65;

/// Partial field changes for an appointment. Unset fields keep their
/// stored values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentChanges<'a> {
    pub service_name: Option<&'a str>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<&'a str>,
}

pub async fn lock_calendar(executor: impl PgExecutor<'_>) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(CALENDAR_LOCK_KEY)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn create_appointment(
    executor: impl PgExecutor<'_>,
    owner_id: i64,
    service_name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment: owner_id={}, service_name={}, start={}, end={}",
        owner_id,
        service_name,
        start_time,
        end_time
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (owner_id, service_name, start_time, end_time, status, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, owner_id, service_name, start_time, end_time, status, notes, created_at
        "#,
    )
    .bind(owner_id)
    .bind(service_name)
    .bind(start_time)
    .bind(end_time)
    .bind(AppointmentStatus::PendingConfirmation.as_str())
    .bind(notes)
    .fetch_one(executor)
    .await?;

    tracing::debug!("Appointment created successfully: id={}", appointment.id);
    Ok(appointment)
}

/// Owner-scoped point lookup: rows owned by a different user read as
/// absent.
pub async fn get_appointment(
    executor: impl PgExecutor<'_>,
    id: i64,
    owner_id: i64,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, owner_id, service_name, start_time, end_time, status, notes, created_at
        FROM appointments
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}

pub async fn list_appointments_by_owner(
    executor: impl PgExecutor<'_>,
    owner_id: i64,
    offset: i64,
    limit: i64,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, owner_id, service_name, start_time, end_time, status, notes, created_at
        FROM appointments
        WHERE owner_id = $1
        ORDER BY start_time ASC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(owner_id)
    .bind(offset)
    .bind(limit)
    .fetch_all(executor)
    .await?;

    Ok(appointments)
}

/// Applies a partial set of field changes in a single statement.
/// Returns `None` when no row matches the owner-scoped id.
pub async fn update_appointment(
    executor: impl PgExecutor<'_>,
    id: i64,
    owner_id: i64,
    changes: &AppointmentChanges<'_>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Updating appointment: id={}, owner_id={}", id, owner_id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments SET
            service_name = COALESCE($3, service_name),
            start_time = COALESCE($4, start_time),
            end_time = COALESCE($5, end_time),
            status = COALESCE($6, status),
            notes = COALESCE($7, notes)
        WHERE id = $1 AND owner_id = $2
        RETURNING id, owner_id, service_name, start_time, end_time, status, notes, created_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(changes.service_name)
    .bind(changes.start_time)
    .bind(changes.end_time)
    .bind(changes.status.map(|s| s.as_str()))
    .bind(changes.notes)
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}

/// Removes the row and returns its last known state for collaborator
/// use (the cancellation notice).
pub async fn delete_appointment(
    executor: impl PgExecutor<'_>,
    id: i64,
    owner_id: i64,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Deleting appointment: id={}, owner_id={}", id, owner_id);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        DELETE FROM appointments
        WHERE id = $1 AND owner_id = $2
        RETURNING id, owner_id, service_name, start_time, end_time, status, notes, created_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(executor)
    .await?;

    Ok(appointment)
}

/// Blocking-status appointments whose `[start_time, end_time)` interval
/// overlaps the candidate interval (half-open: touching endpoints do
/// not overlap). Owner is deliberately not part of the filter; the
/// calendar models one shared provider. `exclude_id` skips one row when
/// re-validating an appointment against its own slot.
pub async fn find_overlapping(
    executor: impl PgExecutor<'_>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, owner_id, service_name, start_time, end_time, status, notes, created_at
        FROM appointments
        WHERE status IN ('pending_confirmation', 'confirmed')
          AND start_time < $2
          AND end_time > $1
          AND ($3::BIGINT IS NULL OR id <> $3)
        ORDER BY start_time ASC
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .bind(exclude_id)
    .fetch_all(executor)
    .await?;

    Ok(appointments)
}
