//! # Appointment Handlers
//!
//! Lifecycle operations for appointments on the shared provider
//! calendar: create, read, list, update, and cancel. Every mutating
//! operation follows the same shape:
//!
//! 1. Validate temporal fields against the injected clock.
//! 2. Open a transaction and take the calendar lock.
//! 3. Check the candidate interval for conflicts inside the transaction.
//! 4. Commit, then invoke the notification collaborator.
//!
//! The conflict check and the write share one transaction holding the
//! calendar advisory lock, so two requests racing for the same interval
//! cannot both observe "no conflict" and both commit. The
//! `no_double_booking` exclusion constraint backs this up at the
//! database level; a raced write surfaces as a conflict error, never as
//! a broken calendar.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use bookline_core::{
    booking,
    clock::Clock,
    errors::BookingError,
    models::appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest},
    notify::{AppointmentNotice, Notifier},
};
use bookline_db::{conflict, models::DbAppointment, repositories::appointment as store};
use tracing::warn;

use crate::{
    middleware::{auth::AuthedUser, error_handling::AppError},
    ApiState,
};

/// Query parameters for listing appointments.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

fn conflict_error(existing: &DbAppointment) -> BookingError {
    BookingError::Conflict(format!(
        "Requested slot overlaps appointment {} ({} to {})",
        existing.id, existing.start_time, existing.end_time
    ))
}

/// Exclusion-constraint violations mean a concurrent writer took the
/// interval between our check and the write; report those as conflicts
/// rather than storage faults.
fn map_store_error(err: eyre::Report) -> BookingError {
    if conflict::is_double_booking(&err) {
        BookingError::Conflict(
            "Requested slot was booked by a concurrent request".to_string(),
        )
    } else {
        BookingError::Database(err)
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthedUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    // Temporal validation happens before any row is touched
    booking::validate_service_name(&payload.service_name)?;
    booking::validate_interval(payload.start_time, payload.end_time)?;
    booking::validate_future_start(payload.start_time, state.clock.now())?;

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| BookingError::Database(e.into()))?;
    store::lock_calendar(&mut *tx)
        .await
        .map_err(BookingError::Database)?;

    // Conflict check spans all owners: one shared provider
    if let Some(existing) =
        conflict::find_conflict(&mut *tx, payload.start_time, payload.end_time, None)
            .await
            .map_err(BookingError::Database)?
    {
        return Err(AppError(conflict_error(&existing)));
    }

    let created = store::create_appointment(
        &mut *tx,
        user.owner_id,
        &payload.service_name,
        payload.start_time,
        payload.end_time,
        payload.notes.as_deref(),
    )
    .await
    .map_err(map_store_error)?;

    tx.commit()
        .await
        .map_err(|e| BookingError::Database(e.into()))?;

    // Notification runs strictly after commit and never fails the request
    let appointment: Appointment = created.into();
    let notice = AppointmentNotice::from(&appointment);
    if !state.notifier.appointment_created(&notice).await {
        warn!(
            "Appointment CREATED notification failed for appointment ID {}",
            appointment.id
        );
    }

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    user: AuthedUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(100).clamp(1, 500);

    let appointments =
        store::list_appointments_by_owner(&state.db_pool, user.owner_id, offset, limit)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(
        appointments.into_iter().map(Appointment::from).collect(),
    ))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthedUser,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = store::get_appointment(&state.db_pool, id, user.owner_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(appointment.into()))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    if let Some(service_name) = &payload.service_name {
        booking::validate_service_name(service_name)?;
    }

    let mut tx = state
        .db_pool
        .begin()
        .await
        .map_err(|e| BookingError::Database(e.into()))?;
    store::lock_calendar(&mut *tx)
        .await
        .map_err(BookingError::Database)?;

    let stored: Appointment = store::get_appointment(&mut *tx, id, user.owner_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?
        .into();

    // Proposed state: stored values overridden by supplied fields
    let (proposed_start, proposed_end) = booking::proposed_interval(&stored, &payload);
    booking::validate_interval(proposed_start, proposed_end)?;
    if payload.start_time.is_some() {
        booking::validate_future_start(proposed_start, state.clock.now())?;
    }

    // Re-check conflicts only when the interval moved, excluding the
    // appointment's own slot
    if booking::reschedules(&payload) {
        if let Some(existing) =
            conflict::find_conflict(&mut *tx, proposed_start, proposed_end, Some(id))
                .await
                .map_err(BookingError::Database)?
        {
            return Err(AppError(conflict_error(&existing)));
        }
    }

    let changes = store::AppointmentChanges {
        service_name: payload.service_name.as_deref(),
        start_time: payload.start_time,
        end_time: payload.end_time,
        status: payload.status,
        notes: payload.notes.as_deref(),
    };
    let updated = store::update_appointment(&mut *tx, id, user.owner_id, &changes)
        .await
        .map_err(map_store_error)?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    tx.commit()
        .await
        .map_err(|e| BookingError::Database(e.into()))?;

    let appointment: Appointment = updated.into();
    let notice = AppointmentNotice::from(&appointment);
    if !state.notifier.appointment_updated(&notice).await {
        warn!(
            "Appointment UPDATED notification failed for appointment ID {}",
            appointment.id
        );
    }

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthedUser,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, AppError> {
    // Fetch-then-remove in a single statement; the returned row is the
    // last known state for the cancellation notice
    let deleted = store::delete_appointment(&state.db_pool, id, user.owner_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let appointment: Appointment = deleted.into();
    let notice = AppointmentNotice::from(&appointment);
    if !state.notifier.appointment_cancelled(&notice).await {
        warn!(
            "Appointment CANCELLED notification failed for (now deleted) appointment ID {}",
            appointment.id
        );
    }

    Ok(Json(appointment))
}
