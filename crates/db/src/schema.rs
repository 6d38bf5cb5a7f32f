use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table. `no_double_booking` is the
    // database-level guard for the calendar invariant: no two rows with
    // a blocking status may have overlapping half-open intervals. A
    // write that slips past the application-level check fails with an
    // exclusion violation (SQLSTATE 23P01).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            owner_id BIGINT NOT NULL,
            service_name VARCHAR(255) NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'pending_confirmation',
            notes VARCHAR(500) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN (
                'pending_confirmation', 'confirmed', 'cancelled_by_user',
                'cancelled_by_admin', 'completed', 'no_show'
            )),
            CONSTRAINT no_double_booking EXCLUDE USING gist (
                tstzrange(start_time, end_time) WITH &&
            ) WHERE (status IN ('pending_confirmation', 'confirmed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_appointments_owner_id ON appointments(owner_id);",
        "CREATE INDEX IF NOT EXISTS idx_appointments_start_time ON appointments(start_time);",
        "CREATE INDEX IF NOT EXISTS idx_appointments_end_time ON appointments(end_time);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
