//! PostgreSQL implementation of AvailabilityReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::availability::{AvailabilitySlot, SlotStatus};
use crate::domain::foundation::{DomainError, SitterId, SlotId, TimeRange, Timestamp};
use crate::ports::{AvailabilityFilter, AvailabilityReader};

use super::timeline_store::{db_err, str_to_slot_status};

/// PostgreSQL implementation of AvailabilityReader. Reads outside any
/// timeline transaction.
#[derive(Clone)]
pub struct PostgresAvailabilityReader {
    pool: PgPool,
}

impl PostgresAvailabilityReader {
    /// Creates a new PostgresAvailabilityReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityReader for PostgresAvailabilityReader {
    async fn list(&self, filter: AvailabilityFilter) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, sitter_id, start_ts, end_ts, status
            FROM availability_slots
            WHERE sitter_id = $1
            ORDER BY start_ts
            "#,
        )
        .bind(filter.sitter_id().as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch slots", e))?;

        let mut slots = Vec::with_capacity(rows.len());
        for row in rows {
            let range = TimeRange::new(
                Timestamp::from_datetime(row.get("start_ts")),
                Timestamp::from_datetime(row.get("end_ts")),
            )
            .map_err(|e| DomainError::database(format!("Corrupt time range: {}", e)))?;
            let status: SlotStatus = str_to_slot_status(row.get("status"))?;
            slots.push(AvailabilitySlot::reconstitute(
                SlotId::from_uuid(row.get("id")),
                SitterId::from_uuid(row.get("sitter_id")),
                range,
                status,
            ));
        }
        Ok(slots)
    }
}
