//! PostgreSQL implementation of the sitter timeline port.
//!
//! Serialization strategy: every transaction takes `pg_advisory_xact_lock`
//! keyed on the sitter's UUID before touching any row. Two writers for the
//! same sitter queue behind the lock; writers for different sitters proceed
//! in parallel. The lock is released automatically at commit or rollback.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::availability::{AvailabilitySlot, SlotStatus};
use crate::domain::booking::{Booking, BookingStatus, ServiceType};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, OwnerId, PetId, PriceQuote, SitterId, SlotId, TimeRange,
    Timestamp,
};
use crate::ports::{TimelineStore, TimelineTx};

/// PostgreSQL implementation of TimelineStore.
#[derive(Clone)]
pub struct PostgresTimelineStore {
    pool: PgPool,
}

impl PostgresTimelineStore {
    /// Creates a new PostgresTimelineStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineStore for PostgresTimelineStore {
    async fn begin(&self, sitter_id: SitterId) -> Result<Box<dyn TimelineTx>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_err("Failed to begin transaction", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(advisory_key(sitter_id))
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err("Failed to take timeline lock", e))?;

        Ok(Box::new(PostgresTimelineTx { tx, sitter_id }))
    }
}

/// One open transaction over a sitter's timeline.
struct PostgresTimelineTx {
    tx: Transaction<'static, Postgres>,
    sitter_id: SitterId,
}

#[async_trait]
impl TimelineTx for PostgresTimelineTx {
    async fn find_overlapping_slots(
        &mut self,
        range: TimeRange,
        statuses: &[SlotStatus],
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let status_strs: Vec<&str> = statuses.iter().map(|s| slot_status_to_str(*s)).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, sitter_id, start_ts, end_ts, status
            FROM availability_slots
            WHERE sitter_id = $1
              AND start_ts < $2 AND end_ts > $3
              AND status = ANY($4)
            ORDER BY start_ts
            "#,
        )
        .bind(self.sitter_id.as_uuid())
        .bind(range.end().as_datetime())
        .bind(range.start().as_datetime())
        .bind(&status_strs)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to fetch overlapping slots", e))?;

        rows.into_iter().map(row_to_slot).collect()
    }

    async fn find_overlapping_bookings(
        &mut self,
        range: TimeRange,
        statuses: &[BookingStatus],
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, DomainError> {
        let status_strs: Vec<&str> = statuses.iter().map(|s| booking_status_to_str(*s)).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, sitter_id, service_type, start_ts, end_ts,
                   price_quote, status, created_at, updated_at
            FROM bookings
            WHERE sitter_id = $1
              AND start_ts < $2 AND end_ts > $3
              AND status = ANY($4)
              AND ($5::uuid IS NULL OR id <> $5)
            ORDER BY start_ts
            "#,
        )
        .bind(self.sitter_id.as_uuid())
        .bind(range.end().as_datetime())
        .bind(range.start().as_datetime())
        .bind(&status_strs)
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to fetch overlapping bookings", e))?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let pets = load_pets(&mut self.tx, row.get("id")).await?;
            bookings.push(row_to_booking(row, pets)?);
        }
        Ok(bookings)
    }

    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, sitter_id, service_type, start_ts, end_ts,
                   price_quote, status, created_at, updated_at
            FROM bookings
            WHERE id = $1 AND sitter_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(self.sitter_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to fetch booking", e))?;

        match row {
            Some(row) => {
                let pets = load_pets(&mut self.tx, row.get("id")).await?;
                Ok(Some(row_to_booking(row, pets)?))
            }
            None => Ok(None),
        }
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, owner_id, sitter_id, service_type, start_ts, end_ts,
                price_quote, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.owner_id().as_uuid())
        .bind(booking.sitter_id().as_uuid())
        .bind(service_type_to_str(booking.service_type()))
        .bind(booking.range().start().as_datetime())
        .bind(booking.range().end().as_datetime())
        .bind(booking.price_quote().amount())
        .bind(booking_status_to_str(booking.status()))
        .bind(booking.created_at().as_datetime())
        .bind(booking.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to insert booking", e))?;

        for pet_id in booking.pets() {
            sqlx::query("INSERT INTO booking_pets (booking_id, pet_id) VALUES ($1, $2)")
                .bind(booking.id().as_uuid())
                .bind(pet_id.as_uuid())
                .execute(&mut *self.tx)
                .await
                .map_err(|e| db_err("Failed to insert booking pet", e))?;
        }
        Ok(())
    }

    async fn update_booking_status(&mut self, booking: &Booking) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(booking.id().as_uuid())
        .bind(booking_status_to_str(booking.status()))
        .bind(booking.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to update booking", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            ));
        }
        Ok(())
    }

    async fn delete_booking(&mut self, id: BookingId) -> Result<(), DomainError> {
        // Pets first (foreign key constraint)
        sqlx::query("DELETE FROM booking_pets WHERE booking_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_err("Failed to delete booking pets", e))?;

        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_err("Failed to delete booking", e))?;
        Ok(())
    }

    async fn find_slot(&mut self, id: SlotId) -> Result<Option<AvailabilitySlot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, sitter_id, start_ts, end_ts, status
            FROM availability_slots
            WHERE id = $1 AND sitter_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(self.sitter_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to fetch slot", e))?;

        row.map(row_to_slot).transpose()
    }

    async fn insert_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO availability_slots (id, sitter_id, start_ts, end_ts, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(slot.id().as_uuid())
        .bind(slot.sitter_id().as_uuid())
        .bind(slot.range().start().as_datetime())
        .bind(slot.range().end().as_datetime())
        .bind(slot_status_to_str(slot.status()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to insert slot", e))?;
        Ok(())
    }

    async fn update_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE availability_slots
            SET start_ts = $2, end_ts = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(slot.id().as_uuid())
        .bind(slot.range().start().as_datetime())
        .bind(slot.range().end().as_datetime())
        .bind(slot_status_to_str(slot.status()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_err("Failed to update slot", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SlotNotFound,
                format!("Availability slot not found: {}", slot.id()),
            ));
        }
        Ok(())
    }

    async fn delete_slot(&mut self, id: SlotId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM availability_slots WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_err("Failed to delete slot", e))?;
        Ok(())
    }

    async fn set_slot_status(
        &mut self,
        slot_ids: &[SlotId],
        status: SlotStatus,
    ) -> Result<(), DomainError> {
        let ids: Vec<Uuid> = slot_ids.iter().map(|id| *id.as_uuid()).collect();
        sqlx::query("UPDATE availability_slots SET status = $1 WHERE id = ANY($2)")
            .bind(slot_status_to_str(status))
            .bind(&ids)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_err("Failed to set slot status", e))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| db_err("Failed to commit transaction", e))
    }
}

async fn load_pets(
    tx: &mut Transaction<'static, Postgres>,
    booking_id: Uuid,
) -> Result<Vec<PetId>, DomainError> {
    let rows = sqlx::query("SELECT pet_id FROM booking_pets WHERE booking_id = $1")
        .bind(booking_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| db_err("Failed to fetch booking pets", e))?;

    Ok(rows
        .into_iter()
        .map(|row| PetId::from_uuid(row.get("pet_id")))
        .collect())
}

fn row_to_slot(row: sqlx::postgres::PgRow) -> Result<AvailabilitySlot, DomainError> {
    let range = row_to_range(&row)?;
    let status = str_to_slot_status(row.get("status"))?;
    Ok(AvailabilitySlot::reconstitute(
        SlotId::from_uuid(row.get("id")),
        SitterId::from_uuid(row.get("sitter_id")),
        range,
        status,
    ))
}

fn row_to_booking(row: sqlx::postgres::PgRow, pets: Vec<PetId>) -> Result<Booking, DomainError> {
    let range = row_to_range(&row)?;
    let status = str_to_booking_status(row.get("status"))?;
    let service_type = str_to_service_type(row.get("service_type"))?;
    let price_quote = PriceQuote::new(row.get("price_quote"))
        .map_err(|e| DomainError::database(format!("Corrupt price quote: {}", e)))?;

    Ok(Booking::reconstitute(
        BookingId::from_uuid(row.get("id")),
        OwnerId::from_uuid(row.get("owner_id")),
        SitterId::from_uuid(row.get("sitter_id")),
        pets,
        service_type,
        range,
        price_quote,
        status,
        Timestamp::from_datetime(row.get("created_at")),
        Timestamp::from_datetime(row.get("updated_at")),
    ))
}

fn row_to_range(row: &sqlx::postgres::PgRow) -> Result<TimeRange, DomainError> {
    TimeRange::new(
        Timestamp::from_datetime(row.get("start_ts")),
        Timestamp::from_datetime(row.get("end_ts")),
    )
    .map_err(|e| DomainError::database(format!("Corrupt time range: {}", e)))
}

/// Maps serialization failures and deadlocks to `Conflict` so handlers can
/// retry; everything else is a database error.
pub(crate) fn db_err(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.code().as_deref(), Some("40001") | Some("40P01")) {
            return DomainError::conflict(format!("{}: {}", context, db.message()));
        }
    }
    DomainError::database(format!("{}: {}", context, err))
}

/// Derives the advisory lock key from the high 8 bytes of the sitter UUID.
fn advisory_key(sitter_id: SitterId) -> i64 {
    let bytes = sitter_id.as_uuid().as_bytes();
    i64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

pub(crate) fn slot_status_to_str(status: SlotStatus) -> &'static str {
    match status {
        SlotStatus::Open => "open",
        SlotStatus::Booked => "booked",
        SlotStatus::Blocked => "blocked",
    }
}

pub(crate) fn str_to_slot_status(s: &str) -> Result<SlotStatus, DomainError> {
    match s {
        "open" => Ok(SlotStatus::Open),
        "booked" => Ok(SlotStatus::Booked),
        "blocked" => Ok(SlotStatus::Blocked),
        _ => Err(DomainError::database(format!("Unknown slot status: {}", s))),
    }
}

pub(crate) fn booking_status_to_str(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Requested => "requested",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Completed => "completed",
        BookingStatus::Canceled => "canceled",
    }
}

pub(crate) fn str_to_booking_status(s: &str) -> Result<BookingStatus, DomainError> {
    match s {
        "requested" => Ok(BookingStatus::Requested),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "completed" => Ok(BookingStatus::Completed),
        "canceled" => Ok(BookingStatus::Canceled),
        _ => Err(DomainError::database(format!(
            "Unknown booking status: {}",
            s
        ))),
    }
}

pub(crate) fn service_type_to_str(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::HouseSitting => "house_sitting",
        ServiceType::PetBoarding => "pet_boarding",
        ServiceType::InHomeVisit => "in_home_visit",
        ServiceType::PetGrooming => "pet_grooming",
        ServiceType::PetWalking => "pet_walking",
    }
}

pub(crate) fn str_to_service_type(s: &str) -> Result<ServiceType, DomainError> {
    match s {
        "house_sitting" => Ok(ServiceType::HouseSitting),
        "pet_boarding" => Ok(ServiceType::PetBoarding),
        "in_home_visit" => Ok(ServiceType::InHomeVisit),
        "pet_grooming" => Ok(ServiceType::PetGrooming),
        "pet_walking" => Ok(ServiceType::PetWalking),
        _ => Err(DomainError::database(format!(
            "Unknown service type: {}",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_status_roundtrips() {
        for status in [SlotStatus::Open, SlotStatus::Booked, SlotStatus::Blocked] {
            assert_eq!(
                str_to_slot_status(slot_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn booking_status_roundtrips() {
        for status in [
            BookingStatus::Requested,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Canceled,
        ] {
            assert_eq!(
                str_to_booking_status(booking_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn service_type_roundtrips() {
        for service_type in [
            ServiceType::HouseSitting,
            ServiceType::PetBoarding,
            ServiceType::InHomeVisit,
            ServiceType::PetGrooming,
            ServiceType::PetWalking,
        ] {
            assert_eq!(
                str_to_service_type(service_type_to_str(service_type)).unwrap(),
                service_type
            );
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(str_to_slot_status("closed").is_err());
        assert!(str_to_booking_status("pending").is_err());
        assert!(str_to_service_type("dog_sitting").is_err());
    }

    #[test]
    fn advisory_key_is_stable_per_sitter() {
        let sitter = SitterId::new();
        assert_eq!(advisory_key(sitter), advisory_key(sitter));
        assert_ne!(advisory_key(SitterId::new()), advisory_key(sitter));
    }
}
