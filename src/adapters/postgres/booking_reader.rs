//! PostgreSQL implementation of BookingReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::foundation::{
    Actor, BookingId, DomainError, OwnerId, PetId, PriceQuote, SitterId, TimeRange, Timestamp,
};
use crate::ports::BookingReader;

use super::timeline_store::{db_err, str_to_booking_status, str_to_service_type};

const SELECT_BOOKING: &str = r#"
    SELECT id, owner_id, sitter_id, service_type, start_ts, end_ts,
           price_quote, status, created_at, updated_at
    FROM bookings
"#;

/// PostgreSQL implementation of BookingReader.
#[derive(Clone)]
pub struct PostgresBookingReader {
    pool: PgPool,
}

impl PostgresBookingReader {
    /// Creates a new PostgresBookingReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_pets(&self, booking_id: Uuid) -> Result<Vec<PetId>, DomainError> {
        let rows = sqlx::query("SELECT pet_id FROM booking_pets WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch booking pets", e))?;
        Ok(rows
            .into_iter()
            .map(|row| PetId::from_uuid(row.get("pet_id")))
            .collect())
    }
}

#[async_trait]
impl BookingReader for PostgresBookingReader {
    async fn list_for_actor(&self, actor: Actor) -> Result<Vec<Booking>, DomainError> {
        let (clause, id) = match actor {
            Actor::Owner(owner_id) => ("owner_id", *owner_id.as_uuid()),
            Actor::Sitter(sitter_id) => ("sitter_id", *sitter_id.as_uuid()),
        };
        let sql = format!(
            "{} WHERE {} = $1 ORDER BY created_at DESC",
            SELECT_BOOKING, clause
        );
        let rows = sqlx::query(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch bookings", e))?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let pets = self.load_pets(row.get("id")).await?;
            bookings.push(row_to_booking(row, pets)?);
        }
        Ok(bookings)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_BOOKING);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Failed to fetch booking", e))?;

        match row {
            Some(row) => {
                let pets = self.load_pets(row.get("id")).await?;
                Ok(Some(row_to_booking(row, pets)?))
            }
            None => Ok(None),
        }
    }
}

fn row_to_booking(row: PgRow, pets: Vec<PetId>) -> Result<Booking, DomainError> {
    let range = TimeRange::new(
        Timestamp::from_datetime(row.get("start_ts")),
        Timestamp::from_datetime(row.get("end_ts")),
    )
    .map_err(|e| DomainError::database(format!("Corrupt time range: {}", e)))?;
    let price_quote = PriceQuote::new(row.get("price_quote"))
        .map_err(|e| DomainError::database(format!("Corrupt price quote: {}", e)))?;

    Ok(Booking::reconstitute(
        BookingId::from_uuid(row.get("id")),
        OwnerId::from_uuid(row.get("owner_id")),
        SitterId::from_uuid(row.get("sitter_id")),
        pets,
        str_to_service_type(row.get("service_type"))?,
        range,
        price_quote,
        str_to_booking_status(row.get("status"))?,
        Timestamp::from_datetime(row.get("created_at")),
        Timestamp::from_datetime(row.get("updated_at")),
    ))
}
