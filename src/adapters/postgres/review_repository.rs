//! PostgreSQL implementations of ReviewRepository and RatingStore.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, OwnerId, ReviewId, ReviewRating, SitterId, Timestamp,
};
use crate::domain::review::Review;
use crate::ports::{RatingStore, ReviewRepository};

use super::timeline_store::db_err;

/// PostgreSQL implementation of ReviewRepository. The one-review-per-booking
/// rule is backed by a unique index on `reviews.booking_id`.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a new PostgresReviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn save(&self, review: &Review) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, booking_id, owner_id, sitter_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(review.id().as_uuid())
        .bind(review.booking_id().as_uuid())
        .bind(review.owner_id().as_uuid())
        .bind(review.sitter_id().as_uuid())
        .bind(review.rating().value())
        .bind(review.comment())
        .bind(review.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                DomainError::new(
                    ErrorCode::ReviewAlreadyExists,
                    format!("Booking {} already has a review", review.booking_id()),
                )
            }
            _ => db_err("Failed to insert review", e),
        })?;
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE reviews SET rating = $2, comment = $3 WHERE id = $1")
            .bind(review.id().as_uuid())
            .bind(review.rating().value())
            .bind(review.comment())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReviewNotFound,
                format!("Review not found: {}", review.id()),
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, booking_id, owner_id, sitter_id, rating, comment, created_at
            FROM reviews WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch review", e))?;

        row.map(row_to_review).transpose()
    }

    async fn find_by_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, booking_id, owner_id, sitter_id, rating, comment, created_at
            FROM reviews WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_err("Failed to fetch review", e))?;

        row.map(row_to_review).transpose()
    }

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReviewNotFound,
                format!("Review not found: {}", id),
            ));
        }
        Ok(())
    }
}

fn row_to_review(row: PgRow) -> Result<Review, DomainError> {
    let rating = ReviewRating::try_from_i16(row.get("rating"))
        .map_err(|e| DomainError::database(format!("Corrupt rating: {}", e)))?;
    Ok(Review::reconstitute(
        ReviewId::from_uuid(row.get("id")),
        BookingId::from_uuid(row.get("booking_id")),
        OwnerId::from_uuid(row.get("owner_id")),
        SitterId::from_uuid(row.get("sitter_id")),
        rating,
        row.get("comment"),
        Timestamp::from_datetime(row.get("created_at")),
    ))
}

/// PostgreSQL implementation of RatingStore. Recomputes the average from the
/// reviews table and upserts it into `sitter_ratings`; a sitter with no
/// reviews loses their row and reads back as unrated.
#[derive(Clone)]
pub struct PostgresRatingStore {
    pool: PgPool,
}

impl PostgresRatingStore {
    /// Creates a new PostgresRatingStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for PostgresRatingStore {
    async fn recompute(&self, sitter_id: SitterId) -> Result<(), DomainError> {
        let average: Option<rust_decimal::Decimal> = sqlx::query_scalar(
            "SELECT ROUND(AVG(rating), 2) FROM reviews WHERE sitter_id = $1",
        )
        .bind(sitter_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_err("Failed to compute rating", e))?;

        match average {
            Some(average) => {
                sqlx::query(
                    r#"
                    INSERT INTO sitter_ratings (sitter_id, average_rating, updated_at)
                    VALUES ($1, $2, NOW())
                    ON CONFLICT (sitter_id)
                    DO UPDATE SET average_rating = $2, updated_at = NOW()
                    "#,
                )
                .bind(sitter_id.as_uuid())
                .bind(average)
                .execute(&self.pool)
                .await
                .map_err(|e| db_err("Failed to store rating", e))?;
            }
            None => {
                sqlx::query("DELETE FROM sitter_ratings WHERE sitter_id = $1")
                    .bind(sitter_id.as_uuid())
                    .execute(&self.pool)
                    .await
                    .map_err(|e| db_err("Failed to clear rating", e))?;
            }
        }
        Ok(())
    }
}
