//! Repository for the `rentals` table and the rental lifecycle.
//!
//! Check-out and check-in each touch three rows (video, customer, rental)
//! and run as a single transaction. Both parent rows are locked
//! customer-first, video-second before any guard is evaluated, so
//! concurrent transitions on the same customer or video serialize and the
//! inventory guard always sees the value it is about to change.

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use videostore_core::error::CoreError;
use videostore_core::rental::{due_date_from, ensure_in_stock, ensure_returnable, single_open_rental};
use videostore_core::types::DbId;

use crate::error::RepoError;
use crate::models::rental::{CheckInReceipt, CheckOutReceipt, CustomerRental, Rental, VideoRenter};
use crate::repositories::{CustomerRepo, VideoRepo};

/// Column list for the `rentals` table.
const COLUMNS: &str = "id, customer_id, video_id, due_date, checked_out_at";

/// Provides lifecycle transitions and listings for open rentals.
pub struct RentalRepo;

impl RentalRepo {
    /// Check a video out to a customer.
    ///
    /// Decrements the video's available inventory, increments the customer's
    /// checked-out count and opens a rental due in one rental period. Either
    /// all three changes commit or none do.
    ///
    /// # Errors
    ///
    /// - [`CoreError::RentalPartyNotFound`] if either row is missing.
    /// - [`CoreError::OutOfStock`] if no copy is on the shelf.
    /// - [`CoreError::AlreadyCheckedOut`] if the pair already has an open rental.
    pub async fn check_out(
        pool: &PgPool,
        customer_id: DbId,
        video_id: DbId,
    ) -> Result<CheckOutReceipt, RepoError> {
        let mut tx = pool.begin().await?;

        let customer = CustomerRepo::lock(&mut *tx, customer_id).await?;
        let video = VideoRepo::lock(&mut *tx, video_id).await?;
        let (Some(_customer), Some(video)) = (customer, video) else {
            return Err(CoreError::RentalPartyNotFound.into());
        };

        ensure_in_stock(video.available_inventory)?;

        if !Self::find_for_pair(&mut *tx, customer_id, video_id).await?.is_empty() {
            return Err(CoreError::AlreadyCheckedOut.into());
        }

        let available_inventory = VideoRepo::take_copy(&mut *tx, video_id)
            .await?
            .ok_or(CoreError::OutOfStock)?;

        let videos_checked_out_count =
            CustomerRepo::adjust_checked_out_count(&mut *tx, customer_id, 1)
                .await?
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "customer {customer_id} disappeared during check-out"
                    ))
                })?;

        let query = format!(
            "INSERT INTO rentals (customer_id, video_id, due_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let rental = sqlx::query_as::<_, Rental>(&query)
            .bind(customer_id)
            .bind(video_id)
            .bind(due_date_from(Utc::now()))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental_id = rental.id,
            customer_id,
            video_id,
            available_inventory,
            videos_checked_out_count,
            due_date = %rental.due_date,
            "Video checked out"
        );

        Ok(CheckOutReceipt {
            customer_id: rental.customer_id,
            video_id: rental.video_id,
            due_date: rental.due_date,
            videos_checked_out_count,
            available_inventory,
        })
    }

    /// Check a video back in from a customer.
    ///
    /// Increments the video's available inventory, decrements the customer's
    /// checked-out count and deletes the open rental. Either all three
    /// changes commit or none do.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidRequest`] if either row is missing, or the pair
    ///   does not have exactly one open rental.
    /// - [`CoreError::FullyStocked`] if every copy is already on the shelf.
    pub async fn check_in(
        pool: &PgPool,
        customer_id: DbId,
        video_id: DbId,
    ) -> Result<CheckInReceipt, RepoError> {
        let mut tx = pool.begin().await?;

        let customer = CustomerRepo::lock(&mut *tx, customer_id).await?;
        let video = VideoRepo::lock(&mut *tx, video_id).await?;
        let (Some(_customer), Some(video)) = (customer, video) else {
            return Err(CoreError::InvalidRequest(
                "customer or video does not exist".to_string(),
            )
            .into());
        };

        ensure_returnable(video.available_inventory, video.total_inventory)?;

        let rental = single_open_rental(Self::find_for_pair(&mut *tx, customer_id, video_id).await?)?;

        let available_inventory = VideoRepo::return_copy(&mut *tx, video_id)
            .await?
            .ok_or(CoreError::FullyStocked)?;

        let videos_checked_out_count =
            CustomerRepo::adjust_checked_out_count(&mut *tx, customer_id, -1)
                .await?
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "customer {customer_id} has an open rental but a zero checked-out count"
                    ))
                })?;

        sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(rental.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental_id = rental.id,
            customer_id,
            video_id,
            available_inventory,
            videos_checked_out_count,
            "Video checked in"
        );

        Ok(CheckInReceipt {
            customer_id,
            video_id,
            videos_checked_out_count,
            available_inventory,
        })
    }

    /// Open rentals held by a customer, with the rented video's title and
    /// release date, soonest due first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<CustomerRental>, sqlx::Error> {
        sqlx::query_as::<_, CustomerRental>(
            "SELECT v.release_date, v.title, r.due_date
             FROM rentals r
             JOIN videos v ON v.id = r.video_id
             WHERE r.customer_id = $1
             ORDER BY r.due_date, r.id",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }

    /// Customers currently renting a video, soonest due first.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoRenter>, sqlx::Error> {
        sqlx::query_as::<_, VideoRenter>(
            "SELECT c.phone, c.postal_code, c.name, r.due_date
             FROM rentals r
             JOIN customers c ON c.id = r.customer_id
             WHERE r.video_id = $1
             ORDER BY r.due_date, r.id",
        )
        .bind(video_id)
        .fetch_all(pool)
        .await
    }

    /// Find the open rental for a (customer, video) pair, if any.
    pub async fn find_open(
        pool: &PgPool,
        customer_id: DbId,
        video_id: DbId,
    ) -> Result<Option<Rental>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rentals WHERE customer_id = $1 AND video_id = $2"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(customer_id)
            .bind(video_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of open rentals held by a customer.
    pub async fn count_for_customer(pool: &PgPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE customer_id = $1")
            .bind(customer_id)
            .fetch_one(pool)
            .await
    }

    /// All open rentals for a pair, locked for the surrounding transaction.
    async fn find_for_pair(
        conn: &mut PgConnection,
        customer_id: DbId,
        video_id: DbId,
    ) -> Result<Vec<Rental>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rentals
             WHERE customer_id = $1 AND video_id = $2
             FOR UPDATE"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(customer_id)
            .bind(video_id)
            .fetch_all(conn)
            .await
    }
}
