//! Repository for the `videos` table.

use sqlx::{PgConnection, PgPool};
use videostore_core::error::CoreError;
use videostore_core::rental::rebalance_available;
use videostore_core::types::DbId;

use crate::error::RepoError;
use crate::models::video::{Video, VideoInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, release_date, total_inventory, available_inventory";

/// Provides CRUD and inventory operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video with every copy available, returning the created row.
    pub async fn create(pool: &PgPool, input: &VideoInput) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (title, release_date, total_inventory, available_inventory)
             VALUES ($1, $2, $3, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.total_inventory)
            .fetch_one(pool)
            .await
    }

    /// Find a video by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all videos in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos ORDER BY id");
        sqlx::query_as::<_, Video>(&query).fetch_all(pool).await
    }

    /// Overwrite title, release date and total inventory.
    ///
    /// Copies currently rented stay rented: `available_inventory` shifts by
    /// the change in `total_inventory`. Fails with [`CoreError::Validation`]
    /// if the new total is below the number of copies out. Returns `None` if
    /// no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &VideoInput,
    ) -> Result<Option<Video>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock(&mut *tx, id).await? else {
            return Ok(None);
        };
        let available = rebalance_available(
            current.total_inventory,
            current.available_inventory,
            input.total_inventory,
        )?;

        let query = format!(
            "UPDATE videos SET
                title = $2,
                release_date = $3,
                total_inventory = $4,
                available_inventory = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.release_date)
            .bind(input.total_inventory)
            .bind(available)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(video))
    }

    /// Delete a video. Returns `false` if no such video exists.
    ///
    /// Fails with [`CoreError::Conflict`] while any copy is still rented out;
    /// the row is left untouched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::lock(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        let open: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE video_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if open > 0 {
            return Err(CoreError::Conflict(format!(
                "Video {id} still has {open} copy(ies) checked out"
            ))
            .into());
        }

        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(video_id = id, "Video deleted");
        Ok(true)
    }

    /// Fetch a video and hold a row lock until the surrounding transaction ends.
    pub(crate) async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Take one copy off the shelf.
    ///
    /// The decrement is conditional on a copy being available, so it can
    /// never drive the count negative. Returns the new available count, or
    /// `None` if nothing was on the shelf.
    pub(crate) async fn take_copy(conn: &mut PgConnection, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE videos
             SET available_inventory = available_inventory - 1
             WHERE id = $1 AND available_inventory > 0
             RETURNING available_inventory",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Put one copy back on the shelf.
    ///
    /// Conditional on a copy being out. Returns the new available count, or
    /// `None` if the video was already fully stocked.
    pub(crate) async fn return_copy(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE videos
             SET available_inventory = available_inventory + 1
             WHERE id = $1 AND available_inventory < total_inventory
             RETURNING available_inventory",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }
}
