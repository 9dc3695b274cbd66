//! Repository for the `customers` table.

use sqlx::{PgConnection, PgPool};
use videostore_core::error::CoreError;
use videostore_core::types::DbId;

use crate::error::RepoError;
use crate::models::customer::{Customer, CustomerInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, postal_code, phone, videos_checked_out_count";

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer with no videos checked out, returning the created row.
    pub async fn create(pool: &PgPool, input: &CustomerInput) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, postal_code, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.name)
            .bind(&input.postal_code)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a customer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all customers in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers ORDER BY id");
        sqlx::query_as::<_, Customer>(&query).fetch_all(pool).await
    }

    /// Overwrite name, postal code and phone.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CustomerInput,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = $2,
                postal_code = $3,
                phone = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.postal_code)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer. Returns `false` if no such customer exists.
    ///
    /// Fails with [`CoreError::Conflict`] while the customer still has open
    /// rentals; the row is left untouched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::lock(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        let open: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE customer_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if open > 0 {
            return Err(CoreError::Conflict(format!(
                "Customer {id} still has {open} video(s) checked out"
            ))
            .into());
        }

        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(customer_id = id, "Customer deleted");
        Ok(true)
    }

    /// Fetch a customer and hold a row lock until the surrounding
    /// transaction ends.
    pub(crate) async fn lock(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Move `videos_checked_out_count` by `delta`, refusing to go below zero.
    ///
    /// Returns the new count, or `None` if the row is missing or the update
    /// would make the count negative.
    pub(crate) async fn adjust_checked_out_count(
        conn: &mut PgConnection,
        id: DbId,
        delta: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE customers
             SET videos_checked_out_count = videos_checked_out_count + $2
             WHERE id = $1 AND videos_checked_out_count + $2 >= 0
             RETURNING videos_checked_out_count",
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(conn)
        .await
    }
}
