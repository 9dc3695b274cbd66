//! Open rentals and the projections served by the listing and lifecycle
//! endpoints.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::types::{CalendarDate, DbId, Timestamp};

/// An open rental row from the `rentals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    pub customer_id: DbId,
    pub video_id: DbId,
    pub due_date: Timestamp,
    pub checked_out_at: Timestamp,
}

/// One entry of `GET /customers/{id}/rentals`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerRental {
    pub release_date: CalendarDate,
    pub title: String,
    pub due_date: Timestamp,
}

/// One entry of `GET /videos/{id}/rentals`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoRenter {
    pub phone: String,
    pub postal_code: String,
    pub name: String,
    pub due_date: Timestamp,
}

/// Result of a successful check-out.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutReceipt {
    pub customer_id: DbId,
    pub video_id: DbId,
    pub due_date: Timestamp,
    pub videos_checked_out_count: i32,
    pub available_inventory: i32,
}

/// Result of a successful check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReceipt {
    pub customer_id: DbId,
    pub video_id: DbId,
    pub videos_checked_out_count: i32,
    pub available_inventory: i32,
}
