//! Customer entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::types::DbId;

/// A customer row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub postal_code: String,
    pub phone: String,
    /// Number of rentals this customer currently has open.
    pub videos_checked_out_count: i32,
}

/// Validated fields for creating or replacing a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub postal_code: String,
    pub phone: String,
}
