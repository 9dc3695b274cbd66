//! Video entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use videostore_core::types::{CalendarDate, DbId};

/// A video row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub release_date: CalendarDate,
    /// Copies owned by the store.
    pub total_inventory: i32,
    /// Copies on the shelf. Always within `0..=total_inventory`.
    pub available_inventory: i32,
}

/// Validated fields for creating or replacing a video.
///
/// `available_inventory` is never supplied by callers: it starts equal to
/// `total_inventory` and afterwards only moves through check-out/check-in or
/// an inventory rebalance on update.
#[derive(Debug, Clone)]
pub struct VideoInput {
    pub title: String,
    pub release_date: CalendarDate,
    pub total_inventory: i32,
}
