pub mod customer;
pub mod rental;
pub mod video;

use serde::Serialize;
use videostore_core::types::DbId;

/// Body returned by `DELETE` on customers and videos.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: DbId,
    pub success: bool,
}
