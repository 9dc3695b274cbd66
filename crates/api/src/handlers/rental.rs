//! Handlers for `/rentals/check-out` and `/rentals/check-in`.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use videostore_core::error::CoreError;
use videostore_core::types::DbId;
use videostore_core::validation::require;
use videostore_db::models::rental::{CheckInReceipt, CheckOutReceipt};
use videostore_db::repositories::RentalRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body for both lifecycle endpoints.
#[derive(Debug, Deserialize)]
pub struct RentalRequest {
    pub customer_id: Option<DbId>,
    pub video_id: Option<DbId>,
}

impl RentalRequest {
    fn into_pair(self) -> Result<(DbId, DbId), CoreError> {
        Ok((
            require(self.customer_id, "customer_id")?,
            require(self.video_id, "video_id")?,
        ))
    }
}

/// POST /rentals/check-out
pub async fn check_out(
    State(state): State<AppState>,
    AppJson(body): AppJson<RentalRequest>,
) -> AppResult<Json<CheckOutReceipt>> {
    let (customer_id, video_id) = body.into_pair()?;
    let receipt = RentalRepo::check_out(&state.pool, customer_id, video_id).await?;
    Ok(Json(receipt))
}

/// POST /rentals/check-in
pub async fn check_in(
    State(state): State<AppState>,
    AppJson(body): AppJson<RentalRequest>,
) -> AppResult<Json<CheckInReceipt>> {
    let (customer_id, video_id) = body.into_pair()?;
    let receipt = RentalRepo::check_in(&state.pool, customer_id, video_id).await?;
    Ok(Json(receipt))
}
