//! Handlers for the `/videos` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use videostore_core::error::CoreError;
use videostore_core::types::DbId;
use videostore_core::validation::{parse_calendar_date, require, validate_total_inventory};
use videostore_db::models::rental::VideoRenter;
use videostore_db::models::video::{Video, VideoInput};
use videostore_db::repositories::{RentalRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::DeleteResponse;
use crate::state::AppState;

/// Request body for `POST` and `PUT`. Every field is required;
/// `release_date` is a `YYYY-MM-DD` string.
#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub total_inventory: Option<i32>,
}

impl VideoRequest {
    fn into_input(self) -> Result<VideoInput, CoreError> {
        let title = require(self.title, "title")?;
        let release_date = parse_calendar_date(&require(self.release_date, "release_date")?)?;
        let total_inventory = require(self.total_inventory, "total_inventory")?;
        validate_total_inventory(total_inventory)?;
        Ok(VideoInput {
            title,
            release_date,
            total_inventory,
        })
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Video", id })
}

/// GET /videos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Video>>> {
    let videos = VideoRepo::list(&state.pool).await?;
    Ok(Json(videos))
}

/// POST /videos
///
/// `available_inventory` starts equal to `total_inventory`.
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<VideoRequest>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let input = body.into_input()?;
    let video = VideoRepo::create(&state.pool, &input).await?;
    tracing::debug!(video_id = video.id, "Video created");
    Ok((StatusCode::CREATED, Json(video)))
}

/// GET /videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Video>> {
    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(video))
}

/// PUT /videos/{id}
///
/// Copies currently rented stay rented; `available_inventory` moves with
/// `total_inventory`. An unknown id is reported before body validation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<VideoRequest>,
) -> AppResult<Json<Video>> {
    if VideoRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let input = body.into_input()?;
    let video = VideoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(video))
}

/// DELETE /videos/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    if VideoRepo::delete(&state.pool, id).await? {
        Ok(Json(DeleteResponse { id, success: true }))
    } else {
        Err(not_found(id))
    }
}

/// GET /videos/{id}/rentals
///
/// Customers currently renting the video.
pub async fn list_renters(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<VideoRenter>>> {
    if VideoRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let renters = RentalRepo::list_for_video(&state.pool, id).await?;
    Ok(Json(renters))
}
