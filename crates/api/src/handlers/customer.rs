//! Handlers for the `/customers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use videostore_core::error::CoreError;
use videostore_core::types::DbId;
use videostore_core::validation::require;
use videostore_db::models::customer::{Customer, CustomerInput};
use videostore_db::models::rental::CustomerRental;
use videostore_db::repositories::{CustomerRepo, RentalRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::DeleteResponse;
use crate::state::AppState;

/// Request body for `POST` and `PUT`. Every field is required.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
}

impl CustomerRequest {
    fn into_input(self) -> Result<CustomerInput, CoreError> {
        Ok(CustomerInput {
            name: require(self.name, "name")?,
            postal_code: require(self.postal_code, "postal_code")?,
            phone: require(self.phone, "phone")?,
        })
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

/// GET /customers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(customers))
}

/// POST /customers
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CustomerRequest>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let input = body.into_input()?;
    let customer = CustomerRepo::create(&state.pool, &input).await?;
    tracing::debug!(customer_id = customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// PUT /customers/{id}
///
/// An unknown id is reported before body validation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<CustomerRequest>,
) -> AppResult<Json<Customer>> {
    if CustomerRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let input = body.into_input()?;
    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// DELETE /customers/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    if CustomerRepo::delete(&state.pool, id).await? {
        Ok(Json(DeleteResponse { id, success: true }))
    } else {
        Err(not_found(id))
    }
}

/// GET /customers/{id}/rentals
///
/// Open rentals for the customer with each video's title and release date.
pub async fn list_rentals(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<CustomerRental>>> {
    if CustomerRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    let rentals = RentalRepo::list_for_customer(&state.pool, id).await?;
    Ok(Json(rentals))
}
