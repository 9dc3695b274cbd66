pub mod customer;
pub mod health;
pub mod rental;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /customers                       list, create
/// /customers/{id}                  get, update, delete
/// /customers/{id}/rentals          open rentals held by the customer
///
/// /videos                          list, create
/// /videos/{id}                     get, update, delete
/// /videos/{id}/rentals             customers currently renting the video
///
/// /rentals/check-out               open a rental (POST)
/// /rentals/check-in                close a rental (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customer::router())
        .nest("/videos", video::router())
        .nest("/rentals", rental::router())
}
