use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{Reservation, Restaurant, User};
use crate::repository::{ReservationRepository, RestaurantRepository, UserRepository};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub restaurant_id: Uuid,
}

#[instrument(skip(pool))]
pub async fn list_users(State(pool): State<DbPool>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::all(&pool).await?;
    Ok(Json(users))
}

#[instrument(skip(pool))]
pub async fn list_restaurants(
    State(pool): State<DbPool>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = RestaurantRepository::all(&pool).await?;
    Ok(Json(restaurants))
}

#[instrument(skip(pool))]
pub async fn list_user_reservations(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = ReservationRepository::for_user(&pool, user_id).await?;
    Ok(Json(reservations))
}

#[instrument(skip(pool))]
pub async fn create_reservation(
    State(pool): State<DbPool>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateReservation>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let reservation =
        ReservationRepository::create(&pool, user_id, payload.restaurant_id).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

#[instrument(skip(pool))]
pub async fn delete_reservation(
    State(pool): State<DbPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ReservationRepository::delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
