use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewReservation, Reservation, Restaurant, User};
use crate::schema::{reservations, restaurants, users};
use diesel::prelude::*;
use tracing::instrument;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    #[instrument(skip(pool))]
    pub async fn all(pool: &DbPool) -> Result<Vec<User>, ApiError> {
        let mut conn = crate::db::get_connection(pool)?;

        let rows = tokio::task::spawn_blocking(move || {
            users::table.select(User::as_select()).load(&mut conn)
        })
        .await??;

        Ok(rows)
    }
}

pub struct RestaurantRepository;

impl RestaurantRepository {
    #[instrument(skip(pool))]
    pub async fn all(pool: &DbPool) -> Result<Vec<Restaurant>, ApiError> {
        let mut conn = crate::db::get_connection(pool)?;

        let rows = tokio::task::spawn_blocking(move || {
            restaurants::table
                .select(Restaurant::as_select())
                .load(&mut conn)
        })
        .await??;

        Ok(rows)
    }
}

pub struct ReservationRepository;

impl ReservationRepository {
    /// No existence check on the user: an unknown id yields an empty list.
    #[instrument(skip(pool))]
    pub async fn for_user(pool: &DbPool, user_id: Uuid) -> Result<Vec<Reservation>, ApiError> {
        let mut conn = crate::db::get_connection(pool)?;

        let rows = tokio::task::spawn_blocking(move || {
            reservations::table
                .filter(reservations::user_id.eq(user_id))
                .select(Reservation::as_select())
                .load(&mut conn)
        })
        .await??;

        Ok(rows)
    }

    /// Foreign-key integrity is enforced by the store; an invalid id
    /// surfaces as `ApiError::InvalidReference`.
    #[instrument(skip(pool))]
    pub async fn create(
        pool: &DbPool,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<Reservation, ApiError> {
        let mut conn = crate::db::get_connection(pool)?;

        let reservation = tokio::task::spawn_blocking(move || {
            diesel::insert_into(reservations::table)
                .values(&NewReservation {
                    user_id,
                    restaurant_id,
                })
                .returning(Reservation::as_returning())
                .get_result(&mut conn)
        })
        .await??;

        Ok(reservation)
    }

    /// Deleting an id that does not exist is reported as `ApiError::NotFound`
    /// rather than silently succeeding.
    #[instrument(skip(pool))]
    pub async fn delete(pool: &DbPool, id: Uuid) -> Result<(), ApiError> {
        let mut conn = crate::db::get_connection(pool)?;

        let deleted_count = tokio::task::spawn_blocking(move || {
            diesel::delete(reservations::table.filter(reservations::id.eq(id))).execute(&mut conn)
        })
        .await??;

        ensure_deleted(deleted_count)
    }
}

/// A delete that touched zero rows targeted a missing id; report it instead
/// of silently succeeding.
fn ensure_deleted(deleted_count: usize) -> Result<(), ApiError> {
    if deleted_count == 0 {
        return Err(ApiError::NotFound);
    }

    Ok(())
}
