//! End-to-end data-access tests against a live PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! throwaway database; seeding drops and recreates every table.

use acme_reservations::db;
use acme_reservations::error::ApiError;
use acme_reservations::repository::{ReservationRepository, RestaurantRepository, UserRepository};
use acme_reservations::seed;
use std::collections::HashSet;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
async fn reservation_lifecycle_against_live_store() {
    let pool = db::establish_connection_pool().unwrap();
    let seeded = seed::sync_and_seed(&pool).await.unwrap();

    // Exactly the seeded users and restaurants come back.
    let users = UserRepository::all(&pool).await.unwrap();
    let names: HashSet<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, ["moe", "lucy", "larry"].into_iter().collect());

    let restaurants = RestaurantRepository::all(&pool).await.unwrap();
    assert_eq!(restaurants.len(), 17);
    let tamarind = restaurants
        .iter()
        .find(|restaurant| restaurant.name == "Tamarind")
        .unwrap();
    assert_eq!(tamarind.location, vec![-74.008929, 40.718977]);

    // lucy holds two seed reservations: Tamarind and Rayuela.
    let lucy = &seeded.users["lucy"];
    let existing = ReservationRepository::for_user(&pool, lucy.id).await.unwrap();
    assert_eq!(existing.len(), 2);
    let reserved: HashSet<Uuid> = existing
        .iter()
        .filter_map(|reservation| reservation.restaurant_id)
        .collect();
    let expected: HashSet<Uuid> = [
        seeded.restaurants["Tamarind"].id,
        seeded.restaurants["Rayuela"].id,
    ]
    .into_iter()
    .collect();
    assert_eq!(reserved, expected);

    // An unknown user yields an empty list, not an error.
    let none = ReservationRepository::for_user(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(none.is_empty());

    // Creating echoes both foreign keys and bumps the count by one.
    let masa_id = seeded.restaurants["Masa"].id;
    let created = ReservationRepository::create(&pool, lucy.id, masa_id)
        .await
        .unwrap();
    assert_eq!(created.user_id, Some(lucy.id));
    assert_eq!(created.restaurant_id, Some(masa_id));
    let after_create = ReservationRepository::for_user(&pool, lucy.id).await.unwrap();
    assert_eq!(after_create.len(), 3);

    // An invalid restaurant id fails without altering any row counts.
    let err = ReservationRepository::create(&pool, lucy.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidReference(_)));
    assert_eq!(UserRepository::all(&pool).await.unwrap().len(), 3);
    assert_eq!(RestaurantRepository::all(&pool).await.unwrap().len(), 17);
    assert_eq!(
        ReservationRepository::for_user(&pool, lucy.id)
            .await
            .unwrap()
            .len(),
        3
    );

    // Deleting removes exactly that row.
    ReservationRepository::delete(&pool, created.id).await.unwrap();
    let after_delete = ReservationRepository::for_user(&pool, lucy.id).await.unwrap();
    assert_eq!(after_delete.len(), 2);
    assert!(after_delete
        .iter()
        .all(|reservation| reservation.id != created.id));

    // Deleting the same id again is reported, never a silent success.
    let missing = ReservationRepository::delete(&pool, created.id)
        .await
        .unwrap_err();
    assert!(matches!(missing, ApiError::NotFound));
}
