use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewReservation, NewRestaurant, NewUser, Reservation, Restaurant, User};
use crate::schema::{reservations, restaurants, users};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::{info, instrument};

/// Sample restaurants as `(name, [longitude, latitude])` pairs.
pub const RESTAURANT_FIXTURE: &[(&str, [f64; 2])] = &[
    ("Raos", [-73.932, 40.7940]),
    ("Masa", [-73.980, 40.7685]),
    ("Bouley", [-74.01394, 40.705137]),
    ("Marc Forgione", [-74.009567, 40.716526]),
    ("Tamarind", [-74.008929, 40.718977]),
    ("Hop Lee Restaurant", [-73.998509, 40.71423]),
    ("Jungsik", [-74.0089, 40.718679]),
    ("The Capital Grille", [-74.010846, 40.708475]),
    ("Pylos", [-73.984152, 40.726096]),
    ("Joe's Shanghai", [-73.997761, 40.714601]),
    ("Cafe Katja", [-73.990565, 40.717719]),
    ("Rosanjin", [-74.007724, 40.716403]),
    ("Kittichai", [-74.003242, 40.724014]),
    ("Bianca Restaurant", [-73.992662, 40.725495]),
    ("Rayuela", [-73.989756, 40.721266]),
    ("Mas Farmhouse", [-74.003875, 40.729269]),
    ("Xe Lua", [-73.998626, 40.716544]),
];

pub const USER_FIXTURE: &[&str] = &["moe", "lucy", "larry"];

/// Sample reservations as `(user name, restaurant name)` pairs, resolved to
/// ids after the rows above are inserted.
pub const RESERVATION_FIXTURE: &[(&str, &str)] = &[
    ("moe", "Tamarind"),
    ("lucy", "Tamarind"),
    ("lucy", "Rayuela"),
];

const SCHEMA_DDL: &str = r#"
DROP TABLE IF EXISTS reservations;
DROP TABLE IF EXISTS restaurants;
DROP TABLE IF EXISTS users;

CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE restaurants (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR NOT NULL,
    location FLOAT8[] NOT NULL DEFAULT '{}',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE reservations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID REFERENCES users(id),
    restaurant_id UUID REFERENCES restaurants(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

/// Name-keyed view of the seeded rows, returned for startup diagnostics.
pub struct SeedData {
    pub users: HashMap<String, User>,
    pub restaurants: HashMap<String, Restaurant>,
    pub reservations: Vec<Reservation>,
}

/// Drops and recreates all three tables, then inserts the fixture rows.
/// Destructive: any pre-existing data is discarded on every boot.
#[instrument(skip(pool))]
pub async fn sync_and_seed(pool: &DbPool) -> Result<SeedData, ApiError> {
    let mut conn = crate::db::get_connection(pool)?;

    let data = tokio::task::spawn_blocking(move || -> Result<SeedData, ApiError> {
        conn.batch_execute(SCHEMA_DDL)?;

        let new_restaurants: Vec<NewRestaurant> = RESTAURANT_FIXTURE
            .iter()
            .map(|(name, location)| NewRestaurant {
                name: (*name).to_string(),
                location: location.to_vec(),
            })
            .collect();
        let restaurant_rows: Vec<Restaurant> = diesel::insert_into(restaurants::table)
            .values(&new_restaurants)
            .returning(Restaurant::as_returning())
            .get_results(&mut conn)?;
        let restaurants_by_name: HashMap<String, Restaurant> = restaurant_rows
            .into_iter()
            .map(|row| (row.name.clone(), row))
            .collect();

        let new_users: Vec<NewUser> = USER_FIXTURE
            .iter()
            .map(|name| NewUser {
                name: (*name).to_string(),
            })
            .collect();
        let user_rows: Vec<User> = diesel::insert_into(users::table)
            .values(&new_users)
            .returning(User::as_returning())
            .get_results(&mut conn)?;
        let users_by_name: HashMap<String, User> = user_rows
            .into_iter()
            .map(|row| (row.name.clone(), row))
            .collect();

        let new_reservations: Vec<NewReservation> = RESERVATION_FIXTURE
            .iter()
            .map(|(user_name, restaurant_name)| NewReservation {
                user_id: users_by_name[*user_name].id,
                restaurant_id: restaurants_by_name[*restaurant_name].id,
            })
            .collect();
        let reservation_rows: Vec<Reservation> = diesel::insert_into(reservations::table)
            .values(&new_reservations)
            .returning(Reservation::as_returning())
            .get_results(&mut conn)?;

        Ok(SeedData {
            users: users_by_name,
            restaurants: restaurants_by_name,
            reservations: reservation_rows,
        })
    })
    .await??;

    info!(
        users = data.users.len(),
        restaurants = data.restaurants.len(),
        reservations = data.reservations.len(),
        "database synced and seeded"
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_seventeen_restaurants_and_three_users() {
        assert_eq!(RESTAURANT_FIXTURE.len(), 17);
        assert_eq!(USER_FIXTURE.len(), 3);
        assert_eq!(RESERVATION_FIXTURE.len(), 3);
    }

    #[test]
    fn fixture_coordinates_are_longitude_latitude_pairs() {
        for (name, [longitude, latitude]) in RESTAURANT_FIXTURE {
            assert!(
                (-75.0..-73.0).contains(longitude),
                "unexpected longitude for {name}"
            );
            assert!(
                (40.0..41.0).contains(latitude),
                "unexpected latitude for {name}"
            );
        }
    }

    #[test]
    fn tamarind_coordinates_match_reference_literals() {
        let (_, location) = RESTAURANT_FIXTURE
            .iter()
            .find(|(name, _)| *name == "Tamarind")
            .unwrap();
        assert_eq!(*location, [-74.008929, 40.718977]);
    }

    #[test]
    fn reservation_fixture_references_only_fixture_rows() {
        for (user_name, restaurant_name) in RESERVATION_FIXTURE {
            assert!(USER_FIXTURE.contains(user_name));
            assert!(RESTAURANT_FIXTURE
                .iter()
                .any(|(name, _)| name == restaurant_name));
        }
    }

    #[test]
    fn lucy_has_two_seed_reservations_and_moe_has_one() {
        let count = |user: &str| {
            RESERVATION_FIXTURE
                .iter()
                .filter(|(name, _)| *name == user)
                .count()
        };
        assert_eq!(count("lucy"), 2);
        assert_eq!(count("moe"), 1);
        assert_eq!(count("larry"), 0);
    }
}
