// Manual schema definition (no migrations)
// The tables are dropped and rebuilt by the seed loader on every boot.

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    restaurants (id) {
        id -> Uuid,
        name -> Varchar,
        location -> Array<Float8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    reservations (id) {
        id -> Uuid,
        user_id -> Nullable<Uuid>,
        restaurant_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(reservations -> users (user_id));
diesel::joinable!(reservations -> restaurants (restaurant_id));

diesel::allow_tables_to_appear_in_same_query!(users, restaurants, reservations);
