use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/acme_reservation_db";

pub fn database_url() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

pub fn establish_connection_pool() -> Result<DbPool, anyhow::Error> {
    let manager = ConnectionManager::<PgConnection>::new(database_url());
    let pool = r2d2::Pool::builder().max_size(10).build(manager)?;

    Ok(pool)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, ::r2d2::Error> {
    let conn = pool.get()?;
    Ok(conn)
}
