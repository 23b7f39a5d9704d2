pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod schema;
pub mod seed;
