//! PostgreSQL adapters.

mod place_repository;

pub use place_repository::PostgresPlaceRepository;
