//! In-memory repository adapters.

mod place_repository;

pub use place_repository::InMemoryPlaceRepository;
