//! Distance provider adapters.
//!
//! - **GoogleDistanceMatrix** - Google Distance Matrix web API
//! - **MockDistanceProvider** - scripted answers for tests and offline runs

mod google;
mod mock;

pub use google::{GoogleDistanceMatrix, GoogleMapsConfig};
pub use mock::MockDistanceProvider;
