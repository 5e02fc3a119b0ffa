//! Nearest module - pure rules of the nearest-place query.
//!
//! - `matrix` - distance provider response types
//! - `classification` - per-place near/far/unresolved decision
//! - `outcome` - reduction into one of `NearFound`, `NoneNear`, `ProviderError`

mod classification;
mod matrix;
mod outcome;

pub use classification::{
    classify, read_distance, DistanceReading, PlaceClassification, NEAR_THRESHOLD_KM,
};
pub use matrix::{DistanceMatrix, MatrixElement, MatrixRow, TextValue, STATUS_OK};
pub use outcome::{Flow, NearestOutcome, NearestReduction, NearestReport};
