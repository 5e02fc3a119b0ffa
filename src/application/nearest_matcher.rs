//! NearestPlaceMatcher - evaluates saved places against a live origin.
//!
//! Distance queries fan out with bounded concurrency but results are
//! yielded in the order the places were given. Dropping the stream cancels
//! queries still in flight.

use futures::stream::{self, Stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::Coordinates;
use crate::domain::nearest::{classify, Flow, NearestReduction, NearestReport, PlaceClassification};
use crate::domain::place::Place;
use crate::ports::{DistanceError, DistanceProvider};

/// Classifies places by distance from an origin.
#[derive(Clone)]
pub struct NearestPlaceMatcher {
    provider: Arc<dyn DistanceProvider>,
    concurrency: usize,
    timeout: Duration,
}

impl NearestPlaceMatcher {
    /// `concurrency` below 1 is treated as 1 (sequential).
    pub fn new(provider: Arc<dyn DistanceProvider>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Classified places in input order.
    pub fn evaluate(
        &self,
        origin: Coordinates,
        places: Vec<Place>,
    ) -> impl Stream<Item = (Place, PlaceClassification)> + Send + '_ {
        stream::iter(places)
            .map(move |place| async move {
                let classification = self.classify_one(origin, &place).await;
                (place, classification)
            })
            .buffered(self.concurrency)
    }

    /// Runs the whole query and reduces it to a report.
    ///
    /// `on_report` sees every reported place as soon as it is classified,
    /// before later places are queried. Evaluation stops at the first
    /// provider error or at the first error returned by `on_report`.
    pub async fn find_nearest<F, Fut, E>(
        &self,
        origin: Coordinates,
        places: Vec<Place>,
        mut on_report: F,
    ) -> Result<NearestReport, E>
    where
        F: FnMut(Place) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let mut reduction = NearestReduction::new();
        let mut classified = Box::pin(self.evaluate(origin, places));
        while let Some((place, classification)) = classified.next().await {
            if classification.is_reported() {
                on_report(place.clone()).await?;
            }
            if reduction.record(place, classification) == Flow::Stop {
                break;
            }
        }
        Ok(reduction.finish())
    }

    async fn classify_one(&self, origin: Coordinates, place: &Place) -> PlaceClassification {
        let destination = *place.coordinates();
        tracing::debug!(place = %place.id(), %destination, "Querying distance");

        let response = tokio::time::timeout(self.timeout, self.provider.distance(origin, destination))
            .await
            .unwrap_or(Err(DistanceError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }));

        let classification = match response {
            Ok(matrix) => classify(&matrix),
            Err(e) => {
                tracing::warn!(place = %place.id(), error = %e, "Distance query failed");
                PlaceClassification::ProviderError(e.status_token())
            }
        };

        if classification == PlaceClassification::Unresolved {
            tracing::warn!(place = %place.id(), "Distance unresolved, place excluded");
        }

        classification
    }
}
