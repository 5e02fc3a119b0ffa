//! Mock distance provider for testing.
//!
//! Answers are scripted per destination; destinations without a script get
//! the fallback answer. Every call is recorded for verification.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Coordinates;
use crate::domain::nearest::{DistanceMatrix, MatrixElement};
use crate::ports::{DistanceError, DistanceProvider};

type Answer = Result<DistanceMatrix, DistanceError>;

/// Scripted distance provider.
#[derive(Debug, Clone)]
pub struct MockDistanceProvider {
    answers: Arc<Mutex<HashMap<String, Answer>>>,
    fallback: Answer,
    delay: Duration,
    calls: Arc<Mutex<Vec<(Coordinates, Coordinates)>>>,
}

impl MockDistanceProvider {
    /// Every destination is `ZERO_RESULTS` until scripted otherwise.
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(HashMap::new())),
            fallback: Ok(DistanceMatrix::single(MatrixElement::unresolved(
                "ZERO_RESULTS",
            ))),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `destination` with a distance text such as `"0.4 km"`.
    pub fn with_distance(self, destination: Coordinates, text: impl Into<String>) -> Self {
        self.with_matrix(destination, DistanceMatrix::single(MatrixElement::with_distance(text)))
    }

    /// Answer `destination` with a full matrix.
    pub fn with_matrix(self, destination: Coordinates, matrix: DistanceMatrix) -> Self {
        self.script(destination, Ok(matrix))
    }

    /// Fail requests for `destination`.
    pub fn with_error(self, destination: Coordinates, error: DistanceError) -> Self {
        self.script(destination, Err(error))
    }

    /// Answer for destinations without a script.
    pub fn with_fallback(mut self, answer: Answer) -> Self {
        self.fallback = answer;
        self
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Destinations queried so far, in call order.
    pub fn queried_destinations(&self) -> Vec<Coordinates> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, destination)| *destination).collect())
            .unwrap_or_default()
    }

    fn script(self, destination: Coordinates, answer: Answer) -> Self {
        if let Ok(mut answers) = self.answers.lock() {
            answers.insert(destination.to_query_param(), answer);
        }
        self
    }
}

impl Default for MockDistanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DistanceProvider for MockDistanceProvider {
    async fn distance(&self, origin: Coordinates, destination: Coordinates) -> Answer {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((origin, destination));
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let scripted = self
            .answers
            .lock()
            .ok()
            .and_then(|answers| answers.get(&destination.to_query_param()).cloned());
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}
