//! Reduction of per-place classifications into one nearest-place outcome.
//!
//! Precedence: a provider error outweighs everything, then any reported
//! place gives `NearFound`, otherwise `NoneNear`. Places reported before a
//! provider error stay in the report.

use crate::domain::place::Place;

use super::PlaceClassification;

/// Aggregate result of one nearest-place query.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestOutcome {
    NearFound,
    NoneNear,
    ProviderError(String),
}

/// Final report: places shown to the user, in iteration order, plus the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestReport {
    pub reported: Vec<Place>,
    pub outcome: NearestOutcome,
}

/// Whether evaluation should carry on after a place was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Accumulates classifications one place at a time.
#[derive(Debug, Default)]
pub struct NearestReduction {
    reported: Vec<Place>,
    provider_error: Option<String>,
}

impl NearestReduction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one place. Returns `Flow::Stop` once a provider error was seen.
    pub fn record(&mut self, place: Place, classification: PlaceClassification) -> Flow {
        if self.provider_error.is_some() {
            return Flow::Stop;
        }
        match classification {
            PlaceClassification::ProviderError(status) => {
                self.provider_error = Some(status);
                Flow::Stop
            }
            c if c.is_reported() => {
                self.reported.push(place);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    pub fn reported(&self) -> &[Place] {
        &self.reported
    }

    pub fn finish(self) -> NearestReport {
        let outcome = match self.provider_error {
            Some(status) => NearestOutcome::ProviderError(status),
            None if !self.reported.is_empty() => NearestOutcome::NearFound,
            None => NearestOutcome::NoneNear,
        };
        NearestReport {
            reported: self.reported,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ConversationId, Coordinates};

    fn place(name: &str) -> Place {
        Place::new(
            ConversationId::new(1),
            name,
            "user_1/photo.jpg",
            Coordinates::new(0.0, 0.0).unwrap(),
        )
        .unwrap()
    }

    fn reduce(classified: Vec<(Place, PlaceClassification)>) -> NearestReport {
        let mut reduction = NearestReduction::new();
        for (place, classification) in classified {
            if reduction.record(place, classification) == Flow::Stop {
                break;
            }
        }
        reduction.finish()
    }

    fn names(report: &NearestReport) -> Vec<&str> {
        report.reported.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn reported_places_keep_iteration_order() {
        let report = reduce(vec![
            (place("a"), PlaceClassification::NonMetric),
            (place("b"), PlaceClassification::Far),
            (place("c"), PlaceClassification::Near),
        ]);
        assert_eq!(report.outcome, NearestOutcome::NearFound);
        assert_eq!(names(&report), vec!["a", "c"]);
    }

    #[test]
    fn nothing_reported_is_none_near() {
        let report = reduce(vec![
            (place("a"), PlaceClassification::Far),
            (place("b"), PlaceClassification::Unresolved),
        ]);
        assert_eq!(report.outcome, NearestOutcome::NoneNear);
        assert!(report.reported.is_empty());
    }

    #[test]
    fn provider_error_wins_but_keeps_earlier_reports() {
        let report = reduce(vec![
            (place("a"), PlaceClassification::Near),
            (place("b"), PlaceClassification::ProviderError("OVER_QUERY_LIMIT".into())),
            (place("c"), PlaceClassification::Near),
        ]);
        assert_eq!(
            report.outcome,
            NearestOutcome::ProviderError("OVER_QUERY_LIMIT".to_string())
        );
        assert_eq!(names(&report), vec!["a"]);
    }

    #[test]
    fn record_stops_after_provider_error() {
        let mut reduction = NearestReduction::new();
        assert_eq!(reduction.record(place("a"), PlaceClassification::Far), Flow::Continue);
        assert_eq!(
            reduction.record(place("b"), PlaceClassification::ProviderError("INVALID_REQUEST".into())),
            Flow::Stop
        );
        assert_eq!(reduction.record(place("c"), PlaceClassification::Near), Flow::Stop);
        assert!(reduction.reported().is_empty());
    }

    #[test]
    fn empty_input_is_none_near() {
        assert_eq!(reduce(Vec::new()).outcome, NearestOutcome::NoneNear);
    }
}
