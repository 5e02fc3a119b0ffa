//! Per-place classification of a distance matrix response.

use super::matrix::DistanceMatrix;

/// Places strictly closer than this many kilometres are near.
pub const NEAR_THRESHOLD_KM: f64 = 0.5;

/// How one saved place relates to the live origin.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceClassification {
    /// Kilometre distance below the threshold.
    Near,
    /// Kilometre distance at or above the threshold.
    Far,
    /// Resolved, but not in kilometres (metres or duration only). Reported.
    NonMetric,
    /// Element-level failure. Excluded without failing the query.
    Unresolved,
    /// Query-level failure carrying the provider's raw status token.
    ProviderError(String),
}

impl PlaceClassification {
    /// Whether the place is shown to the user.
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Near | Self::NonMetric)
    }
}

/// Distance text interpreted into a comparable reading.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceReading {
    Kilometers(f64),
    /// Any other unit (`m`, `ft`, ...). Never compared against the threshold.
    OtherUnit(String),
}

/// Reads a provider distance text such as `"0,4 km"`, `"1 234 км"` or `"850 m"`.
///
/// The unit is whatever follows the last digit. Digit-group spaces (plain,
/// no-break and narrow no-break) are dropped and the decimal comma is
/// normalised before parsing. Returns `None` when no number is present or a
/// kilometre value does not parse.
pub fn read_distance(text: &str) -> Option<DistanceReading> {
    let text = text.trim();
    let split = text.rfind(|c: char| c.is_ascii_digit())? + 1;
    let (number, unit) = text.split_at(split);
    let number: String = number.chars().filter(|c| !is_group_separator(*c)).collect();
    if !number
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-')
    {
        return None;
    }

    let unit = unit.trim().to_lowercase();
    match unit.as_str() {
        "km" | "км" => number
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .map(DistanceReading::Kilometers),
        _ => Some(DistanceReading::OtherUnit(unit)),
    }
}

fn is_group_separator(c: char) -> bool {
    matches!(c, ' ' | '\u{a0}' | '\u{202f}')
}

/// Classifies the response for one place.
pub fn classify(matrix: &DistanceMatrix) -> PlaceClassification {
    if !matrix.is_ok() {
        return PlaceClassification::ProviderError(matrix.status.clone());
    }

    let element = match matrix.first_element() {
        Some(element) if element.is_ok() => element,
        _ => return PlaceClassification::Unresolved,
    };

    match (&element.distance, &element.duration) {
        (Some(distance), _) => match read_distance(&distance.text) {
            Some(DistanceReading::Kilometers(km)) if km < NEAR_THRESHOLD_KM => {
                PlaceClassification::Near
            }
            Some(DistanceReading::Kilometers(_)) => PlaceClassification::Far,
            Some(DistanceReading::OtherUnit(_)) => PlaceClassification::NonMetric,
            None => PlaceClassification::Unresolved,
        },
        (None, Some(_)) => PlaceClassification::NonMetric,
        (None, None) => PlaceClassification::Unresolved,
    }
}
