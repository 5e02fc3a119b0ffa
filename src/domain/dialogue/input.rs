//! Validation of free-text answers collected by the add flow.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::Coordinates;
use crate::domain::place::MAX_NAME_LENGTH;

static LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[a-zа-яё]").expect("letter pattern is valid"));

static COORDINATE_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?),\s(-?\d+(?:\.\d+)?)\s*$")
        .expect("coordinate pattern is valid")
});

/// Why a place name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    /// No Latin or Cyrillic letter anywhere in the text.
    NoLetters,
    TooLong,
}

/// Accepts a place name if it carries at least one letter.
///
/// Returns the trimmed name.
pub fn validate_place_name(text: &str) -> Result<String, NameRejection> {
    let name = text.trim();
    if !LETTER.is_match(name) {
        return Err(NameRejection::NoLetters);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(NameRejection::TooLong);
    }
    Ok(name.to_string())
}

/// Parses typed coordinates of the form `<float>, <float>`.
///
/// Exactly one whitespace character must follow the comma. Pairs outside
/// the valid latitude/longitude ranges are refused like malformed ones.
pub fn parse_coordinates(text: &str) -> Option<Coordinates> {
    let caps = COORDINATE_PAIR.captures(text)?;
    let latitude = caps[1].parse::<f64>().ok()?;
    let longitude = caps[2].parse::<f64>().ok()?;
    Coordinates::new(latitude, longitude).ok()
}
