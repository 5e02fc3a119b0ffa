//! Distance matrix response as returned by the distance provider.
//!
//! Field names follow the provider's JSON so adapters can deserialize
//! straight into these types.

use serde::{Deserialize, Serialize};

/// Status token the provider uses for success at both levels.
pub const STATUS_OK: &str = "OK";

/// Whole response for one origin/destination query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    /// Query-level status (`OK`, `OVER_QUERY_LIMIT`, `INVALID_REQUEST`, ...).
    pub status: String,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixElement {
    /// Element-level status (`OK`, `NOT_FOUND`, `ZERO_RESULTS`, ...).
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<TextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TextValue>,
}

/// Human readable text plus the provider's numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl DistanceMatrix {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The single element of a one-origin, one-destination query.
    pub fn first_element(&self) -> Option<&MatrixElement> {
        self.rows.first()?.elements.first()
    }

    /// Builds a successful single-element response (handy for mocks).
    pub fn single(element: MatrixElement) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            rows: vec![MatrixRow {
                elements: vec![element],
            }],
            error_message: None,
        }
    }

    /// Builds a failed response carrying only a query-level status.
    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            rows: Vec::new(),
            error_message: None,
        }
    }
}

impl MatrixElement {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Successful element with a distance text.
    pub fn with_distance(text: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            distance: Some(TextValue {
                text: text.into(),
                value: None,
            }),
            duration: None,
        }
    }

    /// Successful element that only carries a travel duration.
    pub fn with_duration(text: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            distance: None,
            duration: Some(TextValue {
                text: text.into(),
                value: None,
            }),
        }
    }

    /// Element with a non-success status.
    pub fn unresolved(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            distance: None,
            duration: None,
        }
    }
}
