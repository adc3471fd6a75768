use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset construction errors (fatal at startup)
// ---------------------------------------------------------------------------

/// The embedded source table does not have the shape the snapshot needs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("year header mismatch: {nepali} nepali labels vs {gregorian} gregorian labels")]
    HeaderMismatch { nepali: usize, gregorian: usize },

    #[error("category '{category}' has {found} values but the table has {expected} years")]
    LengthMismatch {
        category: String,
        expected: usize,
        found: usize,
    },

    #[error("category '{category}', year {year}: '{literal}' is not a number")]
    InvalidNumber {
        category: String,
        year: String,
        literal: String,
    },

    #[error("year '{0}' appears more than once in the header")]
    DuplicateYear(String),

    #[error("category name '{0}' appears more than once")]
    DuplicateCategory(String),

    #[error("years out of order: '{previous}' is followed by '{next}'")]
    UnsortedYears { previous: String, next: String },
}

// ---------------------------------------------------------------------------
// Selection validation (recovered locally, shown to the user)
// ---------------------------------------------------------------------------

/// A user action was refused for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select at least one industrial division.")]
    NoCategories,

    #[error("Please select at least one year.")]
    NoYears,

    /// An insight request is still outstanding.
    #[error("Insights are already being generated.")]
    Busy,
}

// ---------------------------------------------------------------------------
// Insight service failures
// ---------------------------------------------------------------------------

/// Failure talking to the text-generation service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InsightError {
    /// No endpoint configured (`GVA_INSIGHTS_URL` unset).
    #[error("insight service is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("insight service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode insight response: {0}")]
    Decode(String),

    /// The background worker went away without reporting a result.
    #[error("insight worker stopped unexpectedly")]
    Worker,
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            InsightError::Decode(err.to_string())
        } else {
            InsightError::Network(err.to_string())
        }
    }
}
