use thiserror::Error;

/// Rejections raised while turning a raw search request into `FilterCriteria`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("Keywords are required")]
    EmptyKeywords,
    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("maxResults must be at least 1")]
    ZeroMaxResults,
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("publishedAfter must not be later than publishedBefore")]
    InvertedDateRange,
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Failures talking to the catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}
