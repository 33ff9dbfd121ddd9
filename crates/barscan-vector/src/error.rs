use barscan_core::MergeError;
use thiserror::Error;

/// Errors returned by the vector pipeline. All are fatal; partial output
/// would silently corrupt downstream consumers.
#[derive(Error, Debug)]
pub enum VectorError {
    #[error(transparent)]
    Xml(#[from] roxmltree::Error),

    #[error("no bar paths with fill token `{0}`")]
    NoBars(String),

    #[error("unsupported path data: {0}")]
    BadPathData(String),

    #[error("bar path is not a 4-segment axis-aligned rectangle")]
    BadBarGeometry,

    #[error("no day labels found in the axis label band")]
    NoDayLabels,

    #[error("malformed month label `{0}`")]
    BadMonthLabel(String),

    #[error("unknown month name `{0}`")]
    UnknownMonth(String),

    #[error("found {days} day group(s) but {months} month label(s)")]
    MonthGroupMismatch { days: usize, months: usize },

    #[error(transparent)]
    Merge(#[from] MergeError),
}
