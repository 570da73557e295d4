//! Error types for TEM table reduction.
//!
//! Every error aborts the reduction before a report is produced. Row numbers
//! are 1-based positions of data rows in the input table.

use thiserror::Error;

/// Errors that can occur while reducing a TEM measurement table.
#[derive(Debug, Error)]
pub enum Error {
    /// The table contains no rows.
    #[error("measurement table is empty")]
    EmptyTable,

    /// Calibration anchors and scale values are not one-to-one.
    ///
    /// Every image identifier needs exactly one scale value and vice versa.
    #[error(
        "{image_ids} row(s) carry an image identifier but {scales} row(s) carry a scale value; every image needs exactly one scale"
    )]
    SchemaMismatch {
        /// Rows carrying an image identifier.
        image_ids: usize,
        /// Rows carrying a scale value.
        scales: usize,
    },

    /// A particle measurement appears before any scale bar.
    #[error("row {row} is a measurement but no calibration row precedes it")]
    UndefinedCalibration {
        /// Offending row.
        row: usize,
    },

    /// A scale bar row has a zero pixel length, so its factor is undefined.
    #[error("row {row} is a scale bar with zero pixel length")]
    DegenerateScaleBar {
        /// Offending row.
        row: usize,
    },

    /// A numeric cell is negative or not finite.
    #[error("row {row} has an invalid value: {detail}")]
    InvalidValue {
        /// Offending row.
        row: usize,
        /// Description of the problem.
        detail: String,
    },

    /// The measurements cannot be paired into length/width without a remainder.
    #[error("{count} measurement rows cannot be paired into length and width")]
    UnpairedMeasurement {
        /// Number of measurement rows.
        count: usize,
    },
}

impl Error {
    /// Creates an [`InvalidValue`](Error::InvalidValue) error.
    pub fn invalid_value(row: usize, detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            detail: detail.into(),
        }
    }
}
