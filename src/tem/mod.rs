mod calibrate;
mod error;
mod pairing;
mod stats;

pub use calibrate::{calibrate, check_schema, measurement_sizes};
pub use error::Error;
pub use pairing::pair;
pub use stats::{describe, histogram, summarize};

use log::debug;

use crate::model::tem::{RawRow, TemReport};

/// Configuration for a TEM reduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemConfig {
    /// Reject tables whose measurement rows cannot all be paired.
    ///
    /// When `false`, a trailing unpaired length is kept with an absent width
    /// and a warning is logged.
    pub strict_pairing: bool,
}

/// Reduces a raw TEM table to calibrated particle measurements and statistics.
///
/// # Errors
///
/// Returns [`Error::EmptyTable`] for an empty table, [`Error::SchemaMismatch`]
/// before any derivation when image identifiers and scales are not one-to-one,
/// and the row-level errors raised by calibration and pairing.
pub fn reduce(rows: &[RawRow], config: &TemConfig) -> Result<TemReport, Error> {
    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let calibrated = calibrate(rows)?;
    let sizes = measurement_sizes(&calibrated)?;
    let measurements = pair(&sizes, config.strict_pairing)?;
    let summary = summarize(&measurements);

    debug!(
        "reduced {} rows into {} particles from {} measurements",
        rows.len(),
        measurements.len(),
        sizes.len()
    );

    Ok(TemReport {
        rows: calibrated,
        measurements,
        summary,
    })
}
