//! Error types for conjugation stoichiometry.
//!
//! Errors cover rejected user inputs and unusable reagent parameter files.
//! The formulas themselves never fail; every failure is detected before
//! any quantity is computed.

use thiserror::Error;

/// Errors that can occur while planning a conjugation.
#[derive(Debug, Error)]
pub enum Error {
    /// A geometric or concentration input is zero, negative, or not finite.
    #[error("invalid input: {parameter} must be a positive finite number (got {value})")]
    InvalidInput {
        /// Name of the rejected input.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The inputs are individually valid but describe an impossible particle.
    #[error("invalid geometry: {detail}")]
    InvalidGeometry {
        /// Description of the problem.
        detail: String,
    },

    /// Failed to parse reagent parameters TOML.
    #[error("failed to parse reagent parameters: {0}")]
    ParameterParse(#[from] toml::de::Error),

    /// A reagent parameter is zero, negative, or not finite.
    #[error("invalid reagent parameter '{parameter}': must be positive and finite (got {value})")]
    InvalidParameter {
        /// Dotted path of the parameter, e.g. `dna.footprint_nm2`.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl Error {
    /// Creates an [`InvalidInput`](Error::InvalidInput) error.
    pub fn invalid_input(parameter: &'static str, value: f64) -> Self {
        Self::InvalidInput { parameter, value }
    }

    /// Creates an [`InvalidGeometry`](Error::InvalidGeometry) error.
    pub fn invalid_geometry(detail: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            detail: detail.into(),
        }
    }
}

/// Checks that `value` is strictly positive and finite.
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_input(parameter, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(ensure_positive("diameter", 12.5).unwrap(), 12.5);
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ensure_positive("diameter", bad).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { parameter: "diameter", .. }));
        }
    }

    #[test]
    fn invalid_input_message_names_parameter() {
        let msg = Error::invalid_input("target area", -2.0).to_string();
        assert!(msg.contains("target area"));
        assert!(msg.contains("-2"));
    }
}
