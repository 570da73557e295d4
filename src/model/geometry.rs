use std::fmt;

use crate::stoich::{Error, ensure_positive, rod_area, sphere_area};

/// Shape and size of a single colloidal particle.
///
/// All linear dimensions are in nanometres. Rods are modelled as a cylinder
/// capped by two hemispheres whose diameter equals the rod width, so the total
/// rod length includes both caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Spherical nanoparticle.
    Sphere {
        /// Particle diameter in nm.
        diameter_nm: f64,
    },
    /// Hemispherically capped nanorod.
    Rod {
        /// Tip-to-tip length in nm.
        length_nm: f64,
        /// Rod (and cap) diameter in nm.
        width_nm: f64,
    },
}

impl Geometry {
    pub fn sphere(diameter_nm: f64) -> Self {
        Self::Sphere { diameter_nm }
    }

    pub fn rod(length_nm: f64, width_nm: f64) -> Self {
        Self::Rod {
            length_nm,
            width_nm,
        }
    }

    /// Checks that every dimension is positive and finite, and that a rod is
    /// at least as long as it is wide.
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Self::Sphere { diameter_nm } => {
                ensure_positive("diameter", diameter_nm)?;
            }
            Self::Rod {
                length_nm,
                width_nm,
            } => {
                ensure_positive("length", length_nm)?;
                ensure_positive("width", width_nm)?;
                if length_nm < width_nm {
                    return Err(Error::invalid_geometry(format!(
                        "rod length ({length_nm} nm) is shorter than its width ({width_nm} nm)"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Surface area of one particle in cm².
    pub fn area_cm2(&self) -> f64 {
        match *self {
            Self::Sphere { diameter_nm } => sphere_area(diameter_nm),
            Self::Rod {
                length_nm,
                width_nm,
            } => rod_area(length_nm, width_nm),
        }
    }

    /// Returns the geometry grown by a coating shell of `thickness_nm` on every side.
    ///
    /// Each linear dimension increases by twice the thickness, so a rod keeps
    /// its cap-to-cap model and its aspect ratio moves toward one.
    pub fn with_shell(&self, thickness_nm: f64) -> Self {
        let grow = 2.0 * thickness_nm;
        match *self {
            Self::Sphere { diameter_nm } => Self::Sphere {
                diameter_nm: diameter_nm + grow,
            },
            Self::Rod {
                length_nm,
                width_nm,
            } => Self::Rod {
                length_nm: length_nm + grow,
                width_nm: width_nm + grow,
            },
        }
    }

    /// Short lowercase name used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Rod { .. } => "rod",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sphere { diameter_nm } => write!(f, "sphere Ø{diameter_nm:.1} nm"),
            Self::Rod {
                length_nm,
                width_nm,
            } => write!(f, "rod {length_nm:.1} × {width_nm:.1} nm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_grows_every_dimension_on_both_sides() {
        assert_eq!(Geometry::sphere(10.0).with_shell(10.0), Geometry::sphere(30.0));
        assert_eq!(
            Geometry::rod(40.0, 10.0).with_shell(8.0),
            Geometry::rod(56.0, 26.0)
        );
    }

    #[test]
    fn zero_shell_is_identity() {
        let rod = Geometry::rod(55.0, 15.0);
        assert_eq!(rod.with_shell(0.0), rod);
    }

    #[test]
    fn area_dispatches_on_shape() {
        assert_eq!(Geometry::sphere(12.0).area_cm2(), sphere_area(12.0));
        assert_eq!(Geometry::rod(60.0, 20.0).area_cm2(), rod_area(60.0, 20.0));
    }

    #[test]
    fn display_names_shape_and_size() {
        assert_eq!(Geometry::sphere(10.0).to_string(), "sphere Ø10.0 nm");
        assert_eq!(Geometry::rod(40.0, 10.0).to_string(), "rod 40.0 × 10.0 nm");
        assert_eq!(Geometry::rod(40.0, 10.0).kind(), "rod");
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        assert!(Geometry::sphere(10.0).validate().is_ok());
        assert!(Geometry::rod(10.0, 10.0).validate().is_ok());
        assert!(matches!(
            Geometry::sphere(f64::NAN).validate(),
            Err(Error::InvalidInput {
                parameter: "diameter",
                ..
            })
        ));
        assert!(matches!(
            Geometry::rod(10.0, 40.0).validate(),
            Err(Error::InvalidGeometry { .. })
        ));
    }
}
