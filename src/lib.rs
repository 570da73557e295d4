//! Stoichiometry and TEM sizing for DNA-functionalized colloidal nanoparticles.
//!
//! The crate answers two questions asked at the bench. First, how much
//! particle stock, DNA, PEG, streptavidin, and crosslinker to mix to coat a
//! given total surface. Second, how large the particles in a set of TEM images
//! actually are, given pixel measurements and the scale bar of each image.
//!
//! # Conjugation planning
//!
//! The [`plan`] function takes a [`ConjugationInput`] and a [`CalcConfig`]
//! and returns a [`ConjugationPlan`]:
//!
//! ```
//! use colloid_forge::{plan, CalcConfig, ConjugationInput, Geometry, StoichError};
//!
//! // 10 nm spheres at 10 nM, 1 cm² of total surface
//! let input = ConjugationInput::new(Geometry::sphere(10.0), 10.0, 1.0);
//! let plan = plan(&input, &CalcConfig::default())?;
//!
//! assert!((plan.particle_area_cm2 - 3.1416e-12).abs() < 1e-16);
//! assert!((plan.particle_count - 3.1831e11).abs() / 3.1831e11 < 1e-4);
//! assert!((plan.particle_volume_ul - 52.85).abs() < 0.01);
//!
//! // DNA, PEG, streptavidin, crosslinker
//! assert_eq!(plan.doses().count(), 4);
//! # Ok::<(), StoichError>(())
//! ```
//!
//! # TEM reduction
//!
//! The [`reduce`] function calibrates a raw table of [`RawRow`]s and pairs the
//! physical sizes into per-particle [`Measurement`]s:
//!
//! ```
//! use colloid_forge::{reduce, Parameter, RawRow, TemConfig, TemError};
//!
//! let rows = vec![
//!     RawRow::calibration(100.0, 50.0, "img1"), // 100 px scale bar = 50 nm
//!     RawRow::measurement(40.0),
//!     RawRow::measurement(20.0),
//! ];
//! let report = reduce(&rows, &TemConfig::default())?;
//!
//! assert_eq!(report.measurements[0].length_nm, Some(20.0));
//! assert_eq!(report.measurements[0].width_nm, Some(10.0));
//! assert_eq!(report.stats(Parameter::AspectRatio).unwrap().mean, Some(2.0));
//! # Ok::<(), TemError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`stoich`] — Surface areas, molar amounts, and reagent volumes
//! - [`tem`] — Calibration, pairing, and summary statistics of TEM tables
//! - [`io`] — Delimited-text tables for TEM input and results

mod model;

pub mod io;
pub mod stoich;
pub mod tem;

pub use model::geometry::Geometry;
pub use model::plan::{ConjugationInput, ConjugationPlan, ReagentDose, Stock};
pub use model::tem::{
    CalibratedRow, HistogramBin, Measurement, Parameter, RawRow, SummaryStats, TemReport,
};

pub use stoich::{CalcConfig, ReagentParams, ReagentSet, plan};
pub use tem::{TemConfig, reduce};

pub use io::Error as IoError;
pub use stoich::Error as StoichError;
pub use tem::Error as TemError;
