//! Core data structures flowing through `colloid-forge`.
//!
//! - [`geometry`] – Particle shapes (sphere or hemispherically capped rod) in nanometres.
//! - [`plan`] – Inputs and outputs of the conjugation stoichiometry calculation.
//! - [`tem`] – Raw TEM measurement rows, calibrated rows, paired measurements, and statistics.
//!
//! The stoichiometry types and the TEM types never reference each other; the two
//! halves of the crate share nothing but the scientific workflow they serve.

pub mod geometry;
pub mod plan;
pub mod tem;
