/// Coating shell per side for DNA + PEG conjugated spheres, in nm.
pub const SPHERE_SHELL_NM: f64 = 10.0;

/// Coating shell per side for 25 bp DNA on rods, in nm.
pub const ROD_SHELL_NM: f64 = 8.0;

/// Configuration for a conjugation calculation.
///
/// # Examples
///
/// ```
/// use colloid_forge::{CalcConfig, ReagentSet};
///
/// // Rod workflow dosing only DNA and PEG, with a 100 µM DNA stock
/// let config = CalcConfig {
///     shell_thickness_nm: 8.0,
///     reagents: ReagentSet::DNA_PEG,
///     dna_conc_um: Some(100.0),
///     ..Default::default()
/// };
/// assert!(!config.reagents.streptavidin);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    /// Coating thickness added to each side of the particle when computing the
    /// conjugated area, in nm.
    pub shell_thickness_nm: f64,

    /// Reagents to dose.
    pub reagents: ReagentSet,

    /// DNA stock concentration in µM, overriding the reagent parameters.
    pub dna_conc_um: Option<f64>,

    /// Custom reagent parameters in TOML format.
    ///
    /// If `None`, uses the embedded `default.reagents.toml`.
    pub params: Option<String>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            shell_thickness_nm: SPHERE_SHELL_NM,
            reagents: ReagentSet::FULL,
            dna_conc_um: None,
            params: None,
        }
    }
}

/// Selection of reagents dosed by a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReagentSet {
    pub dna: bool,
    pub peg: bool,
    pub streptavidin: bool,
    pub crosslinker: bool,
}

impl ReagentSet {
    /// Particle solution only.
    pub const PARTICLES_ONLY: Self = Self {
        dna: false,
        peg: false,
        streptavidin: false,
        crosslinker: false,
    };

    /// DNA grafting with PEG backfill.
    pub const DNA_PEG: Self = Self {
        dna: true,
        peg: true,
        streptavidin: false,
        crosslinker: false,
    };

    /// DNA, PEG, streptavidin, and crosslinker.
    pub const FULL: Self = Self {
        dna: true,
        peg: true,
        streptavidin: true,
        crosslinker: true,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::PARTICLES_ONLY
    }
}

impl Default for ReagentSet {
    fn default() -> Self {
        Self::FULL
    }
}
