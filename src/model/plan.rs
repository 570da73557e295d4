use std::fmt;

use super::geometry::Geometry;

/// Inputs for a conjugation calculation, checked by [`plan`](crate::plan).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjugationInput {
    /// Bare particle geometry.
    pub geometry: Geometry,
    /// Particle stock concentration in nM.
    pub concentration_nm: f64,
    /// Total colloidal surface to functionalize, in cm².
    pub target_area_cm2: f64,
}

impl ConjugationInput {
    pub fn new(geometry: Geometry, concentration_nm: f64, target_area_cm2: f64) -> Self {
        Self {
            geometry,
            concentration_nm,
            target_area_cm2,
        }
    }
}

/// Concentration of a reagent stock solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stock {
    /// Molar stock in µM (DNA).
    Micromolar(f64),
    /// Mass stock in g/L (polymers and proteins).
    GramsPerLitre(f64),
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stock::Micromolar(c) => write!(f, "{c} µM"),
            Stock::GramsPerLitre(c) => write!(f, "{c} g/L"),
        }
    }
}

/// Amount of one reagent to add to the particle solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReagentDose {
    /// Number of molecules required at the modelled surface density.
    pub molecules: f64,
    /// Stoichiometric stock volume in µL.
    pub volume_ul: f64,
    /// Multiplier applied on top of the stoichiometric volume.
    pub excess: f64,
    /// Stock the volume refers to.
    pub stock: Stock,
}

impl ReagentDose {
    /// Volume to pipette, including excess, in µL.
    #[inline]
    pub fn dosed_volume_ul(&self) -> f64 {
        self.volume_ul * self.excess
    }
}

/// Complete result of a conjugation calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConjugationPlan {
    pub input: ConjugationInput,
    /// Coating shell thickness per side used for the conjugated geometry, in nm.
    pub shell_thickness_nm: f64,
    /// Bare surface area of one particle in cm².
    pub particle_area_cm2: f64,
    /// Surface area of one particle after adding the coating shell, in cm².
    pub conjugated_area_cm2: f64,
    pub particle_count: f64,
    pub particle_moles: f64,
    /// Volume of particle stock to use, in µL.
    pub particle_volume_ul: f64,
    pub dna: Option<ReagentDose>,
    pub peg: Option<ReagentDose>,
    pub streptavidin: Option<ReagentDose>,
    pub crosslinker: Option<ReagentDose>,
}

impl ConjugationPlan {
    /// Iterates the dosed reagents with their display names, in pipetting order.
    pub fn doses(&self) -> impl Iterator<Item = (&'static str, &ReagentDose)> {
        [
            ("DNA", self.dna.as_ref()),
            ("PEG", self.peg.as_ref()),
            ("Streptavidin", self.streptavidin.as_ref()),
            ("Crosslinker", self.crosslinker.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, dose)| dose.map(|d| (name, d)))
    }
}
