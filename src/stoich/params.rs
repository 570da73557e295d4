use super::error::Error;
use super::formulas::{AVOGADRO, CM2_PER_NM2, NM2_PER_CM2, UL_PER_L, mass_stock_volume};
use serde::Deserialize;
use std::f64::consts::PI;
use std::sync::OnceLock;

const DEFAULT_REAGENTS_TOML: &str = include_str!("../../resources/default.reagents.toml");

static DEFAULT_REAGENTS: OnceLock<ReagentParams> = OnceLock::new();

/// Surface-density and stock assumptions for every conjugation reagent.
///
/// Every section and key is optional when deserializing; omitted values keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ReagentParams {
    pub dna: DnaParams,
    pub peg: PegParams,
    pub streptavidin: StreptavidinParams,
    pub crosslinker: CrosslinkerParams,
}

/// Thiolated DNA grafted onto the particle surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DnaParams {
    /// Surface area per strand in nm².
    pub footprint_nm2: f64,
    /// Stock concentration in µM.
    pub stock_conc_um: f64,
    pub excess: f64,
}

impl Default for DnaParams {
    fn default() -> Self {
        Self {
            footprint_nm2: 7.0,
            stock_conc_um: 10.0,
            excess: 1.6,
        }
    }
}

impl DnaParams {
    pub fn strands(&self, area_cm2: f64) -> f64 {
        area_cm2 * NM2_PER_CM2 / self.footprint_nm2
    }

    pub fn volume_ul(&self, area_cm2: f64) -> f64 {
        ((self.strands(area_cm2) / AVOGADRO) / (self.stock_conc_um * 1e-6)) * UL_PER_L
    }
}

/// Thiol-PEG backfill.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PegParams {
    pub strands_per_nm2: f64,
    pub molar_mass_g_per_mol: f64,
    pub stock_g_per_l: f64,
    pub excess: f64,
}

impl Default for PegParams {
    fn default() -> Self {
        Self {
            strands_per_nm2: 10.0,
            molar_mass_g_per_mol: 5000.0,
            stock_g_per_l: 5.0,
            excess: 1.0,
        }
    }
}

impl PegParams {
    pub fn strands(&self, area_cm2: f64) -> f64 {
        area_cm2 * NM2_PER_CM2 * self.strands_per_nm2
    }

    pub fn volume_ul(&self, area_cm2: f64) -> f64 {
        mass_stock_volume(
            self.strands(area_cm2),
            self.molar_mass_g_per_mol,
            self.stock_g_per_l,
        )
    }
}

/// Streptavidin tetramers packed onto the conjugated surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreptavidinParams {
    /// The tetramer is treated as a sphere of this diameter; its footprint is
    /// the projected disc.
    pub hydrodynamic_diameter_nm: f64,
    pub molar_mass_g_per_mol: f64,
    pub stock_g_per_l: f64,
    pub excess: f64,
}

impl Default for StreptavidinParams {
    fn default() -> Self {
        Self {
            hydrodynamic_diameter_nm: 5.0,
            molar_mass_g_per_mol: 55000.0,
            stock_g_per_l: 5.0,
            excess: 30.0,
        }
    }
}

impl StreptavidinParams {
    /// Projected area of one tetramer in cm².
    pub fn footprint_cm2(&self) -> f64 {
        let radius = self.hydrodynamic_diameter_nm / 2.0;
        PI * (radius * radius) * CM2_PER_NM2
    }

    pub fn count(&self, conj_area_cm2: f64, particle_count: f64) -> f64 {
        let per_particle = conj_area_cm2 / self.footprint_cm2();
        per_particle * particle_count
    }

    pub fn volume_ul(&self, conj_area_cm2: f64, particle_count: f64) -> f64 {
        mass_stock_volume(
            self.count(conj_area_cm2, particle_count),
            self.molar_mass_g_per_mol,
            self.stock_g_per_l,
        )
    }
}

/// Amine-reactive crosslinker locking streptavidin in place.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrosslinkerParams {
    /// Reactive amine sites per streptavidin tetramer.
    pub sites_per_streptavidin: f64,
    pub molar_mass_g_per_mol: f64,
    pub stock_g_per_l: f64,
    pub excess: f64,
}

impl Default for CrosslinkerParams {
    fn default() -> Self {
        Self {
            sites_per_streptavidin: 16.0,
            molar_mass_g_per_mol: 574.0,
            stock_g_per_l: 5.0,
            excess: 125.0,
        }
    }
}

impl CrosslinkerParams {
    pub fn count(
        &self,
        streptavidin: &StreptavidinParams,
        conj_area_cm2: f64,
        particle_count: f64,
    ) -> f64 {
        streptavidin.count(conj_area_cm2, particle_count) * self.sites_per_streptavidin
    }

    pub fn volume_ul(
        &self,
        streptavidin: &StreptavidinParams,
        conj_area_cm2: f64,
        particle_count: f64,
    ) -> f64 {
        mass_stock_volume(
            self.count(streptavidin, conj_area_cm2, particle_count),
            self.molar_mass_g_per_mol,
            self.stock_g_per_l,
        )
    }
}

impl ReagentParams {
    /// Rejects any parameter that is not strictly positive and finite.
    pub fn validate(&self) -> Result<(), Error> {
        let checks = [
            ("dna.footprint_nm2", self.dna.footprint_nm2),
            ("dna.stock_conc_um", self.dna.stock_conc_um),
            ("dna.excess", self.dna.excess),
            ("peg.strands_per_nm2", self.peg.strands_per_nm2),
            ("peg.molar_mass_g_per_mol", self.peg.molar_mass_g_per_mol),
            ("peg.stock_g_per_l", self.peg.stock_g_per_l),
            ("peg.excess", self.peg.excess),
            (
                "streptavidin.hydrodynamic_diameter_nm",
                self.streptavidin.hydrodynamic_diameter_nm,
            ),
            (
                "streptavidin.molar_mass_g_per_mol",
                self.streptavidin.molar_mass_g_per_mol,
            ),
            ("streptavidin.stock_g_per_l", self.streptavidin.stock_g_per_l),
            ("streptavidin.excess", self.streptavidin.excess),
            (
                "crosslinker.sites_per_streptavidin",
                self.crosslinker.sites_per_streptavidin,
            ),
            (
                "crosslinker.molar_mass_g_per_mol",
                self.crosslinker.molar_mass_g_per_mol,
            ),
            ("crosslinker.stock_g_per_l", self.crosslinker.stock_g_per_l),
            ("crosslinker.excess", self.crosslinker.excess),
        ];

        for (parameter, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter { parameter, value });
            }
        }
        Ok(())
    }
}

pub fn load_reagent_params(custom_toml: Option<&str>) -> Result<ReagentParams, Error> {
    match custom_toml {
        Some(toml) => {
            let params: ReagentParams = toml::from_str(toml)?;
            params.validate()?;
            Ok(params)
        }
        None => Ok(get_default_reagent_params().clone()),
    }
}

pub fn get_default_reagent_params() -> &'static ReagentParams {
    DEFAULT_REAGENTS.get_or_init(|| {
        toml::from_str(DEFAULT_REAGENTS_TOML)
            .expect("Failed to parse embedded default reagent parameters. This is a library bug.")
    })
}
