use std::f64::consts::PI;

use super::params::{CrosslinkerParams, DnaParams, PegParams, StreptavidinParams};

/// Avogadro constant in mol⁻¹ (exact SI value).
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Square centimetres per square nanometre.
pub const CM2_PER_NM2: f64 = 1e-14;

/// Square nanometres per square centimetre.
pub const NM2_PER_CM2: f64 = 1e14;

/// Microlitres per litre.
pub const UL_PER_L: f64 = 1e6;

/// DNA stock concentration assumed when none is given, in µM.
pub const DEFAULT_DNA_CONC_UM: f64 = 10.0;

/// Surface area of a sphere of diameter `diameter_nm`, in cm².
pub fn sphere_area(diameter_nm: f64) -> f64 {
    PI * (diameter_nm * diameter_nm) * CM2_PER_NM2
}

/// Surface area of a hemispherically capped rod, in cm².
///
/// The two caps together form one sphere of diameter `width_nm`; the
/// cylindrical side spans `length_nm - width_nm`.
pub fn rod_area(length_nm: f64, width_nm: f64) -> f64 {
    let caps_area = PI * (width_nm * width_nm) * CM2_PER_NM2;
    let side_area = PI * width_nm * (length_nm - width_nm) * CM2_PER_NM2;
    side_area + caps_area
}

/// Number of particles whose combined surface equals `target_area_cm2`.
pub fn particle_count(area_cm2: f64, target_area_cm2: f64) -> f64 {
    target_area_cm2 / area_cm2
}

/// Moles corresponding to `count` entities.
pub fn molar_amount(count: f64) -> f64 {
    count / AVOGADRO
}

/// Volume in µL of an nM stock holding `moles`.
pub fn solution_volume(concentration_nm: f64, moles: f64) -> f64 {
    (moles / (concentration_nm * 1e-9)) * UL_PER_L
}

/// Volume in µL of DNA stock covering `area_cm2` at one strand per 7 nm².
pub fn dna_volume(area_cm2: f64, dna_conc_um: f64) -> f64 {
    DnaParams {
        stock_conc_um: dna_conc_um,
        ..DnaParams::default()
    }
    .volume_ul(area_cm2)
}

/// Volume in µL of 5 g/L PEG5k stock covering `area_cm2` at 10 strands per nm².
pub fn peg_volume(area_cm2: f64) -> f64 {
    PegParams::default().volume_ul(area_cm2)
}

/// Streptavidin tetramers filling the conjugated surface of `particle_count` particles.
pub fn streptavidin_count(conj_area_cm2: f64, particle_count: f64) -> f64 {
    StreptavidinParams::default().count(conj_area_cm2, particle_count)
}

/// Volume in µL of 5 g/L streptavidin stock (55 kDa).
pub fn streptavidin_volume(conj_area_cm2: f64, particle_count: f64) -> f64 {
    StreptavidinParams::default().volume_ul(conj_area_cm2, particle_count)
}

/// Volume in µL of 5 g/L crosslinker stock (574 g/mol), 16 amines per tetramer.
pub fn crosslinker_volume(conj_area_cm2: f64, particle_count: f64) -> f64 {
    CrosslinkerParams::default().volume_ul(
        &StreptavidinParams::default(),
        conj_area_cm2,
        particle_count,
    )
}

/// Volume in µL of a g/L stock holding `molecules` of a species of molar mass
/// `molar_mass_g_per_mol`.
pub(crate) fn mass_stock_volume(
    molecules: f64,
    molar_mass_g_per_mol: f64,
    stock_g_per_l: f64,
) -> f64 {
    (molecules / AVOGADRO) * (molar_mass_g_per_mol / stock_g_per_l) * UL_PER_L
}
