mod config;
mod error;
mod formulas;
mod params;

pub use config::{CalcConfig, ROD_SHELL_NM, ReagentSet, SPHERE_SHELL_NM};
pub use error::Error;
pub use formulas::{
    AVOGADRO, CM2_PER_NM2, DEFAULT_DNA_CONC_UM, NM2_PER_CM2, UL_PER_L, crosslinker_volume,
    dna_volume, molar_amount, particle_count, peg_volume, rod_area, solution_volume, sphere_area,
    streptavidin_count, streptavidin_volume,
};
pub use params::{
    CrosslinkerParams, DnaParams, PegParams, ReagentParams, StreptavidinParams,
    get_default_reagent_params, load_reagent_params,
};

use log::debug;

use crate::model::plan::{ConjugationInput, ConjugationPlan, ReagentDose, Stock};
pub(crate) use error::ensure_positive;

/// Computes particle and reagent amounts for one conjugation.
///
/// DNA and PEG are dosed on the target area; streptavidin and crosslinker on
/// the conjugated area of every particle. Reagents not selected in
/// [`CalcConfig::reagents`] are `None` in the returned plan.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for non-positive or non-finite inputs,
/// [`Error::InvalidGeometry`] for a rod shorter than its width, and the
/// parameter errors of [`load_reagent_params`].
pub fn plan(input: &ConjugationInput, config: &CalcConfig) -> Result<ConjugationPlan, Error> {
    validate(input, config)?;

    let mut params = load_reagent_params(config.params.as_deref())?;
    if let Some(conc) = config.dna_conc_um {
        params.dna.stock_conc_um = ensure_positive("DNA concentration", conc)?;
    }

    let particle_area = input.geometry.area_cm2();
    let conjugated_area = input
        .geometry
        .with_shell(config.shell_thickness_nm)
        .area_cm2();

    let count = particle_count(particle_area, input.target_area_cm2);
    let moles = molar_amount(count);
    let particle_volume = solution_volume(input.concentration_nm, moles);

    debug!(
        "planned {} particles: area={:e} cm2 conj_area={:e} cm2 count={:e} volume={:.3} uL",
        input.geometry.kind(),
        particle_area,
        conjugated_area,
        count,
        particle_volume
    );

    let reagents = config.reagents;
    let target = input.target_area_cm2;

    let dna = reagents.dna.then(|| ReagentDose {
        molecules: params.dna.strands(target),
        volume_ul: params.dna.volume_ul(target),
        excess: params.dna.excess,
        stock: Stock::Micromolar(params.dna.stock_conc_um),
    });

    let peg = reagents.peg.then(|| ReagentDose {
        molecules: params.peg.strands(target),
        volume_ul: params.peg.volume_ul(target),
        excess: params.peg.excess,
        stock: Stock::GramsPerLitre(params.peg.stock_g_per_l),
    });

    let sa = &params.streptavidin;
    let streptavidin = reagents.streptavidin.then(|| ReagentDose {
        molecules: sa.count(conjugated_area, count),
        volume_ul: sa.volume_ul(conjugated_area, count),
        excess: sa.excess,
        stock: Stock::GramsPerLitre(sa.stock_g_per_l),
    });

    let xl = &params.crosslinker;
    let crosslinker = reagents.crosslinker.then(|| ReagentDose {
        molecules: xl.count(sa, conjugated_area, count),
        volume_ul: xl.volume_ul(sa, conjugated_area, count),
        excess: xl.excess,
        stock: Stock::GramsPerLitre(xl.stock_g_per_l),
    });

    Ok(ConjugationPlan {
        input: *input,
        shell_thickness_nm: config.shell_thickness_nm,
        particle_area_cm2: particle_area,
        conjugated_area_cm2: conjugated_area,
        particle_count: count,
        particle_moles: moles,
        particle_volume_ul: particle_volume,
        dna,
        peg,
        streptavidin,
        crosslinker,
    })
}

fn validate(input: &ConjugationInput, config: &CalcConfig) -> Result<(), Error> {
    input.geometry.validate()?;
    ensure_positive("concentration", input.concentration_nm)?;
    ensure_positive("target area", input.target_area_cm2)?;

    let shell = config.shell_thickness_nm;
    if !(shell.is_finite() && shell >= 0.0) {
        return Err(Error::invalid_input("shell thickness", shell));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::Geometry;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            ((actual - expected) / expected).abs() < 1e-12,
            "expected {expected:e}, got {actual:e}"
        );
    }

    fn sphere_input() -> ConjugationInput {
        ConjugationInput::new(Geometry::sphere(10.0), 10.0, 1.0)
    }

    #[test]
    fn sphere_plan_matches_free_functions() {
        let plan = plan(&sphere_input(), &CalcConfig::default()).unwrap();

        let area = sphere_area(10.0);
        let conj = sphere_area(30.0);
        let count = particle_count(area, 1.0);

        assert_eq!(plan.particle_area_cm2, area);
        assert_eq!(plan.conjugated_area_cm2, conj);
        assert_eq!(plan.particle_count, count);
        assert_eq!(plan.particle_volume_ul, solution_volume(10.0, molar_amount(count)));

        assert_close(plan.dna.unwrap().volume_ul, dna_volume(1.0, DEFAULT_DNA_CONC_UM));
        assert_close(plan.peg.unwrap().volume_ul, peg_volume(1.0));
        assert_close(
            plan.streptavidin.unwrap().volume_ul,
            streptavidin_volume(conj, count),
        );
        assert_close(
            plan.crosslinker.unwrap().volume_ul,
            crosslinker_volume(conj, count),
        );
        assert_close(
            plan.streptavidin.unwrap().molecules,
            streptavidin_count(conj, count),
        );
    }

    #[test]
    fn default_excess_multipliers_apply_to_dosed_volumes() {
        let plan = plan(&sphere_input(), &CalcConfig::default()).unwrap();
        let dna = plan.dna.unwrap();
        assert_eq!(dna.excess, 1.6);
        assert_eq!(dna.dosed_volume_ul(), dna.volume_ul * 1.6);
        assert_eq!(plan.streptavidin.unwrap().excess, 30.0);
        assert_eq!(plan.crosslinker.unwrap().excess, 125.0);
        assert_eq!(plan.peg.unwrap().excess, 1.0);
    }

    #[test]
    fn rod_plan_uses_caller_supplied_shell() {
        let input = ConjugationInput::new(Geometry::rod(40.0, 10.0), 1.0, 2.0);
        let config = CalcConfig {
            shell_thickness_nm: ROD_SHELL_NM,
            ..Default::default()
        };
        let plan = plan(&input, &config).unwrap();
        assert_eq!(plan.particle_area_cm2, rod_area(40.0, 10.0));
        assert_eq!(plan.conjugated_area_cm2, rod_area(56.0, 26.0));
        assert_eq!(plan.shell_thickness_nm, 8.0);
    }

    #[test]
    fn reagent_set_selects_doses() {
        let config = CalcConfig {
            reagents: ReagentSet::DNA_PEG,
            ..Default::default()
        };
        let dna_peg = plan(&sphere_input(), &config).unwrap();
        assert!(dna_peg.dna.is_some());
        assert!(dna_peg.peg.is_some());
        assert!(dna_peg.streptavidin.is_none());
        assert!(dna_peg.crosslinker.is_none());

        let config = CalcConfig {
            reagents: ReagentSet::PARTICLES_ONLY,
            ..Default::default()
        };
        let bare = plan(&sphere_input(), &config).unwrap();
        assert_eq!(bare.doses().count(), 0);
        assert!(bare.particle_volume_ul > 0.0);
    }

    #[test]
    fn dna_concentration_override_scales_volume() {
        let base = plan(&sphere_input(), &CalcConfig::default()).unwrap();
        let config = CalcConfig {
            dna_conc_um: Some(100.0),
            ..Default::default()
        };
        let diluted = plan(&sphere_input(), &config).unwrap();
        let dna = diluted.dna.unwrap();
        assert_eq!(dna.stock, Stock::Micromolar(100.0));
        assert_close(dna.volume_ul, base.dna.unwrap().volume_ul / 10.0);
    }

    #[test]
    fn custom_params_feed_the_plan() {
        let config = CalcConfig {
            params: Some("[peg]\nstock_g_per_l = 10.0\n".to_string()),
            ..Default::default()
        };
        let plan = plan(&sphere_input(), &config).unwrap();
        assert_close(plan.peg.unwrap().volume_ul, peg_volume(1.0) / 2.0);
    }

    #[test]
    fn doubling_target_area_doubles_particle_outputs() {
        let single = plan(&sphere_input(), &CalcConfig::default()).unwrap();
        let input = ConjugationInput {
            target_area_cm2: 2.0,
            ..sphere_input()
        };
        let double = plan(&input, &CalcConfig::default()).unwrap();
        assert_eq!(double.particle_count, 2.0 * single.particle_count);
        assert_eq!(double.particle_moles, 2.0 * single.particle_moles);
        assert_eq!(double.particle_volume_ul, 2.0 * single.particle_volume_ul);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let bad_inputs = [
            ConjugationInput::new(Geometry::sphere(0.0), 10.0, 1.0),
            ConjugationInput::new(Geometry::sphere(10.0), -1.0, 1.0),
            ConjugationInput::new(Geometry::sphere(10.0), 10.0, 0.0),
            ConjugationInput::new(Geometry::rod(40.0, f64::NAN), 10.0, 1.0),
        ];
        for input in bad_inputs {
            let err = plan(&input, &CalcConfig::default()).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { .. }), "{err}");
        }
    }

    #[test]
    fn rejects_rod_shorter_than_wide() {
        let input = ConjugationInput::new(Geometry::rod(10.0, 40.0), 10.0, 1.0);
        let err = plan(&input, &CalcConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { .. }));
    }

    #[test]
    fn rejects_negative_shell_and_bad_dna_override() {
        let config = CalcConfig {
            shell_thickness_nm: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            plan(&sphere_input(), &config),
            Err(Error::InvalidInput {
                parameter: "shell thickness",
                ..
            })
        ));

        let config = CalcConfig {
            dna_conc_um: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            plan(&sphere_input(), &config),
            Err(Error::InvalidInput {
                parameter: "DNA concentration",
                ..
            })
        ));
    }

    #[test]
    fn zero_shell_keeps_bare_area() {
        let config = CalcConfig {
            shell_thickness_nm: 0.0,
            ..Default::default()
        };
        let plan = plan(&sphere_input(), &config).unwrap();
        assert_eq!(plan.conjugated_area_cm2, plan.particle_area_cm2);
    }

    #[test]
    fn dna_peg_rod_takes_dna_excess_from_params() {
        let input = ConjugationInput::new(Geometry::rod(40.0, 10.0), 1.0, 2.0);
        let config = CalcConfig {
            shell_thickness_nm: ROD_SHELL_NM,
            reagents: ReagentSet::DNA_PEG,
            ..Default::default()
        };
        let default_dna = plan(&input, &config).unwrap().dna.unwrap();
        assert_eq!(default_dna.excess, 1.6);

        let tenfold = CalcConfig {
            params: Some("[dna]\nexcess = 10.0\n".to_string()),
            ..config
        };
        let dna = plan(&input, &tenfold).unwrap().dna.unwrap();
        assert_eq!(dna.excess, 10.0);
        assert_eq!(dna.volume_ul, default_dna.volume_ul);
        assert_close(dna.dosed_volume_ul(), dna.volume_ul * 10.0);
    }
}
