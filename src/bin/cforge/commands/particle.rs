use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;

use colloid_forge::stoich::{ROD_SHELL_NM, SPHERE_SHELL_NM};
use colloid_forge::{ConjugationInput, Geometry, plan};

use crate::cli::{ConjugationOptions, ReportOptions, RodArgs, SphereArgs};
use crate::config::build_calc_config;
use crate::display::{Context as DisplayContext, print_plan, print_plan_plain};
use crate::util::convert::reagent_preset_name;

pub fn run_sphere(args: SphereArgs, _ctx: DisplayContext) -> Result<()> {
    let input = ConjugationInput::new(
        Geometry::sphere(args.diameter),
        args.concentration,
        args.target_area,
    );
    run_plan(
        &input,
        &args.conjugation,
        args.dna_conc,
        SPHERE_SHELL_NM,
        &args.report,
    )
}

pub fn run_rod(args: RodArgs, _ctx: DisplayContext) -> Result<()> {
    let input = ConjugationInput::new(
        Geometry::rod(args.length, args.width),
        args.concentration,
        args.target_area,
    );
    run_plan(
        &input,
        &args.conjugation,
        args.dna_conc,
        ROD_SHELL_NM,
        &args.report,
    )
}

fn run_plan(
    input: &ConjugationInput,
    opts: &ConjugationOptions,
    dna_conc: Option<f64>,
    default_shell_nm: f64,
    report: &ReportOptions,
) -> Result<()> {
    let config = build_calc_config(opts, dna_conc, default_shell_nm)?;

    info!(
        "planning {} with {}",
        input.geometry,
        reagent_preset_name(opts.reagents)
    );

    let plan = plan(input, &config).context("Conjugation calculation failed")?;

    let mut out = io::stdout().lock();
    if report.quiet {
        print_plan_plain(&mut out, &plan);
    } else {
        print_plan(&mut out, &plan, report.verbose);
    }
    out.flush().context("Failed to write report")?;

    Ok(())
}
