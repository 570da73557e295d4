use std::fs;

use anyhow::{Context, Result};

use colloid_forge::CalcConfig;

use crate::cli::ConjugationOptions;

/// Builds a calculation config, reading `--params` from disk when given.
///
/// `default_shell_nm` applies when `--shell` is absent.
pub fn build_calc_config(
    opts: &ConjugationOptions,
    dna_conc: Option<f64>,
    default_shell_nm: f64,
) -> Result<CalcConfig> {
    let params = opts
        .params
        .as_ref()
        .map(|p| {
            fs::read_to_string(p)
                .with_context(|| format!("Failed to read reagent parameters: {}", p.display()))
        })
        .transpose()?;

    Ok(CalcConfig {
        shell_thickness_nm: opts.shell.unwrap_or(default_shell_nm),
        reagents: opts.reagents.into(),
        dna_conc_um: dna_conc,
        params,
    })
}
