use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};

use colloid_forge::io::{read_table, write_data, write_measurements, write_summary};
use colloid_forge::tem::histogram;
use colloid_forge::{Parameter, RawRow, TemReport, reduce};

use crate::cli::TemArgs;
use crate::config::build_tem_config;
use crate::display::{Context as DisplayContext, Progress, print_histogram, print_tem_report};
use crate::io::{create_output, input_path, open_input, stdin_is_tty};
use crate::util::path::with_suffix;

const TOTAL_STEPS: u8 = 3;

const MEASUREMENTS_SUFFIX: &str = "_measurements";
const DATA_SUFFIX: &str = "_data";

pub fn run_tem(args: TemArgs, ctx: DisplayContext) -> Result<()> {
    let source = input_path(&args.input);
    if source.is_none() && stdin_is_tty() {
        bail!(
            "Input '-' selects stdin, but stdin is a terminal.\n\nUsage: cforge tem <FILE> or pipe a table with 'cforge tem -'."
        );
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading measurements");
    let rows = read_rows(source)?;
    progress.complete_step("Reading measurements", &read_details(source, &rows));

    progress.step("Calibrating and pairing");
    let config = build_tem_config(&args);
    let report = reduce(&rows, &config).context("TEM reduction failed")?;
    progress.complete_step("Calibrating and pairing", &reduce_details(&report));

    progress.step("Writing results");
    let written = write_results(&report, args.output.as_deref())?;
    progress.complete_step("Writing results", &written);

    progress.finish();

    let mut err = io::stderr().lock();
    if ctx.interactive {
        print_tem_report(&mut err, &report);
    }
    if args.histogram {
        for parameter in Parameter::ALL {
            let bins = histogram(&report.values(parameter), usize::from(args.bins));
            print_histogram(&mut err, parameter, &bins);
        }
    }

    Ok(())
}

fn read_rows(source: Option<&Path>) -> Result<Vec<RawRow>> {
    let input = open_input(source)?;
    read_table(input).with_context(|| match source {
        Some(p) => format!("Failed to read measurement table: {}", p.display()),
        None => "Failed to read measurement table from stdin".to_string(),
    })
}

fn write_results(report: &TemReport, output: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = output else {
        write_summary(create_output(None)?, &report.summary)
            .context("Failed to write summary to stdout")?;
        return Ok(vec!["Summary → stdout".to_string()]);
    };

    let measurements_path = with_suffix(path, MEASUREMENTS_SUFFIX);
    let data_path = with_suffix(path, DATA_SUFFIX);

    write_summary(create_output(Some(path))?, &report.summary)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    write_measurements(
        create_output(Some(&measurements_path))?,
        &report.measurements,
    )
    .with_context(|| {
        format!(
            "Failed to write measurements: {}",
            measurements_path.display()
        )
    })?;
    write_data(create_output(Some(&data_path))?, &report.rows)
        .with_context(|| format!("Failed to write calibrated rows: {}", data_path.display()))?;

    Ok(vec![
        format!("Summary → {}", file_name(path)),
        format!("Measurements → {}", file_name(&measurements_path)),
        format!("Calibrated rows → {}", file_name(&data_path)),
    ])
}

fn read_details(source: Option<&Path>, rows: &[RawRow]) -> Vec<String> {
    let origin = source.map(file_name).unwrap_or_else(|| "stdin".to_string());
    let scale_bars = rows.iter().filter(|r| r.is_calibration()).count();
    vec![
        format!("Parse {} ({} rows)", origin, rows.len()),
        format!("{} scale bar rows", scale_bars),
    ]
}

fn reduce_details(report: &TemReport) -> Vec<String> {
    let measured = report
        .rows
        .iter()
        .filter(|r| r.raw.is_measurement())
        .count();
    vec![
        format!("Convert {} measurements to nm", measured),
        format!("Pair into {} particles", report.measurements.len()),
        "Summarize length, width, aspect ratio".to_string(),
    ]
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
