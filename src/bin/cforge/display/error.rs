use std::io::{self, Write};

use anyhow::Error;

use colloid_forge::io::{IMAGE_COLUMNS, PIXEL_LENGTH_COLUMNS, SCALE_COLUMNS};
use colloid_forge::{IoError, StoichError, TemError};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Hints for the first typed error in the chain, or text-based fallbacks.
fn collect_hints(err: &Error) -> Vec<String> {
    let mut hints = Vec::new();

    if let Some(e) = err.downcast_ref::<IoError>() {
        io_hints(e, &mut hints);
    } else if let Some(e) = err.downcast_ref::<StoichError>() {
        stoich_hints(e, &mut hints);
    } else if let Some(e) = err.downcast_ref::<TemError>() {
        tem_hints(e, &mut hints);
    } else if let Some(e) = err.downcast_ref::<io::Error>() {
        std_io_hints(e, &mut hints);
    } else {
        fallback_hints(err, &mut hints);
    }

    hints
}

fn io_hints(err: &IoError, hints: &mut Vec<String>) {
    match err {
        IoError::Io { source } => std_io_hints(source, hints),

        IoError::Parse {
            delimiter, line, ..
        } => {
            hints.push(format!(
                "Line {} of the {} table could not be read",
                line, delimiter
            ));
            hints.push("Numeric cells must use '.' as the decimal separator".into());
            hints.push("Quote image identifiers that contain the delimiter".into());
        }

        IoError::MissingColumn(name) => {
            let accepted = match *name {
                n if PIXEL_LENGTH_COLUMNS.contains(&n) => PIXEL_LENGTH_COLUMNS,
                n if SCALE_COLUMNS.contains(&n) => SCALE_COLUMNS,
                _ => IMAGE_COLUMNS,
            };
            hints.push(format!(
                "The header row needs one of: {}",
                accepted.join(", ")
            ));
            hints.push("Column names are matched case-insensitively".into());
        }

        IoError::EmptyInput => {
            hints.push("The table has no lines besides blanks".into());
            hints.push("Expected a header such as: img,scale,length".into());
        }
    }
}

fn stoich_hints(err: &StoichError, hints: &mut Vec<String>) {
    match err {
        StoichError::InvalidInput { parameter, .. } => {
            hints.push(format!("Check the {} argument", parameter));
            hints.push("Dimensions are in nm, concentrations in nM, areas in cm²".into());
        }

        StoichError::InvalidGeometry { .. } => {
            hints.push("Rod arguments are LENGTH then WIDTH".into());
            hints.push("For particles with aspect ratio 1, use 'cforge sphere'".into());
        }

        StoichError::ParameterParse(_) => {
            hints.push("Reagent parameter file has invalid TOML syntax".into());
            hints.push("Sections: [dna], [peg], [streptavidin], [crosslinker]".into());
        }

        StoichError::InvalidParameter { parameter, .. } => {
            hints.push(format!("Set '{}' to a positive number", parameter));
            hints.push("Omitted keys fall back to the built-in defaults".into());
        }
    }
}

fn tem_hints(err: &TemError, hints: &mut Vec<String>) {
    match err {
        TemError::EmptyTable => {
            hints.push("The table has a header but no measurement rows".into());
        }

        TemError::SchemaMismatch { .. } => {
            hints.push("Each scale bar row needs both an image id and a scale".into());
            hints.push("Particle rows leave both cells empty".into());
        }

        TemError::UndefinedCalibration { .. } => {
            hints.push("Every image must start with its scale bar row".into());
            hints.push("Move the scale bar above the first particle of the image".into());
        }

        TemError::DegenerateScaleBar { .. } => {
            hints.push("The scale bar row needs its pixel length, not zero".into());
        }

        TemError::InvalidValue { .. } => {
            hints.push("Pixel lengths must be finite and not negative".into());
            hints.push("Scale values must be finite and positive".into());
        }

        TemError::UnpairedMeasurement { .. } => {
            hints.push("Each particle needs a length row followed by a width row".into());
            hints.push("Drop --strict-pairing to keep the last length unpaired".into());
        }
    }
}

fn std_io_hints(source: &io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::NotFound => {
            hints.push("Check that the file path is correct".into());
        }

        ErrorKind::PermissionDenied => {
            hints.push("Check file permissions with `ls -la`".into());
        }

        ErrorKind::InvalidData => {
            hints.push("The file is not valid UTF-8 text".into());
            hints.push("Export the sheet as CSV (UTF-8) from your spreadsheet".into());
        }

        ErrorKind::BrokenPipe => {
            hints.push("Output consumer terminated before all results were written".into());
        }

        _ => {
            hints.push("Check file path, permissions, and disk space".into());
        }
    }
}

fn fallback_hints(err: &Error, hints: &mut Vec<String>) {
    let text = err
        .chain()
        .map(|c| c.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    if text.contains("stdin") || text.contains("terminal") {
        hints.push("Pass the table path, or pipe it with '-' as the path".into());
    }
}
