use std::io::Write;

use colloid_forge::{ConjugationPlan, HistogramBin, Parameter, TemReport};

use crate::util::format::{fixed, sci, volume_ul};
use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_BAR_WIDTH: usize = 20;

const EXCESS_NOTE: &str = "Volumes under \"Add\" include the excess factor.";

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    name: &'static str,
    width: usize,
    align: Align,
}

impl Column {
    const fn left(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            align: Align::Left,
        }
    }

    const fn right(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            align: Align::Right,
        }
    }

    fn cell(&self, text: &str) -> String {
        let text = truncate(text, self.width);
        match self.align {
            Align::Left => format!("{:<w$}", text, w = self.width),
            Align::Right => format!("{:>w$}", text, w = self.width),
        }
    }
}

fn print_grid(out: &mut impl Write, title: &str, columns: &[Column], rows: &[Vec<String>]) {
    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = columns.iter().map(|c| "─".repeat(c.width + 2)).collect();
        format!("{INDENT}{left}{}{right}", segments.join(mid))
    };
    let line = |cells: Vec<String>| format!("{INDENT}│ {} │", cells.join(" │ "));

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{}",
        line(columns.iter().map(|c| c.cell(c.name)).collect())
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));
    for row in rows {
        let cells = columns
            .iter()
            .zip(row)
            .map(|(c, text)| c.cell(text))
            .collect();
        let _ = writeln!(out, "{}", line(cells));
    }
    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 7;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let columns = [Column::left("Metric", key_w), Column::right("Value", val_w)];
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|(key, val)| vec![key.to_string(), val.clone()])
        .collect();
    print_grid(out, title, &columns, &rows);
}

/// Prints the particle solution and reagent tables of a plan.
pub fn print_plan(out: &mut impl Write, plan: &ConjugationPlan, verbose: bool) {
    let mut rows = vec![
        ("Geometry", plan.input.geometry.to_string()),
        ("Stock", format!("{} nM", plan.input.concentration_nm)),
        ("Target area", format!("{} cm²", plan.input.target_area_cm2)),
    ];
    if verbose {
        rows.extend([
            ("Shell", format!("{:.1} nm/side", plan.shell_thickness_nm)),
            ("Particle area", format!("{} cm²", sci(plan.particle_area_cm2))),
            ("Conjugated area", format!("{} cm²", sci(plan.conjugated_area_cm2))),
            ("Particles", sci(plan.particle_count)),
            ("Amount", format!("{} mol", sci(plan.particle_moles))),
        ]);
    }
    rows.push(("Add", volume_ul(plan.particle_volume_ul)));

    print_kv_table(out, "Particle Solution", &rows);

    if plan.doses().next().is_none() {
        return;
    }

    if verbose {
        let columns = [
            Column::left("Reagent", 12),
            Column::right("Molecules", 9),
            Column::right("Stoich.", 11),
            Column::right("Excess", 6),
            Column::right("Add", 11),
        ];
        let rows: Vec<Vec<String>> = plan
            .doses()
            .map(|(name, dose)| {
                vec![
                    name.to_string(),
                    sci(dose.molecules),
                    volume_ul(dose.volume_ul),
                    format!("×{}", dose.excess),
                    volume_ul(dose.dosed_volume_ul()),
                ]
            })
            .collect();
        print_grid(out, "Reagents", &columns, &rows);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}{}", INDENT, EXCESS_NOTE);
    } else {
        let columns = [
            Column::left("Reagent", 14),
            Column::right("Stock", 12),
            Column::right("Add", 20),
        ];
        let rows: Vec<Vec<String>> = plan
            .doses()
            .map(|(name, dose)| {
                vec![
                    name.to_string(),
                    dose.stock.to_string(),
                    volume_ul(dose.dosed_volume_ul()),
                ]
            })
            .collect();
        print_grid(out, "Reagents", &columns, &rows);
    }
}

/// Prints one `name<TAB>µL` line per volume to add, particles first.
pub fn print_plan_plain(out: &mut impl Write, plan: &ConjugationPlan) {
    let _ = writeln!(out, "Particles\t{}", plan.particle_volume_ul);
    for (name, dose) in plan.doses() {
        let _ = writeln!(out, "{}\t{}", name, dose.dosed_volume_ul());
    }
}

/// Prints the reduction overview and per-parameter statistics.
pub fn print_tem_report(out: &mut impl Write, report: &TemReport) {
    let rows = [
        ("Rows", report.rows.len().to_string()),
        ("Scale bars", report.calibration_count().to_string()),
        ("Particles", report.measurements.len().to_string()),
    ];
    print_kv_table(out, "TEM Table", &rows);

    let columns = [
        Column::left("Parameter", 17),
        Column::right("N", 5),
        Column::right("Mean", 10),
        Column::right("Std dev", 10),
    ];
    let rows: Vec<Vec<String>> = report
        .summary
        .iter()
        .map(|s| {
            vec![
                parameter_label(s.parameter),
                s.count.to_string(),
                fixed(s.mean, decimals(s.parameter)),
                fixed(s.std_dev, decimals(s.parameter)),
            ]
        })
        .collect();
    print_grid(out, "Size Distribution", &columns, &rows);
}

/// Prints a histogram of one parameter as a distribution table.
pub fn print_histogram(out: &mut impl Write, parameter: Parameter, bins: &[HistogramBin]) {
    let title = format!("Histogram: {}", parameter_label(parameter));
    if bins.is_empty() {
        print_kv_table(out, &title, &[("Observations", "0".to_string())]);
        return;
    }

    let range_w = 15usize;
    let count_w = 6usize;
    let sep_overhead = 10;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(range_w + count_w + sep_overhead);
    let bar_w = dist_w.saturating_sub(8).min(MAX_BAR_WIDTH);

    let total: usize = bins.iter().map(|b| b.count).sum();
    let d = decimals(parameter);

    let columns = [
        Column::left("Range", range_w),
        Column::right("Count", count_w),
        Column::left("Distribution", dist_w),
    ];
    let rows: Vec<Vec<String>> = bins
        .iter()
        .map(|bin| {
            let pct = bin.count as f64 / total as f64 * 100.0;
            vec![
                format!("{:.*}–{:.*}", d, bin.lower, d, bin.upper),
                bin.count.to_string(),
                format!("{}  {:>5.1}%", make_bar(pct, bar_w), pct),
            ]
        })
        .collect();
    print_grid(out, &title, &columns, &rows);
}

fn parameter_label(parameter: Parameter) -> String {
    match parameter.unit() {
        "" => parameter.to_string(),
        unit => format!("{} ({})", parameter, unit),
    }
}

fn decimals(parameter: Parameter) -> usize {
    match parameter {
        Parameter::Length | Parameter::Width => 1,
        Parameter::AspectRatio => 2,
    }
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloid_forge::{CalcConfig, ConjugationInput, Geometry, RawRow, TemConfig, plan, reduce};

    fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    fn sphere_plan() -> ConjugationPlan {
        let input = ConjugationInput::new(Geometry::sphere(10.0), 10.0, 1.0);
        plan(&input, &CalcConfig::default()).unwrap()
    }

    #[test]
    fn bar_is_proportional() {
        assert_eq!(make_bar(50.0, 4), "██░░");
        assert_eq!(make_bar(0.0, 3), "░░░");
    }

    #[test]
    fn grid_rows_share_one_width() {
        let text = render(|out| print_plan(out, &sphere_plan(), true));
        let tables: Vec<&str> = text.split("┌─ ").skip(1).collect();
        assert_eq!(tables.len(), 2);
        for table in tables {
            let widths: Vec<usize> = table
                .lines()
                .skip(1)
                .filter(|l| {
                    l.strip_prefix(INDENT)
                        .is_some_and(|rest| rest.starts_with(['┌', '│', '├', '└']))
                })
                .map(|l| l.chars().count())
                .collect();
            assert!(widths.len() >= 5);
            assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
        }
    }

    #[test]
    fn verbose_plan_carries_excess_note() {
        let verbose = render(|out| print_plan(out, &sphere_plan(), true));
        assert!(verbose.contains(EXCESS_NOTE));
        let brief = render(|out| print_plan(out, &sphere_plan(), false));
        assert!(!brief.contains(EXCESS_NOTE));
    }

    #[test]
    fn plan_table_lists_reagents_in_order() {
        let text = render(|out| print_plan(out, &sphere_plan(), false));
        let dna = text.find("DNA").unwrap();
        let peg = text.find("PEG").unwrap();
        let sa = text.find("Streptavidin").unwrap();
        assert!(dna < peg && peg < sa);
        assert!(text.contains("52.86 µL"));
    }

    #[test]
    fn plain_plan_is_tab_separated() {
        let text = render(|out| print_plan_plain(out, &sphere_plan()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Particles\t52.8"));
        assert!(lines[1].starts_with("DNA\t"));
    }

    #[test]
    fn tem_report_shows_absent_spread_as_dash() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow::measurement(40.0),
            RawRow::measurement(20.0),
        ];
        let report = reduce(&rows, &TemConfig::default()).unwrap();
        let text = render(|out| print_tem_report(out, &report));
        assert!(text.contains("length (nm)"));
        assert!(text.contains("aspectRatio"));
        assert!(text.contains("2.00"));
        assert!(text.contains("—"));
    }

    #[test]
    fn histogram_rows_show_ranges() {
        let bins = colloid_forge::tem::histogram(&[10.0, 20.0], 2);
        let text = render(|out| print_histogram(out, Parameter::Length, &bins));
        assert!(text.contains("10.0–15.0"));
        assert!(text.contains("50.0%"));
    }
}
