use crate::io::error::Error;
use crate::model::tem::{CalibratedRow, Measurement, SummaryStats};
use std::io::Write;

/// Writes every input row with its calibration factor and physical size.
pub fn write_data<W: Write>(mut writer: W, rows: &[CalibratedRow]) -> Result<(), Error> {
    writeln!(writer, "img,scale,length,factor,size_nm")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{}",
            row.raw.image_id.as_deref().map(quote).unwrap_or_default(),
            cell(row.raw.scale),
            row.raw.pixel_length,
            cell(row.factor),
            cell(row.size_nm),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one row per particle.
pub fn write_measurements<W: Write>(mut writer: W, measurements: &[Measurement]) -> Result<(), Error> {
    writeln!(writer, "length_nm,width_nm,aspect_ratio")?;
    for m in measurements {
        writeln!(
            writer,
            "{},{},{}",
            cell(m.length_nm),
            cell(m.width_nm),
            cell(m.aspect_ratio),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one row per summarized parameter.
pub fn write_summary<W: Write>(mut writer: W, summary: &[SummaryStats]) -> Result<(), Error> {
    writeln!(writer, "parameter,mean,std_dev,n")?;
    for s in summary {
        writeln!(
            writer,
            "{},{},{},{}",
            s.parameter,
            cell(s.mean),
            cell(s.std_dev),
            s.count,
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn quote(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
