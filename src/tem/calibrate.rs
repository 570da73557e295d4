use log::{debug, warn};

use super::error::Error;
use crate::model::tem::{CalibratedRow, RawRow};

/// Fails unless image identifiers and scale values occur equally often.
pub fn check_schema(rows: &[RawRow]) -> Result<(), Error> {
    let image_ids = rows.iter().filter(|r| r.image_id.is_some()).count();
    let scales = rows.iter().filter(|r| r.scale.is_some()).count();
    if image_ids != scales {
        return Err(Error::SchemaMismatch { image_ids, scales });
    }
    Ok(())
}

/// Annotates every row with the calibration factor in effect for it.
///
/// Scans the table once in order, carrying the factor of the most recent
/// calibration row. Rows before the first calibration row get no factor.
pub fn calibrate(rows: &[RawRow]) -> Result<Vec<CalibratedRow>, Error> {
    check_schema(rows)?;

    let mut current: Option<f64> = None;
    let mut calibrated = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let row_no = idx + 1;
        check_values(row, row_no)?;

        if row.is_calibration() {
            let factor = calibration_factor(row, row_no)?;
            debug!(
                "row {row_no}: calibration '{}' sets factor {factor} nm/px",
                row.image_id.as_deref().unwrap_or_default()
            );
            current = Some(factor);
        } else if row.scale.is_some() {
            warn!("row {row_no}: scale value without image identifier is ignored");
        } else if row.image_id.is_some() {
            warn!("row {row_no}: image identifier without scale value is treated as a measurement");
        }

        calibrated.push(CalibratedRow {
            raw: row.clone(),
            factor: current,
            size_nm: current.map(|f| row.pixel_length * f),
        });
    }

    Ok(calibrated)
}

/// Physical sizes of the measurement rows, in table order.
///
/// A measurement row without a factor is fatal.
pub fn measurement_sizes(rows: &[CalibratedRow]) -> Result<Vec<f64>, Error> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| r.raw.is_measurement())
        .map(|(idx, r)| r.size_nm.ok_or(Error::UndefinedCalibration { row: idx + 1 }))
        .collect()
}

fn calibration_factor(row: &RawRow, row_no: usize) -> Result<f64, Error> {
    let scale = row.scale.unwrap_or_default();
    if row.pixel_length == 0.0 {
        return Err(Error::DegenerateScaleBar { row: row_no });
    }
    Ok(scale / row.pixel_length)
}

fn check_values(row: &RawRow, row_no: usize) -> Result<(), Error> {
    if !row.pixel_length.is_finite() || row.pixel_length < 0.0 {
        return Err(Error::invalid_value(
            row_no,
            format!("pixel length {} is not a non-negative number", row.pixel_length),
        ));
    }
    if let Some(scale) = row.scale {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::invalid_value(
                row_no,
                format!("scale {scale} is not a positive number"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_check_counts_ids_and_scales() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow {
                pixel_length: 80.0,
                scale: None,
                image_id: Some("img2".into()),
            },
            RawRow::measurement(40.0),
        ];
        let err = check_schema(&rows).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch {
                image_ids: 2,
                scales: 1
            }
        ));
    }

    #[test]
    fn factor_is_forward_filled_until_next_calibration() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow::measurement(40.0),
            RawRow::measurement(20.0),
            RawRow::calibration(50.0, 100.0, "img2"),
            RawRow::measurement(10.0),
        ];
        let calibrated = calibrate(&rows).unwrap();
        let factors: Vec<_> = calibrated.iter().map(|r| r.factor).collect();
        assert_eq!(
            factors,
            vec![Some(0.5), Some(0.5), Some(0.5), Some(2.0), Some(2.0)]
        );
        let sizes: Vec<_> = calibrated.iter().map(|r| r.size_nm).collect();
        assert_eq!(
            sizes,
            vec![Some(50.0), Some(20.0), Some(10.0), Some(100.0), Some(20.0)]
        );
    }

    #[test]
    fn rows_before_first_calibration_have_no_factor() {
        let rows = vec![
            RawRow::measurement(40.0),
            RawRow::calibration(100.0, 50.0, "img1"),
        ];
        let calibrated = calibrate(&rows).unwrap();
        assert_eq!(calibrated[0].factor, None);
        assert_eq!(calibrated[0].size_nm, None);

        let err = measurement_sizes(&calibrated).unwrap_err();
        assert!(matches!(err, Error::UndefinedCalibration { row: 1 }));
    }

    #[test]
    fn zero_length_scale_bar_is_rejected() {
        let rows = vec![RawRow::calibration(0.0, 50.0, "img1")];
        let err = calibrate(&rows).unwrap_err();
        assert!(matches!(err, Error::DegenerateScaleBar { row: 1 }));
    }

    #[test]
    fn zero_length_measurement_has_zero_size() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow::measurement(0.0),
        ];
        let calibrated = calibrate(&rows).unwrap();
        assert_eq!(calibrated[1].size_nm, Some(0.0));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow::measurement(f64::NAN),
        ];
        assert!(matches!(
            calibrate(&rows).unwrap_err(),
            Error::InvalidValue { row: 2, .. }
        ));

        let rows = vec![RawRow::calibration(100.0, -5.0, "img1")];
        assert!(matches!(
            calibrate(&rows).unwrap_err(),
            Error::InvalidValue { row: 1, .. }
        ));
    }

    #[test]
    fn measurement_sizes_skip_rows_with_scale() {
        let rows = vec![
            RawRow::calibration(100.0, 50.0, "img1"),
            RawRow::measurement(40.0),
            RawRow::measurement(20.0),
        ];
        let sizes = measurement_sizes(&calibrate(&rows).unwrap()).unwrap();
        assert_eq!(sizes, vec![20.0, 10.0]);
    }
}
