use std::fmt;

/// One row of a raw TEM measurement table.
///
/// Calibration rows carry both an image identifier and a scale value: the
/// pixel length of the image's scale bar and the physical length it denotes.
/// Every other row is a particle dimension measured in pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// Measured length in pixels.
    pub pixel_length: f64,
    /// Physical length of the scale bar in nm (calibration rows only).
    pub scale: Option<f64>,
    /// Image identifier (calibration rows only). Only presence matters.
    pub image_id: Option<String>,
}

impl RawRow {
    /// A particle measurement row.
    pub fn measurement(pixel_length: f64) -> Self {
        Self {
            pixel_length,
            scale: None,
            image_id: None,
        }
    }

    /// A scale bar row anchoring the calibration of the rows that follow.
    pub fn calibration(pixel_length: f64, scale: f64, image_id: impl Into<String>) -> Self {
        Self {
            pixel_length,
            scale: Some(scale),
            image_id: Some(image_id.into()),
        }
    }

    /// Returns `true` when the row carries both an image identifier and a scale.
    #[inline]
    pub fn is_calibration(&self) -> bool {
        self.image_id.is_some() && self.scale.is_some()
    }

    /// Returns `true` when the row is kept as a particle dimension.
    #[inline]
    pub fn is_measurement(&self) -> bool {
        self.scale.is_none()
    }
}

/// A raw row annotated with its calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedRow {
    pub raw: RawRow,
    /// nm per pixel in effect for this row, if any calibration precedes it.
    pub factor: Option<f64>,
    /// Physical size in nm, if a factor is in effect.
    pub size_nm: Option<f64>,
}

/// One particle's physical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub length_nm: Option<f64>,
    pub width_nm: Option<f64>,
    pub aspect_ratio: Option<f64>,
}

impl Measurement {
    /// Builds a measurement, deriving the aspect ratio when it is defined.
    ///
    /// The ratio is absent if either side is missing or the width is zero.
    pub fn new(length_nm: Option<f64>, width_nm: Option<f64>) -> Self {
        let aspect_ratio = match (length_nm, width_nm) {
            (Some(l), Some(w)) if w != 0.0 => Some(l / w),
            _ => None,
        };
        Self {
            length_nm,
            width_nm,
            aspect_ratio,
        }
    }

    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Length => self.length_nm,
            Parameter::Width => self.width_nm,
            Parameter::AspectRatio => self.aspect_ratio,
        }
    }
}

/// A summarized measurement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Length,
    Width,
    AspectRatio,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::Length, Parameter::Width, Parameter::AspectRatio];

    /// Unit suffix for display, empty for dimensionless fields.
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Length | Parameter::Width => "nm",
            Parameter::AspectRatio => "",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Length => write!(f, "length"),
            Parameter::Width => write!(f, "width"),
            Parameter::AspectRatio => write!(f, "aspectRatio"),
        }
    }
}

/// Descriptive statistics of one measurement field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub parameter: Parameter,
    /// Arithmetic mean; absent when no observation exists.
    pub mean: Option<f64>,
    /// Sample standard deviation (N − 1); absent with fewer than two observations.
    pub std_dev: Option<f64>,
    /// Number of present observations.
    pub count: usize,
}

/// One bin of a value histogram, covering `lower..upper`.
///
/// The last bin of a histogram also includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Full output of a TEM reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct TemReport {
    /// Every input row with its factor and size.
    pub rows: Vec<CalibratedRow>,
    /// One entry per particle.
    pub measurements: Vec<Measurement>,
    /// One entry per [`Parameter`], in [`Parameter::ALL`] order.
    pub summary: Vec<SummaryStats>,
}

impl TemReport {
    pub fn stats(&self, parameter: Parameter) -> Option<&SummaryStats> {
        self.summary.iter().find(|s| s.parameter == parameter)
    }

    /// Present values of one field across all particles.
    pub fn values(&self, parameter: Parameter) -> Vec<f64> {
        self.measurements
            .iter()
            .filter_map(|m| m.get(parameter))
            .collect()
    }

    pub fn calibration_count(&self) -> usize {
        self.rows.iter().filter(|r| r.raw.is_calibration()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_roles_follow_presence_of_fields() {
        let cal = RawRow::calibration(100.0, 50.0, "img1");
        assert!(cal.is_calibration());
        assert!(!cal.is_measurement());

        let m = RawRow::measurement(40.0);
        assert!(!m.is_calibration());
        assert!(m.is_measurement());

        let orphan_scale = RawRow {
            pixel_length: 10.0,
            scale: Some(5.0),
            image_id: None,
        };
        assert!(!orphan_scale.is_calibration());
        assert!(!orphan_scale.is_measurement());
    }

    #[test]
    fn aspect_ratio_needs_both_sides() {
        assert_eq!(Measurement::new(Some(20.0), Some(10.0)).aspect_ratio, Some(2.0));
        assert_eq!(Measurement::new(Some(20.0), None).aspect_ratio, None);
        assert_eq!(Measurement::new(None, Some(10.0)).aspect_ratio, None);
    }

    #[test]
    fn aspect_ratio_over_zero_width_is_absent() {
        let m = Measurement::new(Some(20.0), Some(0.0));
        assert_eq!(m.width_nm, Some(0.0));
        assert_eq!(m.aspect_ratio, None);
    }

    #[test]
    fn parameter_names_match_report_rows() {
        let names: Vec<_> = Parameter::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["length", "width", "aspectRatio"]);
    }
}
