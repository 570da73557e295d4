use crate::model::tem::{HistogramBin, Measurement, Parameter, SummaryStats};

/// Summarizes every [`Parameter`] independently, in [`Parameter::ALL`] order.
pub fn summarize(measurements: &[Measurement]) -> Vec<SummaryStats> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let values: Vec<f64> = measurements
                .iter()
                .filter_map(|m| m.get(parameter))
                .collect();
            describe(parameter, &values)
        })
        .collect()
}

/// Mean, sample standard deviation, and count of `values`.
pub fn describe(parameter: Parameter, values: &[f64]) -> SummaryStats {
    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std_dev = match mean {
        Some(mean) if count >= 2 => {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sum_sq / (count - 1) as f64).sqrt())
        }
        _ => None,
    };

    SummaryStats {
        parameter,
        mean,
        std_dev,
        count,
    }
}

/// Counts `values` into `bins` equal-width bins spanning their range.
///
/// Returns no bins for empty input or `bins == 0`. Identical values fall
/// into a single zero-width bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = ((v - min) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_standard_deviation_uses_n_minus_one() {
        let stats = describe(Parameter::Length, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, Some(5.0));
        let expected = (32.0f64 / 7.0).sqrt();
        assert!((stats.std_dev.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn single_observation_has_undefined_spread() {
        let stats = describe(Parameter::Width, &[12.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, Some(12.0));
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn no_observation_has_undefined_mean() {
        let stats = describe(Parameter::AspectRatio, &[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn missing_values_only_drop_from_their_own_field() {
        let measurements = vec![
            Measurement::new(Some(20.0), Some(10.0)),
            Measurement::new(Some(30.0), None),
        ];
        let summary = summarize(&measurements);
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].parameter, Parameter::Length);
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[0].mean, Some(25.0));
        assert_eq!(summary[1].count, 1);
        assert_eq!(summary[1].std_dev, None);
        assert_eq!(summary[2].parameter, Parameter::AspectRatio);
        assert_eq!(summary[2].count, 1);
        assert_eq!(summary[2].mean, Some(2.0));
    }

    #[test]
    fn histogram_bins_cover_the_range() {
        let bins = histogram(&[10.0, 12.0, 15.0, 19.0, 20.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].lower, 10.0);
        assert_eq!(bins[0].upper, 15.0);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].upper, 20.0);
        assert_eq!(bins[1].count, 3);
    }

    #[test]
    fn histogram_of_identical_values_has_one_bin() {
        let bins = histogram(&[7.0, 7.0, 7.0], 10);
        assert_eq!(
            bins,
            vec![HistogramBin {
                lower: 7.0,
                upper: 7.0,
                count: 3
            }]
        );
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
    }
}
