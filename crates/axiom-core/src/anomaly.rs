//! Z-score anomaly detection over a materialized series.

use serde::{Deserialize, Serialize};

use crate::{HistoryPoint, MacroIndicator, Quote, ValidationError};

/// Default `|z|` cut-off for [`detect_anomalies`].
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Numeric projection of a series point. `None` points are scored 0 and do not
/// contribute to the mean or deviation.
pub trait SeriesValue {
    fn series_value(&self) -> Option<f64>;
}

impl SeriesValue for f64 {
    fn series_value(&self) -> Option<f64> {
        Some(*self)
    }
}

impl SeriesValue for Option<f64> {
    fn series_value(&self) -> Option<f64> {
        *self
    }
}

impl SeriesValue for HistoryPoint {
    fn series_value(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl SeriesValue for Quote {
    fn series_value(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl SeriesValue for MacroIndicator {
    fn series_value(&self) -> Option<f64> {
        self.value
    }
}

/// A series point with its z-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    pub point: T,
    pub z_score: f64,
}

/// Scores every point as `(value - mean) / stddev`, using the population
/// standard deviation of the series' finite values.
///
/// A zero deviation, including an all-equal series, scores every point 0.
pub fn z_scores<T: SeriesValue + Clone>(series: &[T]) -> Vec<Scored<T>> {
    let values = series
        .iter()
        .filter_map(finite_value)
        .collect::<Vec<_>>();

    let stats = Moments::of(&values);
    series
        .iter()
        .map(|point| Scored {
            point: point.clone(),
            z_score: match (finite_value(point), stats) {
                (Some(value), Some(moments)) => moments.z(value),
                _ => 0.0,
            },
        })
        .collect()
}

/// Points with `|z| >= threshold`, in their original order.
pub fn detect_anomalies<T: SeriesValue + Clone>(series: &[T], threshold: f64) -> Vec<Scored<T>> {
    z_scores(series)
        .into_iter()
        .filter(|scored| scored.z_score.abs() >= threshold)
        .collect()
}

/// Checks a user-supplied threshold.
pub fn validate_threshold(threshold: f64) -> Result<f64, ValidationError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(ValidationError::InvalidThreshold {
            value: threshold.to_string(),
        })
    }
}

fn finite_value<T: SeriesValue>(point: &T) -> Option<f64> {
    point.series_value().filter(|value| value.is_finite())
}

#[derive(Debug, Clone, Copy)]
struct Moments {
    mean: f64,
    std_dev: f64,
}

impl Moments {
    /// `None` when there is nothing to score against.
    fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        if values.iter().all(|value| *value == first) {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        (std_dev > 0.0 && std_dev.is_finite()).then_some(Self { mean, std_dev })
    }

    fn z(self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_scores_zero() {
        let scored = z_scores(&[0.1_f64, 0.1, 0.1, 0.1]);
        assert!(scored.iter().all(|s| s.z_score == 0.0));
    }

    #[test]
    fn uses_population_deviation() {
        // mean 5, population stddev 2
        let series = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let scored = z_scores(&series);

        assert!((scored[0].z_score + 1.5).abs() < 1e-12);
        assert!((scored[7].z_score - 2.0).abs() < 1e-12);
    }

    #[test]
    fn flags_points_at_or_beyond_threshold() {
        let series = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let anomalies = detect_anomalies(&series, DEFAULT_ANOMALY_THRESHOLD);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].point, 9.0);
    }

    #[test]
    fn missing_values_score_zero_and_are_ignored() {
        let series = [Some(1.0), None, Some(3.0)];
        let scored = z_scores(&series);

        assert_eq!(scored[1].z_score, 0.0);
        assert!((scored[0].z_score + 1.0).abs() < 1e-12);
        assert!((scored[2].z_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_empty() {
        assert!(z_scores::<f64>(&[]).is_empty());
        assert!(detect_anomalies::<f64>(&[], 0.0).is_empty());
    }

    #[test]
    fn threshold_validation() {
        assert_eq!(validate_threshold(2.5), Ok(2.5));
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }
}
