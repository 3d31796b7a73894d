//! Per-bin reducers and the selectors that name them.
//!
//! Central-tendency reducers (`mean`, `median`, `biweight_location`) turn a
//! bin's y values into the curve point. Spread reducers (`std_dev`, `sem`,
//! `poisson`, `biweight_scale`) turn them into the error value; bootstrap
//! lives in [`crate::core::bootstrap`].
//!
//! Every reducer rejects an empty slice with [`InputError::EmptySample`].
//! A single value is never an error: spreads of one value are `0.0`.

use std::{cmp::Ordering, fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{
    bootstrap::Bootstrap,
    constants::{BIWEIGHT_LOCATION_C, BIWEIGHT_MAX_ITER, BIWEIGHT_SCALE_C, BIWEIGHT_TOL},
    error::{InputError, TrendError},
};

#[inline]
fn non_empty<'a>(values: &'a [f64], name: &'static str) -> Result<&'a [f64], TrendError> {
    if values.is_empty() {
        Err(InputError::EmptySample(name).into())
    } else {
        Ok(values)
    }
}

#[allow(clippy::cast_precision_loss)]
#[inline]
fn len_f64(values: &[f64]) -> f64 {
    values.len() as f64
}

// --- Central tendency ---

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "mean")?;
    Ok(values.iter().sum::<f64>() / len_f64(values))
}

/// Median; even lengths average the two middle values.
pub fn median(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "median")?;
    let mut scratch = values.to_vec();
    Ok(median_inplace(&mut scratch))
}

/// Quickselect median. Caller guarantees `vals` is non-empty.
fn median_inplace(vals: &mut [f64]) -> f64 {
    let n = vals.len();
    let mid = n / 2;
    let (lower, upper, _) = vals.select_nth_unstable_by(mid, |a, b| {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    });
    let upper = *upper;
    if n % 2 == 1 {
        return upper;
    }
    let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    0.5 * (below + upper)
}

/// Median absolute deviation around `center`.
fn mad(values: &[f64], center: f64) -> f64 {
    let mut dev: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median_inplace(&mut dev)
}

/// Tukey biweight location.
///
/// Starts at the median and re-weights with `(1 - u²)²`, `u = (y - M) / (c·MAD)`,
/// `c = 6`, until the step is negligible. The MAD is fixed from the starting
/// median. Zero MAD (constant data, a single value) returns the median.
pub fn biweight_location(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "bimean")?;
    let mut scratch = values.to_vec();
    let mut loc = median_inplace(&mut scratch);
    let scale = mad(values, loc);
    if scale == 0.0 {
        return Ok(loc);
    }
    let cutoff = BIWEIGHT_LOCATION_C * scale;

    for _ in 0..BIWEIGHT_MAX_ITER {
        let (mut num, mut den) = (0.0, 0.0);
        for &v in values {
            let d = v - loc;
            let u = d / cutoff;
            if u.abs() < 1.0 {
                let w = (1.0 - u * u).powi(2);
                num += d * w;
                den += w;
            }
        }
        if den == 0.0 {
            break;
        }
        let step = num / den;
        loc += step;
        if step.abs() <= BIWEIGHT_TOL * (1.0 + loc.abs()) {
            break;
        }
    }
    Ok(loc)
}

// --- Spread ---

/// Sample standard deviation (ddof = 1). A single value gives `0.0`.
pub fn std_dev(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "std")?;
    if values.len() == 1 {
        return Ok(0.0);
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / (len_f64(values) - 1.0)).sqrt())
}

/// Standard error of the mean, `std / sqrt(n)`.
pub fn sem(values: &[f64]) -> Result<f64, TrendError> {
    Ok(std_dev(values)? / len_f64(values).sqrt())
}

/// Counting error `sqrt(n)`.
pub fn poisson(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "poisson")?;
    Ok(len_f64(values).sqrt())
}

/// Biweight scale (`c = 9`) around the median. Zero MAD gives `0.0`.
pub fn biweight_scale(values: &[f64]) -> Result<f64, TrendError> {
    let values = non_empty(values, "bistd")?;
    let mut scratch = values.to_vec();
    let center = median_inplace(&mut scratch);
    let scale = mad(values, center);
    if scale == 0.0 {
        return Ok(0.0);
    }
    let cutoff = BIWEIGHT_SCALE_C * scale;

    let (mut num, mut den) = (0.0, 0.0);
    for &v in values {
        let d = v - center;
        let u = d / cutoff;
        if u.abs() < 1.0 {
            let u2 = u * u;
            num += d * d * (1.0 - u2).powi(4);
            den += (1.0 - u2) * (1.0 - 5.0 * u2);
        }
    }
    if den == 0.0 {
        return Ok(0.0);
    }
    Ok((len_f64(values) * num).sqrt() / den.abs())
}

// --- Selectors ---

/// Central-tendency selector (`ystat`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralStat {
    Mean,
    #[default]
    Median,
    #[serde(rename = "bimean")]
    BiweightMean,
}

impl CentralStat {
    pub const ALL: [Self; 3] = [Self::Mean, Self::Median, Self::BiweightMean];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::BiweightMean => "bimean",
        }
    }

    pub fn apply(self, values: &[f64]) -> Result<f64, TrendError> {
        match self {
            Self::Mean => mean(values),
            Self::Median => median(values),
            Self::BiweightMean => biweight_location(values),
        }
    }
}

impl fmt::Display for CentralStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CentralStat {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| TrendError::UnknownSelector {
                kind: "ystat",
                name: s.to_owned(),
            })
    }
}

/// Uncertainty selector (`estat`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStat {
    #[default]
    Std,
    Sem,
    Boot,
    Poisson,
    #[serde(rename = "bistd")]
    BiweightStd,
}

impl ErrorStat {
    pub const ALL: [Self; 5] = [
        Self::Std,
        Self::Sem,
        Self::Boot,
        Self::Poisson,
        Self::BiweightStd,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Std => "std",
            Self::Sem => "sem",
            Self::Boot => "boot",
            Self::Poisson => "poisson",
            Self::BiweightStd => "bistd",
        }
    }

    /// Error value of one bin. `central` and `bootstrap` matter only for `Boot`,
    /// so the resampled distribution matches the plotted statistic.
    pub fn estimate<R: Rng>(
        self,
        values: &[f64],
        central: CentralStat,
        bootstrap: &Bootstrap,
        rng: &mut R,
    ) -> Result<f64, TrendError> {
        match self {
            Self::Std => std_dev(values),
            Self::Sem => sem(values),
            Self::Boot => bootstrap.estimate(values, central, rng),
            Self::Poisson => poisson(values),
            Self::BiweightStd => biweight_scale(values),
        }
    }
}

impl fmt::Display for ErrorStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorStat {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| TrendError::UnknownSelector {
                kind: "estat",
                name: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn mean_and_median_of_small_bin() {
        let bin = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(mean(&bin).unwrap(), 3.0);
        assert_relative_eq!(median(&bin).unwrap(), 3.0);
    }

    #[test]
    fn median_even_length_averages_middle_pair() {
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn empty_sample_is_invalid_input() {
        for result in [
            mean(&[]),
            median(&[]),
            biweight_location(&[]),
            std_dev(&[]),
            sem(&[]),
            poisson(&[]),
            biweight_scale(&[]),
        ] {
            assert!(matches!(
                result,
                Err(TrendError::InvalidInput(InputError::EmptySample(_)))
            ));
        }
    }

    #[test]
    fn biweight_resists_outlier() {
        let bin = [1.0, 2.0, 3.0, 4.0, 1000.0];
        let robust = biweight_location(&bin).unwrap();
        let plain = mean(&bin).unwrap();
        assert_relative_eq!(plain, 202.0);
        assert!((robust - 2.5).abs() < 1.0, "biweight {robust} not near bulk");
    }

    #[test]
    fn biweight_handles_constant_and_single_values() {
        assert_relative_eq!(biweight_location(&[7.0; 6]).unwrap(), 7.0);
        assert_relative_eq!(biweight_location(&[-3.5]).unwrap(), -3.5);
        assert_relative_eq!(biweight_scale(&[7.0; 6]).unwrap(), 0.0);
    }

    #[test]
    fn biweight_matches_mean_for_symmetric_data() {
        let bin = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(biweight_location(&bin).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn spreads_of_single_value_are_zero() {
        assert_relative_eq!(std_dev(&[4.2]).unwrap(), 0.0);
        assert_relative_eq!(sem(&[4.2]).unwrap(), 0.0);
        assert_relative_eq!(poisson(&[4.2]).unwrap(), 1.0);
    }

    #[test]
    fn sample_std_and_sem() {
        let bin = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let s = (32.0_f64 / 7.0).sqrt();
        assert_relative_eq!(std_dev(&bin).unwrap(), s, epsilon = 1e-12);
        assert_relative_eq!(sem(&bin).unwrap(), s / 8.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(poisson(&bin).unwrap(), 8.0_f64.sqrt());
    }

    #[test]
    fn biweight_scale_is_close_to_std_for_clean_data() {
        let bin: Vec<f64> = (0..200).map(|i| f64::from(i % 20)).collect();
        let robust = biweight_scale(&bin).unwrap();
        let plain = std_dev(&bin).unwrap();
        assert!((robust / plain - 1.0).abs() < 0.15, "{robust} vs {plain}");
    }

    #[test]
    fn selectors_parse_by_name() {
        assert_eq!("bimean".parse::<CentralStat>().unwrap(), CentralStat::BiweightMean);
        assert_eq!("boot".parse::<ErrorStat>().unwrap(), ErrorStat::Boot);
        for stat in CentralStat::ALL {
            assert_eq!(stat.to_string().parse::<CentralStat>().unwrap(), stat);
        }
        let err = "mode".parse::<CentralStat>().unwrap_err();
        assert!(matches!(
            err,
            TrendError::UnknownSelector { kind: "ystat", ref name } if name == "mode"
        ));
        assert!(matches!(
            "variance".parse::<ErrorStat>(),
            Err(TrendError::UnknownSelector { kind: "estat", .. })
        ));
    }

    #[test]
    fn selectors_serialize_as_names() {
        assert_eq!(
            serde_json::to_string(&CentralStat::BiweightMean).unwrap(),
            "\"bimean\""
        );
        let stat: ErrorStat = serde_json::from_str("\"bistd\"").unwrap();
        assert_eq!(stat, ErrorStat::BiweightStd);
    }

    #[test]
    fn central_dispatch() {
        let bin = [1.0, 2.0, 10.0];
        assert_relative_eq!(CentralStat::Mean.apply(&bin).unwrap(), 13.0 / 3.0);
        assert_relative_eq!(CentralStat::Median.apply(&bin).unwrap(), 2.0);
    }
}
