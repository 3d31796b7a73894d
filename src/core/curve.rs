//! Trend curve: bin, then reduce each bin to a value, an error and a spread.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{
    binner::{Bin, Binner},
    config::{EmptyBins, TrendConfig},
    data::Series,
    error::TrendError,
    stats::biweight_scale,
};

/// Aligned per-bin output, ordered by increasing bin centre.
///
/// `x`, `y` and `err` are the curve proper. `spread` is the biweight scale of
/// each bin (sizes the sigma lines) and `counts` the bin membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub err: Vec<f64>,
    pub spread: Vec<f64>,
    pub counts: Vec<usize>,
}

impl TrendCurve {
    fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            err: Vec::with_capacity(n),
            spread: Vec::with_capacity(n),
            counts: Vec::with_capacity(n),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y, err)` triple, the shape `noplot` callers usually want.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.x, self.y, self.err)
    }

    fn push_empty(&mut self, bin: &Bin) {
        self.x.push(bin.center());
        self.y.push(f64::NAN);
        self.err.push(f64::NAN);
        self.spread.push(f64::NAN);
        self.counts.push(0);
    }
}

/// Build the curve for an already validated series.
///
/// `rng` is only drawn from when `estat` is `boot`.
pub fn build_curve<R: Rng>(
    series: &Series<'_>,
    cfg: &TrendConfig,
    rng: &mut R,
) -> Result<TrendCurve, TrendError> {
    let bins = Binner::new(cfg.nbin)?.bin(series, cfg.crange)?;
    let mut curve = TrendCurve::with_capacity(bins.len());

    for bin in &bins {
        if bin.is_empty() {
            if cfg.empty_bins == EmptyBins::Keep {
                curve.push_empty(bin);
            }
            continue;
        }
        let value = cfg.ystat.apply(&bin.values)?;
        let err = cfg
            .estat
            .estimate(&bin.values, cfg.ystat, &cfg.bootstrap, rng)?;
        let spread = biweight_scale(&bin.values)?;
        log::trace!(
            "bin [{}, {}): n={} {}={value} {}={err}",
            bin.low,
            bin.high,
            bin.count(),
            cfg.ystat,
            cfg.estat,
        );

        curve.x.push(bin.center());
        curve.y.push(value);
        curve.err.push(err);
        curve.spread.push(spread);
        curve.counts.push(bin.count());
    }

    if curve.counts.iter().all(|&c| c == 0) {
        log::warn!("no points fell inside the curve range; trend curve is empty");
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::core::{
        bounds::Range,
        stats::{CentralStat, ErrorStat},
    };

    #[test]
    fn empty_bins_omitted_by_default() {
        let x = [0.0, 0.1, 0.9, 1.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let series = Series::new(&x, &y).unwrap();
        let cfg = TrendConfig::builder()
            .nbin(4)
            .ystat(CentralStat::Mean)
            .build()
            .unwrap();
        let curve = build_curve(&series, &cfg, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(curve.counts, vec![2, 2]);
        assert_relative_eq!(curve.x[0], 0.125);
        assert_relative_eq!(curve.x[1], 0.875);
        assert_relative_eq!(curve.y[0], 2.0);
        assert_relative_eq!(curve.y[1], 6.0);
    }

    #[test]
    fn keep_policy_emits_every_bin() {
        let x = [0.0, 0.1, 0.9, 1.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let series = Series::new(&x, &y).unwrap();
        let cfg = TrendConfig::builder()
            .nbin(4)
            .empty_bins(EmptyBins::Keep)
            .build()
            .unwrap();
        let curve = build_curve(&series, &cfg, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(curve.len(), 4);
        assert_eq!(curve.counts, vec![2, 0, 0, 2]);
        assert!(curve.y[1].is_nan() && curve.err[2].is_nan());
    }

    #[test]
    fn curve_range_outside_data_gives_empty_curve() {
        let series = Series::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let cfg = TrendConfig::builder()
            .crange(Range::new(5.0, 6.0).unwrap())
            .build()
            .unwrap();
        let curve = build_curve(&series, &cfg, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn boot_uses_plotted_statistic() {
        // Median of a two-valued bin only takes a handful of values, the mean
        // many more; the spreads differ so the statistic is being forwarded.
        let x: Vec<f64> = (0..30).map(f64::from).collect();
        let y: Vec<f64> = (0..30).map(|i| f64::from(i % 2) * 10.0).collect();
        let series = Series::new(&x, &y).unwrap();
        let run = |stat| {
            let cfg = TrendConfig::builder()
                .nbin(1)
                .ystat(stat)
                .estat(ErrorStat::Boot)
                .resamples(400)
                .build()
                .unwrap();
            build_curve(&series, &cfg, &mut StdRng::seed_from_u64(3)).unwrap().err[0]
        };
        let mean_err = run(CentralStat::Mean);
        let median_err = run(CentralStat::Median);
        assert!(mean_err > 0.0 && median_err > 0.0);
        assert!((mean_err - median_err).abs() > 1e-6);
    }
}
