//! Bootstrap error estimate with an injected random source.
//!
//! Draw `resamples` resamples of size n with replacement, apply the chosen
//! central statistic to each and report the ddof = 1 standard deviation of
//! those estimates. Seeding the generator makes the result reproducible.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::core::{
    constants::DEFAULT_RESAMPLES,
    error::{InputError, TrendError},
    stats::{CentralStat, std_dev},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bootstrap {
    resamples: usize,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            resamples: DEFAULT_RESAMPLES,
        }
    }
}

impl Bootstrap {
    pub fn new(resamples: usize) -> Result<Self, TrendError> {
        if resamples == 0 {
            return Err(InputError::ZeroResamples.into());
        }
        Ok(Self { resamples })
    }

    #[inline]
    #[must_use]
    pub fn resamples(&self) -> usize {
        self.resamples
    }

    /// Spread of `stat` over the bootstrap distribution of `values`.
    ///
    /// A single value yields exactly `0.0` without touching the generator.
    pub fn estimate<R: Rng>(
        &self,
        values: &[f64],
        stat: CentralStat,
        rng: &mut R,
    ) -> Result<f64, TrendError> {
        let n = values.len();
        if n == 0 {
            return Err(InputError::EmptySample("boot").into());
        }
        if n == 1 {
            return Ok(0.0);
        }

        let mut sample = vec![0.0; n];
        let mut estimates = Vec::with_capacity(self.resamples);
        for _ in 0..self.resamples {
            for slot in &mut sample {
                *slot = values[rng.random_range(0..n)];
            }
            estimates.push(stat.apply(&sample)?);
        }
        std_dev(&estimates)
    }
}

/// Generator for one call: seeded when asked, OS entropy otherwise.
#[must_use]
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn zero_resamples_rejected() {
        assert!(matches!(
            Bootstrap::new(0),
            Err(TrendError::InvalidInput(InputError::ZeroResamples))
        ));
    }

    #[test]
    fn single_value_has_zero_spread() {
        let mut rng = StdRng::seed_from_u64(1);
        for b in [1, 2, 250] {
            let boot = Bootstrap::new(b).unwrap();
            for stat in CentralStat::ALL {
                assert_eq!(boot.estimate(&[3.0], stat, &mut rng).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn one_resample_has_zero_spread() {
        let mut rng = StdRng::seed_from_u64(5);
        let boot = Bootstrap::new(1).unwrap();
        for stat in CentralStat::ALL {
            let spread = boot.estimate(&[1.0, 4.0, 9.0, 16.0], stat, &mut rng).unwrap();
            assert_eq!(spread, 0.0);
        }
    }

    #[test]
    fn constant_bin_has_zero_spread() {
        let mut rng = StdRng::seed_from_u64(9);
        let boot = Bootstrap::new(50).unwrap();
        let spread = boot.estimate(&[2.0; 12], CentralStat::Mean, &mut rng).unwrap();
        assert_relative_eq!(spread, 0.0);
    }

    #[test]
    fn same_seed_same_answer() {
        let values: Vec<f64> = (0..40).map(|i| f64::from(i * i % 17)).collect();
        let boot = Bootstrap::new(100).unwrap();
        let a = boot
            .estimate(&values, CentralStat::Median, &mut rng_from_seed(Some(42)))
            .unwrap();
        let b = boot
            .estimate(&values, CentralStat::Median, &mut rng_from_seed(Some(42)))
            .unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
