//! Equal-width binning of a sample series along x.
//!
//! The active range is the caller's curve range or, failing that, the x
//! extent of the data. It is cut into `nbin` half-open intervals
//! `[low, high)`; the last one is closed so the maximum lands in it.
//! Points outside the active range are left out. Bins are returned in
//! ascending order, empty ones included; dropping them is the curve
//! builder's call.

use crate::core::{
    bounds::{Axis, Range},
    data::Series,
    error::{InputError, TrendError},
};

/// One interval and the y values that fell into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub values: Vec<f64>,
}

impl Bin {
    #[inline]
    #[must_use]
    pub fn center(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Stateless equal-width binning engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binner {
    nbin: usize,
}

impl Binner {
    pub fn new(nbin: usize) -> Result<Self, TrendError> {
        if nbin == 0 {
            return Err(InputError::ZeroBins.into());
        }
        Ok(Self { nbin })
    }

    #[inline]
    #[must_use]
    pub fn nbin(&self) -> usize {
        self.nbin
    }

    /// Curve range if given, data x extent otherwise. Zero or overflowing
    /// width is rejected.
    pub fn active_range(series: &Series<'_>, crange: Option<Range>) -> Result<Range, TrendError> {
        let range = match crange {
            Some(r) => r,
            None => Axis::X.bounds(series).ok_or(InputError::EmptySeries)?,
        };
        let width = range.width();
        if width <= 0.0 || !width.is_finite() {
            return Err(TrendError::InvalidRange {
                low: range.low,
                high: range.high,
            });
        }
        Ok(range)
    }

    #[allow(clippy::cast_precision_loss)]
    fn width(&self, range: Range) -> f64 {
        range.width() / self.nbin as f64
    }

    /// Edges `e_0 < e_1 < … < e_nbin`, with `e_nbin` pinned to `range.high`.
    fn edges(&self, range: Range, width: f64) -> Vec<f64> {
        let mut edges: Vec<f64> = (0..self.nbin)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let i = i as f64;
                range.low + i * width
            })
            .collect();
        edges.push(range.high);
        edges
    }

    /// Bin index of `x`, `None` when outside `[edges[0], edges[nbin]]`.
    fn index_of(&self, x: f64, edges: &[f64], width: f64) -> Option<usize> {
        let (low, high) = (edges[0], edges[self.nbin]);
        if !(low..=high).contains(&x) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut idx = (((x - low) / width).floor() as usize).min(self.nbin - 1);
        // Float division can land one slot off near an edge; trust the edges.
        if idx > 0 && x < edges[idx] {
            idx -= 1;
        } else if idx + 1 < self.nbin && x >= edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }

    /// Partition `series` into `nbin` bins over the active range.
    pub fn bin(&self, series: &Series<'_>, crange: Option<Range>) -> Result<Vec<Bin>, TrendError> {
        let range = Self::active_range(series, crange)?;
        let width = self.width(range);
        let edges = self.edges(range, width);

        let mut bins: Vec<Bin> = edges
            .windows(2)
            .map(|w| Bin {
                low: w[0],
                high: w[1],
                values: Vec::new(),
            })
            .collect();

        let mut dropped = 0usize;
        for (x, y) in series.points() {
            match self.index_of(x, &edges, width) {
                Some(i) => bins[i].values.push(y),
                None => dropped += 1,
            }
        }

        log::debug!(
            "binned {} points into {} bins over [{}, {}], {dropped} outside",
            series.len() - dropped,
            self.nbin,
            range.low,
            range.high,
        );
        Ok(bins)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn series<'a>(x: &'a [f64], y: &'a [f64]) -> Series<'a> {
        Series::new(x, y).unwrap()
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(matches!(
            Binner::new(0),
            Err(TrendError::InvalidInput(InputError::ZeroBins))
        ));
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let x = [0.0, 0.5, 1.0, 2.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let bins = Binner::new(2).unwrap().bin(&series(&x, &y), None).unwrap();
        assert_eq!(bins[0].values, vec![1.0, 2.0]);
        assert_eq!(bins[1].values, vec![3.0, 4.0]);
        assert_relative_eq!(bins[0].center(), 0.5);
        assert_relative_eq!(bins[1].center(), 1.5);
    }

    #[test]
    fn unsorted_input_and_out_of_range_points() {
        let x = [9.0, -1.0, 3.0, 11.0, 0.0, 10.0];
        let y = [90.0, -10.0, 30.0, 110.0, 0.0, 100.0];
        let crange = Range::new(0.0, 10.0).unwrap();
        let bins = Binner::new(5).unwrap().bin(&series(&x, &y), Some(crange)).unwrap();
        let counts: Vec<usize> = bins.iter().map(Bin::count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 2]);
        assert_eq!(bins[4].values, vec![90.0, 100.0]);
    }

    #[test]
    fn every_in_range_point_counted_once() {
        let x: Vec<f64> = (0..1000).map(|i| f64::from(i) * 0.137 % 50.0).collect();
        let y = vec![1.0; x.len()];
        let crange = Range::new(7.3, 41.9).unwrap();
        let bins = Binner::new(13).unwrap().bin(&series(&x, &y), Some(crange)).unwrap();
        let total: usize = bins.iter().map(Bin::count).sum();
        let inside = x.iter().filter(|v| crange.contains(**v)).count();
        assert_eq!(total, inside);
        for pair in bins.windows(2) {
            assert!(pair[0].center() < pair[1].center());
            assert_relative_eq!(pair[0].high, pair[1].low);
        }
    }

    #[test]
    fn degenerate_ranges() {
        let x = [2.0, 2.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        let binner = Binner::new(4).unwrap();
        assert!(matches!(
            binner.bin(&series(&x, &y), None),
            Err(TrendError::InvalidRange { .. })
        ));
        let flat = Range::new(5.0, 5.0).unwrap();
        assert!(matches!(
            binner.bin(&series(&[1.0, 6.0], &[0.0, 0.0]), Some(flat)),
            Err(TrendError::InvalidRange { low, high }) if low == 5.0 && high == 5.0
        ));
    }

    #[test]
    fn overflowing_width_rejected() {
        let x = [-1e308, 0.0, 1e308];
        let y = [1.0, 2.0, 3.0];
        assert!(matches!(
            Binner::new(2).unwrap().bin(&series(&x, &y), None),
            Err(TrendError::InvalidRange { .. })
        ));
        let wide = Range::new(-f64::MAX, f64::MAX).unwrap();
        assert!(matches!(
            Binner::new(2).unwrap().bin(&series(&[0.0], &[0.0]), Some(wide)),
            Err(TrendError::InvalidRange { .. })
        ));
    }
}
