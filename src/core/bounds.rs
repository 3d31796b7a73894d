//! Geometry helpers: ranges, windows + terminal size plumbing.

use serde::{Deserialize, Serialize};
use terminal_size::{Height, Width, terminal_size};

use crate::core::{
    constants::{BORDER_WIDTH, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
    data::Series,
    error::TrendError,
};

/// Closed interval `[low, high]` with `low <= high`, both finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Result<Self, TrendError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(TrendError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Smallest range holding every value, `None` for an empty slice.
    #[must_use]
    pub fn spanning(values: &[f64]) -> Option<Self> {
        let (low, high) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        (low.is_finite() && high.is_finite()).then_some(Self { low, high })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        v >= self.low && v <= self.high
    }

    /// Flat ranges get +-0.5 of breathing room so they can still be drawn.
    #[must_use]
    pub fn padded(self) -> Self {
        if self.width() < f64::EPSILON {
            Self {
                low: self.low - 0.5,
                high: self.high + 0.5,
            }
        } else {
            self
        }
    }
}

/// Unit interval, the stand-in when there is nothing to measure.
impl Default for Range {
    fn default() -> Self {
        Self { low: 0.0, high: 1.0 }
    }
}

impl TryFrom<[f64; 2]> for Range {
    type Error = TrendError;

    fn try_from([low, high]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<Range> for [f64; 2] {
    fn from(r: Range) -> Self {
        [r.low, r.high]
    }
}

/// Rectangle `[xmin, xmax, ymin, ymax]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct Window {
    pub x: Range,
    pub y: Range,
}

impl Window {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, TrendError> {
        Ok(Self {
            x: Range::new(x_min, x_max)?,
            y: Range::new(y_min, y_max)?,
        })
    }

    /// Tight bounds around a non-empty series.
    #[must_use]
    pub fn spanning(series: &Series<'_>) -> Option<Self> {
        Some(Self {
            x: Axis::X.bounds(series)?,
            y: Axis::Y.bounds(series)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x.contains(x) && self.y.contains(y)
    }

    #[must_use]
    pub fn padded(self) -> Self {
        Self {
            x: self.x.padded(),
            y: self.y.padded(),
        }
    }
}

impl TryFrom<[f64; 4]> for Window {
    type Error = TrendError;

    fn try_from([x0, x1, y0, y1]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(x0, x1, y0, y1)
    }
}

impl From<Window> for [f64; 4] {
    fn from(w: Window) -> Self {
        [w.x.low, w.x.high, w.y.low, w.y.high]
    }
}

/// Which axis we’re measuring.
#[derive(Clone, Copy, Debug)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Inclusive bounds without any padding, `None` for an empty series.
    #[must_use]
    pub fn bounds(self, series: &Series<'_>) -> Option<Range> {
        match self {
            Self::X => Range::spanning(series.x()),
            Self::Y => Range::spanning(series.y()),
        }
    }
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert terminal dimensions to a graph char grid.
/// Leaves space for borders, y labels and the title/subtitle rows.
#[inline]
#[must_use]
pub fn graph_dims((w, h): (Width, Height), label_width: usize) -> (usize, usize) {
    let x_chars = std::cmp::max(
        MIN_GRAPH_WIDTH,
        usize::from(w.0).saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_width + 1),
    );
    let y_chars = std::cmp::max(MIN_GRAPH_HEIGHT, usize::from(h.0).saturating_sub(5));
    (x_chars, y_chars)
}

/// How wide will the y-axis labels be for the given range?
#[inline]
#[must_use]
pub fn y_label_width(y_range: Range, decimals: usize) -> usize {
    let lo = format!("{:.decimals$}", y_range.low).len();
    let hi = format!("{:.decimals$}", y_range.high).len();
    lo.max(hi)
}
