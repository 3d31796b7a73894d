//! Paired sample series, validated once at the API boundary.

use std::borrow::Cow;

use crate::core::{
    bounds::Window,
    error::{InputError, TrendError},
};

/// Two equal-length, finite sequences paired by index. `x` need not be sorted.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    x: Cow<'a, [f64]>,
    y: Cow<'a, [f64]>,
}

impl<'a> Series<'a> {
    /// Borrow `x` and `y` after checking length, emptiness and finiteness.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<Self, TrendError> {
        if x.len() != y.len() {
            return Err(InputError::MismatchedLengths {
                x_len: x.len(),
                y_len: y.len(),
            }
            .into());
        }
        if x.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        for (axis, values) in [('x', x), ('y', y)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(InputError::NonFinite { axis, index }.into());
            }
        }
        Ok(Self {
            x: Cow::Borrowed(x),
            y: Cow::Borrowed(y),
        })
    }

    #[inline]
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[inline]
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
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

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Keep only the points inside `window` (edges included).
    ///
    /// Fails with [`InputError::EmptySeries`] when nothing survives the cut.
    pub fn cut(self, window: &Window) -> Result<Self, TrendError> {
        let (x, y): (Vec<f64>, Vec<f64>) = self
            .points()
            .filter(|&(x, y)| window.contains(x, y))
            .unzip();
        log::debug!("xycut kept {} of {} points", x.len(), self.len());
        if x.is_empty() {
            return Err(InputError::EmptySeries.into());
        }
        Ok(Self {
            x: Cow::Owned(x),
            y: Cow::Owned(y),
        })
    }
}
