//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::color::ColorError;

/// Precise input faults. Always surfaced through [`TrendError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("input series is empty")]
    EmptySeries,
    #[error("x and y must have equal length (x: {x_len}, y: {y_len})")]
    MismatchedLengths { x_len: usize, y_len: usize },
    #[error("{axis} value at index {index} is not finite")]
    NonFinite { axis: char, index: usize },
    #[error("`{0}` needs at least one value")]
    EmptySample(&'static str),
    #[error("bin count must be at least 1")]
    ZeroBins,
    #[error("bootstrap needs at least one resample")]
    ZeroResamples,
    #[error("sigma factor must be finite and non-negative, got {0}")]
    SigmaFactor(f64),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invalid range [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },
    #[error("unknown {kind} `{name}`")]
    UnknownSelector { kind: &'static str, name: String },
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("terminal too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
}
