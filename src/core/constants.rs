//! A collection of constants.

/// Bins used when the caller does not choose.
pub const DEFAULT_NBIN: usize = 10;
/// Bootstrap resamples used when the caller does not choose.
pub const DEFAULT_RESAMPLES: usize = 250;

/// Tukey biweight tuning constant for the location estimate, in MAD units.
pub const BIWEIGHT_LOCATION_C: f64 = 6.0;
/// Tukey biweight tuning constant for the scale estimate, in MAD units.
pub const BIWEIGHT_SCALE_C: f64 = 9.0;
/// Iteration cap for the biweight location.
pub const BIWEIGHT_MAX_ITER: usize = 10;
/// Relative step below which the biweight location is converged.
pub const BIWEIGHT_TOL: f64 = 1e-10;

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Graph must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Graph must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Axis labels are rounded to the first decimal place.
///
/// 14.832 becomes 14.8
pub const DECIMAL_PRECISION: usize = 1;
