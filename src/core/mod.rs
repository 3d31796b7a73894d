//! Aggregates the numerical layer: data, binning, statistics, curve.

pub mod binner;
pub mod bootstrap;
pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod curve;
pub mod data;
pub mod error;
pub mod stats;

// re-export frequently-used items for convenience
pub use binner::{Bin, Binner};
pub use bootstrap::{Bootstrap, rng_from_seed};
pub use bounds::{Axis, Range, Window};
pub use color::{AnsiCode, ColorError, colorize};
pub use config::{EmptyBins, TrendConfig, TrendConfigBuilder};
pub use constants::{DEFAULT_NBIN, DEFAULT_RESAMPLES, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH};
pub use curve::{TrendCurve, build_curve};
pub use data::Series;
pub use error::{InputError, TrendError};
pub use stats::{CentralStat, ErrorStat};
