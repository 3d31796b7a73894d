//! Binned trend curves over scattered XY data, drawn as braille in the terminal.
//!
//! The x range is cut into equal-width bins; each bin is reduced to a central
//! value (`mean`, `median` or biweight `bimean`) and an uncertainty (`std`,
//! `sem`, `boot`, `poisson` or `bistd`). The resulting curve is either
//! returned or plotted over the raw points.
//!
//! ```no_run
//! use trend_plot::{TrendConfig, trendplot};
//!
//! let x: Vec<f64> = (0..100).map(f64::from).collect();
//! let y: Vec<f64> = x.iter().map(|v| 0.5 * v).collect();
//! let cfg = TrendConfig::builder().nbin(8).sigfact(1.0).build()?;
//! trendplot(&x, &y, &cfg)?;
//! # Ok::<(), trend_plot::TrendError>(())
//! ```

pub mod core;
pub mod render;

use rand::Rng;

pub use crate::core::{
    bootstrap::{Bootstrap, rng_from_seed},
    bounds::{Range, Window},
    color::{AnsiCode, ColorError, colorize},
    config::{EmptyBins, TrendConfig, TrendConfigBuilder},
    curve::TrendCurve,
    data::Series,
    error::{InputError, TrendError},
    stats::{CentralStat, ErrorStat},
};
pub use render::{BraillePlotter, LineStyle, Plotter, Renderer, assemble};

/// Validate the raw slices and apply `xycut`.
fn prepare<'a>(x: &'a [f64], y: &'a [f64], cfg: &TrendConfig) -> Result<Series<'a>, TrendError> {
    let series = Series::new(x, y)?;
    match &cfg.xycut {
        Some(window) => series.cut(window),
        None => Ok(series),
    }
}

/// Compute the trend curve only, drawing bootstrap samples from `rng`.
pub fn trend_curve<R: Rng>(
    x: &[f64],
    y: &[f64],
    cfg: &TrendConfig,
    rng: &mut R,
) -> Result<TrendCurve, TrendError> {
    let series = prepare(x, y, cfg)?;
    crate::core::build_curve(&series, cfg, rng)
}

/// Compute the curve and draw it through `plotter`, unless `noplot` is set.
///
/// The curve is returned either way.
pub fn trendplot_with<P: Plotter + ?Sized>(
    plotter: &mut P,
    x: &[f64],
    y: &[f64],
    cfg: &TrendConfig,
) -> Result<TrendCurve, TrendError> {
    let series = prepare(x, y, cfg)?;
    let curve = crate::core::build_curve(&series, cfg, &mut rng_from_seed(cfg.seed))?;
    if !cfg.noplot {
        assemble(plotter, &series, &curve, cfg)?;
    }
    Ok(curve)
}

/// Principal entry point.
///
/// With `noplot` the curve comes back as `Some`; otherwise it is drawn to
/// stdout as a braille chart and `None` is returned.
pub fn trendplot(x: &[f64], y: &[f64], cfg: &TrendConfig) -> Result<Option<TrendCurve>, TrendError> {
    if cfg.noplot {
        let curve = trend_curve(x, y, cfg, &mut rng_from_seed(cfg.seed))?;
        return Ok(Some(curve));
    }
    let mut plotter = BraillePlotter::stdout(cfg.title.as_str());
    if let Some((x_chars, y_chars)) = cfg.size {
        plotter = plotter.size(x_chars, y_chars);
    }
    trendplot_with(&mut plotter, x, y, cfg)?;
    Ok(None)
}
