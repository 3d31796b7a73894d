//! Turn a series and its trend curve into [`Plotter`] calls.

use crate::{
    core::{bounds::Window, config::TrendConfig, curve::TrendCurve, data::Series, error::TrendError},
    render::{LineStyle, Plotter},
};

/// Plot window: `prange` if set, otherwise the data bounds. Flat axes padded.
fn plot_window(series: &Series<'_>, cfg: &TrendConfig) -> Window {
    cfg.prange
        .or_else(|| Window::spanning(series))
        .unwrap_or_default()
        .padded()
}

/// `y ± k·spread`, one line per sign.
fn sigma_lines(curve: &TrendCurve, k: f64) -> (Vec<f64>, Vec<f64>) {
    curve
        .y
        .iter()
        .zip(&curve.spread)
        .map(|(&y, &s)| (y + k * s, y - k * s))
        .unzip()
}

/// Draw `series` and `curve` on `plotter` in back-to-front order, then finish.
pub fn assemble<P: Plotter + ?Sized>(
    plotter: &mut P,
    series: &Series<'_>,
    curve: &TrendCurve,
    cfg: &TrendConfig,
) -> Result<(), TrendError> {
    let window = plot_window(series, cfg);

    if !cfg.noscatter {
        let (xs, ys): (Vec<f64>, Vec<f64>) =
            series.points().filter(|&(x, y)| window.contains(x, y)).unzip();
        plotter.scatter(&xs, &ys, cfg.pcolor);
    }

    plotter.line(&curve.x, &curve.y, cfg.ccolor, LineStyle::Solid);
    plotter.markers(&curve.x, &curve.y, cfg.ccolor);

    if cfg.error_bars {
        plotter.error_bars(&curve.x, &curve.y, &curve.err, cfg.ccolor);
    }

    if let Some(k) = cfg.sigfact {
        let (upper, lower) = sigma_lines(curve, k);
        plotter.line(&curve.x, &upper, cfg.sigcolor, LineStyle::Dashed);
        plotter.line(&curve.x, &lower, cfg.sigcolor, LineStyle::Dashed);
    }

    plotter.limits(window);
    plotter.finish()
}
