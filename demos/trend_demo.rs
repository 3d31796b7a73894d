//! Noisy ramp with a flat shelf in the middle, plotted a few ways.
//!
//! `cargo run --example trend_demo`

use std::error::Error;

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use trend_plot::{AnsiCode, CentralStat, ErrorStat, Range, TrendConfig, trendplot};

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(2024);
    let wide = Normal::new(0.0, 15.0)?;
    let narrow = Normal::new(0.0, 6.0)?;

    let x: Vec<f64> = (0..1000).map(|i| f64::from(i) * 0.1).collect();
    let y: Vec<f64> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if (300..600).contains(&i) {
                55.0 + narrow.sample(&mut rng)
            } else {
                1.2 * v + wide.sample(&mut rng)
            }
        })
        .collect();

    // Simple plot
    trendplot(&x, &y, &TrendConfig::default())?;

    // More bins, 1-sigma lines
    let cfg = TrendConfig::builder()
        .nbin(20)
        .sigfact(1.0)
        .title("20 bins, 1 sigma")
        .build()?;
    trendplot(&x, &y, &cfg)?;

    // Custom curve range, mean with bootstrap error bars
    let cfg = TrendConfig::builder()
        .crange(Range::new(30.0, 80.0)?)
        .ystat(CentralStat::Mean)
        .estat(ErrorStat::Boot)
        .ccolor(AnsiCode::blue())
        .seed(7)
        .title("mean, boot errors")
        .build()?;
    trendplot(&x, &y, &cfg)?;

    // No plot, just the biweight curve with bootstrap errors
    let cfg = TrendConfig::builder()
        .ystat(CentralStat::BiweightMean)
        .estat(ErrorStat::Boot)
        .noplot(true)
        .build()?;
    if let Some(curve) = trendplot(&x, &y, &cfg)? {
        let (px, py, ey) = curve.into_parts();
        for ((px, py), ey) in px.iter().zip(&py).zip(&ey) {
            println!("{px:8.2} {py:8.2} ± {ey:.2}");
        }
    }
    Ok(())
}
