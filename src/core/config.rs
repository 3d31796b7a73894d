//! Run-time configuration object + fluent builder.
//!
//! Every recognised option lives on [`TrendConfig`]; defaults are listed on
//! [`TrendConfigBuilder`]'s setters.

use crate::core::{
    bootstrap::Bootstrap,
    bounds::{Range, Window},
    color::AnsiCode,
    constants::{DEFAULT_NBIN, DEFAULT_RESAMPLES},
    error::{InputError, TrendError},
    stats::{CentralStat, ErrorStat},
};

/// What happens to bins that received no points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmptyBins {
    /// Leave them out of the curve.
    #[default]
    Omit,
    /// Emit them with `NaN` value, error and spread.
    Keep,
}

/// Immutable parameters for one trend computation and its plot.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub nbin: usize,
    pub crange: Option<Range>,
    pub prange: Option<Window>,
    pub xycut: Option<Window>,
    pub ystat: CentralStat,
    pub estat: ErrorStat,
    pub bootstrap: Bootstrap,
    pub seed: Option<u64>,
    pub sigfact: Option<f64>,
    pub error_bars: bool,
    pub empty_bins: EmptyBins,
    pub ccolor: AnsiCode,
    pub pcolor: AnsiCode,
    pub sigcolor: AnsiCode,
    pub noscatter: bool,
    pub noplot: bool,
    pub title: String,
    pub size: Option<(usize, usize)>,
}

impl TrendConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> TrendConfigBuilder {
        TrendConfigBuilder::new()
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            nbin: DEFAULT_NBIN,
            crange: None,
            prange: None,
            xycut: None,
            ystat: CentralStat::default(),
            estat: ErrorStat::default(),
            bootstrap: Bootstrap::default(),
            seed: None,
            sigfact: None,
            error_bars: true,
            empty_bins: EmptyBins::default(),
            ccolor: AnsiCode::red(),
            pcolor: AnsiCode::grey(),
            sigcolor: AnsiCode::white(),
            noscatter: false,
            noplot: false,
            title: String::from("Trend"),
            size: None,
        }
    }
}

/// Fluent builder; validation happens once in `build`.
#[derive(Debug)]
pub struct TrendConfigBuilder {
    cfg: TrendConfig,
    resamples: usize,
}

impl Default for TrendConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: TrendConfig::default(),
            resamples: DEFAULT_RESAMPLES,
        }
    }

    /// Number of bins. Default 10.
    #[inline]
    #[must_use]
    pub fn nbin(mut self, n: usize) -> Self {
        self.cfg.nbin = n;
        self
    }
    /// x range feeding the curve. Default: data x extent.
    #[inline]
    #[must_use]
    pub fn crange(mut self, r: Range) -> Self {
        self.cfg.crange = Some(r);
        self
    }
    /// Plot window. Default: data bounds.
    #[inline]
    #[must_use]
    pub fn prange(mut self, w: Window) -> Self {
        self.cfg.prange = Some(w);
        self
    }
    /// Rectangular input cut applied before anything else. Default: none.
    #[inline]
    #[must_use]
    pub fn xycut(mut self, w: Window) -> Self {
        self.cfg.xycut = Some(w);
        self
    }
    /// Central tendency. Default `median`.
    #[inline]
    #[must_use]
    pub fn ystat(mut self, s: CentralStat) -> Self {
        self.cfg.ystat = s;
        self
    }
    /// Uncertainty. Default `std`.
    #[inline]
    #[must_use]
    pub fn estat(mut self, s: ErrorStat) -> Self {
        self.cfg.estat = s;
        self
    }
    /// Bootstrap resamples. Default 250.
    #[inline]
    #[must_use]
    pub fn resamples(mut self, n: usize) -> Self {
        self.resamples = n;
        self
    }
    /// Bootstrap seed. Default: OS entropy.
    #[inline]
    #[must_use]
    pub fn seed(mut self, s: u64) -> Self {
        self.cfg.seed = Some(s);
        self
    }
    /// Draw sigma lines at `±k·spread`. Default: none.
    #[inline]
    #[must_use]
    pub fn sigfact(mut self, k: f64) -> Self {
        self.cfg.sigfact = Some(k);
        self
    }
    /// Draw error bars. Default on.
    #[inline]
    #[must_use]
    pub fn error_bars(mut self, on: bool) -> Self {
        self.cfg.error_bars = on;
        self
    }
    /// Empty-bin policy. Default [`EmptyBins::Omit`].
    #[inline]
    #[must_use]
    pub fn empty_bins(mut self, policy: EmptyBins) -> Self {
        self.cfg.empty_bins = policy;
        self
    }
    /// Curve colour. Default red.
    #[inline]
    #[must_use]
    pub fn ccolor(mut self, c: AnsiCode) -> Self {
        self.cfg.ccolor = c;
        self
    }
    /// Scatter colour. Default grey.
    #[inline]
    #[must_use]
    pub fn pcolor(mut self, c: AnsiCode) -> Self {
        self.cfg.pcolor = c;
        self
    }
    /// Sigma-line colour. Default white.
    #[inline]
    #[must_use]
    pub fn sigcolor(mut self, c: AnsiCode) -> Self {
        self.cfg.sigcolor = c;
        self
    }
    #[inline]
    #[must_use]
    pub fn noscatter(mut self, on: bool) -> Self {
        self.cfg.noscatter = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn noplot(mut self, on: bool) -> Self {
        self.cfg.noplot = on;
        self
    }
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.cfg.title = t.into();
        self
    }
    /// Chart size in characters. Default: terminal size.
    #[inline]
    #[must_use]
    pub fn size(mut self, x_chars: usize, y_chars: usize) -> Self {
        self.cfg.size = Some((x_chars, y_chars));
        self
    }

    pub fn build(self) -> Result<TrendConfig, TrendError> {
        let mut cfg = self.cfg;
        if cfg.nbin == 0 {
            return Err(InputError::ZeroBins.into());
        }
        if let Some(r) = cfg.crange {
            if r.width() <= 0.0 || !r.width().is_finite() {
                return Err(TrendError::InvalidRange {
                    low: r.low,
                    high: r.high,
                });
            }
        }
        if let Some(k) = cfg.sigfact {
            if !k.is_finite() || k < 0.0 {
                return Err(InputError::SigmaFactor(k).into());
            }
        }
        cfg.bootstrap = Bootstrap::new(self.resamples)?;
        Ok(cfg)
    }
}

/// Ergonomic `?` on a builder chain.
impl From<TrendConfigBuilder> for Result<TrendConfig, TrendError> {
    fn from(b: TrendConfigBuilder) -> Self {
        b.build()
    }
}
