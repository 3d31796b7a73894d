//! Drawing side: the [`Plotter`] seam, the braille backend and the assembler
//! that turns a trend curve into plot calls.

pub mod assemble;
pub mod braille;
pub mod frame;

use crate::core::{bounds::Window, color::AnsiCode, error::TrendError};

pub use assemble::assemble;
pub use braille::{Canvas, Layer};
pub use frame::{BraillePlotter, Renderer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// Minimal surface a plotting backend has to offer.
///
/// Calls arrive in drawing order; nothing is expected on screen before
/// [`Plotter::finish`].
pub trait Plotter {
    fn scatter(&mut self, x: &[f64], y: &[f64], color: AnsiCode);
    fn line(&mut self, x: &[f64], y: &[f64], color: AnsiCode, style: LineStyle);
    fn markers(&mut self, x: &[f64], y: &[f64], color: AnsiCode);
    /// Symmetric vertical bars `y ± err`.
    fn error_bars(&mut self, x: &[f64], y: &[f64], err: &[f64], color: AnsiCode);
    /// Visible area.
    fn limits(&mut self, window: Window);
    fn finish(&mut self) -> Result<(), TrendError>;
}
