//! Boxed braille chart writer plus the [`Plotter`] backend built on it.
//!
//! ```text
//! ┌──── title ────┐
//! │               │
//! │ hi ⠀⠀⡠⠔⠊⠉⠀⠀⠀⠀│
//! │    ⠀⡔⠁⠀⠀⠀⠀⠀⠀⠀│
//! │ lo ⠜⠀⠀⠀⠀⠀⠀⠀⠀⠀│
//! │               │
//! └─ x lo to hi ──┘
//! ```

use std::io::{Stdout, Write, stdout};

use crate::{
    core::{
        bounds::{Range, Window, graph_dims, terminal_geometry, y_label_width},
        color::{AnsiCode, colorize},
        constants::{DECIMAL_PRECISION, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
        error::TrendError,
    },
    render::{
        LineStyle, Plotter,
        braille::{Canvas, Layer},
    },
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

// --- Helpers ---

/// Write centred colored text between horizontal rules.
fn push_centered(buf: &mut String, text: &str, width: usize, color: &AnsiCode) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  "); // 2-char left padding
    buf.push_str(&colorize(color, text));
    buf.push(' '); // 1-char right padding
    buf.push_str(&H.repeat(pad_right));
}

/// Stateless chart writer: chrome, y labels and the canvas rows.
pub struct Renderer<'a> {
    title: &'a str,
    subtitle: Option<String>,
    accent: AnsiCode,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            subtitle: None,
            accent: AnsiCode::white(),
        }
    }

    #[must_use]
    pub fn subtitle(mut self, s: impl Into<String>) -> Self {
        self.subtitle = Some(s.into());
        self
    }

    /// Build the whole frame in memory, then write it in one go.
    pub fn render<W: Write>(&self, out: &mut W, canvas: &Canvas) -> Result<(), TrendError> {
        let (x_chars, y_chars) = (canvas.x_chars(), canvas.y_chars());
        if x_chars < MIN_GRAPH_WIDTH || y_chars < MIN_GRAPH_HEIGHT {
            return Err(TrendError::GraphTooSmall {
                want_w: MIN_GRAPH_WIDTH,
                want_h: MIN_GRAPH_HEIGHT,
                got_w: x_chars,
                got_h: y_chars,
            });
        }

        let y_range = canvas.window().y;
        let high_label = format!("{:.*}", DECIMAL_PRECISION, y_range.high);
        let low_label = format!("{:.*}", DECIMAL_PRECISION, y_range.low);
        let label_width = y_label_width(y_range, DECIMAL_PRECISION);
        let inner = x_chars + label_width + LABEL_GUTTER;

        let mut frame = Vec::<u8>::with_capacity((inner * 3 + 32) * (y_chars + 4));

        // --- top ---
        let mut top = String::new();
        top.push_str(TL);
        push_centered(&mut top, self.title, inner, &self.accent);
        top.push_str(TR);
        top.push('\n');
        push_blank(&mut top, inner);
        frame.extend_from_slice(top.as_bytes());

        // --- rows ---
        for row in 0..y_chars {
            let label = match row {
                0 => high_label.as_str(),
                r if r == y_chars - 1 => low_label.as_str(),
                _ => "",
            };
            frame.extend_from_slice(V.as_bytes());
            frame.extend_from_slice(format!("{label:>label_width$}").as_bytes());
            frame.extend(std::iter::repeat_n(b' ', LABEL_GUTTER));
            canvas.encode_row(row, &mut frame);
            frame.extend_from_slice(V.as_bytes());
            frame.push(b'\n');
        }

        // --- bottom ---
        let mut bot = String::new();
        push_blank(&mut bot, inner);
        bot.push_str(BL);
        match &self.subtitle {
            Some(sub) => push_centered(&mut bot, sub, inner, &self.accent),
            None => bot.push_str(&H.repeat(inner)),
        }
        bot.push_str(BR);
        bot.push('\n');
        frame.extend_from_slice(bot.as_bytes());

        out.write_all(&frame)?;
        out.flush()?;
        Ok(())
    }
}

fn push_blank(buf: &mut String, inner: usize) {
    buf.push_str(V);
    buf.push_str(&" ".repeat(inner));
    buf.push_str(V);
    buf.push('\n');
}

// --- Plotter backend ---

enum Stroke {
    Points { xs: Vec<f64>, ys: Vec<f64>, color: AnsiCode },
    Markers { xs: Vec<f64>, ys: Vec<f64>, color: AnsiCode },
    Line { xs: Vec<f64>, ys: Vec<f64>, color: AnsiCode, style: LineStyle },
    Bars { xs: Vec<f64>, ys: Vec<f64>, errs: Vec<f64>, color: AnsiCode },
}

/// Terminal braille plotter.
///
/// Strokes are recorded as they arrive and rasterised in [`Plotter::finish`],
/// once the limits are known.
pub struct BraillePlotter<W: Write> {
    out: W,
    title: String,
    size: Option<(usize, usize)>,
    limits: Option<Window>,
    strokes: Vec<Stroke>,
}

impl BraillePlotter<Stdout> {
    #[must_use]
    pub fn stdout(title: impl Into<String>) -> Self {
        Self::new(stdout(), title)
    }
}

impl<W: Write> BraillePlotter<W> {
    #[must_use]
    pub fn new(out: W, title: impl Into<String>) -> Self {
        Self {
            out,
            title: title.into(),
            size: None,
            limits: None,
            strokes: Vec::new(),
        }
    }

    /// Fix the graph area to `x_chars × y_chars`; terminal size otherwise.
    #[must_use]
    pub fn size(mut self, x_chars: usize, y_chars: usize) -> Self {
        self.size = Some((x_chars, y_chars));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Limits if set, otherwise the extent of everything drawn.
    fn window(&self) -> Window {
        if let Some(w) = self.limits {
            return w.padded();
        }
        let (mut all_x, mut all_y) = (Vec::new(), Vec::new());
        for s in &self.strokes {
            let (sx, sy) = match s {
                Stroke::Points { xs, ys, .. }
                | Stroke::Markers { xs, ys, .. }
                | Stroke::Line { xs, ys, .. }
                | Stroke::Bars { xs, ys, .. } => (xs, ys),
            };
            all_x.extend(sx.iter().copied().filter(|v| v.is_finite()));
            all_y.extend(sy.iter().copied().filter(|v| v.is_finite()));
        }
        Window {
            x: Range::spanning(&all_x).unwrap_or_default(),
            y: Range::spanning(&all_y).unwrap_or_default(),
        }
        .padded()
    }

    fn rasterise(&self, canvas: &mut Canvas) {
        for s in &self.strokes {
            match s {
                Stroke::Points { xs, ys, color } => {
                    for (&x, &y) in xs.iter().zip(ys) {
                        canvas.point(x, y, Layer::Scatter, *color);
                    }
                }
                Stroke::Markers { xs, ys, color } => {
                    for (&x, &y) in xs.iter().zip(ys) {
                        canvas.marker(x, y, Layer::Curve, *color);
                    }
                }
                Stroke::Line { xs, ys, color, style } => {
                    let (layer, dashed) = match style {
                        LineStyle::Solid => (Layer::Curve, false),
                        LineStyle::Dashed => (Layer::Sigma, true),
                    };
                    canvas.polyline(xs, ys, layer, *color, dashed);
                }
                Stroke::Bars { xs, ys, errs, color } => {
                    for ((&x, &y), &e) in xs.iter().zip(ys).zip(errs) {
                        canvas.error_bar(x, y, e, Layer::ErrorBar, *color);
                    }
                }
            }
        }
    }
}

impl<W: Write> Plotter for BraillePlotter<W> {
    fn scatter(&mut self, x: &[f64], y: &[f64], color: AnsiCode) {
        self.strokes.push(Stroke::Points {
            xs: x.to_vec(),
            ys: y.to_vec(),
            color,
        });
    }

    fn line(&mut self, x: &[f64], y: &[f64], color: AnsiCode, style: LineStyle) {
        self.strokes.push(Stroke::Line {
            xs: x.to_vec(),
            ys: y.to_vec(),
            color,
            style,
        });
    }

    fn markers(&mut self, x: &[f64], y: &[f64], color: AnsiCode) {
        self.strokes.push(Stroke::Markers {
            xs: x.to_vec(),
            ys: y.to_vec(),
            color,
        });
    }

    fn error_bars(&mut self, x: &[f64], y: &[f64], err: &[f64], color: AnsiCode) {
        self.strokes.push(Stroke::Bars {
            xs: x.to_vec(),
            ys: y.to_vec(),
            errs: err.to_vec(),
            color,
        });
    }

    fn limits(&mut self, window: Window) {
        self.limits = Some(window);
    }

    fn finish(&mut self) -> Result<(), TrendError> {
        let window = self.window();
        let (x_chars, y_chars) = self.size.unwrap_or_else(|| {
            graph_dims(
                terminal_geometry(),
                y_label_width(window.y, DECIMAL_PRECISION),
            )
        });
        log::debug!(
            "rendering {x_chars}x{y_chars} chars over x [{}, {}] y [{}, {}]",
            window.x.low,
            window.x.high,
            window.y.low,
            window.y.high,
        );

        if x_chars < MIN_GRAPH_WIDTH || y_chars < MIN_GRAPH_HEIGHT {
            return Err(TrendError::GraphTooSmall {
                want_w: MIN_GRAPH_WIDTH,
                want_h: MIN_GRAPH_HEIGHT,
                got_w: x_chars,
                got_h: y_chars,
            });
        }

        let mut canvas = Canvas::new(x_chars, y_chars, window);
        self.rasterise(&mut canvas);

        let subtitle = format!(
            "x {:.p$} to {:.p$}",
            window.x.low,
            window.x.high,
            p = DECIMAL_PRECISION
        );
        Renderer::new(&self.title)
            .subtitle(subtitle)
            .render(&mut self.out, &canvas)?;
        self.strokes.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window {
        Window::new(0.0, 10.0, -2.0, 2.0).unwrap()
    }

    #[test]
    fn frame_has_chrome_labels_and_rows() {
        let canvas = Canvas::new(MIN_GRAPH_WIDTH, MIN_GRAPH_HEIGHT, window());
        let mut out = Vec::new();
        Renderer::new("Trend")
            .subtitle("x 0.0 to 10.0")
            .render(&mut out, &canvas)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), MIN_GRAPH_HEIGHT + 4);
        assert!(lines[0].starts_with(TL) && lines[0].contains("Trend"));
        assert!(lines[2].contains("2.0"));
        assert!(lines[MIN_GRAPH_HEIGHT + 1].contains("-2.0"));
        assert!(lines.last().unwrap().contains("x 0.0 to 10.0"));
    }

    #[test]
    fn too_small_graph_is_an_error() {
        let canvas = Canvas::new(MIN_GRAPH_WIDTH - 1, MIN_GRAPH_HEIGHT, window());
        let err = Renderer::new("t").render(&mut Vec::new(), &canvas).unwrap_err();
        assert!(matches!(err, TrendError::GraphTooSmall { got_w, .. } if got_w == MIN_GRAPH_WIDTH - 1));
    }

    #[test]
    fn plotter_renders_recorded_strokes() {
        let mut p = BraillePlotter::new(Vec::new(), "demo").size(20, 8);
        p.scatter(&[1.0, 2.0], &[0.5, -0.5], AnsiCode::grey());
        p.line(&[0.0, 10.0], &[0.0, 0.0], AnsiCode::red(), LineStyle::Solid);
        p.limits(window());
        p.finish().unwrap();
        let text = String::from_utf8(p.into_inner()).unwrap();
        assert!(text.contains("demo"));
        assert!(text.contains(AnsiCode::red().as_str()));
        assert!(text.contains(AnsiCode::grey().as_str()));
    }
}
