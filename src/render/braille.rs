//! Data-space strokes to a UTF-8 braille grid.
//!
//! ### Workflow
//! 1. A [`Canvas`] maps a data [`Window`] onto `x_chars × y_chars` braille
//!    cells, i.e. a `2·x_chars × 4·y_chars` dot grid with row 0 at the top.
//! 2. Points, segments and bars are rasterised into per-cell dot masks.
//!    Segments are clipped to the window first, then walked with Bresenham.
//! 3. [`Canvas::encode_row`] writes each cell as three UTF-8 bytes. Every
//!    braille scalar U+2800..U+28FF encodes to the fixed pattern
//!    `E2  A0|((mask>>6)&3)  80|(mask&0x3F)`, so no `char::encode_utf8` is needed.
//!
//! Each cell keeps the colour of the highest [`Layer`] that touched it.

use crate::core::{
    bounds::Window,
    color::AnsiCode,
    constants::{BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR},
};

/// Dot bits of the left half-column, top to bottom (dots 1, 2, 3, 7).
const LEFT_DOTS: [u8; VR] = [0x01, 0x02, 0x04, 0x40];
/// Dot bits of the right half-column, top to bottom (dots 4, 5, 6, 8).
const RIGHT_DOTS: [u8; VR] = [0x08, 0x10, 0x20, 0x80];

/// Dots drawn then skipped along a dashed segment.
const DASH: usize = 2;

/// Draw order for colour resolution; later variants win a shared cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Scatter,
    Sigma,
    ErrorBar,
    Curve,
}

#[derive(Clone, Copy, Default)]
struct Cell {
    mask: u8,
    ink: Option<(Layer, AnsiCode)>,
}

pub struct Canvas {
    x_chars: usize,
    y_chars: usize,
    window: Window,
    cells: Vec<Cell>,
}

impl Canvas {
    /// `window` should have non-zero width on both axes (see [`Window::padded`]).
    #[must_use]
    pub fn new(x_chars: usize, y_chars: usize, window: Window) -> Self {
        Self {
            x_chars,
            y_chars,
            window,
            cells: vec![Cell::default(); x_chars * y_chars],
        }
    }

    #[inline]
    #[must_use]
    pub fn x_chars(&self) -> usize {
        self.x_chars
    }

    #[inline]
    #[must_use]
    pub fn y_chars(&self) -> usize {
        self.y_chars
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> Window {
        self.window
    }

    #[inline]
    fn width_px(&self) -> usize {
        self.x_chars * HR
    }

    #[inline]
    fn height_px(&self) -> usize {
        self.y_chars * VR
    }

    /// λ : window → continuous dot coordinates, y flipped so row 0 is the top.
    #[allow(clippy::cast_precision_loss)]
    fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let (wx, wy) = (self.window.x, self.window.y);
        let px = (x - wx.low) / wx.width() * self.width_px().saturating_sub(1) as f64;
        let py = (wy.high - y) / wy.width() * self.height_px().saturating_sub(1) as f64;
        (px, py)
    }

    /// Light one dot; anything off-grid is dropped.
    fn dot(&mut self, px: i64, py: i64, layer: Layer, color: AnsiCode) {
        let (Ok(px), Ok(py)) = (usize::try_from(px), usize::try_from(py)) else {
            return;
        };
        if px >= self.width_px() || py >= self.height_px() {
            return;
        }
        let cell = &mut self.cells[(py / VR) * self.x_chars + px / HR];
        cell.mask |= if px % HR == 0 {
            LEFT_DOTS[py % VR]
        } else {
            RIGHT_DOTS[py % VR]
        };
        if cell.ink.is_none_or(|(held, _)| layer >= held) {
            cell.ink = Some((layer, color));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rounded(&self, x: f64, y: f64) -> (i64, i64) {
        let (px, py) = self.to_px(x, y);
        (px.round() as i64, py.round() as i64)
    }

    /// A single dot at a data point. Non-finite or out-of-window points are skipped.
    pub fn point(&mut self, x: f64, y: f64, layer: Layer, color: AnsiCode) {
        if !x.is_finite() || !y.is_finite() || !self.window.contains(x, y) {
            return;
        }
        let (px, py) = self.rounded(x, y);
        self.dot(px, py, layer, color);
    }

    /// A plus-shaped marker centred on a data point.
    pub fn marker(&mut self, x: f64, y: f64, layer: Layer, color: AnsiCode) {
        if !x.is_finite() || !y.is_finite() || !self.window.contains(x, y) {
            return;
        }
        let (px, py) = self.rounded(x, y);
        for (dx, dy) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
            self.dot(px + dx, py + dy, layer, color);
        }
    }

    /// Straight segment between two data points, clipped to the window.
    pub fn segment(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        layer: Layer,
        color: AnsiCode,
        dashed: bool,
    ) {
        let Some((a, b)) = clip_segment(&self.window, from, to) else {
            return;
        };
        let (x0, y0) = self.rounded(a.0, a.1);
        let (x1, y1) = self.rounded(b.0, b.1);

        // Bresenham, all octants.
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        let mut step = 0usize;
        loop {
            if !dashed || (step / DASH) % 2 == 0 {
                self.dot(x, y, layer, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            step += 1;
        }
    }

    /// Polyline through consecutive points; segments touching a `NaN` are skipped.
    pub fn polyline(&mut self, xs: &[f64], ys: &[f64], layer: Layer, color: AnsiCode, dashed: bool) {
        let pts: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        if let [only] = pts.as_slice() {
            self.point(only.0, only.1, layer, color);
        }
        for pair in pts.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if [a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
                self.segment(a, b, layer, color, dashed);
            }
        }
    }

    /// Vertical bar `y ± err` at `x` with one-dot caps.
    pub fn error_bar(&mut self, x: f64, y: f64, err: f64, layer: Layer, color: AnsiCode) {
        if ![x, y, err].iter().all(|v| v.is_finite()) {
            return;
        }
        let (lo, hi) = (y - err.abs(), y + err.abs());
        self.segment((x, lo), (x, hi), layer, color, false);
        for cap in [lo, hi] {
            if self.window.contains(x, cap) {
                let (px, py) = self.rounded(x, cap);
                self.dot(px - 1, py, layer, color);
                self.dot(px + 1, py, layer, color);
            }
        }
    }

    /// Number of lit dots; handy for checks.
    #[must_use]
    pub fn lit(&self) -> usize {
        self.cells.iter().map(|c| c.mask.count_ones() as usize).sum()
    }

    /// Append one row of glyphs to `buf`, switching colour only when it changes.
    /// The row always ends with a reset sequence.
    pub fn encode_row(&self, row: usize, buf: &mut Vec<u8>) {
        let mut current: Option<AnsiCode> = None;
        for cell in &self.cells[row * self.x_chars..(row + 1) * self.x_chars] {
            let color = cell.ink.map(|(_, c)| c);
            if color.is_some() && color != current {
                if let Some(c) = color {
                    buf.extend_from_slice(c.as_str().as_bytes());
                }
                current = color;
            }
            let mask = cell.mask;
            // https://en.wikipedia.org/wiki/Braille_Patterns
            buf.push(0xE2);
            // Most significant two bits: the bottom left and right dots
            buf.push(0xA0 | ((mask >> 6) & 0x03));
            // Least significant six bits: the normal six dots
            buf.push(0x80 | (mask & 0x3F));
        }
        buf.extend_from_slice(AnsiCode::reset().as_str().as_bytes());
    }
}

/// Liang–Barsky clip of a segment against `window`.
fn clip_segment(
    window: &Window,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, x0 - window.x.low),
        (dx, window.x.high - x0),
        (-dy, y0 - window.y.low),
        (dy, window.y.high - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}
