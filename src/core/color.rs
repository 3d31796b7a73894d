//! Zero-alloc ANSI colour wrapper for curve, scatter and sigma layers.

use std::{fmt, str};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
    #[error("grey level must lie in [0, 1], got {0}")]
    InvalidGreyLevel(f64),
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

impl AnsiCode {
    pub const fn black() -> Self {
        Self::Static("\x1b[30m")
    }
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn grey() -> Self {
        Self::Static("\x1b[38;2;128;128;128m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            #[allow(clippy::cast_possible_truncation)]
            len: len as u8,
        }
    }

    /// Grey ramp from a fraction, `0.0` black to `1.0` white.
    pub fn grey_level(level: f64) -> Result<Self, ColorError> {
        if !(0.0..=1.0).contains(&level) {
            return Err(ColorError::InvalidGreyLevel(level));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (level * 255.0).round() as u8;
        Ok(Self::rgb(v, v, v))
    }

    /// Parse colour names, grey fractions like `"0.5"`, or `#rrggbb`.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" | "k" => Ok(Self::black()),
            "red" | "r" => Ok(Self::red()),
            "green" | "g" => Ok(Self::green()),
            "yellow" | "y" => Ok(Self::yellow()),
            "blue" | "b" => Ok(Self::blue()),
            "magenta" | "m" => Ok(Self::magenta()),
            "cyan" | "c" => Ok(Self::cyan()),
            "white" | "w" => Ok(Self::white()),
            "grey" | "gray" => Ok(Self::grey()),
            _ => match s.parse::<f64>() {
                Ok(level) => Self::grey_level(level),
                Err(_) => Self::from_hex(s),
            },
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim_start_matches('#');
        if !h.is_ascii() {
            return Err(ColorError::InvalidHexDigit);
        }
        if h.len() != 6 {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or_default(),
        }
    }
}

impl str::FromStr for AnsiCode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl From<AnsiCode> for String {
    #[inline]
    fn from(c: AnsiCode) -> Self {
        c.as_str().to_owned()
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}
