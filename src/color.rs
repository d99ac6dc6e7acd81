//! RGB and HSL color values.
//!
//! `Rgb` is the working representation; the only serialized form is the hex
//! string `#rrggbb`. HSL components are kept as floats so that an
//! RGB -> HSL -> RGB trip lands back on the same bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RasterError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Color {
    Rgb(Rgb),
    Hsl(Hsl),
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self { r: level, g: level, b: level }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn from_hex(hex: &str) -> Result<Rgb> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| RasterError::InvalidColor(format!("`{hex}` is missing the leading '#'")))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RasterError::InvalidColor(format!("`{hex}` is not of the form #rrggbb")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| RasterError::InvalidColor(format!("`{hex}`: {e}")))
        };
        Ok(Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// RGBA bytes with an opaque alpha, the layout `ScreenSpace` stores.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = RasterError;
    fn from_str(s: &str) -> Result<Rgb> {
        Rgb::from_hex(s.trim())
    }
}

impl TryFrom<String> for Rgb {
    type Error = RasterError;
    fn try_from(s: String) -> Result<Rgb> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex()
    }
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Result<Hsl> {
        let hsl = Hsl { h, s, l };
        hsl.validate()?;
        Ok(hsl)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..360.0).contains(&self.h) {
            return Err(RasterError::InvalidColor(format!("hue {} outside [0, 360)", self.h)));
        }
        if !(0.0..=100.0).contains(&self.s) {
            return Err(RasterError::InvalidColor(format!("saturation {} outside [0, 100]", self.s)));
        }
        if !(0.0..=100.0).contains(&self.l) {
            return Err(RasterError::InvalidColor(format!("lightness {} outside [0, 100]", self.l)));
        }
        Ok(())
    }

    /// Whole-number components for display, as a color picker would show them.
    pub fn rounded(self) -> (u16, u8, u8) {
        let h = (self.h.round() as u16) % 360;
        (h, self.s.round() as u8, self.l.round() as u8)
    }
}

impl Color {
    pub fn to_rgb(self) -> Result<Rgb> {
        match self {
            Color::Rgb(rgb) => Ok(rgb),
            Color::Hsl(hsl) => {
                hsl.validate()?;
                Ok(hsl_to_rgb(hsl))
            }
        }
    }

    pub fn to_hsl(self) -> Result<Hsl> {
        match self {
            Color::Rgb(rgb) => Ok(rgb_to_hsl(rgb)),
            Color::Hsl(hsl) => {
                hsl.validate()?;
                Ok(hsl)
            }
        }
    }

    pub fn to_hex(self) -> Result<String> {
        Ok(self.to_rgb()?.to_hex())
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c)
    }
}

impl From<Hsl> for Color {
    fn from(c: Hsl) -> Self {
        Color::Hsl(c)
    }
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let delta = max - min;
    let s = if l > 0.5 { delta / (2.0 - max - min) } else { delta / (max + min) };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl { h: (h * 60.0) % 360.0, s: s * 100.0, l: l * 100.0 }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    let to_byte = |v: f64| (v * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        return Rgb::gray(to_byte(l));
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = hsl.h / 360.0;
    Rgb {
        r: to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_byte(hue_to_channel(p, q, h)),
        b: to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
