//! Conversion between canonical hex color strings and the HSB projection
//! used by the color picker.
//!
//! The hex string is always the source of truth, [`Hsb`] is recomputed from
//! it whenever the value changes.

use gpui::Rgba;

use crate::error::{ControlError, Result};

/// Shown when the bound color is empty.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Hue (0..360 degrees), saturation and brightness (0..100 percent) with an
/// optional alpha byte (0..=255).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsb {
    pub h: f32,
    pub s: f32,
    pub b: f32,
    pub a: Option<u8>,
}

impl Hsb {
    /// Result of decoding a malformed hex value.
    pub const FALLBACK: Self = Self {
        h: 0.,
        s: 0.,
        b: 0.,
        a: None,
    };

    pub fn new(h: f32, s: f32, b: f32) -> Self {
        Self { h, s, b, a: None }
    }

    pub fn alpha(mut self, a: Option<u8>) -> Self {
        self.a = a;
        self
    }

    /// Integer projection for display, hue wraps so 359.6 shows as 0.
    pub fn rounded(&self) -> (u16, u8, u8) {
        let h = self.h.round().rem_euclid(360.) as u16;
        let s = self.s.round().clamp(0., 100.) as u8;
        let b = self.b.round().clamp(0., 100.) as u8;
        (h, s, b)
    }
}

/// A parsed `#RRGGBB` / `#RRGGBBAA` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl HexColor {
    /// Parse 6 or 8 hex digits, with or without the leading `#`.
    pub fn parse(text: &str) -> Result<Self> {
        let body = text.strip_prefix('#').unwrap_or(text);
        if !matches!(body.len(), 6 | 8) || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ControlError::InvalidHex(text.to_string()));
        }

        // Only ASCII hex digits remain, byte slicing is safe.
        let byte = |ix: usize| u8::from_str_radix(&body[ix..ix + 2], 16);
        let channel = |ix: usize| byte(ix).map_err(|_| ControlError::InvalidHex(text.to_string()));

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if body.len() == 8 {
                Some(channel(6)?)
            } else {
                None
            },
        })
    }

    /// Uppercase canonical form.
    pub fn to_hex(&self) -> String {
        match self.a {
            Some(a) => format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, a),
            None => format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b),
        }
    }

    pub fn to_hsb(&self) -> Hsb {
        let r = self.r as f32 / 255.;
        let g = self.g as f32 / 255.;
        let b = self.b as f32 / 255.;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0. { 0. } else { delta / max };
        let h = if delta == 0. {
            0.
        } else if max == r {
            (g - b) / delta + if g < b { 6. } else { 0. }
        } else if max == g {
            (b - r) / delta + 2.
        } else {
            (r - g) / delta + 4.
        };

        Hsb {
            h: (h * 60.).rem_euclid(360.),
            s: s * 100.,
            b: max * 100.,
            a: self.a,
        }
    }

    pub fn from_hsb(hsb: Hsb) -> Self {
        let h = hsb.h.rem_euclid(360.) / 60.;
        let s = hsb.s.clamp(0., 100.) / 100.;
        let v = hsb.b.clamp(0., 100.) / 100.;

        let sextant = h.floor();
        let f = h - sextant;
        let p = v * (1. - s);
        let q = v * (1. - s * f);
        let t = v * (1. - s * (1. - f));

        // A tiny negative hue wraps to exactly 360.
        let (r, g, b) = match (sextant as u8) % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let to_byte = |c: f32| (c * 255.).round().clamp(0., 255.) as u8;
        Self {
            r: to_byte(r),
            g: to_byte(g),
            b: to_byte(b),
            a: hsb.a,
        }
    }

    /// Paint color, a missing alpha is opaque.
    pub fn to_rgba(&self) -> Rgba {
        Rgba {
            r: self.r as f32 / 255.,
            g: self.g as f32 / 255.,
            b: self.b as f32 / 255.,
            a: self.a.unwrap_or(u8::MAX) as f32 / 255.,
        }
    }
}

/// Decode a hex color, malformed input yields [`Hsb::FALLBACK`].
pub fn hex_to_hsb(hex: &str) -> Hsb {
    HexColor::parse(hex)
        .map(|color| color.to_hsb())
        .unwrap_or(Hsb::FALLBACK)
}

/// Encode HSB(A) as an uppercase hex string, alpha becomes a fourth byte.
pub fn hsb_to_hex(hsb: Hsb) -> String {
    HexColor::from_hsb(hsb).to_hex()
}

/// Canonical form of a typed hex value, `None` until the text is complete.
///
/// Eight digit input is only accepted while the alpha channel is enabled.
pub fn canonical_hex(text: &str, allow_alpha: bool) -> Option<String> {
    let color = HexColor::parse(text.trim()).ok()?;
    if color.a.is_some() && !allow_alpha {
        return None;
    }
    Some(color.to_hex())
}

/// Add (`FF` if missing) or strip the alpha byte of a hex value.
///
/// Malformed input is returned unchanged.
pub fn with_alpha(hex: &str, enabled: bool) -> String {
    match HexColor::parse(hex) {
        Ok(mut color) => {
            color.a = match (enabled, color.a) {
                (true, Some(a)) => Some(a),
                (true, None) => Some(u8::MAX),
                (false, _) => None,
            };
            color.to_hex()
        }
        Err(_) => hex.to_string(),
    }
}

/// Map a pointer inside the saturation/brightness rectangle.
///
/// `x`/`y` are relative to the rectangle origin and clamped to its bounds.
pub fn saturation_brightness_at(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    let s = fraction(x, width) * 100.;
    let b = 100. - fraction(y, height) * 100.;
    (s, b)
}

/// Map a pointer along the hue strip, the right edge wraps back to 0.
pub fn hue_at(x: f32, width: f32) -> f32 {
    (fraction(x, width) * 360.).rem_euclid(360.)
}

fn fraction(offset: f32, extent: f32) -> f32 {
    if extent <= 0. {
        return 0.;
    }
    offset.clamp(0., extent) / extent
}
