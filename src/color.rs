//! Color model so battery gradients and palettes stay legible on light and dark themes.
//!
//! Introduces `Rgb` with lossless `#rrggbb` conversion, perceptual brightness,
//! the asymmetric light/dark inversion, linear blending, and the two-segment
//! charge gradient used by the battery module.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::host::Appearance;

/// Pure red, the empty end of the charge gradient.
pub const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
/// Pure yellow, the midpoint of the charge gradient.
pub const YELLOW: Rgb = Rgb::new(0xff, 0xff, 0x00);
/// Pure green, the full end of the charge gradient.
pub const GREEN: Rgb = Rgb::new(0x00, 0xff, 0x00);

/// Brightness below which a color counts as dark.
const DARK_THRESHOLD: f64 = 128.0;
/// Share of the remaining distance to white added when lightening.
const LIGHTEN_FACTOR: f64 = 0.33;
/// Share of the channel value removed when darkening.
const DARKEN_FACTOR: f64 = 0.66;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building colors from text or raw channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not `#RRGGBB` or a channel falls outside `0..=255`.
    InvalidColorFormat { input: String, reason: &'static str },
    /// A color scheme lacks one of the 8-entry ANSI tables.
    IncompleteScheme { table: &'static str, found: usize },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColorFormat { input, reason } => {
                write!(f, "invalid color format {input:?}: {reason}")
            }
            Self::IncompleteScheme { table, found } => {
                write!(f, "color scheme table {table} has {found} entries, expected 8")
            }
        }
    }
}

impl std::error::Error for ColorError {}

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive, leading `#` required).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = |reason| ColorError::InvalidColorFormat {
            input: hex.to_string(),
            reason,
        };
        let digits = hex.strip_prefix('#').ok_or_else(|| invalid("missing leading '#'"))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("expected six hex digits"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid("bad hex channel"))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Build a color from fractional channels, rounding half away from zero and
    /// clamping into range.
    #[must_use]
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(round_channel(r), round_channel(g), round_channel(b))
    }

    /// Serialize to `#rrggbb` (lowercase).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceptual luminance in `0.0..=255.0`.
    #[must_use]
    pub fn brightness(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self.brightness() < DARK_THRESHOLD
    }

    /// Brightness-compensating transform for light themes.
    ///
    /// Dark colors move a third of the way toward white; light colors lose two
    /// thirds of their value. Applying it twice does not restore the input.
    #[must_use]
    pub fn invert(self, should_invert: bool) -> Self {
        if !should_invert {
            return self;
        }
        let map: fn(f64) -> f64 = if self.is_dark() {
            |c| c + (255.0 - c) * LIGHTEN_FACTOR
        } else {
            |c| c - c * DARKEN_FACTOR
        };
        Self::from_channels(
            map(f64::from(self.r)),
            map(f64::from(self.g)),
            map(f64::from(self.b)),
        )
    }

    /// Per-channel linear interpolation toward `other`; `factor` is clamped to `0..=1`.
    #[must_use]
    pub fn blend(self, other: Self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| f64::from(a) + (f64::from(b) - f64::from(a)) * factor;
        Self::from_channels(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    /// ANSI 24-bit foreground escape: `\x1b[38;2;R;G;Bm`.
    #[must_use]
    pub fn to_fg_escape(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// ANSI 24-bit background escape: `\x1b[48;2;R;G;Bm`.
    #[must_use]
    pub fn to_bg_escape(self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

fn round_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // f64::round rounds half away from zero.
    value.round().clamp(0.0, 255.0) as u8
}

/// Format fractional channels as `#rrggbb`.
#[must_use]
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::from_channels(r, g, b).to_hex()
}

// ---------------------------------------------------------------------------
// ColorModel
// ---------------------------------------------------------------------------

/// Session-wide color decisions, fixed once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorModel {
    invert: bool,
}

impl ColorModel {
    #[must_use]
    pub const fn new(invert: bool) -> Self {
        Self { invert }
    }

    /// Derive the inversion flag from the host appearance query.
    ///
    /// Only an explicit light appearance enables inversion; dark, unknown, or
    /// an unavailable query all leave colors untouched.
    #[must_use]
    pub fn detect(appearance: Option<Appearance>) -> Self {
        Self::new(auto_invert(appearance))
    }

    #[must_use]
    pub fn inverts(self) -> bool {
        self.invert
    }

    #[must_use]
    pub fn adjust(self, color: Rgb) -> Rgb {
        color.invert(self.invert)
    }

    /// Battery color for `charge` in `0..=1`, after the cached inversion.
    #[must_use]
    pub fn charge_color(self, charge: f64) -> Rgb {
        self.adjust(charge_gradient(charge))
    }
}

/// Whether the reported appearance calls for inverting dark-tuned colors.
#[must_use]
pub fn auto_invert(appearance: Option<Appearance>) -> bool {
    matches!(
        appearance,
        Some(Appearance::Light | Appearance::LightHighContrast)
    )
}

/// Two-segment red → yellow → green gradient, before inversion.
#[must_use]
pub fn charge_gradient(charge: f64) -> Rgb {
    let charge = if charge.is_nan() { 0.0 } else { charge.clamp(0.0, 1.0) };
    if charge <= 0.5 {
        RED.blend(YELLOW, charge / 0.5)
    } else {
        YELLOW.blend(GREEN, (charge - 0.5) / 0.5)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
