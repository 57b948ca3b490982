//! Palette resolution so tab and status colors come from the host's active scheme.
//!
//! Schemes arrive from the host as hex strings. They are parsed once at apply
//! time into a `Palette`; an unknown or malformed scheme falls back to the
//! built-in dark scheme so later rendering never has to handle lookup failures.

use serde::{Deserialize, Serialize};

use crate::color::{ColorError, ColorModel, Rgb};
use crate::host::Host;
use crate::options::TabsOptions;

/// Name of the scheme used when the host's scheme cannot be resolved.
pub const BUILTIN_DARK: &str = "Tabstrip Dark";
/// Light companion scheme, offered by hosts that ship the built-ins.
pub const BUILTIN_LIGHT: &str = "Tabstrip Light";

const DARK_SCHEME: SchemeTable = SchemeTable {
    foreground: "#c0caf5",
    background: "#1a1b26",
    ansi: [
        "#15161e", "#f7768e", "#9ece6a", "#e0af68", "#7aa2f7", "#bb9af7", "#7dcfff", "#a9b1d6",
    ],
    brights: [
        "#414868", "#f7768e", "#9ece6a", "#e0af68", "#7aa2f7", "#bb9af7", "#7dcfff", "#c0caf5",
    ],
};

const LIGHT_SCHEME: SchemeTable = SchemeTable {
    foreground: "#3760bf",
    background: "#e1e2e7",
    ansi: [
        "#e9e9ed", "#f52a65", "#587539", "#8c6c3e", "#2e7de9", "#9854f1", "#007197", "#6172b0",
    ],
    brights: [
        "#a1a6c5", "#f52a65", "#587539", "#8c6c3e", "#2e7de9", "#9854f1", "#007197", "#3760bf",
    ],
};

struct SchemeTable {
    foreground: &'static str,
    background: &'static str,
    ansi: [&'static str; 8],
    brights: [&'static str; 8],
}

impl SchemeTable {
    fn to_scheme(&self) -> ColorScheme {
        ColorScheme {
            foreground: self.foreground.into(),
            background: self.background.into(),
            ansi: self.ansi.iter().map(|hex| (*hex).to_string()).collect(),
            brights: self.brights.iter().map(|hex| (*hex).to_string()).collect(),
        }
    }
}

/// A named color scheme as the host describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub foreground: String,
    pub background: String,
    pub ansi: Vec<String>,
    pub brights: Vec<String>,
}

/// Built-in schemes by name.
#[must_use]
pub fn builtin_scheme(name: &str) -> Option<ColorScheme> {
    match name {
        BUILTIN_DARK => Some(DARK_SCHEME.to_scheme()),
        BUILTIN_LIGHT => Some(LIGHT_SCHEME.to_scheme()),
        _ => None,
    }
}

/// Parsed scheme with a 16-entry indexed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
    pub ansi: [Rgb; 8],
    pub brights: [Rgb; 8],
}

impl Palette {
    pub fn from_scheme(scheme: &ColorScheme) -> Result<Self, ColorError> {
        Ok(Self {
            foreground: Rgb::from_hex(&scheme.foreground)?,
            background: Rgb::from_hex(&scheme.background)?,
            ansi: parse_table("ansi", &scheme.ansi)?,
            brights: parse_table("brights", &scheme.brights)?,
        })
    }

    /// The built-in dark palette. Failure here means the shipped table is corrupt.
    pub fn builtin() -> Result<Self, ColorError> {
        Self::from_scheme(&DARK_SCHEME.to_scheme())
    }

    /// Indices `0..=7` select `ansi`, `8..=15` select `brights`; anything else
    /// resolves to the foreground.
    #[must_use]
    pub fn indexed(&self, index: u8) -> Rgb {
        let index = usize::from(index);
        match index {
            0..=7 => self.ansi[index],
            8..=15 => self.brights[index - 8],
            _ => self.foreground,
        }
    }

    /// Muted color used for separators.
    #[must_use]
    pub fn dim(&self) -> Rgb {
        self.brights[0]
    }
}

fn parse_table(table: &'static str, entries: &[String]) -> Result<[Rgb; 8], ColorError> {
    if entries.len() != 8 {
        return Err(ColorError::IncompleteScheme {
            table,
            found: entries.len(),
        });
    }
    let mut parsed = [Rgb::new(0, 0, 0); 8];
    for (slot, hex) in parsed.iter_mut().zip(entries) {
        *slot = Rgb::from_hex(hex)?;
    }
    Ok(parsed)
}

/// Resolve the host's named scheme, falling back to the built-in palette when
/// the name is unset, unknown, or malformed.
pub fn resolve_palette(host: &dyn Host, scheme_name: Option<&str>) -> Result<Palette, ColorError> {
    let Some(name) = scheme_name else {
        return Palette::builtin();
    };
    let Some(scheme) = host.color_scheme(name) else {
        tracing::debug!(scheme = name, "color scheme unknown to host; using built-in");
        return Palette::builtin();
    };
    match Palette::from_scheme(&scheme) {
        Ok(palette) => Ok(palette),
        Err(err) => {
            tracing::warn!(scheme = name, error = %err, "color scheme malformed; using built-in");
            Palette::builtin()
        }
    }
}

/// Background/foreground pair for one tab state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabColors {
    pub bg: Rgb,
    pub fg: Rgb,
}

/// Tab bar colors written into the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabBarColors {
    pub background: Rgb,
    pub active_tab: TabColors,
    pub inactive_tab: TabColors,
    pub inactive_tab_hover: TabColors,
    pub new_tab: TabColors,
}

impl TabBarColors {
    /// Tab foregrounds pass through the cached inversion; the bar background
    /// stays the scheme's own.
    #[must_use]
    pub fn derive(palette: &Palette, tabs: &TabsOptions, colors: ColorModel) -> Self {
        let on_background = |index| TabColors {
            bg: palette.background,
            fg: colors.adjust(palette.indexed(index)),
        };
        Self {
            background: palette.background,
            active_tab: on_background(tabs.active_tab_fg),
            inactive_tab: on_background(tabs.inactive_tab_fg),
            inactive_tab_hover: on_background(tabs.active_tab_fg),
            new_tab: on_background(tabs.new_tab_fg),
        }
    }
}
