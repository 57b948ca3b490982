//! Host contract so the engine consumes terminal state without depending on a real terminal.
//!
//! The tab bar host owns windows, panes, power sources, and color schemes.
//! Everything the renderer needs from it is expressed here as plain data plus
//! three narrow accessor traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::palette::{ColorScheme, TabBarColors};
use crate::segment::StyledSegment;

/// Appearance reported by the host windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    Dark,
    Light,
    DarkHighContrast,
    LightHighContrast,
    Unknown,
}

impl Appearance {
    /// Parse a host appearance label; unrecognized labels map to `Unknown`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            "light" => Self::Light,
            "darkhighcontrast" | "dark_high_contrast" => Self::DarkHighContrast,
            "lighthighcontrast" | "light_high_contrast" => Self::LightHighContrast,
            _ => Self::Unknown,
        }
    }
}

/// Battery state as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerCondition {
    Full,
    Empty,
    Charging,
    Discharging,
    Unknown,
}

/// One power source sample. Produced fresh on every query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSourceReading {
    pub condition: PowerCondition,
    /// State of charge in `0..=1`.
    pub charge: f64,
    pub remaining_seconds: Option<u64>,
}

/// Wall-clock time in the host's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
}

/// Process-wide host queries.
pub trait Host: Send + Sync {
    fn power_sources(&self) -> Vec<PowerSourceReading>;

    /// Look up a named color scheme; `None` when the name is unknown.
    fn color_scheme(&self, name: &str) -> Option<ColorScheme>;

    /// Current appearance; `None` when the query is unavailable.
    fn appearance(&self) -> Option<Appearance>;

    fn hostname(&self) -> Option<String>;

    fn username(&self) -> Option<String>;

    fn local_time(&self) -> Option<LocalTime>;
}

/// Window handle passed to the status callback.
pub trait Window {
    fn active_workspace(&self) -> Option<String>;

    /// Whether the leader key chord is currently armed.
    fn leader_is_active(&self) -> bool;

    fn set_left_status(&mut self, segments: Vec<StyledSegment>);

    fn set_right_status(&mut self, segments: Vec<StyledSegment>);
}

/// Pane handle passed to the status callback.
pub trait Pane {
    /// Foreground process name or path; `None` when it cannot be determined.
    fn foreground_process_name(&self) -> Option<String>;

    /// Working directory as a path or `file://` URI.
    fn current_working_dir(&self) -> Option<String>;
}

/// Tab identity handed to the title callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabInfo {
    /// Zero-based position in the tab bar.
    pub tab_index: usize,
    pub is_active: bool,
    /// Title explicitly assigned to the tab, empty when unset.
    pub tab_title: String,
    /// Title of the tab's active pane.
    pub active_pane_title: String,
}

impl TabInfo {
    /// Explicit tab title when set, otherwise the active pane title.
    #[must_use]
    pub fn raw_title(&self) -> &str {
        if self.tab_title.is_empty() {
            &self.active_pane_title
        } else {
            &self.tab_title
        }
    }
}

/// Pane identity as the host lists it alongside the tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneInfo {
    pub pane_id: u64,
    pub is_active: bool,
    pub title: String,
}

/// Everything the host passes to the title callback besides the tab itself.
///
/// Formatting only consults `max_width` and `hover`; the listings are carried
/// so handlers see the same arguments the host provides.
#[derive(Debug, Clone, Copy)]
pub struct TitleContext<'a> {
    pub tabs: &'a [TabInfo],
    pub panes: &'a [PaneInfo],
    pub config: &'a HostConfig,
    pub max_width: usize,
    pub hover: bool,
}

/// Host configuration fields the plugin reads and writes at apply time.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub color_scheme: Option<String>,
    pub tab_bar_at_bottom: bool,
    pub use_fancy_tab_bar: bool,
    pub tab_max_width: usize,
    pub status_update_interval: Duration,
    pub tab_bar_colors: Option<TabBarColors>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            color_scheme: None,
            tab_bar_at_bottom: false,
            use_fancy_tab_bar: true,
            tab_max_width: 16,
            status_update_interval: Duration::from_secs(1),
            tab_bar_colors: None,
        }
    }
}

/// Tab title callback as registered with the host.
pub type TabTitleHandler =
    Box<dyn Fn(&TabInfo, &TitleContext<'_>) -> Vec<StyledSegment> + Send + Sync>;

/// Status refresh callback as registered with the host.
pub type StatusHandler = Box<dyn Fn(&mut dyn Window, &dyn Pane) + Send + Sync>;

/// Host event hooks the plugin attaches its callbacks to.
pub trait EventRegistry {
    fn on_format_tab_title(&mut self, handler: TabTitleHandler);

    fn on_update_status(&mut self, handler: StatusHandler);
}
