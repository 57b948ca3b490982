//! Host accessors backed by the local machine so the CLI renders real status data.
//!
//! Battery data comes from sysfs, appearance from `TABSTRIP_APPEARANCE` or
//! `COLORFGBG`, and the pane is the shell that launched us.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tabstrip::host::{
    Appearance, Host, LocalTime, Pane, PowerCondition, PowerSourceReading, Window,
};
use tabstrip::palette::{builtin_scheme, ColorScheme, BUILTIN_DARK, BUILTIN_LIGHT};
use tabstrip::{StatusLine, StyledSegment};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

pub(crate) struct LocalHost {
    power_supply_dir: PathBuf,
}

impl LocalHost {
    pub(crate) fn new() -> Self {
        Self {
            power_supply_dir: PathBuf::from(POWER_SUPPLY_DIR),
        }
    }

    /// `TABSTRIP_COLOR_SCHEME` when set, else the built-in matching the appearance.
    pub(crate) fn scheme_name(&self) -> String {
        if let Ok(name) = env::var("TABSTRIP_COLOR_SCHEME") {
            if !name.trim().is_empty() {
                return name;
            }
        }
        match self.appearance() {
            Some(Appearance::Light | Appearance::LightHighContrast) => BUILTIN_LIGHT.to_string(),
            _ => BUILTIN_DARK.to_string(),
        }
    }
}

impl Host for LocalHost {
    fn power_sources(&self) -> Vec<PowerSourceReading> {
        read_power_sources(&self.power_supply_dir)
    }

    fn color_scheme(&self, name: &str) -> Option<ColorScheme> {
        builtin_scheme(name)
    }

    fn appearance(&self) -> Option<Appearance> {
        if let Ok(label) = env::var("TABSTRIP_APPEARANCE") {
            return Some(Appearance::from_label(&label));
        }
        env::var("COLORFGBG")
            .ok()
            .and_then(|value| appearance_from_colorfgbg(&value))
    }

    fn hostname(&self) -> Option<String> {
        system_hostname()
    }

    fn username(&self) -> Option<String> {
        env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .ok()
            .filter(|name| !name.trim().is_empty())
    }

    fn local_time(&self) -> Option<LocalTime> {
        system_local_time()
    }
}

/// Window stand-in that keeps whatever status the plugin last set.
#[derive(Debug, Default)]
pub(crate) struct LocalWindow {
    pub(crate) workspace: Option<String>,
    pub(crate) leader: bool,
    pub(crate) left: StatusLine,
    pub(crate) right: StatusLine,
}

impl Window for LocalWindow {
    fn active_workspace(&self) -> Option<String> {
        self.workspace.clone()
    }

    fn leader_is_active(&self) -> bool {
        self.leader
    }

    fn set_left_status(&mut self, segments: Vec<StyledSegment>) {
        self.left = segments;
    }

    fn set_right_status(&mut self, segments: Vec<StyledSegment>) {
        self.right = segments;
    }
}

/// The invoking shell, treated as the active pane.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocalPane {
    process: Option<String>,
    cwd: Option<String>,
}

impl LocalPane {
    pub(crate) fn detect() -> Self {
        let cwd = env::current_dir()
            .ok()
            .map(|dir| dir.display().to_string());
        Self {
            process: parent_process_name(),
            cwd,
        }
    }
}

impl Pane for LocalPane {
    fn foreground_process_name(&self) -> Option<String> {
        self.process.clone()
    }

    fn current_working_dir(&self) -> Option<String> {
        self.cwd.clone()
    }
}

// ---------------------------------------------------------------------------
// Appearance
// ---------------------------------------------------------------------------

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); light backgrounds are
/// index 7 and 9..=15.
fn appearance_from_colorfgbg(value: &str) -> Option<Appearance> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match background {
        7 | 9..=15 => Appearance::Light,
        _ => Appearance::Dark,
    })
}

// ---------------------------------------------------------------------------
// Power supply
// ---------------------------------------------------------------------------

fn read_power_sources(root: &Path) -> Vec<PowerSourceReading> {
    let Ok(entries) = fs::read_dir(root) else {
        tracing::debug!(path = %root.display(), "power supply directory unavailable");
        return Vec::new();
    };
    let mut supplies: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .collect();
    supplies.sort();
    supplies.iter().filter_map(|dir| read_battery(dir)).collect()
}

fn read_battery(dir: &Path) -> Option<PowerSourceReading> {
    if read_attr(dir, "type")? != "Battery" {
        return None;
    }
    let capacity = read_number(dir, "capacity")?;
    let charge = (capacity / 100.0).clamp(0.0, 1.0);
    let condition = match read_attr(dir, "status").as_deref() {
        Some("Charging") => PowerCondition::Charging,
        Some("Discharging") if charge <= 0.0 => PowerCondition::Empty,
        Some("Discharging") => PowerCondition::Discharging,
        Some("Full") => PowerCondition::Full,
        _ => PowerCondition::Unknown,
    };
    Some(PowerSourceReading {
        condition,
        charge,
        remaining_seconds: remaining_seconds(dir, condition),
    })
}

/// Seconds until empty (discharging) or full (charging), from either the
/// energy/power or the charge/current attribute family.
fn remaining_seconds(dir: &Path, condition: PowerCondition) -> Option<u64> {
    let (now, full, rate) = ["energy", "charge"].iter().find_map(|family| {
        let rate_attr = if *family == "energy" { "power_now" } else { "current_now" };
        Some((
            read_number(dir, &format!("{family}_now"))?,
            read_number(dir, &format!("{family}_full"))?,
            read_number(dir, rate_attr)?,
        ))
    })?;
    if rate <= 0.0 {
        return None;
    }
    let hours = match condition {
        PowerCondition::Discharging => now / rate,
        PowerCondition::Charging => (full - now).max(0.0) / rate,
        _ => return None,
    };
    Some((hours * 3600.0).round() as u64)
}

fn read_attr(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name))
        .ok()
        .map(|raw| raw.trim().to_string())
}

fn read_number(dir: &Path, name: &str) -> Option<f64> {
    read_attr(dir, name)?.parse().ok()
}

// ---------------------------------------------------------------------------
// Process and system queries
// ---------------------------------------------------------------------------

#[cfg(target_os = "linux")]
fn parent_process_name() -> Option<String> {
    // SAFETY: `getppid` takes no arguments and cannot fail.
    let ppid = unsafe { libc::getppid() };
    let name = fs::read_to_string(format!("/proc/{ppid}/comm")).ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(not(target_os = "linux"))]
fn parent_process_name() -> Option<String> {
    env::var("SHELL").ok()
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: the pointer and length describe a writable stack buffer that
    // outlives the call.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }
    let end = buf.iter().position(|byte| *byte == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
    env::var("COMPUTERNAME").ok()
}

#[cfg(unix)]
fn system_local_time() -> Option<LocalTime> {
    // SAFETY: `time` accepts a null output pointer, and `localtime_r` writes
    // only into the zero-initialized `tm` we own.
    unsafe {
        let now = libc::time(std::ptr::null_mut());
        let mut tm: libc::tm = std::mem::zeroed();
        if libc::localtime_r(&now, &mut tm).is_null() {
            return None;
        }
        Some(LocalTime {
            hour: u8::try_from(tm.tm_hour).ok()?,
            minute: u8::try_from(tm.tm_min).ok()?,
        })
    }
}

#[cfg(not(unix))]
fn system_local_time() -> Option<LocalTime> {
    None
}
