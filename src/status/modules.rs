//! Text providers for the right status: username, hostname, clock, and cwd.
//!
//! Each provider reads the tick context and returns empty text when the host
//! has nothing to report; the assembler then omits the module for that tick.

use std::path::Path;

use super::{ModuleText, StatusModule, TickContext};
use crate::options::ModuleName;

/// Login name of the current user.
pub struct UsernameModule;

impl StatusModule for UsernameModule {
    fn id(&self) -> ModuleName {
        ModuleName::Username
    }

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText {
        ModuleText::from_option(ctx.host.username().map(|name| name.trim().to_string()))
    }
}

/// Machine name, shortened to its first DNS label.
pub struct HostnameModule;

impl StatusModule for HostnameModule {
    fn id(&self) -> ModuleName {
        ModuleName::Hostname
    }

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText {
        ModuleText::from_option(ctx.host.hostname().map(|name| short_hostname(&name).to_string()))
    }
}

/// Local wall-clock time as `HH:MM`.
pub struct ClockModule;

impl StatusModule for ClockModule {
    fn id(&self) -> ModuleName {
        ModuleName::Clock
    }

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText {
        ModuleText::from_option(
            ctx.host
                .local_time()
                .map(|time| format!("{:02}:{:02}", time.hour, time.minute)),
        )
    }
}

/// Working directory of the active pane, shown relative to home.
pub struct CwdModule;

impl StatusModule for CwdModule {
    fn id(&self) -> ModuleName {
        ModuleName::Cwd
    }

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText {
        let home = dirs::home_dir();
        ModuleText::from_option(
            ctx.pane
                .current_working_dir()
                .map(|raw| display_cwd(&raw, home.as_deref())),
        )
    }
}

#[must_use]
pub fn short_hostname(name: &str) -> &str {
    let name = name.trim();
    name.split('.').next().unwrap_or(name)
}

/// Strip a `file://host` prefix and replace the home directory with `~`.
#[must_use]
pub fn display_cwd(raw: &str, home: Option<&Path>) -> String {
    let path = strip_file_uri(raw.trim());
    if let Some(home) = home {
        if let Ok(rel) = Path::new(path).strip_prefix(home) {
            if rel.as_os_str().is_empty() {
                return "~".to_string();
            }
            let sep = std::path::MAIN_SEPARATOR;
            return format!("~{sep}{}", rel.display());
        }
    }
    path.to_string()
}

fn strip_file_uri(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("file://") else {
        return raw;
    };
    match rest.find('/') {
        Some(idx) => &rest[idx..],
        None => "",
    }
}
