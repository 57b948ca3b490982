//! Status line assembly so each refresh tick turns module output into ordered segments.
//!
//! The left side is fixed (workspace or leader, then the foreground process).
//! The right side walks a registry of providers in declared order; every
//! provider can come up empty without leaving a stray separator behind.

mod battery;
mod modules;

pub use battery::{icon_for, icon_index, percentage, remaining_time, BatteryModule};
pub use modules::{
    display_cwd, short_hostname, ClockModule, CwdModule, HostnameModule, UsernameModule,
};

use crate::color::{ColorModel, Rgb};
use crate::host::{Host, Pane, Window};
use crate::options::{ModuleName, Modules, Options};
use crate::palette::Palette;
use crate::segment::{StatusLine, StyledSegment};
use crate::text::{base_name, spaces};

/// Read-only inputs handed to every provider for one tick.
pub struct TickContext<'a> {
    pub host: &'a dyn Host,
    pub pane: &'a dyn Pane,
    pub options: &'a Options,
    pub palette: &'a Palette,
    pub colors: ColorModel,
}

/// One run of provider text; `None` color means the module's palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub color: Option<Rgb>,
}

/// Provider output for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleText {
    runs: Vec<TextRun>,
}

impl ModuleText {
    /// Single run in the module color; empty input yields empty text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        let mut out = Self::default();
        out.push(text, None);
        out
    }

    #[must_use]
    pub fn from_option(text: Option<String>) -> Self {
        text.map(Self::plain).unwrap_or_default()
    }

    pub fn push(&mut self, text: impl Into<String>, color: Option<Rgb>) {
        let text = text.into();
        if !text.is_empty() {
            self.runs.push(TextRun { text, color });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[must_use]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Status-line contributor.
///
/// Providers must not panic on missing host data; they return empty text
/// instead and cache nothing between ticks.
pub trait StatusModule: Send + Sync {
    fn id(&self) -> ModuleName;

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText;
}

struct RegisteredModule {
    module: Box<dyn StatusModule>,
    enabled: bool,
}

/// Ordered provider list for the right status.
pub struct ModuleRegistry {
    modules: Vec<RegisteredModule>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Username, hostname, clock, battery, cwd; each switched by its options.
    pub fn with_defaults(modules: &Modules) -> Self {
        let mut registry = Self::new();
        for module in [
            Box::new(UsernameModule) as Box<dyn StatusModule>,
            Box::new(HostnameModule),
            Box::new(ClockModule),
            Box::new(BatteryModule),
            Box::new(CwdModule),
        ] {
            let enabled = modules.get(module.id()).enabled;
            registry.register(module, enabled);
        }
        registry
    }

    /// Append a provider; render order is registration order.
    pub fn register(&mut self, module: Box<dyn StatusModule>, enabled: bool) {
        self.modules.push(RegisteredModule { module, enabled });
    }

    /// Enabled providers in render order.
    pub fn enabled(&self) -> impl Iterator<Item = &dyn StatusModule> {
        self.modules
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.module.as_ref())
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ModuleName> {
        self.modules.iter().map(|entry| entry.module.id()).collect()
    }

}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the left and right status lines for one tick.
pub struct StatusLineAssembler<'a> {
    options: &'a Options,
    palette: &'a Palette,
    colors: ColorModel,
    registry: &'a ModuleRegistry,
}

impl<'a> StatusLineAssembler<'a> {
    #[must_use]
    pub fn new(
        options: &'a Options,
        palette: &'a Palette,
        colors: ColorModel,
        registry: &'a ModuleRegistry,
    ) -> Self {
        Self {
            options,
            palette,
            colors,
            registry,
        }
    }

    /// Background, padding, workspace (or leader), then foreground process.
    #[must_use]
    pub fn left(&self, window: &dyn Window, pane: &dyn Pane) -> StatusLine {
        let modules = &self.options.modules;
        let gap = spaces(self.options.separator.space as usize);
        let mut line = vec![
            self.segment(self.foreground(), ""),
            self.segment(self.foreground(), spaces(self.options.padding.left as usize)),
        ];

        if modules.workspace.enabled {
            match window.active_workspace().filter(|name| !name.is_empty()) {
                Some(name) => {
                    let module = if modules.leader.enabled && window.leader_is_active() {
                        &modules.leader
                    } else {
                        &modules.workspace
                    };
                    let text = format!("{}{gap}", self.labelled(&module.icon, &name));
                    line.push(self.segment(self.indexed(module.color), text));
                }
                None => tracing::debug!("no active workspace; omitting workspace segment"),
            }
        }

        if modules.pane.enabled {
            let process = pane
                .foreground_process_name()
                .map(|name| process_label(&name).to_string())
                .filter(|name| !name.is_empty());
            match process {
                Some(name) => {
                    let text = format!("{}{gap}", self.labelled(&modules.pane.icon, &name));
                    line.push(self.segment(self.indexed(modules.pane.color), text));
                }
                None => tracing::debug!("no foreground process; omitting pane segment"),
            }
        }

        line
    }

    /// Background, each non-empty enabled module followed by a field
    /// separator (minus the last one), then right padding.
    #[must_use]
    pub fn right(&self, host: &dyn Host, pane: &dyn Pane) -> StatusLine {
        let ctx = TickContext {
            host,
            pane,
            options: self.options,
            palette: self.palette,
            colors: self.colors,
        };
        let separator = &self.options.separator;
        let gap = spaces(separator.space as usize);
        let field = format!("{gap}{}{gap}", separator.field_icon);

        let mut line = vec![self.segment(self.foreground(), "")];
        let mut trailing_separator = false;
        for module in self.registry.enabled() {
            let text = module.render(&ctx);
            if text.is_empty() {
                continue;
            }
            let settings = self.options.modules.get(module.id());
            let module_color = self.indexed(settings.color);
            for (idx, run) in text.runs().iter().enumerate() {
                let body = if idx == 0 {
                    self.labelled(&settings.icon, &run.text)
                } else {
                    run.text.clone()
                };
                line.push(self.segment(run.color.unwrap_or(module_color), body));
            }
            line.push(self.segment(self.colors.adjust(self.palette.dim()), field.clone()));
            trailing_separator = true;
        }
        if trailing_separator {
            line.pop();
        }

        line.push(self.segment(
            self.foreground(),
            spaces(self.options.padding.right as usize),
        ));
        line
    }

    fn foreground(&self) -> Rgb {
        self.colors.adjust(self.palette.foreground)
    }

    /// Palette slot after inversion; runs that carry their own color skip this.
    fn indexed(&self, index: u8) -> Rgb {
        self.colors.adjust(self.palette.indexed(index))
    }

    fn segment(&self, foreground: Rgb, text: impl Into<String>) -> StyledSegment {
        StyledSegment::new(self.palette.background, foreground, text)
    }

    fn labelled(&self, icon: &str, text: &str) -> String {
        if icon.is_empty() {
            text.to_string()
        } else {
            let gap = spaces(self.options.separator.space as usize);
            format!("{icon}{gap}{text}")
        }
    }
}

/// Base name of a process path with any `.exe` suffix removed.
#[must_use]
pub fn process_label(name: &str) -> &str {
    let base = base_name(name.trim());
    base.strip_suffix(".exe").unwrap_or(base)
}

#[cfg(test)]
mod tests;
