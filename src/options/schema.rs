//! Typed view of the recognized option keys and their shipped defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::OptionsWarning;

/// Widest padding or separator gap, in columns.
const MAX_SPACING: u32 = 64;

/// Tab bar placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    #[default]
    Bottom,
}

/// Status-line modules, in the order the schema declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleName {
    Workspace,
    Leader,
    Pane,
    Username,
    Hostname,
    Clock,
    Battery,
    Cwd,
}

impl ModuleName {
    pub const ALL: [Self; 8] = [
        Self::Workspace,
        Self::Leader,
        Self::Pane,
        Self::Username,
        Self::Hostname,
        Self::Clock,
        Self::Battery,
        Self::Cwd,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Leader => "leader",
            Self::Pane => "pane",
            Self::Username => "username",
            Self::Hostname => "hostname",
            Self::Clock => "clock",
            Self::Battery => "battery",
            Self::Cwd => "cwd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Padding {
    pub left: u32,
    pub right: u32,
}

impl Default for Padding {
    fn default() -> Self {
        Self { left: 1, right: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separator {
    /// Spaces placed on each side of an icon.
    pub space: u32,
    pub left_icon: String,
    pub right_icon: String,
    pub field_icon: String,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            space: 1,
            left_icon: "\u{f178}".into(),
            right_icon: "\u{f177}".into(),
            field_icon: "\u{e621}".into(),
        }
    }
}

/// Per-module switch, palette color, and icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOptions {
    pub enabled: bool,
    /// Index into the 16-color palette.
    pub color: u8,
    pub icon: String,
}

impl ModuleOptions {
    fn new(color: u8, icon: &str) -> Self {
        Self {
            enabled: true,
            color,
            icon: icon.into(),
        }
    }
}

/// Palette indices for tab bar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabsOptions {
    pub active_tab_fg: u8,
    pub inactive_tab_fg: u8,
    pub new_tab_fg: u8,
}

impl Default for TabsOptions {
    fn default() -> Self {
        Self {
            active_tab_fg: 4,
            inactive_tab_fg: 6,
            new_tab_fg: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modules {
    pub tabs: TabsOptions,
    pub workspace: ModuleOptions,
    pub leader: ModuleOptions,
    pub pane: ModuleOptions,
    pub username: ModuleOptions,
    pub hostname: ModuleOptions,
    pub clock: ModuleOptions,
    pub battery: ModuleOptions,
    pub cwd: ModuleOptions,
}

impl Default for Modules {
    fn default() -> Self {
        Self {
            tabs: TabsOptions::default(),
            workspace: ModuleOptions::new(8, "\u{eb7f}"),
            leader: ModuleOptions::new(2, "\u{f427}"),
            pane: ModuleOptions::new(7, "\u{eb7e}"),
            username: ModuleOptions::new(6, "\u{f007}"),
            hostname: ModuleOptions::new(8, "\u{eb50}"),
            clock: ModuleOptions::new(5, "\u{f00f0}"),
            // Battery draws its own per-source icons.
            battery: ModuleOptions::new(7, ""),
            cwd: ModuleOptions::new(7, "\u{f413}"),
        }
    }
}

impl Modules {
    #[must_use]
    pub fn get(&self, name: ModuleName) -> &ModuleOptions {
        match name {
            ModuleName::Workspace => &self.workspace,
            ModuleName::Leader => &self.leader,
            ModuleName::Pane => &self.pane,
            ModuleName::Username => &self.username,
            ModuleName::Hostname => &self.hostname,
            ModuleName::Clock => &self.clock,
            ModuleName::Battery => &self.battery,
            ModuleName::Cwd => &self.cwd,
        }
    }

    fn get_mut(&mut self, name: ModuleName) -> &mut ModuleOptions {
        match name {
            ModuleName::Workspace => &mut self.workspace,
            ModuleName::Leader => &mut self.leader,
            ModuleName::Pane => &mut self.pane,
            ModuleName::Username => &mut self.username,
            ModuleName::Hostname => &mut self.hostname,
            ModuleName::Clock => &mut self.clock,
            ModuleName::Battery => &mut self.battery,
            ModuleName::Cwd => &mut self.cwd,
        }
    }
}

/// Resolved, typed options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    pub position: Position,
    pub max_width: u32,
    pub padding: Padding,
    pub separator: Separator,
    pub modules: Modules,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            position: Position::Bottom,
            max_width: 32,
            padding: Padding::default(),
            separator: Separator::default(),
            modules: Modules::default(),
        }
    }
}

impl Options {
    /// Read every recognized leaf from a merged tree, keeping the default for
    /// anything missing or malformed.
    pub(super) fn from_tree(tree: &Table, warnings: &mut Vec<OptionsWarning>) -> Self {
        let mut options = Self::default();
        let mut reader = LeafReader { warnings };

        reader.read(tree, "position", &mut options.position);
        reader.read_positive(tree, "max_width", &mut options.max_width);

        if let Some(padding) = section(tree, "padding") {
            let target = &mut options.padding;
            reader.read_bounded(padding, "padding.left", &mut target.left, MAX_SPACING);
            reader.read_bounded(padding, "padding.right", &mut target.right, MAX_SPACING);
        }

        if let Some(separator) = section(tree, "separator") {
            let target = &mut options.separator;
            reader.read_bounded(separator, "separator.space", &mut target.space, MAX_SPACING);
            reader.read(separator, "separator.left_icon", &mut target.left_icon);
            reader.read(separator, "separator.right_icon", &mut target.right_icon);
            reader.read(separator, "separator.field_icon", &mut target.field_icon);
        }

        let Some(modules) = section(tree, "modules") else {
            return options;
        };
        if let Some(tabs) = section(modules, "tabs") {
            let target = &mut options.modules.tabs;
            reader.read(tabs, "modules.tabs.active_tab_fg", &mut target.active_tab_fg);
            reader.read(tabs, "modules.tabs.inactive_tab_fg", &mut target.inactive_tab_fg);
            reader.read(tabs, "modules.tabs.new_tab_fg", &mut target.new_tab_fg);
        }
        for name in ModuleName::ALL {
            let Some(module) = section(modules, name.as_str()) else {
                continue;
            };
            let prefix = format!("modules.{}", name.as_str());
            let target = options.modules.get_mut(name);
            reader.read(module, &format!("{prefix}.enabled"), &mut target.enabled);
            reader.read(module, &format!("{prefix}.color"), &mut target.color);
            reader.read(module, &format!("{prefix}.icon"), &mut target.icon);
        }

        options
    }

    /// The defaults as an option tree.
    #[must_use]
    pub fn default_tree() -> Table {
        match Table::try_from(Self::default()) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize default options");
                Table::new()
            }
        }
    }
}

fn section<'a>(tree: &'a Table, key: &str) -> Option<&'a Table> {
    tree.get(key).and_then(Value::as_table)
}

struct LeafReader<'w> {
    warnings: &'w mut Vec<OptionsWarning>,
}

impl LeafReader<'_> {
    fn read<T: DeserializeOwned>(&mut self, table: &Table, path: &str, target: &mut T) {
        let leaf = path.rsplit('.').next().unwrap_or(path);
        let Some(value) = table.get(leaf) else {
            return;
        };
        match value.clone().try_into::<T>() {
            Ok(parsed) => *target = parsed,
            Err(err) => self.reject(path, err.to_string()),
        }
    }

    fn read_positive(&mut self, table: &Table, path: &str, target: &mut u32) {
        let mut candidate = *target;
        self.read(table, path, &mut candidate);
        if candidate == 0 {
            self.reject(path, "must be greater than zero".into());
        } else {
            *target = candidate;
        }
    }

    fn read_bounded(&mut self, table: &Table, path: &str, target: &mut u32, max: u32) {
        let mut candidate = *target;
        self.read(table, path, &mut candidate);
        if candidate > max {
            self.reject(path, format!("must be at most {max}"));
        } else {
            *target = candidate;
        }
    }

    fn reject(&mut self, path: &str, reason: String) {
        let reason = reason.trim().to_string();
        tracing::warn!(key = path, reason = %reason, "ignoring invalid option value");
        self.warnings.push(OptionsWarning::InvalidValue {
            key: path.to_string(),
            reason,
        });
    }
}
