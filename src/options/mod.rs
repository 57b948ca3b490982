//! Option resolution so user overrides layer predictably over the shipped defaults.
//!
//! Resolution runs once per apply: merge the user tree over the defaults,
//! repair any structurally broken section, then read the typed view. Nothing
//! a user writes can make resolution fail; problems surface as warnings.

mod error;
mod merge;
mod schema;

use std::path::Path;

use toml::{Table, Value};

pub use error::{OptionsError, OptionsWarning};
pub use merge::merge;
pub use schema::{
    ModuleName, ModuleOptions, Modules, Options, Padding, Position, Separator, TabsOptions,
};

/// The single resolved options snapshot produced by one apply call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    tree: Table,
    options: Options,
    warnings: Vec<OptionsWarning>,
}

impl ResolvedOptions {
    /// Full merged tree, including keys outside the recognized schema.
    #[must_use]
    pub fn tree(&self) -> &Table {
        &self.tree
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn warnings(&self) -> &[OptionsWarning] {
        &self.warnings
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        resolve(&Table::new())
    }
}

/// Resolve user overrides against the shipped defaults.
#[must_use]
pub fn resolve(overrides: &Table) -> ResolvedOptions {
    let defaults = Options::default_tree();
    let mut tree = merge(&defaults, overrides);
    let mut warnings = Vec::new();

    repair_sections(&defaults, &mut tree, "", &mut warnings);

    let options = Options::from_tree(&tree, &mut warnings);
    tracing::debug!(
        warnings = warnings.len(),
        extra_keys = tree.keys().filter(|key| !defaults.contains_key(*key)).count(),
        "resolved options"
    );
    ResolvedOptions {
        tree,
        options,
        warnings,
    }
}

/// Put back any default table that an override replaced with a scalar.
///
/// Every table in the defaults (`modules`, `separator`, `padding`, and each
/// module entry) is structurally required.
fn repair_sections(
    defaults: &Table,
    tree: &mut Table,
    prefix: &str,
    warnings: &mut Vec<OptionsWarning>,
) {
    for (key, default) in defaults {
        let Value::Table(default_section) = default else {
            continue;
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let broken = match tree.get_mut(key) {
            Some(Value::Table(section)) => {
                repair_sections(default_section, section, &path, warnings);
                false
            }
            Some(_) => true,
            None => false,
        };
        if broken {
            restore(defaults, tree, key, &path, warnings);
        }
    }
}

fn restore(
    defaults: &Table,
    tree: &mut Table,
    key: &str,
    path: &str,
    warnings: &mut Vec<OptionsWarning>,
) {
    let Some(default) = defaults.get(key) else {
        return;
    };
    tracing::warn!(section = path, "options section is not a table; restoring defaults");
    tree.insert(key.to_string(), default.clone());
    warnings.push(OptionsWarning::ConfigurationShape {
        section: path.to_string(),
    });
}

/// Read a user options file as a raw tree.
pub fn load_overrides(path: &Path) -> Result<Table, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;
    parse_overrides(&content)
}

/// Parse user options from TOML text.
pub fn parse_overrides(content: &str) -> Result<Table, OptionsError> {
    toml::from_str::<Table>(content).map_err(|e| OptionsError::Parse(e.to_string()))
}

/// Shipped defaults rendered as TOML.
#[must_use]
pub fn defaults_toml() -> String {
    toml::to_string_pretty(&Options::default()).unwrap_or_default()
}
