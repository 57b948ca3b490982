//! `tabstrip` entrypoint so tab titles and status lines can be rendered from a shell.
//!
//! Every subcommand resolves the options file once, applies it against the
//! local host, and prints the result. `watch` keeps redrawing on the refresh
//! interval the plugin writes into the host config.

mod cli;
mod local_host;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tabstrip::options::{load_overrides, resolve};
use toml::Table;

use crate::cli::{Cli, Command};
use crate::render::TitleRequest;

/// `<config_dir>/tabstrip/options.toml`.
fn default_options_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabstrip").join("options.toml"))
}

/// Read the options tree. An explicit path must exist; the default location
/// is optional.
fn load_options(explicit: Option<&Path>) -> Result<(Option<PathBuf>, Table)> {
    if let Some(path) = explicit {
        let table = load_overrides(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?;
        return Ok((Some(path.to_path_buf()), table));
    }
    match default_options_path() {
        Some(path) if path.is_file() => {
            let table = load_overrides(&path)
                .with_context(|| format!("failed to load options from {}", path.display()))?;
            Ok((Some(path), table))
        }
        _ => Ok((None, Table::new())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tabstrip::init_tracing(cli.logs);

    let (options_path, overrides) = load_options(cli.config.as_deref())?;
    tracing::debug!(
        path = ?options_path,
        keys = overrides.len(),
        "loaded options overrides"
    );

    match cli.command {
        Command::Defaults => render::defaults(),
        Command::Check => {
            let resolved = resolve(&overrides);
            render::check(options_path.as_deref(), resolved.warnings())
        }
        Command::Status {
            workspace,
            leader,
            json,
        } => {
            let (_, plugin) = render::apply_local(&overrides)?;
            render::status(&plugin, workspace, leader, json)
        }
        Command::Title {
            index,
            active,
            hover,
            max_width,
            json,
            title,
        } => {
            let (config, plugin) = render::apply_local(&overrides)?;
            let request = TitleRequest {
                index,
                active,
                hover,
                max_width,
                json,
                title,
            };
            render::title(&plugin, &config, request)
        }
        Command::Watch { ticks } => {
            let (_, plugin) = render::apply_local(&overrides)?;
            render::watch(&plugin, ticks)
        }
    }
}
