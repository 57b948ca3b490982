//! Subcommand bodies: apply options against the local host, then print.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{size as terminal_size, Clear, ClearType};
use crossterm::queue;
use serde::Serialize;
use tabstrip::options::{defaults_toml, OptionsWarning};
use tabstrip::segment::render_ansi;
use tabstrip::text::{display_width, spaces};
use tabstrip::{
    apply_to_config, HostConfig, Plugin, StyledSegment, TabInfo, TitleContext, STATUS_UPDATE_INTERVAL,
};
use toml::Table;

use crate::local_host::{LocalHost, LocalPane, LocalWindow};

const FALLBACK_COLUMNS: u16 = 80;

#[derive(Serialize)]
struct StatusJson<'a> {
    left: &'a [StyledSegment],
    right: &'a [StyledSegment],
}

pub(crate) fn apply_local(overrides: &Table) -> Result<(HostConfig, Plugin)> {
    let host = LocalHost::new();
    let mut config = HostConfig {
        color_scheme: Some(host.scheme_name()),
        ..HostConfig::default()
    };
    let plugin = apply_to_config(&mut config, overrides, Arc::new(host))
        .context("failed to apply tab bar options")?;
    Ok((config, plugin))
}

pub(crate) fn status(plugin: &Plugin, workspace: String, leader: bool, json: bool) -> Result<()> {
    let mut window = LocalWindow {
        workspace: Some(workspace),
        leader,
        ..LocalWindow::default()
    };
    plugin.update_status(&mut window, &LocalPane::detect());

    let mut out = io::stdout().lock();
    if json {
        let payload = StatusJson {
            left: &window.left,
            right: &window.right,
        };
        serde_json::to_writer_pretty(&mut out, &payload).context("failed to encode status")?;
        writeln!(out)?;
    } else {
        let columns = terminal_size().map_or(FALLBACK_COLUMNS, |(cols, _)| cols);
        writeln!(out, "{}", layout(&window.left, &window.right, columns))?;
    }
    Ok(())
}

pub(crate) struct TitleRequest {
    pub(crate) index: usize,
    pub(crate) active: bool,
    pub(crate) hover: bool,
    pub(crate) max_width: Option<usize>,
    pub(crate) json: bool,
    pub(crate) title: String,
}

pub(crate) fn title(plugin: &Plugin, config: &HostConfig, request: TitleRequest) -> Result<()> {
    let tab = TabInfo {
        tab_index: request.index,
        is_active: request.active,
        tab_title: request.title,
        active_pane_title: String::new(),
    };
    let tabs = [tab.clone()];
    let ctx = TitleContext {
        tabs: &tabs,
        panes: &[],
        config,
        max_width: request.max_width.unwrap_or(config.tab_max_width),
        hover: request.hover,
    };
    let segments = plugin.format_tab_title(&tab, &ctx);

    let mut out = io::stdout().lock();
    if request.json {
        serde_json::to_writer_pretty(&mut out, &segments).context("failed to encode title")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render_ansi(&segments))?;
    }
    Ok(())
}

/// Redraw the status line in place once per refresh interval.
pub(crate) fn watch(plugin: &Plugin, ticks: Option<u64>) -> Result<()> {
    let pane = LocalPane::detect();
    let mut window = LocalWindow {
        workspace: Some("default".into()),
        ..LocalWindow::default()
    };
    let mut out = io::stdout();
    let mut tick = 0u64;
    while ticks.is_none_or(|limit| tick < limit) {
        if tick > 0 {
            thread::sleep(STATUS_UPDATE_INTERVAL);
        }
        plugin.update_status(&mut window, &pane);
        let columns = terminal_size().map_or(FALLBACK_COLUMNS, |(cols, _)| cols);
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(layout(&window.left, &window.right, columns))
        )?;
        out.flush()?;
        tick += 1;
    }
    writeln!(out)?;
    Ok(())
}

pub(crate) fn defaults() -> Result<()> {
    print!("{}", defaults_toml());
    Ok(())
}

pub(crate) fn check(config_path: Option<&Path>, warnings: &[OptionsWarning]) -> Result<()> {
    let mut out = io::stdout().lock();
    match config_path {
        Some(path) => writeln!(out, "options: {}", path.display())?,
        None => writeln!(out, "options: shipped defaults")?,
    }
    if warnings.is_empty() {
        writeln!(out, "no warnings")?;
    }
    for warning in warnings {
        writeln!(out, "warning: {warning}")?;
    }
    Ok(())
}

/// Left status flush left, right status flush right; the right side is
/// dropped when both cannot fit.
fn layout(left: &[StyledSegment], right: &[StyledSegment], columns: u16) -> String {
    let left_width: usize = left.iter().map(|segment| display_width(&segment.text)).sum();
    let right_width: usize = right.iter().map(|segment| display_width(&segment.text)).sum();
    let columns = usize::from(columns);
    if left_width + right_width > columns {
        return render_ansi(left);
    }
    format!(
        "{}{}{}",
        render_ansi(left),
        spaces(columns - left_width - right_width),
        render_ansi(right)
    )
}
