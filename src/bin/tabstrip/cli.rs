//! Command-line surface so the renderer can be driven outside a terminal host.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "tabstrip",
    about = "Tab titles and segmented status lines for terminal tab bars",
    version
)]
pub(crate) struct Cli {
    /// Options file layered over the shipped defaults (TOML)
    #[arg(long, env = "TABSTRIP_CONFIG", global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Write JSON trace logs (path from TABSTRIP_TRACE_LOG, else the temp dir)
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) logs: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Render the left and right status once
    Status {
        /// Active workspace name shown on the left
        #[arg(long, default_value = "default")]
        workspace: String,

        /// Render as if the leader key were armed
        #[arg(long, default_value_t = false)]
        leader: bool,

        /// Print segments as JSON instead of ANSI text
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Format a single tab title
    Title {
        /// Zero-based tab position; the label shows index + 1
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Use the active tab colors
        #[arg(long, default_value_t = false)]
        active: bool,

        /// Use the hover colors for an inactive tab
        #[arg(long, default_value_t = false)]
        hover: bool,

        /// Column budget (defaults to the resolved max_width)
        #[arg(long, value_name = "COLUMNS")]
        max_width: Option<usize>,

        /// Print segments as JSON instead of ANSI text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Tab title text
        title: String,
    },

    /// Re-render the status line on every refresh tick
    Watch {
        /// Stop after this many ticks (runs until interrupted when unset)
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Print the shipped default options as TOML
    Defaults,

    /// Resolve the options file and report any warnings
    Check,
}
