//! Tab bar and status line rendering library shared by host integrations and the `tabstrip` binary.

pub mod color;
pub mod host;
pub mod options;
pub mod palette;
pub mod plugin;
pub mod segment;
pub mod status;
mod telemetry;
pub mod text;
pub mod title;

#[cfg(test)]
pub(crate) mod test_support;

pub use color::{ColorError, ColorModel, Rgb};
pub use host::{
    Appearance, EventRegistry, Host, HostConfig, LocalTime, Pane, PaneInfo, PowerCondition,
    PowerSourceReading, TabInfo, TitleContext, Window,
};
pub use plugin::{apply_to_config, Plugin, PluginError, STATUS_UPDATE_INTERVAL};
pub use segment::{StatusLine, StyledSegment};
pub use telemetry::{init_tracing, tracing_log_path};
