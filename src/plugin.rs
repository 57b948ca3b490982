//! Plugin entry points so a tab bar host can apply options once and then call back per redraw.
//!
//! `apply_to_config` is the only place options are resolved and colors are
//! derived. The returned `Plugin` is immutable; both host callbacks borrow it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use toml::Table;

use crate::color::{ColorError, ColorModel};
use crate::host::{EventRegistry, Host, HostConfig, Pane, TabInfo, TitleContext, Window};
use crate::options::{resolve, Options, OptionsWarning, Position, ResolvedOptions};
use crate::palette::{resolve_palette, Palette, TabBarColors};
use crate::segment::{StatusLine, StyledSegment};
use crate::status::{ModuleRegistry, StatusLineAssembler};
use crate::title::TitleFormatter;

/// Status refresh interval written into the host configuration.
pub const STATUS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// A shipped color table failed to parse.
    Palette(ColorError),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette(err) => write!(f, "failed to build tab bar palette: {err}"),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Palette(err) => Some(err),
        }
    }
}

impl From<ColorError> for PluginError {
    fn from(err: ColorError) -> Self {
        Self::Palette(err)
    }
}

/// Resolved options plus everything derived from them at apply time.
pub struct Plugin {
    resolved: ResolvedOptions,
    palette: Palette,
    tab_colors: TabBarColors,
    colors: ColorModel,
    registry: ModuleRegistry,
    host: Arc<dyn Host>,
}

/// Resolve `overrides`, derive colors from the host's scheme, and write the
/// tab bar settings into `config`.
pub fn apply_to_config(
    config: &mut HostConfig,
    overrides: &Table,
    host: Arc<dyn Host>,
) -> Result<Plugin, PluginError> {
    let resolved = resolve(overrides);
    // Shipped tables must parse even when the host scheme wins.
    Palette::builtin()?;
    let palette = resolve_palette(host.as_ref(), config.color_scheme.as_deref())?;
    let colors = ColorModel::detect(host.appearance());

    let options = resolved.options();
    let tab_colors = TabBarColors::derive(&palette, &options.modules.tabs, colors);
    let registry = ModuleRegistry::with_defaults(&options.modules);

    config.tab_bar_at_bottom = options.position == Position::Bottom;
    config.use_fancy_tab_bar = false;
    config.tab_max_width = options.max_width as usize;
    config.status_update_interval = STATUS_UPDATE_INTERVAL;
    config.tab_bar_colors = Some(tab_colors);

    tracing::info!(
        scheme = config.color_scheme.as_deref().unwrap_or("builtin"),
        at_bottom = config.tab_bar_at_bottom,
        tab_max_width = config.tab_max_width,
        invert = colors.inverts(),
        modules = registry.enabled().count(),
        warnings = resolved.warnings().len(),
        "applied tab bar options"
    );

    Ok(Plugin {
        resolved,
        palette,
        tab_colors,
        colors,
        registry,
        host,
    })
}

impl Plugin {
    /// Title callback: one bold segment sized to the host's width budget.
    #[must_use]
    pub fn format_tab_title(&self, tab: &TabInfo, ctx: &TitleContext<'_>) -> Vec<StyledSegment> {
        TitleFormatter::new(&self.options().separator, &self.tab_colors)
            .format(tab, ctx.hover, ctx.max_width)
    }

    /// Left and right status for the current tick, without touching the window.
    #[must_use]
    pub fn status_lines(&self, window: &dyn Window, pane: &dyn Pane) -> (StatusLine, StatusLine) {
        let assembler =
            StatusLineAssembler::new(self.options(), &self.palette, self.colors, &self.registry);
        let left = assembler.left(window, pane);
        let right = assembler.right(self.host.as_ref(), pane);
        (left, right)
    }

    /// Status callback: rebuild both sides and hand them to the window.
    pub fn update_status(&self, window: &mut dyn Window, pane: &dyn Pane) {
        let (left, right) = self.status_lines(window, pane);
        window.set_left_status(left);
        window.set_right_status(right);
    }

    /// Attach both callbacks to the host's event hooks.
    pub fn register(self: Arc<Self>, events: &mut dyn EventRegistry) {
        let titles = Arc::clone(&self);
        events.on_format_tab_title(Box::new(move |tab: &TabInfo, ctx: &TitleContext<'_>| {
            titles.format_tab_title(tab, ctx)
        }));
        events.on_update_status(Box::new(move |window: &mut dyn Window, pane: &dyn Pane| {
            self.update_status(window, pane)
        }));
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        self.resolved.options()
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedOptions {
        &self.resolved
    }

    #[must_use]
    pub fn warnings(&self) -> &[OptionsWarning] {
        self.resolved.warnings()
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn tab_colors(&self) -> &TabBarColors {
        &self.tab_colors
    }

    #[must_use]
    pub fn color_model(&self) -> ColorModel {
        self.colors
    }

    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Appearance;
    use crate::options::parse_overrides;
    use crate::palette::{builtin_scheme, BUILTIN_LIGHT};
    use crate::segment::plain_text;
    use crate::test_support::{FakeEvents, FakeHost, FakePane, FakeWindow};

    fn apply(source: &str, host: FakeHost) -> (HostConfig, Plugin) {
        let overrides = parse_overrides(source).expect("valid toml");
        let mut config = HostConfig::default();
        let plugin = apply_to_config(&mut config, &overrides, Arc::new(host)).expect("apply");
        (config, plugin)
    }

    fn title_context(config: &HostConfig, max_width: usize) -> TitleContext<'_> {
        TitleContext {
            tabs: &[],
            panes: &[],
            config,
            max_width,
            hover: false,
        }
    }

    #[test]
    fn plugin_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Plugin>();
    }

    #[test]
    fn apply_writes_tab_bar_settings() {
        let (config, plugin) = apply("", FakeHost::populated());
        assert!(config.tab_bar_at_bottom);
        assert!(!config.use_fancy_tab_bar);
        assert_eq!(config.tab_max_width, 32);
        assert_eq!(config.status_update_interval, Duration::from_millis(500));
        assert_eq!(config.tab_bar_colors, Some(*plugin.tab_colors()));
        assert!(plugin.warnings().is_empty());
    }

    #[test]
    fn apply_honors_position_and_width_overrides() {
        let (config, plugin) = apply("position = \"top\"\nmax_width = 20\n", FakeHost::populated());
        assert!(!config.tab_bar_at_bottom);
        assert_eq!(config.tab_max_width, 20);
        assert_eq!(plugin.options().position, Position::Top);
    }

    #[test]
    fn host_scheme_drives_palette_and_unknown_scheme_falls_back() {
        let overrides = Table::new();
        let mut config = HostConfig {
            color_scheme: Some(BUILTIN_LIGHT.into()),
            ..HostConfig::default()
        };
        let plugin =
            apply_to_config(&mut config, &overrides, Arc::new(FakeHost::populated())).unwrap();
        let light = Palette::from_scheme(&builtin_scheme(BUILTIN_LIGHT).unwrap()).unwrap();
        assert_eq!(plugin.palette(), &light);

        config.color_scheme = Some("Not Installed".into());
        let plugin =
            apply_to_config(&mut config, &overrides, Arc::new(FakeHost::populated())).unwrap();
        assert_eq!(plugin.palette(), &Palette::builtin().unwrap());
    }

    #[test]
    fn inversion_follows_appearance_and_defaults_off() {
        let light = FakeHost {
            appearance: Some(Appearance::Light),
            ..FakeHost::populated()
        };
        assert!(apply("", light).1.color_model().inverts());

        let unknown = FakeHost {
            appearance: None,
            ..FakeHost::populated()
        };
        assert!(!apply("", unknown).1.color_model().inverts());
    }

    #[test]
    fn light_appearance_inverts_tab_and_status_foregrounds() {
        let light = FakeHost {
            appearance: Some(Appearance::Light),
            ..FakeHost::populated()
        };
        let (config, plugin) = apply("", light);
        let palette = *plugin.palette();
        let tabs = &plugin.options().modules.tabs;
        assert_eq!(
            plugin.tab_colors().active_tab.fg,
            palette.indexed(tabs.active_tab_fg).invert(true)
        );
        assert_eq!(
            plugin.tab_colors().new_tab.fg,
            palette.indexed(tabs.new_tab_fg).invert(true)
        );
        assert_eq!(plugin.tab_colors().background, palette.background);

        let tab = TabInfo {
            tab_index: 0,
            is_active: true,
            tab_title: "logs".into(),
            active_pane_title: String::new(),
        };
        let title = plugin.format_tab_title(&tab, &title_context(&config, 32));
        assert_eq!(title[0].foreground, palette.indexed(tabs.active_tab_fg).invert(true));

        let mut window = FakeWindow {
            workspace: Some("default".into()),
            ..FakeWindow::default()
        };
        plugin.update_status(&mut window, &FakePane::default());
        let workspace = plugin.options().modules.workspace.color;
        assert_eq!(window.left[2].foreground, palette.indexed(workspace).invert(true));
        let username = plugin.options().modules.username.color;
        assert_eq!(window.right[1].foreground, palette.indexed(username).invert(true));
    }

    #[test]
    fn registered_title_handler_formats_tabs() {
        let (config, plugin) = apply("", FakeHost::populated());
        let mut events = FakeEvents::default();
        Arc::new(plugin).register(&mut events);
        assert_eq!(events.titles.len(), 1);
        assert_eq!(events.statuses.len(), 1);

        let tab = TabInfo {
            tab_index: 2,
            is_active: true,
            tab_title: String::new(),
            active_pane_title: "htop".into(),
        };
        let segments = (events.titles[0])(&tab, &title_context(&config, 32));
        assert_eq!(segments.len(), 1);
        assert!(segments[0].text.starts_with(" 3 "));
        assert!(segments[0].text.ends_with("htop "));
    }

    #[test]
    fn registered_status_handler_sets_both_sides() {
        let (_, plugin) = apply("[modules.cwd]\nenabled = false\n", FakeHost::populated());
        let mut events = FakeEvents::default();
        Arc::new(plugin).register(&mut events);

        let mut window = FakeWindow {
            workspace: Some("default".into()),
            ..FakeWindow::default()
        };
        let pane = FakePane {
            process: Some("vim".into()),
            cwd: None,
        };
        (events.statuses[0])(&mut window, &pane);
        assert_eq!(plain_text(&window.left), " \u{eb7f} default \u{eb7e} vim ");
        assert_eq!(
            plain_text(&window.right),
            "\u{f007} ada \u{e621} \u{eb50} devbox \u{e621} \u{f00f0} 09:05 "
        );
    }

    #[test]
    fn fully_disabled_right_status_is_padding_only() {
        let source = "[modules.username]\nenabled = false\n[modules.hostname]\nenabled = false\n\
                      [modules.clock]\nenabled = false\n[modules.battery]\nenabled = false\n\
                      [modules.cwd]\nenabled = false\n[padding]\nright = 2\n";
        let (_, plugin) = apply(source, FakeHost::populated());
        let mut window = FakeWindow::default();
        plugin.update_status(&mut window, &FakePane::default());
        assert_eq!(plain_text(&window.right), "  ");
    }

    #[test]
    fn shape_warnings_surface_through_plugin() {
        let (_, plugin) = apply("padding = 4\n", FakeHost::populated());
        assert_eq!(
            plugin.warnings(),
            &[OptionsWarning::ConfigurationShape {
                section: "padding".into()
            }]
        );
        assert_eq!(plugin.options().padding.left, 1);
    }
}
