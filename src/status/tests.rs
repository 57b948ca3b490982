use super::*;
use crate::host::{PowerCondition, PowerSourceReading};
use crate::segment::plain_text;
use crate::test_support::{FakeHost, FakePane, FakeWindow};

fn only(enabled: &[ModuleName]) -> Options {
    let mut options = Options::default();
    let modules = &mut options.modules;
    modules.username.enabled = enabled.contains(&ModuleName::Username);
    modules.hostname.enabled = enabled.contains(&ModuleName::Hostname);
    modules.clock.enabled = enabled.contains(&ModuleName::Clock);
    modules.battery.enabled = enabled.contains(&ModuleName::Battery);
    modules.cwd.enabled = enabled.contains(&ModuleName::Cwd);
    options
}

fn right(options: &Options, host: &FakeHost, pane: &FakePane) -> StatusLine {
    right_with(options, ColorModel::default(), host, pane)
}

fn right_with(
    options: &Options,
    colors: ColorModel,
    host: &FakeHost,
    pane: &FakePane,
) -> StatusLine {
    let palette = Palette::builtin().unwrap();
    let registry = ModuleRegistry::with_defaults(&options.modules);
    StatusLineAssembler::new(options, &palette, colors, &registry).right(host, pane)
}

fn left(options: &Options, window: &FakeWindow, pane: &FakePane) -> StatusLine {
    let palette = Palette::builtin().unwrap();
    let registry = ModuleRegistry::new();
    StatusLineAssembler::new(options, &palette, ColorModel::default(), &registry).left(window, pane)
}

#[test]
fn registry_order_is_fixed() {
    let registry = ModuleRegistry::with_defaults(&Modules::default());
    assert_eq!(
        registry.ids(),
        vec![
            ModuleName::Username,
            ModuleName::Hostname,
            ModuleName::Clock,
            ModuleName::Battery,
            ModuleName::Cwd,
        ]
    );
    assert_eq!(registry.enabled().count(), 5);
}

#[test]
fn disabled_modules_are_skipped_by_registry() {
    let options = only(&[ModuleName::Clock]);
    let registry = ModuleRegistry::with_defaults(&options.modules);
    assert_eq!(registry.ids().len(), 5);
    let ids: Vec<_> = registry.enabled().map(|module| module.id()).collect();
    assert_eq!(ids, vec![ModuleName::Clock]);
}

#[test]
fn right_status_with_nothing_enabled_is_background_and_padding() {
    let line = right(&only(&[]), &FakeHost::populated(), &FakePane::default());
    assert_eq!(line.len(), 2);
    assert_eq!(line[0].text, "");
    assert_eq!(plain_text(&line), " ");
}

#[test]
fn right_status_joins_modules_with_field_separator() {
    let options = only(&[ModuleName::Username, ModuleName::Clock]);
    let line = right(&options, &FakeHost::populated(), &FakePane::default());
    assert_eq!(
        plain_text(&line),
        "\u{f007} ada \u{e621} \u{f00f0} 09:05 "
    );
    let palette = Palette::builtin().unwrap();
    assert_eq!(line[1].foreground, palette.indexed(options.modules.username.color));
    assert_eq!(line[2].foreground, palette.dim());
    assert!(line.iter().all(|segment| segment.background == palette.background));
}

#[test]
fn empty_trailing_module_leaves_no_dangling_separator() {
    let options = only(&[ModuleName::Hostname, ModuleName::Battery, ModuleName::Cwd]);
    let line = right(&options, &FakeHost::populated(), &FakePane::default());
    assert_eq!(plain_text(&line), "\u{eb50} devbox ");
}

#[test]
fn empty_battery_between_clock_and_cwd_keeps_one_separator() {
    let options = only(&[ModuleName::Clock, ModuleName::Battery, ModuleName::Cwd]);
    let pane = FakePane {
        process: None,
        cwd: Some("/srv".into()),
    };
    let line = right(&options, &FakeHost::populated(), &pane);
    assert_eq!(plain_text(&line), "\u{f00f0} 09:05 \u{e621} \u{f413} /srv ");
}

#[test]
fn inverted_colors_reach_module_separator_and_padding_foregrounds() {
    let options = only(&[ModuleName::Username, ModuleName::Clock]);
    let host = FakeHost::populated();
    let line = right_with(&options, ColorModel::new(true), &host, &FakePane::default());
    let palette = Palette::builtin().unwrap();
    assert_eq!(line[0].foreground, palette.foreground.invert(true));
    assert_eq!(
        line[1].foreground,
        palette.indexed(options.modules.username.color).invert(true)
    );
    assert_eq!(line[2].foreground, palette.dim().invert(true));
    assert_eq!(line.last().unwrap().foreground, palette.foreground.invert(true));
    assert!(line.iter().all(|segment| segment.background == palette.background));
}

#[test]
fn missing_host_data_omits_modules() {
    let options = only(&[ModuleName::Username, ModuleName::Hostname, ModuleName::Clock]);
    let line = right(&options, &FakeHost::default(), &FakePane::default());
    assert_eq!(plain_text(&line), " ");
}

#[test]
fn battery_percentage_uses_charge_color() {
    let options = only(&[ModuleName::Battery]);
    let host = FakeHost {
        power: vec![PowerSourceReading {
            condition: PowerCondition::Discharging,
            charge: 0.75,
            remaining_seconds: Some(5400),
        }],
        ..FakeHost::populated()
    };
    let line = right(&options, &host, &FakePane::default());
    let text = plain_text(&line);
    assert!(text.ends_with("75% 1:30 "), "{text:?}");

    let percent = line
        .iter()
        .find(|segment| segment.text == "75%")
        .expect("percentage segment");
    assert_eq!(percent.foreground, ColorModel::default().charge_color(0.75));

    let palette = Palette::builtin().unwrap();
    let time = line.iter().find(|segment| segment.text == "1:30").unwrap();
    assert_eq!(time.foreground, palette.indexed(options.modules.battery.color));
}

#[test]
fn cwd_module_reads_pane_directory() {
    let options = only(&[ModuleName::Cwd]);
    let pane = FakePane {
        process: None,
        cwd: Some("file://devbox/srv/app".into()),
    };
    let line = right(&options, &FakeHost::populated(), &pane);
    assert_eq!(plain_text(&line), "\u{f413} /srv/app ");
}

#[test]
fn left_status_shows_workspace_and_process() {
    let window = FakeWindow {
        workspace: Some("main".into()),
        ..FakeWindow::default()
    };
    let pane = FakePane {
        process: Some("/usr/bin/zsh".into()),
        cwd: None,
    };
    let options = Options::default();
    let line = left(&options, &window, &pane);
    assert_eq!(line[0].text, "");
    assert_eq!(plain_text(&line), " \u{eb7f} main \u{eb7e} zsh ");

    let palette = Palette::builtin().unwrap();
    assert_eq!(line[2].foreground, palette.indexed(options.modules.workspace.color));
}

#[test]
fn active_leader_recolors_workspace_segment() {
    let window = FakeWindow {
        workspace: Some("main".into()),
        leader: true,
        ..FakeWindow::default()
    };
    let options = Options::default();
    let line = left(&options, &window, &FakePane::default());
    assert_eq!(plain_text(&line), " \u{f427} main ");
    let palette = Palette::builtin().unwrap();
    assert_eq!(line[2].foreground, palette.indexed(options.modules.leader.color));
}

#[test]
fn leader_disabled_keeps_workspace_look() {
    let window = FakeWindow {
        workspace: Some("main".into()),
        leader: true,
        ..FakeWindow::default()
    };
    let mut options = Options::default();
    options.modules.leader.enabled = false;
    let line = left(&options, &window, &FakePane::default());
    assert_eq!(plain_text(&line), " \u{eb7f} main ");
}

#[test]
fn missing_process_and_workspace_are_omitted() {
    let line = left(&Options::default(), &FakeWindow::default(), &FakePane::default());
    assert_eq!(line.len(), 2);
    assert_eq!(plain_text(&line), " ");
}

#[test]
fn process_label_strips_directories_and_exe() {
    assert_eq!(process_label("/usr/bin/nvim"), "nvim");
    assert_eq!(process_label("C:\\tools\\pwsh.exe"), "pwsh");
    assert_eq!(process_label("cargo"), "cargo");
}

#[test]
fn module_text_drops_empty_runs() {
    let mut text = ModuleText::default();
    text.push("", None);
    assert!(text.is_empty());
    assert!(ModuleText::from_option(None).is_empty());
    assert!(ModuleText::from_option(Some(String::new())).is_empty());
    text.push("x", None);
    assert_eq!(text.to_plain_string(), "x");
}
