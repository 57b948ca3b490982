//! In-memory host doubles shared by unit tests.

use crate::host::{
    Appearance, EventRegistry, Host, LocalTime, Pane, PowerSourceReading, StatusHandler,
    TabTitleHandler, Window,
};
use crate::palette::{builtin_scheme, ColorScheme};
use crate::segment::StyledSegment;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeHost {
    pub power: Vec<PowerSourceReading>,
    pub appearance: Option<Appearance>,
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub time: Option<LocalTime>,
}

impl FakeHost {
    pub fn populated() -> Self {
        Self {
            power: Vec::new(),
            appearance: Some(Appearance::Dark),
            hostname: Some("devbox.lan".into()),
            username: Some("ada".into()),
            time: Some(LocalTime { hour: 9, minute: 5 }),
        }
    }
}

impl Host for FakeHost {
    fn power_sources(&self) -> Vec<PowerSourceReading> {
        self.power.clone()
    }

    fn color_scheme(&self, name: &str) -> Option<ColorScheme> {
        builtin_scheme(name)
    }

    fn appearance(&self) -> Option<Appearance> {
        self.appearance
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn username(&self) -> Option<String> {
        self.username.clone()
    }

    fn local_time(&self) -> Option<LocalTime> {
        self.time
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindow {
    pub workspace: Option<String>,
    pub leader: bool,
    pub left: Vec<StyledSegment>,
    pub right: Vec<StyledSegment>,
}

impl Window for FakeWindow {
    fn active_workspace(&self) -> Option<String> {
        self.workspace.clone()
    }

    fn leader_is_active(&self) -> bool {
        self.leader
    }

    fn set_left_status(&mut self, segments: Vec<StyledSegment>) {
        self.left = segments;
    }

    fn set_right_status(&mut self, segments: Vec<StyledSegment>) {
        self.right = segments;
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakePane {
    pub process: Option<String>,
    pub cwd: Option<String>,
}

impl Pane for FakePane {
    fn foreground_process_name(&self) -> Option<String> {
        self.process.clone()
    }

    fn current_working_dir(&self) -> Option<String> {
        self.cwd.clone()
    }
}

#[derive(Default)]
pub(crate) struct FakeEvents {
    pub titles: Vec<TabTitleHandler>,
    pub statuses: Vec<StatusHandler>,
}

impl EventRegistry for FakeEvents {
    fn on_format_tab_title(&mut self, handler: TabTitleHandler) {
        self.titles.push(handler);
    }

    fn on_update_status(&mut self, handler: StatusHandler) {
        self.statuses.push(handler);
    }
}
