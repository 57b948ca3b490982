//! Tab title formatting so each tab label fits the host's width budget.

use crate::host::TabInfo;
use crate::options::Separator;
use crate::palette::{TabBarColors, TabColors};
use crate::segment::{Attribute, StyledSegment};
use crate::text::{display_width, spaces, truncate_display, ELLIPSIS};

/// Builds one styled label per tab from the separator options and tab colors.
#[derive(Debug, Clone, Copy)]
pub struct TitleFormatter<'a> {
    separator: &'a Separator,
    colors: &'a TabBarColors,
}

impl<'a> TitleFormatter<'a> {
    #[must_use]
    pub fn new(separator: &'a Separator, colors: &'a TabBarColors) -> Self {
        Self { separator, colors }
    }

    /// Format `tab` into a single bold segment no wider than `max_width`.
    #[must_use]
    pub fn format(&self, tab: &TabInfo, hover: bool, max_width: usize) -> Vec<StyledSegment> {
        let text = self.label(tab.tab_index + 1, tab.raw_title(), max_width);
        let TabColors { bg, fg } = self.colors_for(tab.is_active, hover);
        vec![StyledSegment::new(bg, fg, text).with_attribute(Attribute::Bold)]
    }

    /// Compose `" <n><icon> <title> "`, truncating the title when the label
    /// would exceed `max_width`.
    #[must_use]
    pub fn label(&self, number: usize, raw_title: &str, max_width: usize) -> String {
        let title = raw_title.strip_suffix(".exe").unwrap_or(raw_title);
        let space = spaces(self.separator.space as usize);
        let prefix = format!(" {number}{space}{}{space}", self.separator.left_icon);

        let label = format!("{prefix}{title} ");
        if display_width(&label) <= max_width {
            return label;
        }

        let budget = max_width.saturating_sub(self.offset(number));
        let truncated = format!("{prefix}{}{ELLIPSIS}", truncate_display(title, budget));
        truncate_display(&truncated, max_width)
    }

    /// Columns reserved around the title: leading space, tab number, padded
    /// icon, and the ellipsis.
    #[must_use]
    pub fn offset(&self, number: usize) -> usize {
        let digits = number.to_string().len();
        let icon = display_width(&self.separator.left_icon);
        digits + 1 + icon + 2 * self.separator.space as usize + 1
    }

    fn colors_for(&self, active: bool, hover: bool) -> TabColors {
        if active {
            self.colors.active_tab
        } else if hover {
            self.colors.inactive_tab_hover
        } else {
            self.colors.inactive_tab
        }
    }
}
