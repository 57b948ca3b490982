//! Battery module so power telemetry reads as icon, charge color, and time left.
//!
//! Renders each source as `<icon><percentage> <remaining>`: "󰂁75% 1:30"

use super::{ModuleText, StatusModule, TickContext};
use crate::host::{PowerCondition, PowerSourceReading};
use crate::options::ModuleName;

/// Joins readings when the host reports more than one power source.
const SOURCE_SEPARATOR: &str = " | ";

/// Discharging icons by tenth of charge; index 11 covers readings above full.
const DISCHARGING_ICONS: [&str; 12] = [
    "\u{f008e}", "\u{f007a}", "\u{f007b}", "\u{f007c}", "\u{f007d}", "\u{f007e}", "\u{f007f}",
    "\u{f0080}", "\u{f0081}", "\u{f0082}", "\u{f0079}", "\u{f0079}",
];

/// Charging icons by tenth of charge.
const CHARGING_ICONS: [&str; 12] = [
    "\u{f089f}", "\u{f089c}", "\u{f0086}", "\u{f0087}", "\u{f0088}", "\u{f089d}", "\u{f0089}",
    "\u{f089e}", "\u{f008a}", "\u{f008b}", "\u{f0085}", "\u{f0085}",
];

const FULL_ICON: &str = "\u{f0079}";
const EMPTY_ICON: &str = "\u{f0083}";
const UNKNOWN_ICON: &str = "\u{f0091}";

/// Power source module.
pub struct BatteryModule;

impl StatusModule for BatteryModule {
    fn id(&self) -> ModuleName {
        ModuleName::Battery
    }

    fn render(&self, ctx: &TickContext<'_>) -> ModuleText {
        let sources = ctx.host.power_sources();
        if sources.is_empty() {
            tracing::debug!("no power sources reported");
        }

        let mut text = ModuleText::default();
        for (idx, reading) in sources.iter().enumerate() {
            if idx > 0 {
                text.push(SOURCE_SEPARATOR, None);
            }
            text.push(icon_for(reading), None);
            text.push(percentage(reading.charge), Some(ctx.colors.charge_color(reading.charge)));
            if let Some(seconds) = reading.remaining_seconds {
                text.push(" ", None);
                text.push(remaining_time(seconds), None);
            }
        }
        text
    }
}

/// Icon table index for a charge level: `min(ceil(charge * 10), 11)`.
#[must_use]
pub fn icon_index(charge: f64) -> usize {
    let charge = if charge.is_nan() { 0.0 } else { charge.max(0.0) };
    ((charge * 10.0).ceil() as usize).min(DISCHARGING_ICONS.len() - 1)
}

#[must_use]
pub fn icon_for(reading: &PowerSourceReading) -> &'static str {
    match reading.condition {
        PowerCondition::Charging => CHARGING_ICONS[icon_index(reading.charge)],
        PowerCondition::Discharging => DISCHARGING_ICONS[icon_index(reading.charge)],
        PowerCondition::Full => FULL_ICON,
        PowerCondition::Empty => EMPTY_ICON,
        PowerCondition::Unknown => UNKNOWN_ICON,
    }
}

/// Whole-percent charge label, e.g. `75%`.
#[must_use]
pub fn percentage(charge: f64) -> String {
    let charge = if charge.is_nan() { 0.0 } else { charge.clamp(0.0, 1.0) };
    format!("{:.0}%", (charge * 100.0).round())
}

/// `H:MM` for a remaining-time estimate.
#[must_use]
pub fn remaining_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}:{minutes:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reading(condition: PowerCondition, charge: f64, remaining: Option<u64>) -> PowerSourceReading {
        PowerSourceReading {
            condition,
            charge,
            remaining_seconds: remaining,
        }
    }

    #[test]
    fn discharging_reading_formats_time_and_icon() {
        let sample = reading(PowerCondition::Discharging, 0.75, Some(5400));
        assert_eq!(remaining_time(5400), "1:30");
        assert_eq!(icon_index(0.75), 8);
        assert_eq!(icon_for(&sample), DISCHARGING_ICONS[8]);
        assert_eq!(percentage(0.75), "75%");
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.01, 1)]
    #[case(0.5, 5)]
    #[case(1.0, 10)]
    #[case(1.5, 11)]
    #[case(-0.2, 0)]
    fn icon_index_is_ceiling_of_tenths(#[case] charge: f64, #[case] expected: usize) {
        assert_eq!(icon_index(charge), expected);
    }

    #[rstest]
    #[case(0, "0:00")]
    #[case(59, "0:00")]
    #[case(61, "0:01")]
    #[case(3600, "1:00")]
    #[case(36_000 + 45 * 60, "10:45")]
    fn remaining_time_formats_hours_and_minutes(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(remaining_time(seconds), expected);
    }

    #[test]
    fn fixed_icons_for_terminal_conditions() {
        assert_eq!(icon_for(&reading(PowerCondition::Full, 1.0, None)), FULL_ICON);
        assert_eq!(icon_for(&reading(PowerCondition::Empty, 0.0, None)), EMPTY_ICON);
        assert_eq!(icon_for(&reading(PowerCondition::Unknown, 0.4, None)), UNKNOWN_ICON);
        assert_eq!(
            icon_for(&reading(PowerCondition::Charging, 0.42, None)),
            CHARGING_ICONS[5]
        );
    }

    #[test]
    fn percentage_clamps_out_of_range_charge() {
        assert_eq!(percentage(1.2), "100%");
        assert_eq!(percentage(-0.5), "0%");
        assert_eq!(percentage(0.005), "1%");
    }
}
