use crate::clock::ClockRole;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub const DOT_COUNT: usize = 12;
pub const DOT_RADIUS: f64 = 10.0;
pub const DEGREES_PER_DOT: i32 = 360 / DOT_COUNT as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Style {
    /// The whole ring turns.
    #[default]
    #[strum(to_string = "rotate", serialize = "1")]
    Rotate,
    /// The active dot is drawn at twice the size.
    #[strum(to_string = "scale-step", serialize = "scalestep", serialize = "2")]
    ScaleStep,
    /// The active dot grows while it is active.
    #[strum(to_string = "scale-pulse", serialize = "scalepulse", serialize = "3")]
    ScalePulse,
    /// Dots vanish one by one, then reappear one by one.
    #[strum(to_string = "sequential", serialize = "4")]
    Sequential,
    /// Like `Sequential`, with the whole ring sweeping forward each step.
    #[strum(
        to_string = "sequential-sweep",
        serialize = "sequentialsweep",
        serialize = "5"
    )]
    SequentialSweep,
    /// Like `Sequential`, with only the active dot sweeping forward.
    #[strum(
        to_string = "sequential-sweep-active",
        serialize = "sequentialsweepactive",
        serialize = "6"
    )]
    SequentialSweepActive,
}

impl Style {
    /// Parses a style name or 1-based number, falling back to `Rotate`.
    pub fn from_selector(selector: &str) -> Self {
        selector.trim().parse().unwrap_or_else(|_| {
            log::warn!("Unknown style '{}', falling back to rotate", selector);
            Self::Rotate
        })
    }

    pub fn cycle_duration(&self) -> Duration {
        match self {
            Self::Rotate | Self::ScaleStep | Self::ScalePulse => Duration::from_millis(3600),
            Self::Sequential | Self::SequentialSweep | Self::SequentialSweepActive => {
                Duration::from_millis(1440)
            }
        }
    }

    /// Period of the pulse and sweep clocks: one dot's share of the cycle.
    pub fn step_duration(&self) -> Duration {
        self.cycle_duration() / DOT_COUNT as u32
    }

    pub fn clock_roles(&self) -> &'static [ClockRole] {
        match self {
            Self::Rotate | Self::ScaleStep | Self::Sequential => &[ClockRole::Primary],
            Self::ScalePulse => &[ClockRole::Primary, ClockRole::Pulse],
            Self::SequentialSweep | Self::SequentialSweepActive => {
                &[ClockRole::Primary, ClockRole::Sweep]
            }
        }
    }

    /// Only the rotating ring moves continuously; every other style steps.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Rotate)
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Selector {
            Number(i64),
            Name(String),
        }

        Ok(match Selector::deserialize(deserializer)? {
            Selector::Number(n) => Self::from_selector(&n.to_string()),
            Selector::Name(name) => Self::from_selector(&name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_selectors() {
        let cases = vec![
            ("rotate", Style::Rotate),
            ("ROTATE", Style::Rotate),
            ("1", Style::Rotate),
            ("scale-step", Style::ScaleStep),
            ("2", Style::ScaleStep),
            ("ScalePulse", Style::ScalePulse),
            ("4", Style::Sequential),
            ("sequential-sweep", Style::SequentialSweep),
            (" 6 ", Style::SequentialSweepActive),
        ];

        for (selector, expected) in cases {
            assert_eq!(Style::from_selector(selector), expected, "{selector}");
        }
    }

    #[test]
    fn test_out_of_range_selector_falls_back_to_rotate() {
        for selector in ["0", "7", "-1", "spin", ""] {
            assert_eq!(Style::from_selector(selector), Style::Rotate);
        }
    }

    #[test]
    fn test_style_deserialization() {
        let cases = vec![
            ("\"sequential\"", Style::Sequential),
            ("\"5\"", Style::SequentialSweep),
            ("3", Style::ScalePulse),
            ("42", Style::Rotate),
            ("\"wobble\"", Style::Rotate),
        ];

        for (json, expected) in cases {
            let deserialized: Style = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_cycle_duration_by_group() {
        assert_eq!(Style::ScalePulse.cycle_duration(), Duration::from_millis(3600));
        assert_eq!(Style::Sequential.cycle_duration(), Duration::from_millis(1440));
        assert_eq!(Style::ScalePulse.step_duration(), Duration::from_millis(300));
        assert_eq!(Style::SequentialSweep.step_duration(), Duration::from_millis(120));
    }

    #[test]
    fn test_clock_roles() {
        assert_eq!(Style::Rotate.clock_roles(), &[ClockRole::Primary]);
        assert_eq!(
            Style::ScalePulse.clock_roles(),
            &[ClockRole::Primary, ClockRole::Pulse]
        );
        assert_eq!(
            Style::SequentialSweepActive.clock_roles(),
            &[ClockRole::Primary, ClockRole::Sweep]
        );
    }
}
