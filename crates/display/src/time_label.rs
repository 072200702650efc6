//! Time-of-day checkpoint labels.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Name of a time-of-day checkpoint, e.g. `"06:00"`.
///
/// Any non-blank string is accepted; surrounding whitespace is trimmed. Labels
/// written as `HH:MM` additionally map to a [`Daypart`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeLabel(String);

impl TimeLabel {
    pub fn new(label: impl Into<String>) -> Result<Self, LayoutError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(LayoutError::InvalidTimeLabel(label));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Clock time when the label is written as `HH:MM`.
    pub fn clock_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.0, "%H:%M").ok()
    }

    pub fn daypart(&self) -> Option<Daypart> {
        self.clock_time().map(Daypart::of)
    }
}

impl TryFrom<String> for TimeLabel {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeLabel::new(value)
    }
}

impl From<TimeLabel> for String {
    fn from(value: TimeLabel) -> Self {
        value.0
    }
}

impl core::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Demand band of a bakery's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Daypart {
    /// Before 07:00.
    EarlyMorning,
    /// 07:00 to 09:59.
    Breakfast,
    /// 10:00 to 12:59.
    Lunch,
    /// 13:00 to 15:59.
    Afternoon,
    /// 16:00 onwards.
    Evening,
}

impl Daypart {
    pub fn of(time: NaiveTime) -> Self {
        match time.hour() {
            0..=6 => Daypart::EarlyMorning,
            7..=9 => Daypart::Breakfast,
            10..=12 => Daypart::Lunch,
            13..=15 => Daypart::Afternoon,
            _ => Daypart::Evening,
        }
    }
}
