//! Time frames and their duration ordering.

use chrono::TimeDelta;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown time frame: {0}")]
pub struct ParseTimeFrameError(pub String);

/// Candle time frame. Ordered by duration, shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    ThreeHours,
    FourHours,
    SixHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 16] = [
        TimeFrame::OneMinute,
        TimeFrame::ThreeMinutes,
        TimeFrame::FiveMinutes,
        TimeFrame::FifteenMinutes,
        TimeFrame::ThirtyMinutes,
        TimeFrame::OneHour,
        TimeFrame::TwoHours,
        TimeFrame::ThreeHours,
        TimeFrame::FourHours,
        TimeFrame::SixHours,
        TimeFrame::EightHours,
        TimeFrame::TwelveHours,
        TimeFrame::OneDay,
        TimeFrame::ThreeDays,
        TimeFrame::OneWeek,
        TimeFrame::OneMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::OneMinute => "1m",
            TimeFrame::ThreeMinutes => "3m",
            TimeFrame::FiveMinutes => "5m",
            TimeFrame::FifteenMinutes => "15m",
            TimeFrame::ThirtyMinutes => "30m",
            TimeFrame::OneHour => "1h",
            TimeFrame::TwoHours => "2h",
            TimeFrame::ThreeHours => "3h",
            TimeFrame::FourHours => "4h",
            TimeFrame::SixHours => "6h",
            TimeFrame::EightHours => "8h",
            TimeFrame::TwelveHours => "12h",
            TimeFrame::OneDay => "1d",
            TimeFrame::ThreeDays => "3d",
            TimeFrame::OneWeek => "1w",
            TimeFrame::OneMonth => "1M",
        }
    }

    /// Length of one candle. A month counts as 30 days.
    pub fn duration(&self) -> TimeDelta {
        let minutes = match self {
            TimeFrame::OneMinute => 1,
            TimeFrame::ThreeMinutes => 3,
            TimeFrame::FiveMinutes => 5,
            TimeFrame::FifteenMinutes => 15,
            TimeFrame::ThirtyMinutes => 30,
            TimeFrame::OneHour => 60,
            TimeFrame::TwoHours => 2 * 60,
            TimeFrame::ThreeHours => 3 * 60,
            TimeFrame::FourHours => 4 * 60,
            TimeFrame::SixHours => 6 * 60,
            TimeFrame::EightHours => 8 * 60,
            TimeFrame::TwelveHours => 12 * 60,
            TimeFrame::OneDay => 24 * 60,
            TimeFrame::ThreeDays => 3 * 24 * 60,
            TimeFrame::OneWeek => 7 * 24 * 60,
            TimeFrame::OneMonth => 30 * 24 * 60,
        };
        TimeDelta::minutes(minutes)
    }
}

impl Ord for TimeFrame {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duration().cmp(&other.duration())
    }
}

impl PartialOrd for TimeFrame {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = ParseTimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        TimeFrame::ALL
            .iter()
            .find(|tf| tf.as_str() == token)
            .copied()
            .ok_or_else(|| ParseTimeFrameError(token.to_string()))
    }
}

/// Returns the given time frames sorted by ascending duration.
pub fn sort_time_frames<I>(time_frames: I) -> Vec<TimeFrame>
where
    I: IntoIterator<Item = TimeFrame>,
{
    let mut sorted: Vec<TimeFrame> = time_frames.into_iter().collect();
    sorted.sort();
    sorted
}

/// Parses a comma separated list such as `1h, 4h, 1d`. Empty tokens are skipped.
pub fn parse_time_frames(input: &str) -> Result<Vec<TimeFrame>, ParseTimeFrameError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

pub fn join_time_frames(time_frames: &[TimeFrame]) -> String {
    time_frames
        .iter()
        .map(TimeFrame::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
