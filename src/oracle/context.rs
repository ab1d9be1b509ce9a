//! Time-of-travel context handed to the oracle.

use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::fmt;

/// Climate season as used by the forecasting models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Season {
    /// March to May.
    Summer,
    /// June to September.
    Monsoon,
    /// October to February.
    Winter,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Summer,
            6..=9 => Season::Monsoon,
            _ => Season::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Winter => "Winter",
        };
        f.write_str(name)
    }
}

/// When the deliveries happen. Fixed for a whole optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripContext {
    pub time_of_day: NaiveTime,
    pub weekday: Weekday,
    pub season: Season,
    pub is_peak: bool,
    /// Precipitation expected along the route.
    pub wet_weather: bool,
}

impl TripContext {
    /// Derives season and peak flag from a local timestamp.
    ///
    /// Peak hours are 08:00 to 11:59 and 17:00 to 21:59.
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        let hour = at.hour();
        Self {
            time_of_day: at.time(),
            weekday: at.weekday(),
            season: Season::from_month(at.month()),
            is_peak: is_peak_hour(hour),
            wet_weather: false,
        }
    }

    /// Context for the current local time.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn with_wet_weather(mut self, wet: bool) -> Self {
        self.wet_weather = wet;
        self
    }

    /// `HH:MM` rendering of the time of day.
    pub fn time_label(&self) -> String {
        self.time_of_day.format("%H:%M").to_string()
    }

    /// Full English weekday name.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl Default for TripContext {
    /// Monday noon in winter, off-peak, dry.
    fn default() -> Self {
        Self {
            time_of_day: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            weekday: Weekday::Mon,
            season: Season::Winter,
            is_peak: false,
            wet_weather: false,
        }
    }
}

fn is_peak_hour(hour: u32) -> bool {
    (8..=11).contains(&hour) || (17..=21).contains(&hour)
}
