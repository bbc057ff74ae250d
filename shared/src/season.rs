//! Indian agricultural season resolution
//!
//! Months are mapped onto the four season tags the dashboard biases its
//! synthetic data with: Jun-Sep monsoon, Oct-Dec kharif, Jan-Mar rabi,
//! Apr-May summer.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Agricultural season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Monsoon,
    Kharif,
    Rabi,
    Summer,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Monsoon, Season::Kharif, Season::Rabi, Season::Summer];

    /// Resolve the season for a calendar date
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self::from_month(date.month())
    }

    /// Resolve the season for a 1-based month. Out of range months fall
    /// through to summer.
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=9 => Season::Monsoon,
            10..=12 => Season::Kharif,
            1..=3 => Season::Rabi,
            _ => Season::Summer,
        }
    }

    /// Season for today's date in UTC
    pub fn current() -> Self {
        Self::from_date(&chrono::Utc::now().date_naive())
    }

    /// Position in `[monsoon, kharif, rabi, summer]` tables
    pub fn index(&self) -> usize {
        match self {
            Season::Monsoon => 0,
            Season::Kharif => 1,
            Season::Rabi => 2,
            Season::Summer => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Monsoon => "monsoon",
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Summer => "summer",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monsoon" => Ok(Season::Monsoon),
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "summer" => Ok(Season::Summer),
            _ => Err(ParseError::UnknownSeason(s.to_string())),
        }
    }
}

/// One value per season
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonTable<T> {
    pub monsoon: T,
    pub kharif: T,
    pub rabi: T,
    pub summer: T,
}

impl<T: Copy> SeasonTable<T> {
    /// Build a table in `[monsoon, kharif, rabi, summer]` order
    pub const fn new(values: [T; 4]) -> Self {
        Self {
            monsoon: values[0],
            kharif: values[1],
            rabi: values[2],
            summer: values[3],
        }
    }

    pub fn get(&self, season: Season) -> T {
        match season {
            Season::Monsoon => self.monsoon,
            Season::Kharif => self.kharif,
            Season::Rabi => self.rabi,
            Season::Summer => self.summer,
        }
    }
}
