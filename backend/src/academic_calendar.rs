//! Academic calendar: weekdays, months, semester periods and week dates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday as ChronoWeekday};
use serde::{Deserialize, Serialize};

use crate::types::ParseEnumError;

/// Number of study weeks in a semester.
pub const MAX_WEEKS: u32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "понедельник",
            Weekday::Tuesday => "вторник",
            Weekday::Wednesday => "среда",
            Weekday::Thursday => "четверг",
            Weekday::Friday => "пятница",
            Weekday::Saturday => "суббота",
            Weekday::Sunday => "воскресенье",
        }
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }

    pub fn get_by_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Weekday::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn get_by_number(number: u32) -> Option<Self> {
        Weekday::ALL.into_iter().find(|d| d.number() == number)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "январь",
            Month::February => "февраль",
            Month::March => "март",
            Month::April => "апрель",
            Month::May => "май",
            Month::June => "июнь",
            Month::July => "июль",
            Month::August => "август",
            Month::September => "сентябрь",
            Month::October => "октябрь",
            Month::November => "ноябрь",
            Month::December => "декабрь",
        }
    }

    pub fn number(&self) -> u32 {
        *self as u32
    }
}

impl FromStr for Month {
    type Err = ParseEnumError;

    /// Accepts month cells as printed in exam sheets, where the name may be
    /// spaced out or repeated across merged cells ("январь январь").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        let name = collapse_repeated_word(&compact);
        Month::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| ParseEnumError::new("Month", s))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Replaces `word ... word` with a single `word`, scanning left to right
/// and preferring the longest repeated word at each position.
fn collapse_repeated_word(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    'outer: while i < chars.len() {
        let mut word_end = i;
        while word_end < chars.len() && (chars[word_end].is_alphanumeric() || chars[word_end] == '_') {
            word_end += 1;
        }

        for len in (1..=(word_end - i)).rev() {
            let word = &chars[i..i + len];
            // The last repeat wins, the gap between may hold anything.
            let last = (i + len..=chars.len().saturating_sub(len))
                .rev()
                .find(|&j| &chars[j..j + len] == word);
            if let Some(j) = last {
                out.extend(word.iter());
                i = j + len;
                continue 'outer;
            }
        }

        out.push(chars[i]);
        i += 1;
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year_start: i32,
    pub year_end: i32,
    pub semester: u32,
}

impl Period {
    pub fn new(year_start: i32, year_end: i32, semester: u32) -> Self {
        Period { year_start, year_end, semester }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year_start, self.year_end, self.semester)
    }
}

impl FromStr for Period {
    type Err = ParseEnumError;

    /// Parses `2022-2023-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(ParseEnumError::new("Period", s));
        }
        let year_start = parts[0].parse::<i32>().map_err(|_| ParseEnumError::new("Period", s))?;
        let year_end = parts[1].parse::<i32>().map_err(|_| ParseEnumError::new("Period", s))?;
        let semester = parts[2].parse::<u32>().map_err(|_| ParseEnumError::new("Period", s))?;
        if !(1..=2).contains(&semester) {
            return Err(ParseEnumError::new("Period", s));
        }
        Ok(Period::new(year_start, year_end, semester))
    }
}

/// The academic period a date belongs to. August already counts as the
/// autumn semester of the upcoming year.
pub fn get_period(date: NaiveDate) -> Period {
    let year = date.year();
    if date.month() >= 8 {
        Period::new(year, year + 1, 1)
    } else {
        Period::new(year - 1, year, 2)
    }
}

/// First study day of the semester.
pub fn get_semester_start(period: &Period) -> Option<NaiveDate> {
    let (year, month, day) = if period.semester == 1 {
        (period.year_start, 9, 1)
    } else {
        (period.year_end, 2, 9)
    };
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    if start.weekday() == ChronoWeekday::Sun {
        start.checked_add_days(Days::new(1))
    } else {
        Some(start)
    }
}

/// Monday of the given study week (weeks are 1-based).
pub fn get_week_start(period: &Period, week: u32) -> Option<NaiveDate> {
    if week == 0 {
        return None;
    }
    let start = get_semester_start(period)?;
    let monday = start.checked_sub_days(Days::new(start.weekday().num_days_from_monday() as u64))?;
    monday.checked_add_days(Days::new(7 * (week as u64 - 1)))
}

pub fn get_lesson_date(period: &Period, week: u32, weekday: Weekday) -> Option<NaiveDate> {
    get_week_start(period, week)?.checked_add_days(Days::new(weekday.number() as u64 - 1))
}
