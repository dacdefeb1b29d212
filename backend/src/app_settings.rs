use serde::{Deserialize, Serialize};

use crate::academic_calendar::MAX_WEEKS;
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Study weeks in a semester, used when a lesson names no weeks.
    pub max_weeks: u32,
    /// How many leading rows are searched for the group header.
    pub header_scan_rows: usize,
    pub header_scan_columns: usize,
    /// Rows past this index are never read as timetable rows.
    pub max_table_rows: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        ParserSettings {
            max_weeks: MAX_WEEKS,
            header_scan_rows: 20,
            header_scan_columns: 30,
            max_table_rows: 100,
        }
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl ParserSettings {
    /// Defaults overridden by `MAX_WEEKS`, `HEADER_SCAN_ROWS`,
    /// `HEADER_SCAN_COLUMNS` and `MAX_TABLE_ROWS`, also read from `.env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut settings = ParserSettings::default();
        if let Some(v) = env_value("MAX_WEEKS") {
            settings.max_weeks = v;
        }
        if let Some(v) = env_value("HEADER_SCAN_ROWS") {
            settings.header_scan_rows = v;
        }
        if let Some(v) = env_value("HEADER_SCAN_COLUMNS") {
            settings.header_scan_columns = v;
        }
        if let Some(v) = env_value("MAX_TABLE_ROWS") {
            settings.max_table_rows = v;
        }
        settings
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
