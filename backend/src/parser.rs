use serde::{Deserialize, Serialize};

use crate::academic_calendar::Period;
use crate::errors::{Result, ScheduleError};
use crate::logger::error;
use crate::models::{Room, Schedule};
use crate::schedule_data::ScheduleCollection;
use crate::types::{Degree, Institute, ScheduleType};

/// Document-level facts attached to every schedule a parser produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserContext {
    pub period: Period,
    pub institute: Institute,
    pub degree: Degree,
    pub document_url: Option<String>,
}

impl ParserContext {
    pub fn new(period: Period, institute: Institute, degree: Degree) -> Self {
        ParserContext {
            period,
            institute,
            degree,
            document_url: None,
        }
    }

    pub fn with_document_url(mut self, url: &str) -> Self {
        self.document_url = Some(url.to_string());
        self
    }

    /// The institute's default campus for a room that does not name one.
    pub fn with_default_campus(&self, room: Room) -> Room {
        match (room.campus, self.institute.default_campus()) {
            (None, Some(campus)) => Room {
                campus: Some(campus),
                ..room
            },
            _ => room,
        }
    }
}

pub trait ScheduleParser {
    /// Parses every worksheet of the document.
    ///
    /// With `force`, data-quality errors skip the affected group or
    /// worksheet and are logged; otherwise the first one aborts the parse.
    /// With `generate_dataframe`, the collection's frame is built as well.
    fn parse(&self, force: bool, generate_dataframe: bool) -> Result<ScheduleCollection>;

    fn schedule_type(&self) -> ScheduleType;
}

/// Swallows `err` in force mode when it is recoverable.
pub(crate) fn skip_or_fail(err: ScheduleError, force: bool, context: &str) -> Result<()> {
    if force && err.is_recoverable() {
        error(&format!("{}: {}. Skipping.", context, err));
        Ok(())
    } else {
        Err(err)
    }
}

pub(crate) fn collect_schedules(
    schedules: Vec<Schedule>,
    schedule_type: ScheduleType,
    generate_dataframe: bool,
) -> Result<ScheduleCollection> {
    let mut collection = ScheduleCollection::new(schedules, schedule_type)?;
    if generate_dataframe {
        collection.generate_dataframe();
    }
    Ok(collection)
}
