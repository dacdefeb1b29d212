use thiserror::Error;

use crate::types::ScheduleType;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Group row not found in worksheet '{worksheet}'")]
    GroupRowNotFound { worksheet: String },

    #[error("Malformed week numbers: '{0}'")]
    MalformedNumber(String),

    #[error("max_weeks is required to infer weeks for '{0}'")]
    MissingMaxWeeks(String),

    #[error("Count mismatch for '{field}': {found} values for {expected} lessons")]
    CountMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unknown lesson type: '{0}'")]
    UnknownLessonType(String),

    #[error("Unknown latin letter in room: '{0}'")]
    UnknownRoomLetter(char),

    #[error("Unsupported schedule type: {0:?}")]
    UnsupportedScheduleType(ScheduleType),

    #[error("Schedule kind mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Schedule cannot be empty")]
    EmptyCollection,

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Dataframe is not generated")]
    DataframeNotGenerated,

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Data-quality errors that force mode may log and skip.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScheduleError::GroupRowNotFound { .. }
                | ScheduleError::MalformedNumber(_)
                | ScheduleError::MissingMaxWeeks(_)
                | ScheduleError::CountMismatch { .. }
                | ScheduleError::UnknownLessonType(_)
                | ScheduleError::UnknownRoomLetter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
