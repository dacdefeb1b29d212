pub mod types;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod app_settings;
pub mod academic_calendar;
pub mod models;

pub mod week_parser;
pub mod subgroups;
pub mod lesson_name;
pub mod lesson_splitter;
pub mod rooms;
pub mod teachers;
pub mod formatter;
pub mod excel_formatter;

pub mod workbook;
pub mod table_scanner;
pub mod parser;
pub mod excel_parser;
pub mod exams_parser;
pub mod schedule_data;

pub use errors::{Result, ScheduleError};
pub use excel_formatter::ExcelFormatter;
pub use excel_parser::LessonScheduleParser;
pub use exams_parser::ExamScheduleParser;
pub use formatter::Formatter;
pub use parser::{ParserContext, ScheduleParser};
pub use schedule_data::{ScheduleCollection, ScheduleFrame};
pub use workbook::{Workbook, Worksheet};

use std::path::Path;

use crate::types::ScheduleType;

/// Opens a workbook and parses it with the parser matching `schedule_type`.
pub fn parse_document<P: AsRef<Path>>(
    path: P,
    context: ParserContext,
    schedule_type: ScheduleType,
    settings: app_settings::ParserSettings,
    force: bool,
    generate_dataframe: bool,
) -> Result<ScheduleCollection> {
    let workbook = Workbook::open(path)?;
    let parser: Box<dyn ScheduleParser> = match schedule_type {
        ScheduleType::ExamSession => Box::new(ExamScheduleParser::new(workbook, context).with_settings(settings)),
        ScheduleType::Semester | ScheduleType::TestSession => {
            Box::new(LessonScheduleParser::new(workbook, context, schedule_type)?.with_settings(settings))
        }
    };
    parser.parse(force, generate_dataframe)
}
