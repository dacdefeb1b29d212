//! Parser for exam-session timetables.
//!
//! ```text
//! +-------+-------+--------+-------+-------+--------+
//! | месяц | число | группа | время | № ауд | Ссылка |
//! +-------+-------+--------+-------+-------+--------+
//! |    -2 |    -1 |      0 |     1 |     2 |      3 |
//! +-------+-------+--------+-------+-------+--------+
//! ```
//!
//! An exam takes three consecutive rows of the group column: the exam type,
//! the subject name and the teachers.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;

use crate::academic_calendar::Month;
use crate::app_settings::ParserSettings;
use crate::errors::Result;
use crate::excel_formatter::ExcelFormatter;
use crate::formatter::Formatter;
use crate::logger::info;
use crate::models::{Exam, ExamEmpty, ExamEntry, ExamsSchedule, Schedule};
use crate::parser::{collect_schedules, skip_or_fail, ParserContext, ScheduleParser};
use crate::schedule_data::ScheduleCollection;
use crate::table_scanner::{find_group_row, get_group_columns, offset_column};
use crate::types::{ExamType, ScheduleType};
use crate::workbook::{Workbook, Worksheet};

lazy_static! {
    static ref RE_EXAM_TIME: Regex = Regex::new(r"(\d{2})-(\d{2})").unwrap();
}

#[derive(Debug, Clone, Copy)]
enum ExamColumn {
    Month = -2,
    Day = -1,
    /// Exam type, subject and teachers, one per row.
    Group = 0,
    StartTime = 1,
    Room = 2,
    Link = 3,
}

#[derive(Debug, Clone, PartialEq)]
struct ExamRow {
    row: usize,
    month: Month,
    day: u32,
}

fn cell_value(sheet: &Worksheet, row: usize, column: usize, field: ExamColumn) -> Option<&str> {
    let column = offset_column(column, field as isize)?;
    sheet.cell(row, column).map(str::trim).filter(|v| !v.is_empty())
}

/// First "HH-MM" in the cell; a cell may list a second time after it.
fn parse_start_time(value: &str) -> Option<NaiveTime> {
    let caps = RE_EXAM_TIME.captures(value)?;
    NaiveTime::from_hms_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, 0)
}

fn parse_day(value: &str) -> Option<u32> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub struct ExamScheduleParser {
    workbook: Workbook,
    context: ParserContext,
    settings: ParserSettings,
    formatter: Box<dyn Formatter>,
}

impl ExamScheduleParser {
    pub fn new(workbook: Workbook, context: ParserContext) -> Self {
        ExamScheduleParser {
            workbook,
            context,
            settings: ParserSettings::default(),
            formatter: Box::new(ExcelFormatter::new()),
        }
    }

    pub fn open<P: AsRef<Path>>(path: P, context: ParserContext) -> Result<Self> {
        Ok(ExamScheduleParser::new(Workbook::open(path)?, context))
    }

    pub fn with_settings(mut self, settings: ParserSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Rows below the header once both a month and a day are known. Both
    /// carry over to the rows below until overwritten.
    fn exam_rows(&self, sheet: &Worksheet, column: usize, group_row: usize) -> Vec<ExamRow> {
        let last_row = sheet.max_row().min(self.settings.max_table_rows);
        let mut month = None;
        let mut day = None;
        let mut rows = Vec::new();

        for row in group_row + 1..last_row {
            if let Some(value) = cell_value(sheet, row, column, ExamColumn::Month) {
                match Month::from_str(value) {
                    Ok(parsed) => month = Some(parsed),
                    Err(_) => continue,
                }
            }
            if let Some(parsed) = cell_value(sheet, row, column, ExamColumn::Day).and_then(parse_day) {
                day = Some(parsed);
            }
            if let (Some(month), Some(day)) = (month, day) {
                rows.push(ExamRow { row, month, day });
            }
        }
        rows
    }

    fn parse_exams(&self, sheet: &Worksheet, column: usize, rows: &[ExamRow]) -> Result<Vec<ExamEntry>> {
        let mut entries = Vec::new();

        for (i, exam_row) in rows.iter().enumerate() {
            let exam_type = cell_value(sheet, exam_row.row, column, ExamColumn::Group).and_then(ExamType::from_cell);

            let Some(exam_type) = exam_type else {
                entries.push(ExamEntry::Empty(ExamEmpty {
                    month: exam_row.month,
                    day: exam_row.day,
                }));
                continue;
            };

            // The subject and teachers rows must exist.
            let (Some(name_row), Some(teachers_row)) = (rows.get(i + 1), rows.get(i + 2)) else {
                break;
            };

            let Some(name) = cell_value(sheet, name_row.row, column, ExamColumn::Group) else {
                entries.push(ExamEntry::Empty(ExamEmpty {
                    month: exam_row.month,
                    day: exam_row.day,
                }));
                continue;
            };

            let teachers = match cell_value(sheet, teachers_row.row, column, ExamColumn::Group) {
                Some(value) => self.formatter.get_teachers(value)?.names(),
                None => Vec::new(),
            };
            let rooms = match cell_value(sheet, exam_row.row, column, ExamColumn::Room) {
                Some(value) => self
                    .formatter
                    .get_rooms(value)?
                    .into_iter()
                    .map(|room| self.context.with_default_campus(room))
                    .collect(),
                None => Vec::new(),
            };
            let time_start = cell_value(sheet, exam_row.row, column, ExamColumn::StartTime).and_then(parse_start_time);
            let link = cell_value(sheet, exam_row.row, column, ExamColumn::Link).map(str::to_string);

            if let Some(time_start) = time_start {
                entries.push(ExamEntry::Exam(Exam {
                    month: exam_row.month,
                    day: exam_row.day,
                    name: name.to_string(),
                    time_start,
                    teachers,
                    rooms,
                    exam_type,
                    link,
                }));
            }
        }

        Ok(entries)
    }

    fn parse_worksheet(&self, sheet: &Worksheet, force: bool) -> Result<Vec<Schedule>> {
        let group_row = find_group_row(sheet, &self.settings)?;
        let groups = get_group_columns(sheet, group_row);
        let Some(first) = groups.first() else {
            return Ok(Vec::new());
        };
        let rows = self.exam_rows(sheet, first.column, group_row);

        let mut schedules = Vec::new();
        for group in &groups {
            info(&format!("Processing group '{}', worksheet '{}'", group.name, sheet.title));
            match self.parse_exams(sheet, group.column, &rows) {
                Ok(exams) => schedules.push(Schedule::Exams(ExamsSchedule {
                    group: group.name.clone(),
                    period: self.context.period,
                    institute: self.context.institute,
                    degree: self.context.degree,
                    document_url: self.context.document_url.clone(),
                    exams,
                })),
                Err(err) => skip_or_fail(
                    err,
                    force,
                    &format!("Error parsing schedule for group {} in worksheet {}", group.name, sheet.title),
                )?,
            }
        }
        Ok(schedules)
    }
}

impl ScheduleParser for ExamScheduleParser {
    fn parse(&self, force: bool, generate_dataframe: bool) -> Result<ScheduleCollection> {
        let mut schedules = Vec::new();
        for sheet in &self.workbook.worksheets {
            match self.parse_worksheet(sheet, force) {
                Ok(parsed) => schedules.extend(parsed),
                Err(err) => skip_or_fail(err, force, &format!("Worksheet '{}'", sheet.title))?,
            }
        }
        collect_schedules(schedules, ScheduleType::ExamSession, generate_dataframe)
    }

    fn schedule_type(&self) -> ScheduleType {
        ScheduleType::ExamSession
    }
}
