//! Parser for semester and test-session timetables.
//!
//! ```text
//! +-------------+--------+-------------+---------------+--------+---------+-------------+-------------------+--------+
//! |             |        |             |               |        | ГРУППА  |             |                   |        |
//! +-------------+--------+-------------+---------------+--------+---------+-------------+-------------------+--------+
//! | День недели | № пары | Нач.занятий | Оконч.занятий | Неделя | Предмет | Вид занятий | ФИО преподавателя | № ауд. |
//! | -5          | -4     | -3          | -2            | -1     | 0       | 1           | 2                 | 3      |
//! +-------------+--------+-------------+---------------+--------+---------+-------------+-------------------+--------+
//! ```

use std::path::Path;

use chrono::NaiveTime;

use crate::academic_calendar::Weekday;
use crate::app_settings::ParserSettings;
use crate::errors::{Result, ScheduleError};
use crate::excel_formatter::ExcelFormatter;
use crate::formatter::Formatter;
use crate::helpers::get_lesson_element;
use crate::logger::{info, warn};
use crate::models::{Lesson, LessonEmpty, LessonEntry, LessonsSchedule, Schedule, Teachers};
use crate::parser::{collect_schedules, skip_or_fail, ParserContext, ScheduleParser};
use crate::schedule_data::ScheduleCollection;
use crate::table_scanner::{find_group_row, get_group_columns, offset_column};
use crate::types::ScheduleType;
use crate::workbook::{Workbook, Worksheet};

/// Column offsets from a group's subject column.
#[derive(Debug, Clone, Copy)]
enum LessonColumn {
    Weekday = -5,
    LessonNumber = -4,
    StartTime = -3,
    EndTime = -2,
    Week = -1,
    Subject = 0,
    Type = 1,
    Teacher = 2,
    Room = 3,
}

/// A timetable row with the slot values it resolved to. Weekday, number and
/// times carry over from the rows above; the week parity is read per row.
#[derive(Debug, Clone, PartialEq)]
struct TimetableRow {
    row: usize,
    weekday: Weekday,
    num: u32,
    time_start: NaiveTime,
    time_end: NaiveTime,
    /// 1 for odd weeks ("I"), 2 for even weeks ("II").
    week: u32,
}

fn cell_value(sheet: &Worksheet, row: usize, column: usize, field: LessonColumn) -> Option<&str> {
    let column = offset_column(column, field as isize)?;
    sheet.cell(row, column).map(str::trim).filter(|v| !v.is_empty())
}

/// Times are written as "9-00" or "10-40".
fn parse_time(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once('-')?;
    NaiveTime::from_hms_opt(hour.trim().parse().ok()?, minute.trim().parse().ok()?, 0)
}

fn parse_lesson_number(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().or_else(|| {
        let number = value.parse::<f64>().ok()?;
        (number.fract() == 0.0 && number >= 0.0).then_some(number as u32)
    })
}

#[derive(Debug, Default)]
struct SlotCursor {
    weekday: Option<Weekday>,
    num: Option<u32>,
    time_start: Option<NaiveTime>,
    time_end: Option<NaiveTime>,
}

impl SlotCursor {
    /// Reads the slot cells of one row. A value that fails to parse leaves
    /// the remaining cells of the row unread.
    fn advance(&mut self, sheet: &Worksheet, row: usize, column: usize) -> Option<TimetableRow> {
        if let Some(value) = cell_value(sheet, row, column, LessonColumn::Weekday) {
            self.weekday = Some(Weekday::get_by_name(value)?);
        }
        if let Some(value) = cell_value(sheet, row, column, LessonColumn::LessonNumber) {
            self.num = Some(parse_lesson_number(value)?);
        }
        if let Some(value) = cell_value(sheet, row, column, LessonColumn::StartTime) {
            self.time_start = Some(parse_time(value)?);
        }
        if let Some(value) = cell_value(sheet, row, column, LessonColumn::EndTime) {
            self.time_end = Some(parse_time(value)?);
        }
        let week = match cell_value(sheet, row, column, LessonColumn::Week)? {
            "I" => 1,
            "II" => 2,
            _ => return None,
        };

        Some(TimetableRow {
            row,
            weekday: self.weekday?,
            num: self.num?,
            time_start: self.time_start?,
            time_end: self.time_end?,
            week,
        })
    }
}

pub struct LessonScheduleParser {
    workbook: Workbook,
    context: ParserContext,
    schedule_type: ScheduleType,
    settings: ParserSettings,
    formatter: Box<dyn Formatter>,
}

impl LessonScheduleParser {
    pub fn new(workbook: Workbook, context: ParserContext, schedule_type: ScheduleType) -> Result<Self> {
        if !matches!(schedule_type, ScheduleType::Semester | ScheduleType::TestSession) {
            return Err(ScheduleError::UnsupportedScheduleType(schedule_type));
        }
        Ok(LessonScheduleParser {
            workbook,
            context,
            schedule_type,
            settings: ParserSettings::default(),
            formatter: Box::new(ExcelFormatter::new()),
        })
    }

    pub fn open<P: AsRef<Path>>(path: P, context: ParserContext, schedule_type: ScheduleType) -> Result<Self> {
        LessonScheduleParser::new(Workbook::open(path)?, context, schedule_type)
    }

    pub fn with_settings(mut self, settings: ParserSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Slot rows, resolved once from the first group's columns and shared by
    /// every group of the worksheet.
    fn timetable_rows(&self, sheet: &Worksheet, column: usize, group_row: usize) -> Vec<TimetableRow> {
        let last_row = sheet.max_row().min(self.settings.max_table_rows);
        let mut cursor = SlotCursor::default();
        (group_row + 2..last_row)
            .filter_map(|row| cursor.advance(sheet, row, column))
            .collect()
    }

    fn parse_lessons(&self, sheet: &Worksheet, column: usize, rows: &[TimetableRow]) -> Result<Vec<LessonEntry>> {
        let mut entries = Vec::new();

        for slot in rows {
            let empty = LessonEntry::Empty(LessonEmpty {
                num: slot.num,
                weekday: slot.weekday,
                time_start: slot.time_start,
                time_end: slot.time_end,
            });

            let Some(subjects) = cell_value(sheet, slot.row, column, LessonColumn::Subject) else {
                entries.push(empty);
                continue;
            };

            let is_even = slot.week % 2 == 0;
            let lessons = self
                .formatter
                .get_lessons_with_weeks(subjects, Some(is_even), Some(self.settings.max_weeks))?;
            if lessons.is_empty() {
                entries.push(empty);
                continue;
            }

            let teachers = match cell_value(sheet, slot.row, column, LessonColumn::Teacher) {
                Some(value) => self.formatter.get_teachers(value)?,
                None => Teachers::default(),
            };
            let types = cell_value(sheet, slot.row, column, LessonColumn::Type)
                .map(|value| self.formatter.get_types(value))
                .unwrap_or_default();
            let rooms = match cell_value(sheet, slot.row, column, LessonColumn::Room) {
                Some(value) => self.formatter.get_rooms(value)?,
                None => Vec::new(),
            };

            let lessons_len = lessons.len();
            if let Teachers::WithSubgroups(pairs) = &teachers {
                if pairs.len() != lessons_len {
                    return Err(ScheduleError::CountMismatch {
                        field: "teachers",
                        expected: lessons_len,
                        found: pairs.len(),
                    });
                }
            }

            let mut pushed = false;
            for (i, (segment, weeks)) in lessons.into_iter().enumerate() {
                // weeks clamped past the semester or all excluded
                if weeks.is_empty() {
                    warn(&format!("No weeks left for lesson '{}', dropping it", segment.name));
                    continue;
                }

                let lesson_type = segment
                    .lesson_type
                    .or_else(|| get_lesson_element(lessons_len, i, &types).flatten());
                let room =
                    get_lesson_element(lessons_len, i, &rooms).map(|room| self.context.with_default_campus(room));
                let (teacher_names, subgroup) = match &teachers {
                    Teachers::WithSubgroups(pairs) => (vec![pairs[i].0.clone()], Some(pairs[i].1)),
                    Teachers::Names(names) => (names.clone(), segment.subgroup),
                };

                entries.push(LessonEntry::Lesson(Lesson {
                    num: slot.num,
                    name: segment.name,
                    weeks,
                    weekday: slot.weekday,
                    teachers: teacher_names,
                    time_start: slot.time_start,
                    time_end: slot.time_end,
                    lesson_type,
                    room,
                    subgroup,
                }));
                pushed = true;
            }
            if !pushed {
                entries.push(empty);
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
        let rows = self.timetable_rows(sheet, first.column, group_row);

        let mut schedules = Vec::new();
        for group in &groups {
            info(&format!("Processing group '{}', worksheet '{}'", group.name, sheet.title));
            match self.parse_lessons(sheet, group.column, &rows) {
                Ok(lessons) => schedules.push(Schedule::Lessons(LessonsSchedule {
                    group: group.name.clone(),
                    period: self.context.period,
                    institute: self.context.institute,
                    degree: self.context.degree,
                    document_url: self.context.document_url.clone(),
                    lessons,
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

impl ScheduleParser for LessonScheduleParser {
    fn parse(&self, force: bool, generate_dataframe: bool) -> Result<ScheduleCollection> {
        let mut schedules = Vec::new();
        for sheet in &self.workbook.worksheets {
            match self.parse_worksheet(sheet, force) {
                Ok(parsed) => schedules.extend(parsed),
                Err(err) => skip_or_fail(err, force, &format!("Worksheet '{}'", sheet.title))?,
            }
        }
        collect_schedules(schedules, self.schedule_type, generate_dataframe)
    }

    fn schedule_type(&self) -> ScheduleType {
        self.schedule_type
    }
}
