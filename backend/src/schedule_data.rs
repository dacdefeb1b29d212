use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ScheduleError};
use crate::logger::debug;
use crate::models::{ExamsSchedule, LessonsSchedule, Room, Schedule};
use crate::types::ScheduleType;

pub const LESSON_COLUMNS: [&str; 13] = [
    "group",
    "lesson_num",
    "lesson",
    "weeks",
    "weekday",
    "teachers",
    "time_start",
    "time_end",
    "type",
    "room",
    "campus",
    "room_type",
    "subgroup",
];

pub const EXAM_COLUMNS: [&str; 8] = [
    "group",
    "month",
    "day",
    "exam",
    "teachers",
    "rooms",
    "exam_type",
    "time_start",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRow {
    pub group: String,
    pub lesson_num: u32,
    pub lesson: String,
    pub weeks: String,
    pub weekday: String,
    pub teachers: String,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    #[serde(rename = "type")]
    pub lesson_type: Option<String>,
    pub room: Option<String>,
    pub campus: Option<String>,
    pub room_type: Option<String>,
    pub subgroup: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRow {
    pub group: String,
    pub month: String,
    pub day: u32,
    pub exam: String,
    pub teachers: String,
    pub rooms: String,
    pub exam_type: String,
    pub time_start: NaiveTime,
}

/// Flat table of every lesson or exam in a collection. Empty slots
/// produce no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScheduleFrame {
    Lessons(Vec<LessonRow>),
    Exams(Vec<ExamRow>),
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<String>>().join(",")
}

fn lesson_rows(schedule: &LessonsSchedule) -> impl Iterator<Item = LessonRow> + '_ {
    schedule.lessons.iter().filter_map(|entry| entry.as_lesson()).map(|lesson| {
        let room = lesson.room.as_ref();
        LessonRow {
            group: schedule.group.clone(),
            lesson_num: lesson.num,
            lesson: lesson.name.clone(),
            weeks: join(&lesson.weeks),
            weekday: lesson.weekday.name().to_string(),
            teachers: lesson.teachers.join(","),
            time_start: lesson.time_start,
            time_end: lesson.time_end,
            lesson_type: lesson.lesson_type.map(|t| t.as_str().to_string()),
            room: room.map(|r| r.name.clone()),
            campus: room.and_then(|r| r.campus).map(|c| c.full_name().to_string()),
            room_type: room.and_then(|r| r.room_type).map(|t| t.as_str().to_string()),
            subgroup: lesson.subgroup,
        }
    })
}

fn exam_rows(schedule: &ExamsSchedule) -> impl Iterator<Item = ExamRow> + '_ {
    schedule.exams.iter().filter_map(|entry| entry.as_exam()).map(|exam| ExamRow {
        group: schedule.group.clone(),
        month: exam.month.name().to_string(),
        day: exam.day,
        exam: exam.name.clone(),
        teachers: exam.teachers.join(","),
        rooms: exam.rooms.iter().map(|r| r.name.as_str()).collect::<Vec<&str>>().join(","),
        exam_type: exam.exam_type.as_str().to_string(),
        time_start: exam.time_start,
    })
}

impl ScheduleFrame {
    fn build(schedules: &[Schedule], schedule_type: ScheduleType) -> Self {
        match schedule_type {
            ScheduleType::ExamSession => ScheduleFrame::Exams(
                schedules
                    .iter()
                    .filter_map(Schedule::as_exams)
                    .flat_map(exam_rows)
                    .collect(),
            ),
            ScheduleType::Semester | ScheduleType::TestSession => ScheduleFrame::Lessons(
                schedules
                    .iter()
                    .filter_map(Schedule::as_lessons)
                    .flat_map(lesson_rows)
                    .collect(),
            ),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ScheduleFrame::Lessons(_) => &LESSON_COLUMNS,
            ScheduleFrame::Exams(_) => &EXAM_COLUMNS,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ScheduleFrame::Lessons(rows) => rows.len(),
            ScheduleFrame::Exams(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Schedules of one kind, parsed from one or more documents, with an
/// optional flat frame that is only built on request.
#[derive(Debug, Clone)]
pub struct ScheduleCollection {
    schedules: Vec<Schedule>,
    schedule_type: ScheduleType,
    frame: Option<ScheduleFrame>,
}

impl ScheduleCollection {
    pub fn new(schedules: Vec<Schedule>, schedule_type: ScheduleType) -> Result<Self> {
        if schedules.is_empty() {
            return Err(ScheduleError::EmptyCollection);
        }
        for schedule in &schedules {
            check_kind(schedule, schedule_type)?;
        }
        Ok(ScheduleCollection {
            schedules,
            schedule_type,
            frame: None,
        })
    }

    pub fn append(&mut self, schedule: Schedule) -> Result<()> {
        check_kind(&schedule, self.schedule_type)?;
        self.schedules.push(schedule);
        self.refresh_frame();
        Ok(())
    }

    /// Adds all schedules or none of them.
    pub fn extend(&mut self, schedules: Vec<Schedule>) -> Result<()> {
        for schedule in &schedules {
            check_kind(schedule, self.schedule_type)?;
        }
        self.schedules.extend(schedules);
        self.refresh_frame();
        Ok(())
    }

    /// Takes over the schedules of another collection of the same kind.
    pub fn merge(&mut self, other: ScheduleCollection) -> Result<()> {
        self.extend(other.schedules)
    }

    fn refresh_frame(&mut self) {
        if self.frame.is_some() {
            self.generate_dataframe();
        }
    }

    pub fn generate_dataframe(&mut self) {
        let frame = ScheduleFrame::build(&self.schedules, self.schedule_type);
        debug(&format!("Generated frame with {} rows", frame.len()));
        self.frame = Some(frame);
    }

    pub fn is_dataframe_generated(&self) -> bool {
        self.frame.is_some()
    }

    pub fn get_dataframe(&self) -> Result<&ScheduleFrame> {
        self.frame.as_ref().ok_or(ScheduleError::DataframeNotGenerated)
    }

    pub fn get_schedule(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn get_group_schedule(&self, group: &str) -> Result<&Schedule> {
        self.schedules
            .iter()
            .find(|s| s.group() == group)
            .ok_or_else(|| ScheduleError::GroupNotFound(group.to_string()))
    }

    /// Group names in first-seen order.
    pub fn get_groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for schedule in &self.schedules {
            if !groups.iter().any(|g| g == schedule.group()) {
                groups.push(schedule.group().to_string());
            }
        }
        groups
    }

    /// Distinct rooms of all lessons and exams, in first-seen order.
    pub fn get_rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();
        for room in self.schedules.iter().flat_map(Schedule::rooms) {
            if !rooms.contains(room) {
                rooms.push(room.clone());
            }
        }
        rooms
    }

    pub fn schedule_type(&self) -> ScheduleType {
        self.schedule_type
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

fn check_kind(schedule: &Schedule, schedule_type: ScheduleType) -> Result<()> {
    let expected = schedule_type.kind();
    if schedule.kind() != expected {
        return Err(ScheduleError::TypeMismatch {
            expected: expected.as_str(),
            found: schedule.kind().as_str(),
        });
    }
    Ok(())
}
