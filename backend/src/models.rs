use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::academic_calendar::{Month, Period, Weekday};
use crate::types::{Campus, Degree, ExamType, Institute, LessonType, RoomType, ScheduleKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub campus: Option<Campus>,
    pub room_type: Option<RoomType>,
}

impl Room {
    pub fn new(name: &str, campus: Option<Campus>, room_type: Option<RoomType>) -> Self {
        Room {
            name: name.to_string(),
            campus,
            room_type,
        }
    }
}

/// One sub-lesson found in a subject cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSegment {
    pub name: String,
    pub lesson_type: Option<LessonType>,
    pub subgroup: Option<u32>,
}

impl LessonSegment {
    pub fn new(name: &str, lesson_type: Option<LessonType>, subgroup: Option<u32>) -> Self {
        LessonSegment {
            name: name.to_string(),
            lesson_type,
            subgroup,
        }
    }
}

/// Teachers parsed from one cell. Either every name carries a subgroup or none does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Teachers {
    Names(Vec<String>),
    WithSubgroups(Vec<(String, u32)>),
}

impl Default for Teachers {
    fn default() -> Self {
        Teachers::Names(Vec::new())
    }
}

impl Teachers {
    pub fn len(&self) -> usize {
        match self {
            Teachers::Names(names) => names.len(),
            Teachers::WithSubgroups(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        match self {
            Teachers::Names(names) => names.clone(),
            Teachers::WithSubgroups(pairs) => pairs.iter().map(|(name, _)| name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub num: u32,
    pub name: String,
    pub weeks: Vec<u32>,
    pub weekday: Weekday,
    pub teachers: Vec<String>,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub lesson_type: Option<LessonType>,
    pub room: Option<Room>,
    pub subgroup: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonEmpty {
    pub num: u32,
    pub weekday: Weekday,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LessonEntry {
    Lesson(Lesson),
    Empty(LessonEmpty),
}

impl LessonEntry {
    pub fn as_lesson(&self) -> Option<&Lesson> {
        match self {
            LessonEntry::Lesson(lesson) => Some(lesson),
            LessonEntry::Empty(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub month: Month,
    pub day: u32,
    pub name: String,
    pub time_start: NaiveTime,
    pub teachers: Vec<String>,
    pub rooms: Vec<Room>,
    pub exam_type: ExamType,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamEmpty {
    pub month: Month,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExamEntry {
    Exam(Exam),
    Empty(ExamEmpty),
}

impl ExamEntry {
    pub fn as_exam(&self) -> Option<&Exam> {
        match self {
            ExamEntry::Exam(exam) => Some(exam),
            ExamEntry::Empty(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonsSchedule {
    pub group: String,
    pub period: Period,
    pub institute: Institute,
    pub degree: Degree,
    pub document_url: Option<String>,
    pub lessons: Vec<LessonEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamsSchedule {
    pub group: String,
    pub period: Period,
    pub institute: Institute,
    pub degree: Degree,
    pub document_url: Option<String>,
    pub exams: Vec<ExamEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    Lessons(LessonsSchedule),
    Exams(ExamsSchedule),
}

impl Schedule {
    pub fn kind(&self) -> ScheduleKind {
        match self {
            Schedule::Lessons(_) => ScheduleKind::Lessons,
            Schedule::Exams(_) => ScheduleKind::Exams,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Schedule::Lessons(s) => &s.group,
            Schedule::Exams(s) => &s.group,
        }
    }

    pub fn period(&self) -> Period {
        match self {
            Schedule::Lessons(s) => s.period,
            Schedule::Exams(s) => s.period,
        }
    }

    pub fn rooms(&self) -> Vec<&Room> {
        match self {
            Schedule::Lessons(s) => s
                .lessons
                .iter()
                .filter_map(|e| e.as_lesson())
                .filter_map(|l| l.room.as_ref())
                .collect(),
            Schedule::Exams(s) => s
                .exams
                .iter()
                .filter_map(|e| e.as_exam())
                .flat_map(|e| e.rooms.iter())
                .collect(),
        }
    }

    pub fn as_lessons(&self) -> Option<&LessonsSchedule> {
        match self {
            Schedule::Lessons(s) => Some(s),
            Schedule::Exams(_) => None,
        }
    }

    pub fn as_exams(&self) -> Option<&ExamsSchedule> {
        match self {
            Schedule::Exams(s) => Some(s),
            Schedule::Lessons(_) => None,
        }
    }
}
