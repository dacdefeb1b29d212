use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{Result, ScheduleError};
use crate::logger::warn;

lazy_static! {
    /// Group names look like `ИКБО-01-20`.
    pub static ref RE_GROUP_NAME: Regex = Regex::new(r"([А-Яа-я]{4}-\d{2}-\d{2})").unwrap();

    static ref LESSON_TYPE_ABBREVIATIONS: HashMap<&'static str, LessonType> = {
        let mut m = HashMap::new();
        for abbr in ["пр", "п", "кр", "крпа"] {
            m.insert(abbr, LessonType::Practice);
        }
        for abbr in ["лек", "лк", "л"] {
            m.insert(abbr, LessonType::Lecture);
        }
        for abbr in ["с/р", "ср"] {
            m.insert(abbr, LessonType::IndividualWork);
        }
        for abbr in ["лаб", "лб", "лр"] {
            m.insert(abbr, LessonType::LaboratoryWork);
        }
        m.insert("зач", LessonType::TestSession);
        m
    };

    static ref ROOM_TYPE_ABBREVIATIONS: HashMap<&'static str, RoomType> = {
        let mut m = HashMap::new();
        m.insert("ауд", RoomType::Auditory);
        m.insert("лаб", RoomType::Laboratory);
        m.insert("комп", RoomType::Computers);
        m.insert("физ", RoomType::Sport);
        m
    };
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        ParseEnumError { kind, value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    #[serde(rename = "пр")]
    Practice,
    #[serde(rename = "лек")]
    Lecture,
    #[serde(rename = "с/р")]
    IndividualWork,
    #[serde(rename = "лаб")]
    LaboratoryWork,
    #[serde(rename = "зач")]
    TestSession,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Practice => "пр",
            LessonType::Lecture => "лек",
            LessonType::IndividualWork => "с/р",
            LessonType::LaboratoryWork => "лаб",
            LessonType::TestSession => "зач",
        }
    }

    /// Strict lookup, for types that are embedded in a subject segment.
    pub fn from_abbreviation(abbr: &str) -> Result<Self> {
        let key = abbr.trim().to_lowercase();
        LESSON_TYPE_ABBREVIATIONS
            .get(key.as_str())
            .copied()
            .ok_or(ScheduleError::UnknownLessonType(key))
    }

    /// Lenient lookup for the type column: unknown tokens are logged and dropped.
    pub fn lookup(abbr: &str) -> Option<Self> {
        match LessonType::from_abbreviation(abbr) {
            Ok(t) => Some(t),
            Err(e) => {
                warn(&format!("{}", e));
                None
            }
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "ауд")]
    Auditory,
    #[serde(rename = "комп")]
    Computers,
    #[serde(rename = "лаб")]
    Laboratory,
    #[serde(rename = "физ")]
    Sport,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Auditory => "ауд",
            RoomType::Computers => "комп",
            RoomType::Laboratory => "лаб",
            RoomType::Sport => "физ",
        }
    }

    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        ROOM_TYPE_ABBREVIATIONS.get(abbr.trim().to_lowercase().as_str()).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Campus {
    #[serde(rename = "МП-1")]
    Mp1,
    #[serde(rename = "В-78")]
    V78,
    #[serde(rename = "В-86")]
    V86,
    #[serde(rename = "С-20")]
    S20,
    #[serde(rename = "СГ-22")]
    Sg22,
    #[serde(rename = "СДО")]
    Online,
}

impl Campus {
    pub const ALL: [Campus; 6] = [
        Campus::Mp1,
        Campus::V78,
        Campus::V86,
        Campus::S20,
        Campus::Sg22,
        Campus::Online,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Campus::Mp1 => "МП-1",
            Campus::V78 => "В-78",
            Campus::V86 => "В-86",
            Campus::S20 => "С-20",
            Campus::Sg22 => "СГ-22",
            Campus::Online => "СДО",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Campus::Mp1 => "ул. Малая Пироговская, д.1",
            Campus::V78 => "Проспект Вернадского, д.78",
            Campus::V86 => "Проспект Вернадского, д.86",
            Campus::S20 => "ул. Стромынка, 20",
            Campus::Sg22 => "5-я ул. Соколиной горы, д.22",
            Campus::Online => "СДО",
        }
    }

    pub fn from_short_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Campus::ALL.into_iter().find(|c| c.short_name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Institute {
    #[serde(rename = "ИИТ")]
    Iit,
    #[serde(rename = "ИИИ")]
    Iii,
    #[serde(rename = "ИКБ")]
    Ikb,
    #[serde(rename = "ИПТИП")]
    Iptip,
    #[serde(rename = "ИРИ")]
    Iri,
    #[serde(rename = "ИТУ")]
    Itu,
    #[serde(rename = "ИТХТ")]
    Itht,
}

impl Institute {
    pub const ALL: [Institute; 7] = [
        Institute::Iit,
        Institute::Iii,
        Institute::Ikb,
        Institute::Iptip,
        Institute::Iri,
        Institute::Itu,
        Institute::Itht,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Institute::Iit => "ИИТ",
            Institute::Iii => "ИИИ",
            Institute::Ikb => "ИКБ",
            Institute::Iptip => "ИПТИП",
            Institute::Iri => "ИРИ",
            Institute::Itu => "ИТУ",
            Institute::Itht => "ИТХТ",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Institute::Iit => "Институт информационных технологий",
            Institute::Iii => "Институт искусственного интеллекта",
            Institute::Ikb => "Институт кибербезопасности и цифровых технологий",
            Institute::Iptip => "Институт перспективных технологий и индустриального программирования",
            Institute::Iri => "Институт радиотехники и электроники",
            Institute::Itu => "Институт технологий управления",
            Institute::Itht => "Институт тонких химических технологий им. М.В. Ломоносова",
        }
    }

    /// Campus assumed for rooms that do not name one.
    pub fn default_campus(&self) -> Option<Campus> {
        match self {
            Institute::Iit => Some(Campus::V78),
            Institute::Itht => Some(Campus::V86),
            _ => None,
        }
    }
}

impl FromStr for Institute {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Institute::ALL
            .into_iter()
            .find(|i| i.short_name().to_lowercase() == key)
            .ok_or_else(|| ParseEnumError::new("Institute", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    Bachelor = 1,
    Master = 2,
    Phd = 3,
    College = 4,
}

impl FromStr for Degree {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bachelor" | "1" => Ok(Degree::Bachelor),
            "master" | "2" => Ok(Degree::Master),
            "phd" | "3" => Ok(Degree::Phd),
            "college" | "4" => Ok(Degree::College),
            _ => Err(ParseEnumError::new("Degree", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    Semester = 1,
    TestSession = 2,
    ExamSession = 3,
}

impl ScheduleType {
    pub fn kind(&self) -> ScheduleKind {
        match self {
            ScheduleType::Semester | ScheduleType::TestSession => ScheduleKind::Lessons,
            ScheduleType::ExamSession => ScheduleKind::Exams,
        }
    }
}

impl FromStr for ScheduleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "semester" => Ok(ScheduleType::Semester),
            "test-session" => Ok(ScheduleType::TestSession),
            "exam-session" => Ok(ScheduleType::ExamSession),
            _ => Err(ParseEnumError::new("ScheduleType", s)),
        }
    }
}

/// Which record kind a schedule holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleKind {
    Lessons,
    Exams,
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::Lessons => "lessons",
            ScheduleKind::Exams => "exams",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "консультация")]
    Consultation,
    #[serde(rename = "экзамен")]
    Examination,
}

impl ExamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::Consultation => "консультация",
            ExamType::Examination => "экзамен",
        }
    }

    /// Recognizes the exam type cell, ignoring spaces and case.
    pub fn from_cell(value: &str) -> Option<Self> {
        let normalized: String = value.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        match normalized.as_str() {
            "консультация" => Some(ExamType::Consultation),
            "экзамен" => Some(ExamType::Examination),
            _ => None,
        }
    }
}
