use crate::errors::Result;
use crate::formatter::Formatter;
use crate::lesson_name::{clean_lesson_name, RE_LESSON_TYPES};
use crate::lesson_splitter::{fix_lesson_typos, split_lessons};
use crate::models::{LessonSegment, Room, Teachers};
use crate::rooms::parse_rooms;
use crate::subgroups::extract_subgroup;
use crate::teachers::{parse_teachers, RE_SEPARATORS};
use crate::types::LessonType;
use crate::week_parser::infer_weeks;

/// Formatter for the cell conventions of the university's Excel timetables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelFormatter;

impl ExcelFormatter {
    pub fn new() -> Self {
        ExcelFormatter
    }

    /// Segment, its parsed lesson and the text the weeks are read from.
    /// Segments without a subject name are dropped.
    fn named_segments(&self, cell: &str) -> Result<Vec<(String, LessonSegment)>> {
        let mut result = Vec::new();
        for segment in self.split_lessons(cell) {
            let (text, subgroup) = extract_subgroup(&segment)?;

            let lesson_type = match RE_LESSON_TYPES.captures(&text) {
                Some(caps) => Some(self.get_lesson_type(&caps[1].to_lowercase())?),
                None => None,
            };

            let name = clean_lesson_name(&text);
            if name.trim().is_empty() {
                continue;
            }
            result.push((segment, LessonSegment::new(&name, lesson_type, subgroup)));
        }
        Ok(result)
    }
}

impl Formatter for ExcelFormatter {
    fn split_lessons(&self, cell: &str) -> Vec<String> {
        split_lessons(&fix_lesson_typos(cell))
    }

    fn get_lessons(&self, cell: &str) -> Result<Vec<LessonSegment>> {
        Ok(self
            .named_segments(cell)?
            .into_iter()
            .map(|(_, lesson)| lesson)
            .collect())
    }

    fn get_weeks(&self, cell: &str, is_even: Option<bool>, max_weeks: Option<u32>) -> Result<Vec<Vec<u32>>> {
        self.split_lessons(cell)
            .iter()
            .map(|segment| infer_weeks(segment, is_even, max_weeks))
            .collect()
    }

    fn get_lessons_with_weeks(
        &self,
        cell: &str,
        is_even: Option<bool>,
        max_weeks: Option<u32>,
    ) -> Result<Vec<(LessonSegment, Vec<u32>)>> {
        self.named_segments(cell)?
            .into_iter()
            .map(|(segment, lesson)| Ok((lesson, infer_weeks(&segment, is_even, max_weeks)?)))
            .collect()
    }

    fn get_rooms(&self, cell: &str) -> Result<Vec<Room>> {
        parse_rooms(cell)
    }

    fn get_teachers(&self, cell: &str) -> Result<Teachers> {
        parse_teachers(cell)
    }

    fn get_types(&self, cell: &str) -> Vec<Option<LessonType>> {
        // "с/р" would be cut in two by the "/" separator
        let cell = cell.replace("с/р", "ср");
        RE_SEPARATORS
            .split(&cell)
            .filter(|el| !el.is_empty())
            .map(LessonType::lookup)
            .collect()
    }

    fn get_lesson_type(&self, abbreviation: &str) -> Result<LessonType> {
        LessonType::from_abbreviation(abbreviation)
    }
}
