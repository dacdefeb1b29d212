use crate::errors::Result;
use crate::models::{LessonSegment, Room, Teachers};
use crate::types::LessonType;

/// Turns raw cell values of a schedule table into structured values.
///
/// A subject cell may hold several sub-lessons. `get_lessons` and
/// `get_weeks` return one entry per sub-lesson that has a name, in the
/// same order, so the two can be zipped.
pub trait Formatter: Send + Sync {
    /// Segments of a subject cell, after typo repair.
    fn split_lessons(&self, cell: &str) -> Vec<String>;

    /// Subject name, lesson type and subgroup of each sub-lesson.
    fn get_lessons(&self, cell: &str) -> Result<Vec<LessonSegment>>;

    /// Weeks of each sub-lesson. `is_even` keeps only even (`true`) or odd
    /// (`false`) weeks; `max_weeks` is needed when a sub-lesson lists no
    /// weeks or only exclusions.
    fn get_weeks(&self, cell: &str, is_even: Option<bool>, max_weeks: Option<u32>) -> Result<Vec<Vec<u32>>>;

    /// `get_lessons` and `get_weeks` in one pass.
    fn get_lessons_with_weeks(
        &self,
        cell: &str,
        is_even: Option<bool>,
        max_weeks: Option<u32>,
    ) -> Result<Vec<(LessonSegment, Vec<u32>)>>;

    fn get_rooms(&self, cell: &str) -> Result<Vec<Room>>;

    fn get_teachers(&self, cell: &str) -> Result<Teachers>;

    /// Lesson types listed in the type column. Unknown entries are `None`.
    fn get_types(&self, cell: &str) -> Vec<Option<LessonType>>;

    fn get_lesson_type(&self, abbreviation: &str) -> Result<LessonType>;
}
