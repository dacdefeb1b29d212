use chrono::NaiveTime;
use dotenvy::dotenv;

use timetable_backend::academic_calendar::{Period, Weekday};
use timetable_backend::models::{Lesson, LessonEntry, LessonsSchedule, Room, Schedule};
use timetable_backend::types::{Degree, Institute, LessonType};
use timetable_backend::{ParserContext, Worksheet};

#[allow(dead_code)]
pub fn test_setup() {
    dotenv().ok();
}

#[allow(dead_code)]
pub fn context() -> ParserContext {
    ParserContext::new(Period::new(2022, 2023, 2), Institute::Iit, Degree::Bachelor)
}

fn row(cells: &[&str], width: usize) -> Vec<String> {
    let mut row: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    row.resize(width, String::new());
    row
}

/// A semester sheet with two groups, ИКБО-01-20 at column 5 and ИКБО-02-20
/// at column 9. Each slot row takes the subject, type, teacher and room of
/// both groups, in that order.
#[allow(dead_code)]
pub fn lesson_sheet(slots: &[[&str; 8]]) -> Worksheet {
    const WIDTH: usize = 13;
    let slot_cells = [
        ["ПОНЕДЕЛЬНИК", "1", "9-00", "10-30", "I"],
        ["", "", "", "", "II"],
        ["", "2", "10-40", "12-10", "I"],
        ["", "", "", "", "II"],
    ];

    let mut rows = vec![
        row(&["РАСПИСАНИЕ занятий"], WIDTH),
        row(&["", "", "", "", "", "ИКБО-01-20", "", "", "", "ИКБО-02-20"], WIDTH),
        row(
            &[
                "День недели",
                "№ пары",
                "Нач. занятий",
                "Оконч. занятий",
                "Неделя",
                "Предмет",
                "Вид занятий",
                "ФИО преподавателя",
                "№ ауд.",
                "Предмет",
                "Вид занятий",
                "ФИО преподавателя",
                "№ ауд.",
            ],
            WIDTH,
        ),
    ];

    for (i, slot) in slot_cells.iter().enumerate() {
        let mut cells: Vec<&str> = slot.to_vec();
        match slots.get(i) {
            Some(groups) => cells.extend(groups.iter().copied()),
            None => cells.extend([""; 8]),
        }
        rows.push(row(&cells, WIDTH));
    }

    Worksheet::from_rows("Лист1", rows)
}

/// An exam sheet for ИКБО-01-20 (group column 2) and ИКБО-02-20 (group
/// column 6), with a consultation on January 10 and an exam on January 11.
#[allow(dead_code)]
pub fn exam_sheet() -> Worksheet {
    const WIDTH: usize = 10;
    let rows = vec![
        row(&["РАСПИСАНИЕ экзаменационной сессии"], WIDTH),
        row(&["", "", "ИКБО-01-20", "", "", "", "ИКБО-02-20"], WIDTH),
        row(
            &["январь", "10", "Консультация", "10-40", "ауд. А-140 (В-78)", "", "Консультация", "12-40", "А-1"],
            WIDTH,
        ),
        row(&["", "", "Математический анализ", "", "", "", "Физика"], WIDTH),
        row(&["", "", "Иванов И.И.", "", "", "", "Петров П.П."], WIDTH),
        row(
            &["", "11", "Экзамен", "09-00", "А-140", "https://example.com/exam"],
            WIDTH,
        ),
        row(&["", "", "Математический анализ"], WIDTH),
        row(&["", "", "Иванов И.И."], WIDTH),
    ];
    Worksheet::from_rows("Лист1", rows)
}

#[allow(dead_code)]
pub fn lesson(name: &str, room: Option<Room>) -> LessonEntry {
    LessonEntry::Lesson(Lesson {
        num: 1,
        name: name.to_string(),
        weeks: vec![1, 3, 5],
        weekday: Weekday::Monday,
        teachers: vec!["Иванов И.И.".to_string()],
        time_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        time_end: NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
        lesson_type: Some(LessonType::Lecture),
        room,
        subgroup: None,
    })
}

#[allow(dead_code)]
pub fn lessons_schedule(group: &str, lessons: Vec<LessonEntry>) -> Schedule {
    Schedule::Lessons(LessonsSchedule {
        group: group.to_string(),
        period: Period::new(2022, 2023, 2),
        institute: Institute::Iit,
        degree: Degree::Bachelor,
        document_url: None,
        lessons,
    })
}
