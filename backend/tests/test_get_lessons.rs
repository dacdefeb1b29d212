use timetable_backend::models::LessonSegment;
use timetable_backend::types::LessonType;
use timetable_backend::{ExcelFormatter, Formatter};

fn lessons(cell: &str) -> Vec<LessonSegment> {
    ExcelFormatter::new().get_lessons(cell).unwrap()
}

fn plain(name: &str) -> LessonSegment {
    LessonSegment::new(name, None, None)
}

fn subgroup(name: &str, subgroup: u32) -> LessonSegment {
    LessonSegment::new(name, None, Some(subgroup))
}

#[test]
fn test_several_subgroups_stay_in_name() {
    assert_eq!(lessons("Ин.яз. 1,2 подгр"), vec![plain("Ин.яз. 1,2 подгр")]);
}

#[test]
fn test_only_punctuation() {
    assert_eq!(lessons("……………………"), vec![]);
}

#[test]
fn test_weeks_without_dot() {
    assert_eq!(
        lessons("11н Суд присяжных в России и зарубежных странах"),
        vec![plain("Суд присяжных в России и зарубежных странах")]
    );
}

#[test]
fn test_two_lessons_in_one_line() {
    assert_eq!(
        lessons("1,3,9,13 н. Конфиденциальное делопроизводство 5,7,11,15 н. Деньги, кредит,банки"),
        vec![plain("Конфиденциальное делопроизводство"), plain("Деньги, кредит,банки")]
    );
}

#[test]
fn test_subgroup_in_brackets() {
    assert_eq!(
        lessons("1,5,9,13 н. Физика (1 п/г)\n1,5,9,13 н. Физика (2 п/г)"),
        vec![subgroup("Физика", 1), subgroup("Физика", 2)]
    );
    assert_eq!(lessons("англ.яз. (2подгр.)"), vec![subgroup("англ.яз.", 2)]);
}

#[test]
fn test_lessons_separated_by_semicolons() {
    let name = "Магнитодиагностика неоднородных материалов";
    assert_eq!(
        lessons(" 3,7,9 н Магнитодиагностика неоднородных материалов;  11,13,15 н Магнитодиагностика неоднородных материалов 1 гр; 17 н Магнитодиагностика неоднородных материалов 2 гр"),
        vec![plain(name), subgroup(name, 1), subgroup(name, 2)]
    );
}

#[test]
fn test_subgroup_week_assignments() {
    let name = "Разработка и эксплуатация защищенных автоматизированных систем";
    assert_eq!(
        lessons("1гр.=5,9,13н.; 2гр.=7,11,15н. Разработка и эксплуатация защищенных автоматизированных систем"),
        vec![subgroup(name, 1), subgroup(name, 2)]
    );
}

#[test]
fn test_weeks_dash_subgroup() {
    assert_eq!(
        lessons("2-8 н Теория соединения материалов\n10,14н-1гр 12,16н-2 гр Тепл. проц. в ТС"),
        vec![
            plain("Теория соединения материалов"),
            subgroup("Тепл. проц. в ТС", 1),
            subgroup("Тепл. проц. в ТС", 2),
        ]
    );
}

#[test]
fn test_types_next_to_weeks() {
    let name = "Инструментарий информационно-аналитической деятельности";
    assert_eq!(
        lessons("2,4,6,8,10 (лк),12,14н (пр) Инструментарий информационно-аналитической деятельности\n2,4,6,8,10 н (пр) Практический аудит "),
        vec![
            LessonSegment::new(name, Some(LessonType::Lecture), None),
            LessonSegment::new(name, Some(LessonType::Practice), None),
            LessonSegment::new("Практический аудит", Some(LessonType::Practice), None),
        ]
    );
}

#[test]
fn test_quoted_name_with_digit() {
    assert_eq!(
        lessons("кр. 5 н. Разработка конфигураций в среде \"1С: Предприятие\" "),
        vec![plain("Разработка конфигураций в среде \"1С: Предприятие\"")]
    );
}

#[test]
fn test_subgroup_pair_line_is_dropped() {
    assert_eq!(
        lessons("Технические методы диагностических исследований и лечебных воздействий\n2п/г,1п/г"),
        vec![plain("Технические методы диагностических исследований и лечебных воздействий")]
    );
}

#[test]
fn test_subgroup_on_next_line() {
    assert_eq!(lessons("4,8,12,16 н. Электротехника\n2 п/г"), vec![subgroup("Электротехника", 2)]);
}

#[test]
fn test_lessons_with_weeks() {
    let pairs = ExcelFormatter::new()
        .get_lessons_with_weeks("2-8 н Теория соединения материалов\n10,14н-1гр 12,16н-2 гр Тепл. проц. в ТС", None, None)
        .unwrap();
    let weeks: Vec<Vec<u32>> = pairs.into_iter().map(|(_, weeks)| weeks).collect();
    assert_eq!(weeks, vec![vec![2, 3, 4, 5, 6, 7, 8], vec![10, 14], vec![12, 16]]);
}

#[test]
fn test_subgroup_weeks_for_two_lessons() {
    let cell = "1гр.=2н.; 2гр.=4н.; 1гр.=6н.; 2гр.=8н. Физика; Химия";
    assert_eq!(
        lessons(cell),
        vec![subgroup("Физика", 1), subgroup("Физика", 2), subgroup("Химия", 1), subgroup("Химия", 2)]
    );

    let weeks: Vec<Vec<u32>> = ExcelFormatter::new()
        .get_lessons_with_weeks(cell, None, Some(17))
        .unwrap()
        .into_iter()
        .map(|(_, weeks)| weeks)
        .collect();
    assert_eq!(weeks, vec![vec![2], vec![4], vec![6], vec![8]]);
}
