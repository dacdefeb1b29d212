use timetable_backend::{ExcelFormatter, Formatter, ScheduleError};

fn weeks(cell: &str, is_even: Option<bool>, max_weeks: Option<u32>) -> Vec<Vec<u32>> {
    ExcelFormatter::new().get_weeks(cell, is_even, max_weeks).unwrap()
}

#[test]
fn test_excluded_weeks_on_odd_row() {
    let result = weeks(
        "кр. 3,17 н. Организация работы с технотронными документами\n3 н. Организация работы с технотронными документами",
        Some(false),
        Some(17),
    );
    assert_eq!(result, vec![vec![1, 5, 7, 9, 11, 13, 15], vec![3]]);
}

#[test]
fn test_range_with_exclusion_in_brackets() {
    let result = weeks(
        "1-17 н. (кр. 3 н.) Архитектура утройств и систем вычислительной техники",
        None,
        None,
    );
    let expected: Vec<u32> = (1..=17).filter(|w| *w != 3).collect();
    assert_eq!(result, vec![expected]);
}

#[test]
fn test_exclusion_after_name_on_even_row() {
    let result = weeks("Деньги, кредит, банки кр. 2,8,10 н.", Some(true), Some(17));
    assert_eq!(result, vec![vec![4, 6, 12, 14, 16]]);
}

#[test]
fn test_one_line_lessons_with_exclusion() {
    let result = weeks(
        "1,3,9,13 н. Конфиденциальное делопроизводство 5,7,11,15 н. кр 5 н. Деньги, кредит,банки",
        None,
        None,
    );
    assert_eq!(result, vec![vec![1, 3, 9, 13], vec![7, 11, 15]]);
}

#[test]
fn test_subgroup_numbers_are_not_weeks() {
    let result = weeks("Ин.яз 1,2 подгруп", None, Some(17));
    assert_eq!(result, vec![(1..=17).collect::<Vec<u32>>()]);
}

#[test]
fn test_weeks_with_types_in_brackets() {
    let result = weeks(
        "2,4,6,8,10 (лк),12,14н (пр) Инструментарий информационно-аналитической деятельности\n2,4,6,8,10 н (пр) Практический аудит ",
        None,
        None,
    );
    assert_eq!(result, vec![vec![2, 4, 6, 8, 10], vec![12, 14], vec![2, 4, 6, 8, 10]]);
}

#[test]
fn test_digit_inside_name_is_not_a_week() {
    let result = weeks(
        "кр. 5 н. Разработка конфигураций в среде \"1С: Предприятие\" ",
        Some(false),
        Some(17),
    );
    assert_eq!(result, vec![vec![1, 3, 7, 9, 11, 13, 15, 17]]);

    let result = weeks("10 н. Разработка конфигураций в среде \"1С: Предприятие\"  ", None, None);
    assert_eq!(result, vec![vec![10]]);
}

#[test]
fn test_blank_lines_between_lessons() {
    let result = weeks(
        "1,5,9,13 н. Речепреобразующие устройства\n\n3,7,11,15 н. Речепреобразующие устройства\n",
        Some(false),
        Some(17),
    );
    assert_eq!(result, vec![vec![1, 5, 9, 13], vec![3, 7, 11, 15]]);
}

#[test]
fn test_subgroup_weeks() {
    let result = weeks(
        "1гр.=5,9,13н.; 2гр.=7,11,15н. Разработка и эксплуатация защищенных автоматизированных систем",
        None,
        None,
    );
    assert_eq!(result, vec![vec![5, 9, 13], vec![7, 11, 15]]);
}

#[test]
fn test_no_weeks_without_max_weeks() {
    let result = ExcelFormatter::new().get_weeks("Физика", None, None);
    assert!(matches!(result, Err(ScheduleError::MissingMaxWeeks(_))));
}

#[test]
fn test_malformed_range() {
    let result = ExcelFormatter::new().get_weeks("5-н. Физика", None, Some(17));
    assert!(matches!(result, Err(ScheduleError::MalformedNumber(_))));
}
