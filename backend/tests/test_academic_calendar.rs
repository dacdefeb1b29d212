use chrono::NaiveDate;

use timetable_backend::academic_calendar::{
    get_lesson_date, get_period, get_semester_start, get_week_start, Period, Weekday,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_period_of_date() {
    assert_eq!(get_period(date(2022, 10, 5)), Period::new(2022, 2023, 1));
    assert_eq!(get_period(date(2023, 3, 1)), Period::new(2022, 2023, 2));
    assert_eq!(get_period(date(2023, 8, 20)), Period::new(2023, 2024, 1));
    assert_eq!(get_period(date(2023, 7, 31)), Period::new(2022, 2023, 2));
}

#[test]
fn test_semester_start() {
    assert_eq!(get_semester_start(&Period::new(2022, 2023, 1)), Some(date(2022, 9, 1)));
    assert_eq!(get_semester_start(&Period::new(2022, 2023, 2)), Some(date(2023, 2, 9)));
    // September 1, 2024 is a Sunday
    assert_eq!(get_semester_start(&Period::new(2024, 2025, 1)), Some(date(2024, 9, 2)));
}

#[test]
fn test_week_start() {
    let period = Period::new(2022, 2023, 1);
    assert_eq!(get_week_start(&period, 1), Some(date(2022, 8, 29)));
    assert_eq!(get_week_start(&period, 3), Some(date(2022, 9, 12)));
    assert_eq!(get_week_start(&period, 0), None);
}

#[test]
fn test_lesson_date() {
    let period = Period::new(2022, 2023, 2);
    assert_eq!(get_lesson_date(&period, 1, Weekday::Thursday), Some(date(2023, 2, 9)));
    assert_eq!(get_lesson_date(&period, 2, Weekday::Monday), Some(date(2023, 2, 13)));
}
