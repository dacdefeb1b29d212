mod helpers;

use helpers as h;
use timetable_backend::academic_calendar::{Month, Period};
use timetable_backend::models::{ExamEmpty, ExamEntry, ExamsSchedule, Room, Schedule};
use timetable_backend::types::{Campus, Degree, Institute, ScheduleType};
use timetable_backend::{ScheduleCollection, ScheduleError};

fn exams_schedule(group: &str) -> Schedule {
    Schedule::Exams(ExamsSchedule {
        group: group.to_string(),
        period: Period::new(2022, 2023, 2),
        institute: Institute::Iit,
        degree: Degree::Bachelor,
        document_url: None,
        exams: vec![ExamEntry::Empty(ExamEmpty {
            month: Month::June,
            day: 1,
        })],
    })
}

fn two_groups() -> ScheduleCollection {
    let room = Room::new("А-140", Some(Campus::V78), None);
    ScheduleCollection::new(
        vec![
            h::lessons_schedule("ИКБО-01-20", vec![h::lesson("Физика", Some(room.clone()))]),
            h::lessons_schedule("ИКБО-02-20", vec![h::lesson("Химия", Some(room)), h::lesson("Физика", None)]),
        ],
        ScheduleType::Semester,
    )
    .unwrap()
}

#[test]
fn test_empty_collection() {
    let result = ScheduleCollection::new(Vec::new(), ScheduleType::Semester);
    assert!(matches!(result, Err(ScheduleError::EmptyCollection)));
}

#[test]
fn test_kind_must_match_type() {
    let result = ScheduleCollection::new(vec![exams_schedule("ИКБО-01-20")], ScheduleType::TestSession);
    assert!(matches!(result, Err(ScheduleError::TypeMismatch { .. })));

    let mut collection = two_groups();
    assert!(collection.append(exams_schedule("ИКБО-03-20")).is_err());
    assert!(collection
        .extend(vec![
            h::lessons_schedule("ИКБО-03-20", Vec::new()),
            exams_schedule("ИКБО-04-20"),
        ])
        .is_err());
    assert_eq!(collection.len(), 2);
}

#[test]
fn test_dataframe_is_built_on_request() {
    let mut collection = two_groups();
    assert!(matches!(collection.get_dataframe(), Err(ScheduleError::DataframeNotGenerated)));

    collection.generate_dataframe();
    assert!(collection.is_dataframe_generated());
    assert_eq!(collection.get_dataframe().unwrap().len(), 3);
}

#[test]
fn test_frame_follows_appends() {
    let mut collection = two_groups();
    collection
        .append(h::lessons_schedule("ИКБО-03-20", vec![h::lesson("Экология", None)]))
        .unwrap();
    assert!(!collection.is_dataframe_generated());

    collection.generate_dataframe();
    collection
        .append(h::lessons_schedule("ИКБО-04-20", vec![h::lesson("Экономика", None)]))
        .unwrap();
    assert_eq!(collection.get_dataframe().unwrap().len(), 5);
}

#[test]
fn test_merge() {
    let mut collection = two_groups();
    let other = ScheduleCollection::new(
        vec![h::lessons_schedule("ИКБО-05-20", Vec::new())],
        ScheduleType::Semester,
    )
    .unwrap();
    collection.merge(other).unwrap();
    assert_eq!(collection.get_groups(), vec!["ИКБО-01-20", "ИКБО-02-20", "ИКБО-05-20"]);

    let exams = ScheduleCollection::new(vec![exams_schedule("ИКБО-06-20")], ScheduleType::ExamSession).unwrap();
    assert!(matches!(collection.merge(exams), Err(ScheduleError::TypeMismatch { .. })));
}

#[test]
fn test_group_lookup() {
    let collection = two_groups();
    assert_eq!(collection.get_group_schedule("ИКБО-02-20").unwrap().group(), "ИКБО-02-20");
    assert!(matches!(
        collection.get_group_schedule("ИКБО-09-20"),
        Err(ScheduleError::GroupNotFound(_))
    ));
}

#[test]
fn test_distinct_rooms() {
    let collection = two_groups();
    assert_eq!(collection.get_rooms(), vec![Room::new("А-140", Some(Campus::V78), None)]);
}

#[test]
fn test_empty_slots_have_no_rows() {
    let mut collection = ScheduleCollection::new(vec![exams_schedule("ИКБО-01-20")], ScheduleType::ExamSession).unwrap();
    collection.generate_dataframe();
    let frame = collection.get_dataframe().unwrap();
    assert!(frame.is_empty());
    assert_eq!(frame.columns()[0], "group");
}
