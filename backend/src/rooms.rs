use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{Result, ScheduleError};
use crate::logger::warn;
use crate::models::Room;
use crate::types::{Campus, RoomType};

lazy_static! {
    static ref RE_DIGIT_LETTER: Regex = Regex::new(r"(\d)([а-яА-Я])").unwrap();
    /// `ауд. А-101 (В-78)`: room type, room name, campus.
    static ref RE_ROOM_WITH_TYPE: Regex =
        Regex::new(r"([а-яА-Я]+)\. ([а-яА-Я0-9-]+) \(([а-яА-Я0-9-]+)\)").unwrap();
    static ref RE_ROOM_SEPARATORS: Regex = Regex::new(r" {2,}|\n").unwrap();
    static ref RE_EMPTY_PARENS: Regex = Regex::new(r"(\s*\(\))\s*").unwrap();
}

/// Latin capitals typed instead of the Cyrillic look-alikes.
fn fix_room_typos(rooms: &str) -> Result<String> {
    let rooms = rooms.replace("ауд спец.", "лаб.");
    let mut fixed = String::with_capacity(rooms.len());
    for c in rooms.chars() {
        match c {
            'A' => fixed.push('А'),
            'B' => fixed.push('В'),
            'C' => fixed.push('С'),
            'A'..='Z' => return Err(ScheduleError::UnknownRoomLetter(c)),
            _ => fixed.push(c),
        }
    }
    Ok(fixed)
}

fn room_with_type(type_abbr: &str, name: &str, campus_abbr: &str) -> Room {
    let room_type = RoomType::from_abbreviation(type_abbr);
    if room_type.is_none() {
        warn(&format!("Unknown room type: '{}'", type_abbr));
    }
    let campus = Campus::from_short_name(campus_abbr);
    if campus.is_none() {
        warn(&format!("Unknown campus: '{}'", campus_abbr));
    }
    Room::new(name, campus, room_type)
}

pub fn parse_rooms(cell: &str) -> Result<Vec<Room>> {
    let cell = fix_room_typos(cell)?;
    let cell = RE_DIGIT_LETTER.replace_all(&cell, "${1}-${2}").to_string();

    let mut rooms: Vec<Room> = RE_ROOM_WITH_TYPE
        .captures_iter(&cell)
        .map(|caps| room_with_type(&caps[1], &caps[2], &caps[3]))
        .collect();

    if rooms.is_empty() {
        for campus in Campus::ALL {
            if cell.contains(campus.short_name()) {
                let name = cell
                    .replace("  ", "")
                    .replace('*', "")
                    .replace('\n', "")
                    .replace(campus.short_name(), "");
                rooms.push(Room::new(name.trim(), Some(campus), None));
            }
        }
    }

    if rooms.is_empty() {
        rooms = RE_ROOM_SEPARATORS
            .split(&cell)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Room::new(name, None, None))
            .collect();
    }

    for room in rooms.iter_mut() {
        room.name = RE_EMPTY_PARENS.replace_all(&room.name, "").to_string();
    }

    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_letters() {
        assert_eq!(fix_room_typos("A-1 B-2 C-3").unwrap(), "А-1 В-2 С-3");
        assert!(matches!(fix_room_typos("D-1"), Err(ScheduleError::UnknownRoomLetter('D'))));
        assert_eq!(fix_room_typos("ауд спец. 101").unwrap(), "лаб. 101");
    }

    #[test]
    fn test_strict_pattern_with_unknown_campus() {
        let rooms = parse_rooms("лаб. А-1 (Х-9)").unwrap();
        assert_eq!(rooms, vec![Room::new("А-1", None, Some(RoomType::Laboratory))]);
    }

    #[test]
    fn test_several_strict_rooms() {
        let rooms = parse_rooms("ауд. А-140 (В-78)\nкомп. И-202 (С-20)").unwrap();
        assert_eq!(
            rooms,
            vec![
                Room::new("А-140", Some(Campus::V78), Some(RoomType::Auditory)),
                Room::new("И-202", Some(Campus::S20), Some(RoomType::Computers)),
            ]
        );
    }
}
