use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::{is_word_char, next_char_boundary};
use crate::week_parser::RE_SUBGROUP_AHEAD;

lazy_static! {
    static ref RE_EXCLUDE_WEEKS: Regex = Regex::new(r"\W*(?:кр|кроме)(?:\.|\b)").unwrap();
    pub(crate) static ref RE_LESSON_TYPES: Regex = Regex::new(r"\b(лк|пр|лек|лаб)\b").unwrap();
    static ref RE_TRASH_START: Regex = Regex::new(r"\A\W+\s*").unwrap();
    static ref RE_TRASH_END: Regex = Regex::new(r"[-,_.\+;]+$").unwrap();
}

fn is_list_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | ',' | '.') || c.is_whitespace()
}

/// A week annotation starting at `start`: numbers, then "нед", "н" or any
/// non-word character, then dots and spaces. Rejected when a subgroup
/// keyword follows, since then the numbers name subgroups.
fn week_annotation_at(text: &str, start: usize) -> Option<usize> {
    let mut run_end = start;
    for c in text[start..].chars() {
        if !is_list_char(c) {
            break;
        }
        run_end += c.len_utf8();
    }

    // Candidate ends of the number run, longest first; each must keep a digit.
    let mut numbers_ends: Vec<usize> = text[start..run_end]
        .char_indices()
        .map(|(i, c)| start + i + c.len_utf8())
        .collect();
    numbers_ends.reverse();

    for numbers_end in numbers_ends {
        let spaces: Vec<usize> = std::iter::once(numbers_end)
            .chain(
                text[numbers_end..]
                    .char_indices()
                    .take_while(|(_, c)| c.is_whitespace())
                    .map(|(i, c)| numbers_end + i + c.len_utf8()),
            )
            .collect();

        for &pos in spaces.iter().rev() {
            let rest = &text[pos..];
            let mut markers = Vec::with_capacity(3);
            if rest.starts_with("нед") {
                markers.push(pos + "нед".len());
            }
            if rest.starts_with('н') {
                markers.push(pos + 'н'.len_utf8());
            }
            if let Some(c) = rest.chars().next() {
                if !is_word_char(c) {
                    markers.push(pos + c.len_utf8());
                }
            }

            for marker_end in markers {
                if RE_SUBGROUP_AHEAD.is_match(&text[marker_end..]) {
                    continue;
                }
                let trailing: usize = text[marker_end..]
                    .chars()
                    .take_while(|c| *c == '.' || c.is_whitespace())
                    .map(char::len_utf8)
                    .sum();
                return Some(marker_end + trailing);
            }
        }
    }

    None
}

fn remove_week_annotations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut copied = 0;

    while pos < text.len() {
        let starts_digit = text[pos..].chars().next().is_some_and(|c| c.is_ascii_digit());
        match starts_digit.then(|| week_annotation_at(text, pos)).flatten() {
            Some(end) => {
                out.push_str(&text[copied..pos]);
                copied = end;
                pos = end;
            }
            None => pos = next_char_boundary(text, pos),
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Bare subject name of one segment: week lists, exclusions, type
/// abbreviations and surrounding punctuation are removed, in that order.
pub fn clean_lesson_name(segment: &str) -> String {
    let name = remove_week_annotations(segment);
    let name = RE_EXCLUDE_WEEKS.replace_all(&name, "");
    let name = RE_LESSON_TYPES.replace_all(&name, "");
    let name = RE_TRASH_START.replace(&name, "");
    let name = RE_TRASH_END.replace(&name, "");
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_week_annotations() {
        assert_eq!(remove_week_annotations("1-17 н. (кр. 3 н.) Архитектура"), "(кр. ) Архитектура");
        assert_eq!(remove_week_annotations("2,4,6,8,10 Инструментарий"), "Инструментарий");
        assert_eq!(remove_week_annotations("2,6,10,14нед. Техническая"), "Техническая");
    }

    #[test]
    fn test_subgroup_numbers_are_kept() {
        assert_eq!(remove_week_annotations("Ин.яз 1,2 подгруп"), "Ин.яз 1,2 подгруп");
    }

    #[test]
    fn test_clean_lesson_name() {
        assert_eq!(clean_lesson_name("1-17 н. (кр. 3 н.) Архитектура устройств"), "Архитектура устройств");
        assert_eq!(clean_lesson_name("кр.5 н. Основы научно-технического творчества"), "Основы научно-технического творчества");
        assert_eq!(clean_lesson_name("3,7,11,15 н. Современные проблемы лк"), "Современные проблемы");
        assert_eq!(clean_lesson_name("Деньги, кредит, банки кр. 2,8,10 н."), "Деньги, кредит, банки");
        assert_eq!(clean_lesson_name("……………"), "");
    }

    #[test]
    fn test_clean_lesson_name_is_idempotent() {
        for name in ["Физика", "Теория соединения материалов", "Деньги, кредит, банки", "Ин.яз 1,2 подгруп"] {
            assert_eq!(clean_lesson_name(name), name);
            assert_eq!(clean_lesson_name(&clean_lesson_name(name)), name);
        }
    }
}
