//! Splitting a subject cell into one text segment per sub-lesson.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::{find_iter_unless_followed, strip_trash};
use crate::week_parser::RE_SUBGROUP_AHEAD;

lazy_static! {
    static ref RE_DOUBLE_ACTIVITY: Regex = Regex::new(r"деятельность\s*деятельность").unwrap();
    static ref RE_LONE_MILITARY: Regex = Regex::new(r"(?m)^\s*Военная\s*$").unwrap();
    static ref RE_LONE_TRAINING: Regex = Regex::new(r"(?m)^\s*подготовка\s*$").unwrap();
    static ref RE_SUBGROUP_PAIR_LINE: Regex = Regex::new(r"(?m)^((\s*\d\s*п[/\\]?г,*){2})$").unwrap();
    static ref RE_WRAPPED_SUBGROUP: Regex = Regex::new(r"(\n)(\d\s*п[/\\]?г)").unwrap();

    static ref RE_WIDE_GAP: Regex = Regex::new(r" {3,}").unwrap();
    static ref RE_RULE_TRASH: Regex = Regex::new(r"(\A\W+\s*)|([-,_\+;]+$)").unwrap();

    /// `1,3,9,13 Конфиденциальное делопроизводство 5,7,11,15 н. кр 5 н. Деньги`
    static ref RE_ONE_LINE_LESSON: Regex = Regex::new(
        r"(?:\d+[-,\s.]*)+(?:(?:нед|н)|\b)[. ]*(?:\(?(?:кроме|кр)? *(?:\d+[-,\s.]*)+(?:(?:нед|н)|\b)[. ])"
    )
    .unwrap();

    static ref SPLIT_RULES: Vec<SplitRule> = vec![
        // 2,4,6,8,10 (лк),12,14н (пр) Инструментарий
        SplitRule {
            pattern: Regex::new(r"((?:\d+[-, \.]*)+(?:н|нед)?[. ]*)(?:[( ]*(лк|пр|лек|лаб)[) ]+)").unwrap(),
            subgroup_first: false,
            names_subgroup: false,
        },
        // 1гр.= 2н.; 2гр.=4н. Криптографические методы защиты информации
        SplitRule {
            pattern: Regex::new(
                r"(\d+[-, \.]*)+(?:группа|груп|гр|подгруппа|подгр)[. -]*=\s*((?:\d+[-, \.]*)+(?:нед|н)?[;. ]+)",
            )
            .unwrap(),
            subgroup_first: true,
            names_subgroup: true,
        },
        // 6,12н-1гр 4,10н-2 гр Материалы и технологии трехмерной печати
        SplitRule {
            pattern: Regex::new(
                r"((?:\d+[-, \.]*)+(?:нед|н)[. ]*\-)(?:(\d+[-, =\.]*)+(?:группа|груп|гр|подгруппа|подгр)[. ]*)",
            )
            .unwrap(),
            subgroup_first: false,
            names_subgroup: true,
        },
        // (3,7,11,15 н. - лк; 5,9,13,17 н. - пр) Современные проблемы
        SplitRule {
            pattern: Regex::new(r"((?:\d+[-,\s.]*)+(?:н|нед)?[. ]*)(?:[- ]*(лк|пр|лек|лаб)(\b|[; ]+))").unwrap(),
            subgroup_first: false,
            names_subgroup: false,
        },
    ];
}

/// One way of writing several sub-lessons inside a single line. Group 1
/// and group 2 hold weeks and a lesson type or subgroup number.
struct SplitRule {
    pattern: Regex,
    /// Group 1 is the subgroup number and group 2 the weeks.
    subgroup_first: bool,
    /// Group holding the number is a subgroup, so " подгруппа" is appended.
    names_subgroup: bool,
}

impl SplitRule {
    fn format(&self, caps: &Captures, lesson: &str) -> String {
        let group = |i: usize| {
            let text = caps.get(i).map_or("", |m| m.as_str());
            RE_RULE_TRASH.replace_all(text, "").trim().to_string()
        };
        let suffix = if self.names_subgroup { " подгруппа" } else { "" };
        let (first, second) = if self.subgroup_first {
            (group(2), group(1))
        } else {
            (group(1), group(2))
        };
        format!("{} {} {}{}", first, lesson, second, suffix)
    }

    /// Segments rebuilt from the matches, or nothing if the rule does not apply.
    fn apply(&self, lesson: &str) -> Vec<String> {
        let found: Vec<Captures> = self.pattern.captures_iter(lesson).collect();
        if found.is_empty() {
            return Vec::new();
        }

        let mut rest = lesson.to_string();
        for caps in &found {
            rest = rest.replace(&caps[0], "");
        }
        let rest = RE_RULE_TRASH.replace_all(&rest, "").trim().to_string();
        let parts: Vec<&str> = rest.split(';').collect();

        if parts.len() == 2 && found.len() == 4 {
            found
                .iter()
                .enumerate()
                .map(|(i, caps)| self.format(caps, parts[usize::from(i >= 2)]))
                .collect()
        } else {
            found.iter().map(|caps| self.format(caps, &rest)).collect()
        }
    }
}

fn apply_rules(lesson: &str) -> Vec<String> {
    SPLIT_RULES
        .iter()
        .map(|rule| rule.apply(lesson))
        .find(|segments| !segments.is_empty())
        .unwrap_or_default()
}

/// Repairs recurring typos of subject cells before they are split.
pub fn fix_lesson_typos(cell: &str) -> String {
    let cell = RE_DOUBLE_ACTIVITY.replace_all(cell, "деятельность");
    let cell = RE_LONE_MILITARY.replace_all(&cell, "Военная подготовка");
    let cell = RE_LONE_TRAINING.replace_all(&cell, "Военная подготовка");
    let cell = RE_SUBGROUP_PAIR_LINE.replace_all(&cell, "");
    let cell = RE_WRAPPED_SUBGROUP.replace_all(&cell, " ${2}");
    cell.to_string()
}

/// Cuts a one-line cell at each week list that starts a new lesson.
fn split_one_line(lessons: &str) -> Vec<String> {
    let starts: Vec<usize> = find_iter_unless_followed(&RE_ONE_LINE_LESSON, &RE_SUBGROUP_AHEAD, lessons)
        .into_iter()
        .map(|(start, _)| start)
        .collect();

    if starts.len() < 2 {
        return vec![lessons.to_string()];
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(lessons.len());
            lessons[start..end].to_string()
        })
        .collect()
}

/// Splits a subject cell into segments, one per sub-lesson.
///
/// Line breaks and runs of three or more spaces separate lessons. Pieces
/// written in one of the compact multi-lesson notations are expanded.
/// Failing both, the cell is split on `;` or at each leading week list.
pub fn split_lessons(lessons: &str) -> Vec<String> {
    let mut result: Vec<String> = if lessons.contains('\n') {
        lessons.split('\n').map(str::to_string).collect()
    } else {
        let pieces: Vec<String> = RE_WIDE_GAP.split(lessons).map(str::to_string).collect();
        if pieces.len() > 1 { pieces } else { Vec::new() }
    };

    if !result.is_empty() {
        let mut sorted = result.clone();
        sorted.sort();
        for piece in sorted {
            let segments = apply_rules(&piece);
            if segments.is_empty() {
                continue;
            }
            if let Some(pos) = result.iter().position(|p| *p == piece) {
                result.remove(pos);
            }
            result.extend(segments);
        }
    } else {
        result = apply_rules(lessons);
    }

    if result.is_empty() {
        result = if lessons.contains(';') {
            lessons.split(';').map(str::to_string).collect()
        } else {
            split_one_line(lessons)
        };
    }

    result
        .iter()
        .map(|segment| strip_trash(segment))
        .filter(|segment| !segment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_lesson_typos() {
        assert_eq!(
            fix_lesson_typos("Основы проектной деятельность деятельность"),
            "Основы проектной деятельность"
        );
        assert_eq!(fix_lesson_typos("Военная\nподготовка"), "Военная подготовка\nВоенная подготовка");
        assert_eq!(fix_lesson_typos("Физика\n1 п/г"), "Физика 1 п/г");
    }

    #[test]
    fn test_split_by_line_breaks() {
        assert_eq!(
            split_lessons("2,6,10,14 н Экология\n4,8,12,16 Правоведение"),
            vec!["2,6,10,14 н Экология", "4,8,12,16 Правоведение"]
        );
    }

    #[test]
    fn test_split_by_wide_gap() {
        assert_eq!(
            split_lessons("3,7,11,15  н Физика       кр. 5,8,13.17 н Организация ЭВМ"),
            vec!["3,7,11,15  н Физика", "кр. 5,8,13.17 н Организация ЭВМ"]
        );
    }

    #[test]
    fn test_split_weeks_with_types() {
        let segments = split_lessons("(3,7,11,15 н. - лк; 5,9,13,17 н. - пр) Современные проблемы");
        assert_eq!(
            segments,
            vec!["3,7,11,15 н. Современные проблемы лк", "5,9,13,17 н. Современные проблемы пр"]
        );
    }

    #[test]
    fn test_split_subgroup_weeks() {
        let segments = split_lessons("1гр.= 2н.; 2гр.=4н. Криптографические методы");
        assert_eq!(
            segments,
            vec![
                "2н.; Криптографические методы 1 подгруппа",
                "4н. Криптографические методы 2 подгруппа"
            ]
        );
    }

    #[test]
    fn test_split_one_line() {
        let segments = split_lessons("1,3,9,13 Конфиденциальное делопроизводство 5,7,11,15 н. кр 5 н. Деньги");
        assert_eq!(
            segments,
            vec!["1,3,9,13 Конфиденциальное делопроизводство", "5,7,11,15 н. кр 5 н. Деньги"]
        );
    }

    #[test]
    fn test_single_lesson() {
        assert_eq!(split_lessons("Ин. яз"), vec!["Ин. яз"]);
        assert_eq!(split_lessons("  "), Vec::<String>::new());
    }
}
