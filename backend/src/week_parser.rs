//! Week numbers: parsing number lists, parity filtering and inferring the
//! weeks of one lesson segment from its include/exclude annotations.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{Result, ScheduleError};
use crate::helpers::is_word_boundary;

lazy_static! {
    static ref RE_RANGE: Regex = Regex::new(r"\d+ *- *\d+").unwrap();
    static ref RE_EDGE_TRASH: Regex = Regex::new(r"^[\W\s]+|[\W\s]+$").unwrap();

    /// A subgroup keyword after a run of week-list characters.
    pub(crate) static ref RE_SUBGROUP_AHEAD: Regex =
        Regex::new(r"^[.\s,\-\d]*(?:подгруппа|подгруп|подгр|п/г|группа|гр)").unwrap();

    static ref RE_EXCLUDE_KEYWORD: Regex = Regex::new(r"\b(?:кр|кроме)(?:\.|\b)\s*").unwrap();
}

fn parse_number(token: &str) -> Result<u32> {
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| ScheduleError::MalformedNumber(token.to_string()))
}

fn parse_range(range: &str) -> Result<Vec<u32>> {
    let mut bounds = range.split('-');
    let first = parse_number(bounds.next().unwrap_or_default())?;
    let last = parse_number(bounds.next().unwrap_or_default())?;
    Ok((first..=last).collect())
}

fn parse_listed(listed: &str) -> Result<Vec<u32>> {
    let listed = RE_EDGE_TRASH.replace_all(listed, "");
    listed
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(parse_number)
        .collect()
}

/// Parses `"1-11, 15, 16, 17"`, `"1-5,9-13"`, `"2-8"`, `"3,7"` or `"5"`
/// into a sorted list of distinct numbers. Ranges are inclusive.
pub fn parse_numbers(text: &str) -> Result<Vec<u32>> {
    let has_dash = text.contains('-');
    let has_comma = text.contains(',');

    let mut numbers = if has_dash && has_comma {
        let mut numbers = Vec::new();
        for range in RE_RANGE.find_iter(text) {
            numbers.extend(parse_range(range.as_str())?);
        }
        numbers.extend(parse_listed(&RE_RANGE.replace_all(text, ""))?);
        numbers
    } else if has_dash {
        parse_range(text)?
    } else if has_comma {
        parse_listed(text)?
    } else {
        let single = RE_EDGE_TRASH.replace_all(text, "");
        if single.is_empty() {
            Vec::new()
        } else {
            vec![parse_number(&single)?]
        }
    };

    numbers.sort_unstable();
    numbers.dedup();
    Ok(numbers)
}

/// Keeps even weeks for `Some(true)`, odd weeks for `Some(false)`.
pub fn filter_parity(weeks: &[u32], is_even: Option<bool>) -> Vec<u32> {
    match is_even {
        Some(even) => weeks.iter().copied().filter(|w| (w % 2 == 0) == even).collect(),
        None => weeks.to_vec(),
    }
}

/// A week list found in lowercase lesson text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSpan {
    pub start: usize,
    pub end: usize,
    /// The digits-and-separators part, without the "н"/"нед" suffix.
    pub numbers: String,
}

/// Tries a week list starting exactly at `start`: digits with `-`, `,` and
/// spaces, an optional "н"/"нед", then a dot or a word boundary. A list
/// followed by a subgroup keyword is a subgroup number, not weeks.
fn week_list_at(text: &str, start: usize) -> Option<WeekSpan> {
    let bytes = text.as_bytes();
    if !bytes.get(start).is_some_and(u8::is_ascii_digit) || !is_word_boundary(text, start) {
        return None;
    }

    let mut run_end = start;
    while run_end < bytes.len() && matches!(bytes[run_end], b'0'..=b'9' | b'-' | b',' | b' ') {
        run_end += 1;
    }

    for numbers_end in (start + 1..=run_end).rev() {
        let rest = &text[numbers_end..];
        let mut suffixes = Vec::with_capacity(3);
        if rest.starts_with('н') {
            suffixes.push('н'.len_utf8());
        }
        if rest.starts_with("нед") {
            suffixes.push("нед".len());
        }
        suffixes.push(0);

        for suffix in suffixes {
            let pos = numbers_end + suffix;
            if RE_SUBGROUP_AHEAD.is_match(&text[pos..]) {
                continue;
            }
            let end = if text[pos..].starts_with('.') {
                pos + 1
            } else if is_word_boundary(text, pos) {
                pos
            } else {
                continue;
            };
            return Some(WeekSpan {
                start,
                end,
                numbers: text[start..numbers_end].to_string(),
            });
        }
    }

    None
}

/// First week list in `text` at or after byte offset `from`.
pub fn find_week_list(text: &str, from: usize) -> Option<WeekSpan> {
    text.char_indices()
        .filter(|(i, c)| *i >= from && c.is_ascii_digit())
        .find_map(|(i, _)| week_list_at(text, i))
}

/// Exclusions like `кр. 3,17 н.`: the span covers the keyword and the list.
pub fn find_excluded_weeks(text: &str) -> Vec<WeekSpan> {
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(keyword) = RE_EXCLUDE_KEYWORD.find_at(text, pos) {
        match week_list_at(text, keyword.end()) {
            Some(list) => {
                pos = list.end;
                found.push(WeekSpan {
                    start: keyword.start(),
                    end: list.end,
                    numbers: list.numbers,
                });
            }
            None => pos = keyword.end().max(keyword.start() + 1),
        }
        if pos > text.len() {
            break;
        }
    }
    found
}

fn all_weeks(max_weeks: u32, is_even: Option<bool>) -> Vec<u32> {
    filter_parity(&(1..=max_weeks).collect::<Vec<u32>>(), is_even)
}

/// Weeks of one lesson segment.
///
/// Included weeks minus excluded weeks; with exclusions only, every week
/// except those; with neither, every week. Parity applies throughout, and
/// the last two cases need `max_weeks`.
pub fn infer_weeks(segment: &str, is_even: Option<bool>, max_weeks: Option<u32>) -> Result<Vec<u32>> {
    let mut text = segment.to_lowercase();

    let excluded = find_excluded_weeks(&text);
    let exclude_numbers = match excluded.first() {
        Some(span) => parse_numbers(span.numbers.trim())?,
        None => Vec::new(),
    };
    for span in excluded.iter().rev() {
        text.replace_range(span.start..span.end, "");
    }

    let include_numbers = match find_week_list(&text, 0) {
        Some(span) => parse_numbers(span.numbers.trim())?,
        None => Vec::new(),
    };

    let include = filter_parity(&include_numbers, is_even);
    let exclude = filter_parity(&exclude_numbers, is_even);

    let mut weeks = if !include.is_empty() {
        include.into_iter().filter(|w| !exclude.contains(w)).collect()
    } else {
        let max_weeks = max_weeks.ok_or_else(|| ScheduleError::MissingMaxWeeks(segment.to_string()))?;
        all_weeks(max_weeks, is_even)
            .into_iter()
            .filter(|w| !exclude.contains(w))
            .collect::<Vec<u32>>()
    };

    if let Some(max_weeks) = max_weeks {
        weeks.retain(|w| (1..=max_weeks).contains(w));
    }
    Ok(weeks)
}
