use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::Result;
use crate::models::Teachers;
use crate::subgroups::extract_subgroup;

lazy_static! {
    static ref RE_CYRILLIC: Regex = Regex::new(r"[а-яА-Я]").unwrap();
    /// "Комарова М,И." has a comma where the dot after an initial belongs.
    static ref RE_INITIAL_COMMA: Regex = Regex::new(r"(?i)[а-яё](,) {0,2}[а-яё][. ]").unwrap();
    pub(crate) static ref RE_SEPARATORS: Regex = Regex::new(r" {2,}|\n|,|;|\+|/").unwrap();
    static ref RE_INITIALS: Regex =
        Regex::new(r"([а-яА-ЯёЁ\-]+) ([а-яА-ЯёЁ])\.? ?([а-яА-ЯёЁ])\.?").unwrap();
    /// A surname with one or two initials, or a bare word of three or more letters.
    static ref RE_TEACHER_NAME: Regex =
        Regex::new(r"(?i)(?:[а-яё\-]+ +(?:[а-яё]\. {0,2}){1,2})|(?:[а-яё\-]{3,} ?)").unwrap();
    static ref RE_SPACED_INITIALS: Regex =
        Regex::new(r"([а-яА-ЯёЁ]+)\s+([а-яА-ЯёЁ]+)\.?\s+([а-яА-ЯёЁ]+)\.?").unwrap();
}

fn fix_initial_commas(names: &str) -> String {
    let mut fixed = names.to_string();
    for caps in RE_INITIAL_COMMA.captures_iter(names) {
        if let Some(comma) = caps.get(1) {
            fixed.replace_range(comma.range(), ".");
        }
    }
    fixed
}

/// "Иванов И. И", "Иванов И И." and the like become "Иванов И.И.".
fn normalize_name(name: &str) -> String {
    RE_INITIALS.replace_all(name, "${1} ${2}.${3}.").trim().to_string()
}

pub fn parse_teachers(cell: &str) -> Result<Teachers> {
    if !RE_CYRILLIC.is_match(cell) {
        return Ok(Teachers::default());
    }

    // "п/г" would be cut in two by the "/" separator
    let names = fix_initial_commas(cell.trim()).replace("п/г", "подгр");
    let pieces: Vec<&str> = RE_SEPARATORS.split(&names).collect();

    if pieces.len() > 1 {
        let mut tagged = Vec::new();
        for piece in pieces.iter().filter(|p| !p.trim().is_empty()) {
            let (name, subgroup) = extract_subgroup(piece)?;
            let name = normalize_name(&name);
            if !name.is_empty() {
                tagged.push((name, subgroup));
            }
        }

        if tagged.iter().any(|(_, subgroup)| subgroup.is_some()) {
            // Untagged names take their position as the subgroup.
            let pairs = tagged
                .into_iter()
                .enumerate()
                .map(|(i, (name, subgroup))| (name, subgroup.unwrap_or(i as u32 + 1)))
                .collect();
            return Ok(Teachers::WithSubgroups(pairs));
        }
        return Ok(Teachers::Names(tagged.into_iter().map(|(name, _)| name).collect()));
    }

    // One piece may still hold several names separated by single spaces.
    let found = RE_TEACHER_NAME
        .find_iter(&names)
        .map(|m| normalize_name(m.as_str()))
        .filter(|name| !name.is_empty())
        .map(|name| RE_SPACED_INITIALS.replace_all(&name, "${1} ${2}.${3}.").trim().to_string())
        .collect();

    Ok(Teachers::Names(found))
}
