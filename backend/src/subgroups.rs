use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::Result;
use crate::week_parser::parse_numbers;

lazy_static! {
    static ref RE_SUBGROUP: Regex =
        Regex::new(r"(?:\d+[-,\s.]*)+(подгруппа|подгруп|подгр|п/г|группа|гр)").unwrap();
    static ref RE_EMPTY_PARENS: Regex = Regex::new(r"\(\W*\s*\)").unwrap();
    static ref RE_EDGE_COMMAS: Regex = Regex::new(r"^\s*,\s*|\s*,\s*$").unwrap();
}

/// Finds a "N подгр." style marker. A marker naming exactly one subgroup is
/// cut out of the text; a marker naming several is left alone.
///
/// `"Физика (1 п/г)"` gives `("Физика ", Some(1))`.
pub fn extract_subgroup(segment: &str) -> Result<(String, Option<u32>)> {
    let Some(caps) = RE_SUBGROUP.captures(segment) else {
        return Ok((segment.to_string(), None));
    };

    let marker = &caps[0];
    let numbers = marker.replace(&caps[1], "");
    let subgroups = parse_numbers(numbers.trim())?;
    if subgroups.len() != 1 {
        return Ok((segment.to_string(), None));
    }

    let text = segment.replace(marker, "");
    let text = RE_EMPTY_PARENS.replace_all(&text, "");
    let text = RE_EDGE_COMMAS.replace_all(&text, "");
    Ok((text.to_string(), Some(subgroups[0])))
}
