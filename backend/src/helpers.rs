use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_TRASH_START: Regex = Regex::new(r"\A\W+\s*").unwrap();
    static ref RE_TRASH_END: Regex = Regex::new(r"[-,_.\+;]+$").unwrap();
}

/// Same as regex `\w`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Same as regex `\b` at byte offset `pos`.
pub fn is_word_boundary(text: &str, pos: usize) -> bool {
    let before = text[..pos].chars().next_back().is_some_and(is_word_char);
    let after = text[pos..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Byte offset of the char following the one at `pos`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, |c| c.len_utf8())
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    pos - text[..pos].chars().next_back().map_or(1, |c| c.len_utf8())
}

/// Removes leading non-word characters and a trailing punctuation run.
pub fn strip_trash(text: &str) -> String {
    let text = RE_TRASH_START.replace(text.trim(), "");
    let text = RE_TRASH_END.replace(&text, "");
    text.trim().to_string()
}

/// Non-overlapping matches of `re` whose end is not followed by `guard`.
///
/// `guard` must be anchored with `^`. A rejected match is retried at the
/// same start with a shorter haystack before the search moves on, which
/// gives the matches a negative lookahead after `re` would give. The
/// pattern must end by consuming a character, not with an assertion.
pub fn find_iter_unless_followed(re: &Regex, guard: &Regex, text: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(m) = re.find_at(text, pos) else {
            break;
        };
        let start = m.start();
        let mut end = m.end();
        let mut accepted = None;

        loop {
            if !guard.is_match(&text[end..]) {
                accepted = Some(end);
                break;
            }
            if end <= start {
                break;
            }
            let limit = prev_char_boundary(text, end);
            match re.find_at(&text[..limit], start) {
                Some(m) if m.start() == start => end = m.end(),
                _ => break,
            }
        }

        match accepted {
            Some(end) => {
                found.push((start, end));
                pos = if end > start { end } else { next_char_boundary(text, start) };
            }
            None => {
                if start >= text.len() {
                    break;
                }
                pos = next_char_boundary(text, start);
            }
        }
    }

    found
}

/// Picks the value for the `index`-th of `lessons_len` lessons from a
/// column that listed `elements`.
pub fn get_lesson_element<T: Clone + PartialEq>(lessons_len: usize, index: usize, elements: &[T]) -> Option<T> {
    if elements.is_empty() {
        return None;
    }
    if lessons_len == elements.len() {
        return elements.get(index).cloned();
    }
    if elements.len() == 1 || elements.iter().all(|e| *e == elements[0]) {
        return Some(elements[0].clone());
    }
    if elements.len() == 2 {
        if lessons_len == 1 {
            return Some(elements[0].clone());
        }
        if lessons_len == 4 {
            return elements.get(index / 2).cloned();
        }
    }
    None
}
