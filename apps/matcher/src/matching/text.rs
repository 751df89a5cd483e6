//! Text normalisation shared by the extractor, engine and ranker.
//!
//! Everything is matched on a normalised form: lowercase, punctuation folded to spaces,
//! tokens joined by single spaces and the whole string padded with one space on each
//! side, so `contains_term` gets word-boundary semantics from a plain substring search.

/// Characters kept inside tokens. `/` is deliberately absent so `CI/CD` and
/// `Python/Django` split into separate words.
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-' | '\'' | '&')
}

/// Lowercases and folds `text` into a space-padded token stream.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_token_char(c) { c } else { ' ' })
        .collect();

    let mut out = String::with_capacity(folded.len() + 2);
    out.push(' ');
    for token in folded.split_whitespace() {
        let token = token
            .trim_end_matches(['.', '-', '\''])
            .trim_start_matches(['-', '\'']);
        if token.is_empty() {
            continue;
        }
        out.push_str(token);
        out.push(' ');
    }
    out
}

/// Normalised form of a dictionary term (no padding).
pub fn normalize_term(term: &str) -> String {
    normalize(term).trim().to_string()
}

/// Word-boundary containment of a normalised term inside a normalised haystack.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.contains(&format!(" {term} "))
}

/// Splits raw text into sentences. A period only ends a sentence when followed by
/// whitespace or the end of input, so `Node.js` stays intact.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let ends = match c {
            '\n' | ';' | '!' | '?' => true,
            '.' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            _ => false,
        };
        if ends {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = idx + c.len_utf8();
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Uppercase acronyms (2–6 chars, at least two capitals) in their original casing,
/// returned lowercased.
pub fn acronyms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| {
            let len = token.len();
            (2..=6).contains(&len)
                && token.starts_with(|c: char| c.is_ascii_uppercase())
                && token
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                && token.chars().filter(|c| c.is_ascii_uppercase()).count() >= 2
        })
        .map(str::to_lowercase)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First word of a bullet, lowercased, with surrounding punctuation stripped.
pub fn first_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .find(|w| !w.is_empty())
}
