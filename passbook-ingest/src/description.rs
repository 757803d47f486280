//! Description clean-up applied after a row grammar has cut the field out.

use crate::dialect::DescriptionCleanup;

pub fn clean_description(raw: &str, cleanup: DescriptionCleanup) -> String {
    let words = raw.split_whitespace();
    match cleanup {
        DescriptionCleanup::Collapse => words.collect::<Vec<_>>().join(" "),
        DescriptionCleanup::SplitGlued(tokens) => words
            .map(|w| split_word(w, tokens))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// A word made entirely of known tokens is split into them. Anything else
/// only gets a space at each letter/digit boundary (`TRF123` -> `TRF 123`).
fn split_word(word: &str, tokens: &[&str]) -> String {
    let mut by_length: Vec<&str> = tokens.to_vec();
    by_length.sort_by(|a, b| b.len().cmp(&a.len()));

    match decompose(word, &by_length) {
        Some(parts) => parts.join(" "),
        None => split_alnum(word),
    }
}

/// Longest-first decomposition with backtracking. Returns slices of the
/// original word so its case is kept.
fn decompose<'w>(word: &'w str, tokens: &[&str]) -> Option<Vec<&'w str>> {
    if word.is_empty() {
        return Some(Vec::new());
    }
    for token in tokens {
        let len = token.len();
        let Some(head) = word.get(..len) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(token) {
            continue;
        }
        if let Some(mut rest) = decompose(&word[len..], tokens) {
            rest.insert(0, head);
            return Some(rest);
        }
    }
    None
}

fn split_alnum(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 4);
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_ascii_alphabetic());
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
