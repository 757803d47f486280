//! Dialect definitions.
//!
//! A [`DialectSpec`] is plain data: the phrases, patterns and hints that
//! describe one bank's statement layout. [`Dialect`] is the compiled form
//! the engine runs. Adding a bank means adding a spec, not control flow.
//!
//! Row grammars are regular expressions with named groups:
//! `day`, `mon` (number or three-letter name), `year`, `desc`, `ref`,
//! either `amount` (optionally with `sign`) or `debit` + `credit`, and
//! `balance`. Marker grammars only need `balance`. All patterns match
//! case-insensitively.

use passbook_core::{KeywordHints, MarkerKind, PassbookError, Result};
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

/// Where description detail lines sit relative to the amount/balance tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Wrapped description lines come first; the tail closes the row.
    BeforeTail,
    /// The first line already carries the tail; detail lines follow it
    /// until the next row-start.
    AfterTail,
}

/// What to do with a row that never showed a complete tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompletePolicy {
    Discard,
    /// Keep it if an amount + balance pair appears anywhere in its text.
    Salvage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionCleanup {
    /// Collapse runs of whitespace.
    Collapse,
    /// Also split words glued together by the text extractor
    /// (`CDTCASHDEPOSIT`) using a table of known tokens.
    SplitGlued(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct DialectSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Header phrases that identify the bank (case-insensitive containment).
    pub signatures: &'static [&'static str],
    /// Boilerplate lines dropped before reconstruction.
    pub ignore: &'static [&'static str],
    /// First line of a new logical row.
    pub row_start: &'static str,
    /// Amount(s) + balance, unanchored. The engine anchors it at end of text
    /// to decide completion.
    pub tail: &'static str,
    /// Tried in order against a row's text.
    pub rows: &'static [&'static str],
    pub markers: &'static [(MarkerKind, &'static str)],
    pub continuation: Continuation,
    pub incomplete: IncompletePolicy,
    pub cleanup: DescriptionCleanup,
    pub hints: KeywordHints,
}

#[derive(Debug)]
pub struct Dialect {
    spec: &'static DialectSpec,
    ignore: RegexSet,
    row_start: Regex,
    tail_end: Regex,
    tail_any: Regex,
    rows: Vec<Regex>,
    markers: Vec<(MarkerKind, Regex)>,
}

impl Dialect {
    pub fn compile(spec: &'static DialectSpec) -> Result<Self> {
        let grammar = |source: regex::Error| PassbookError::Grammar {
            dialect: spec.id,
            source,
        };
        let build = |pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(grammar)
        };

        let ignore = RegexSetBuilder::new(spec.ignore)
            .case_insensitive(true)
            .build()
            .map_err(grammar)?;

        let rows = spec
            .rows
            .iter()
            .map(|p| build(p))
            .collect::<Result<Vec<_>>>()?;

        let markers = spec
            .markers
            .iter()
            .map(|(kind, p)| build(p).map(|re| (*kind, re)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            spec,
            ignore,
            row_start: build(spec.row_start)?,
            tail_end: build(&format!(r"(?:{})\s*$", spec.tail))?,
            tail_any: build(spec.tail)?,
            rows,
            markers,
        })
    }

    pub fn spec(&self) -> &'static DialectSpec {
        self.spec
    }

    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn hints(&self) -> &KeywordHints {
        &self.spec.hints
    }

    pub fn continuation(&self) -> Continuation {
        self.spec.continuation
    }

    pub fn incomplete_policy(&self) -> IncompletePolicy {
        self.spec.incomplete
    }

    pub fn cleanup(&self) -> DescriptionCleanup {
        self.spec.cleanup
    }

    /// Case-insensitive containment of any signature phrase.
    pub fn matches_signature(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.spec
            .signatures
            .iter()
            .any(|s| upper.contains(&s.to_uppercase()))
    }

    pub fn is_ignored(&self, line: &str) -> bool {
        self.ignore.is_match(line.trim())
    }

    pub fn is_row_start(&self, line: &str) -> bool {
        self.row_start.is_match(line.trim())
    }

    pub fn is_marker(&self, line: &str) -> bool {
        self.marker(line).is_some()
    }

    pub fn marker(&self, line: &str) -> Option<(MarkerKind, &Regex)> {
        let line = line.trim();
        self.markers
            .iter()
            .find(|(_, re)| re.is_match(line))
            .map(|(kind, re)| (*kind, re))
    }

    /// The text ends with a complete amount/balance tail.
    pub fn completes(&self, text: &str) -> bool {
        self.tail_end.is_match(text)
    }

    /// An amount/balance pair appears anywhere in the text.
    pub fn carries_tail(&self, text: &str) -> bool {
        self.tail_any.is_match(text)
    }

    pub fn row_grammars(&self) -> &[Regex] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROKEN: DialectSpec = DialectSpec {
        id: "broken",
        name: "Broken",
        signatures: &["BROKEN"],
        ignore: &[],
        row_start: r"^\d{2}/\d{2}\s",
        tail: r"[\d,]+\.\d{2}\s+[\d,]+\.\d{2}",
        rows: &[r"^(?P<day>\d{2}/(?P<mon>\d{2})"],
        markers: &[],
        continuation: Continuation::BeforeTail,
        incomplete: IncompletePolicy::Discard,
        cleanup: DescriptionCleanup::Collapse,
        hints: KeywordHints {
            inbound: &[],
            outbound: &[],
        },
    };

    #[test]
    fn test_compile_reports_bad_grammar() {
        let err = Dialect::compile(&BROKEN).unwrap_err();
        assert!(matches!(err, PassbookError::Grammar { dialect: "broken", .. }));
    }

    #[test]
    fn test_tail_anchoring() {
        static SPEC: DialectSpec = DialectSpec {
            rows: &[r"^(?P<desc>.+)$"],
            ..BROKEN
        };
        let d = Dialect::compile(&SPEC).unwrap();
        assert!(d.completes("02/05 DEP-ECP 1,411.99 2,780.16 "));
        assert!(!d.completes("02/05 1,411.99 2,780.16 DEP-ECP"));
        assert!(d.carries_tail("02/05 1,411.99 2,780.16 DEP-ECP"));
        assert!(d.matches_signature("a broken bank"));
    }
}
