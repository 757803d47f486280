use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Visual position of a line when page text came with geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePosition {
    pub top: f32,
    pub left: f32,
}

/// One physical line of page text, in top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    pub text: String,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LinePosition>,
}

impl RawLine {
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
            position: None,
        }
    }

    pub fn with_position(mut self, position: LinePosition) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

/// Balance-carry rows: brought forward (opening) or carried forward (closing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Opening,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Transaction,
    Marker,
}

/// A transaction candidate rebuilt from one or more physical lines.
///
/// `tail_end` is the number of lines up to and including the one that
/// completed the amount/balance tail. Lines after it are description
/// detail printed below the figures.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalRow {
    pub page: u32,
    pub kind: RowKind,
    lines: Vec<RawLine>,
    tail_end: Option<usize>,
}

impl LogicalRow {
    pub fn open(line: RawLine) -> Self {
        Self {
            page: line.page,
            kind: RowKind::Transaction,
            lines: vec![line],
            tail_end: None,
        }
    }

    pub fn marker(line: RawLine) -> Self {
        Self {
            page: line.page,
            kind: RowKind::Marker,
            lines: vec![line],
            tail_end: Some(1),
        }
    }

    pub fn push(&mut self, line: RawLine) {
        self.lines.push(line);
    }

    pub fn mark_complete(&mut self) {
        self.tail_end = Some(self.lines.len());
    }

    pub fn is_complete(&self) -> bool {
        self.tail_end.is_some()
    }

    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    /// All contributing lines, trimmed and joined by single spaces.
    pub fn text(&self) -> String {
        join_lines(&self.lines)
    }

    /// The lines a row grammar is matched against.
    pub fn head_text(&self) -> String {
        match self.tail_end {
            Some(end) => join_lines(&self.lines[..end]),
            None => self.text(),
        }
    }

    /// Detail lines printed after the tail, if any.
    pub fn trailing_text(&self) -> String {
        match self.tail_end {
            Some(end) => join_lines(&self.lines[end..]),
            None => String::new(),
        }
    }
}

fn join_lines(lines: &[RawLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Typed fields extracted from one logical row by a dialect grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: NaiveDate,
    /// The date exactly as printed, before year inheritance.
    pub raw_date: String,
    pub description: String,
    /// One amount, or the debit and credit columns in print order.
    pub amounts: Vec<Decimal>,
    pub balance: Decimal,
    pub reference: Option<String>,
    /// Direction printed on the row itself (a `+`/`-` marker, or the only
    /// nonzero column), when the layout has one.
    pub stated: Option<Direction>,
}

impl RawRecord {
    /// The amount that moved: the first nonzero token, else the first token.
    pub fn amount(&self) -> Decimal {
        self.amounts
            .iter()
            .copied()
            .find(|a| !a.is_zero())
            .or_else(|| self.amounts.first().copied())
            .unwrap_or(Decimal::ZERO)
    }
}

/// Final normalized output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Negative when the account is overdrawn.
    pub balance: Decimal,
    pub page: u32,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Direction fell back to the documented default; worth a human look.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub needs_review: bool,
}

impl Transaction {
    pub fn direction(&self) -> Direction {
        if self.debit.is_zero() {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }

    /// Signed movement: positive for money in.
    pub fn net(&self) -> Decimal {
        self.credit - self.debit
    }
}
