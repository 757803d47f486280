//! Apply a dialect's row grammars to a reconstructed row.

use chrono::NaiveDate;
use passbook_core::dates::parse_month;
use passbook_core::{
    Diagnostic, DiagnosticKind, Direction, LogicalRow, MarkerKind, RawRecord, RowKind,
    YearContext, parse_amount, parse_balance, parse_column_amount,
};
use regex::Captures;
use rust_decimal::Decimal;

use crate::description::clean_description;
use crate::dialect::Dialect;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Record(RawRecord),
    Marker { kind: MarkerKind, balance: Decimal },
}

/// Statement context a row may need to complete its date.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub year: &'a YearContext,
    /// Most recent date seen in this statement, for rows that omit it.
    pub last_date: Option<NaiveDate>,
}

pub fn parse_row(
    dialect: &Dialect,
    row: &LogicalRow,
    ctx: &RowContext<'_>,
) -> Result<ParsedRow, Diagnostic> {
    match row.kind {
        RowKind::Marker => parse_marker(dialect, row),
        RowKind::Transaction => parse_record(dialect, row, ctx).map(ParsedRow::Record),
    }
}

fn parse_marker(dialect: &Dialect, row: &LogicalRow) -> Result<ParsedRow, Diagnostic> {
    let text = row.text();
    let reject = |kind, detail: &str| Diagnostic::new(kind, row.page, detail).with_text(&text);

    let (kind, re) = dialect
        .marker(&text)
        .ok_or_else(|| reject(DiagnosticKind::UnrecognizedRow, "not a balance marker"))?;
    let token = re
        .captures(text.trim())
        .and_then(|caps| caps.name("balance"))
        .map(|m| m.as_str())
        .ok_or_else(|| reject(DiagnosticKind::UnrecognizedRow, "marker without balance"))?;
    let balance = parse_balance(token)
        .ok_or_else(|| reject(DiagnosticKind::MalformedNumber, "bad marker balance"))?;
    Ok(ParsedRow::Marker { kind, balance })
}

fn parse_record(
    dialect: &Dialect,
    row: &LogicalRow,
    ctx: &RowContext<'_>,
) -> Result<RawRecord, Diagnostic> {
    let head = row.head_text();
    let caps = dialect
        .row_grammars()
        .iter()
        .find_map(|re| re.captures(&head))
        .ok_or_else(|| {
            Diagnostic::new(
                DiagnosticKind::UnrecognizedRow,
                row.page,
                format!("no {} row grammar matched", dialect.id()),
            )
            .with_text(row.text())
        })?;

    let reject = |kind, detail: String| {
        Diagnostic::new(kind, row.page, detail).with_text(row.text())
    };

    let (date, raw_date) = match caps.name("day") {
        Some(day) => {
            let raw_date = date_span(&head, &caps, day.start());
            let day: u32 = day
                .as_str()
                .parse()
                .map_err(|_| reject(DiagnosticKind::InvalidRecord, format!("bad day in {raw_date}")))?;
            let month = caps
                .name("mon")
                .and_then(|m| parse_month(m.as_str()))
                .ok_or_else(|| reject(DiagnosticKind::InvalidRecord, format!("bad month in {raw_date}")))?;
            let year = caps.name("year").and_then(|y| y.as_str().parse::<i32>().ok());
            if year.is_none() && ctx.year.year_for_month(month).is_none() {
                return Err(reject(
                    DiagnosticKind::MissingYear,
                    format!("no year available for {raw_date}"),
                ));
            }
            let date = ctx
                .year
                .resolve(day, month, year)
                .ok_or_else(|| reject(DiagnosticKind::InvalidRecord, format!("impossible date {raw_date}")))?;
            (date, raw_date)
        }
        None => {
            let date = ctx.last_date.ok_or_else(|| {
                reject(
                    DiagnosticKind::UnrecognizedRow,
                    "undated row with no earlier date to inherit".to_string(),
                )
            })?;
            (date, String::new())
        }
    };

    let (amounts, stated) = if let Some(amount) = caps.name("amount") {
        let value = parse_amount(amount.as_str()).ok_or_else(|| {
            reject(DiagnosticKind::MalformedNumber, format!("bad amount '{}'", amount.as_str()))
        })?;
        let stated = caps.name("sign").and_then(|s| match s.as_str() {
            "+" => Some(Direction::Credit),
            "-" => Some(Direction::Debit),
            _ => None,
        });
        (vec![value], stated)
    } else {
        let column = |name: &str| {
            let token = caps.name(name).map(|m| m.as_str()).unwrap_or("");
            parse_column_amount(token).ok_or_else(|| {
                reject(DiagnosticKind::MalformedNumber, format!("bad {name} '{token}'"))
            })
        };
        let debit = column("debit")?;
        let credit = column("credit")?;
        let stated = match (debit.is_zero(), credit.is_zero()) {
            (false, true) => Some(Direction::Debit),
            (true, false) => Some(Direction::Credit),
            _ => None,
        };
        (vec![debit, credit], stated)
    };

    let balance_token = caps.name("balance").map(|m| m.as_str()).unwrap_or("");
    let balance = parse_balance(balance_token).ok_or_else(|| {
        reject(DiagnosticKind::MalformedNumber, format!("bad balance '{balance_token}'"))
    })?;

    let mut description = caps
        .name("desc")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let trailing = row.trailing_text();
    if !trailing.is_empty() {
        description.push(' ');
        description.push_str(&trailing);
    }

    Ok(RawRecord {
        date,
        raw_date,
        description: clean_description(&description, dialect.cleanup()),
        amounts,
        balance,
        reference: caps.name("ref").map(|m| m.as_str().to_string()),
        stated,
    })
}

/// The date exactly as printed: from `day` through `year` (or `mon`).
fn date_span(head: &str, caps: &Captures<'_>, start: usize) -> String {
    let end = caps
        .name("year")
        .or_else(|| caps.name("mon"))
        .map(|m| m.end())
        .unwrap_or(start);
    head.get(start..end).unwrap_or_default().to_string()
}
