//! Statement engine: pages in, transactions and diagnostics out.
//!
//! [`StatementParser`] is immutable and can be shared between threads. All
//! per-statement state (running balance, chosen dialect, last date, year
//! context) lives in a [`StatementState`] the caller threads through
//! [`StatementParser::parse_page`] in page order. One state per statement;
//! never reuse it for another.

use chrono::NaiveDate;
use log::{debug, warn};
use passbook_core::{
    Classifier, DEFAULT_EPSILON, Diagnostic, DiagnosticKind, MarkerKind, PassbookError, RawLine,
    ReconciliationState, Result, Transaction, YearContext, detect_year, diagnostics,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::assembler::assemble;
use crate::dialect::Dialect;
use crate::dialects::Registry;
use crate::layout::{PositionedWord, group_words};
use crate::reconstruct::{Reconstruction, reconstruct};
use crate::recognizer::{header_of, recognize};
use crate::row_parser::{ParsedRow, RowContext, parse_row};

/// Which dialect to use: detect from the header, or a pinned id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BankHint {
    #[default]
    Auto,
    Dialect(String),
}

impl FromStr for BankHint {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            Ok(Self::Dialect(s.to_ascii_lowercase()))
        }
    }
}

impl fmt::Display for BankHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Dialect(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub bank: BankHint,
    pub year: YearContext,
    /// Balance-delta tolerance in currency units.
    pub epsilon: Decimal,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            bank: BankHint::Auto,
            year: YearContext::default(),
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// One page of extracted text plus the caller's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput {
    pub number: u32,
    pub source: String,
    pub lines: Vec<RawLine>,
}

impl PageInput {
    pub fn from_text(number: u32, source: impl Into<String>, text: &str) -> Self {
        Self {
            number,
            source: source.into(),
            lines: text.lines().map(|l| RawLine::new(l, number)).collect(),
        }
    }

    pub fn from_words(
        number: u32,
        source: impl Into<String>,
        words: &[PositionedWord],
        tolerance: f32,
    ) -> Self {
        Self {
            number,
            source: source.into(),
            lines: group_words(words, number, tolerance),
        }
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}

/// Split pdftotext-style output into pages on form feeds, numbered from 1.
/// The empty segment after a final form feed is not a page.
pub fn split_document(source: &str, text: &str) -> Vec<PageInput> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| PageInput::from_text(i as u32 + 1, source, segment))
        .collect()
}

/// Everything that carries from one page of a statement to the next.
#[derive(Debug, Clone, Default)]
pub struct StatementState {
    reconciliation: ReconciliationState,
    dialect: Option<&'static str>,
    last_date: Option<NaiveDate>,
    year: YearContext,
    header_checked: bool,
    opening: Option<Decimal>,
    closing: Option<Decimal>,
}

impl StatementState {
    pub fn new(year: YearContext) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn dialect(&self) -> Option<&'static str> {
        self.dialect
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.reconciliation.balance()
    }

    pub fn year(&self) -> &YearContext {
        &self.year
    }

    pub fn opening_balance(&self) -> Option<Decimal> {
        self.opening
    }

    pub fn closing_balance(&self) -> Option<Decimal> {
        self.closing
    }

    fn same_balances(&self, other: &Self) -> bool {
        self.balance() == other.balance()
            && self.opening == other.opening
            && self.closing == other.closing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOutcome {
    pub page: u32,
    pub dialect: Option<&'static str>,
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PageOutcome {
    fn empty(page: u32, dialect: Option<&'static str>) -> Self {
        Self {
            page,
            dialect,
            transactions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        diagnostics::count(&self.diagnostics, kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementOutcome {
    pub source: String,
    pub dialect: Option<&'static str>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StatementOutcome {
    /// Sum of credits minus debits.
    pub fn net_movement(&self) -> Decimal {
        self.transactions.iter().map(Transaction::net).sum()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        diagnostics::count(&self.diagnostics, kind)
    }

    /// Rows a diagnostic kept out of `transactions`.
    pub fn dropped_rows(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| !d.kind.row_kept())
            .count()
    }
}

struct Run {
    outcome: PageOutcome,
    records: usize,
    markers: usize,
}

pub struct StatementParser {
    registry: Registry,
    options: ParseOptions,
    classifier: Classifier,
}

impl StatementParser {
    pub fn new(options: ParseOptions) -> Result<Self> {
        Self::with_registry(Registry::builtin()?, options)
    }

    pub fn with_registry(registry: Registry, options: ParseOptions) -> Result<Self> {
        if let BankHint::Dialect(id) = &options.bank {
            if registry.get(id).is_none() {
                return Err(PassbookError::UnknownDialect(id.clone()));
            }
        }
        Ok(Self {
            registry,
            classifier: Classifier::new(options.epsilon),
            options,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Fresh state for a new statement, using the configured year context.
    pub fn begin(&self) -> StatementState {
        StatementState::new(self.options.year)
    }

    pub fn begin_with_year(&self, year: YearContext) -> StatementState {
        StatementState::new(year)
    }

    /// Parse one page. Pages of a statement must arrive in document order.
    pub fn parse_page(&self, state: &mut StatementState, page: &PageInput) -> Result<PageOutcome> {
        if page.number == 0 {
            return Err(PassbookError::InvalidPage(page.number));
        }
        if page.is_blank() {
            return Ok(PageOutcome::empty(page.number, state.dialect));
        }

        let header = header_of(&page.text());
        if !state.header_checked {
            state.header_checked = true;
            if state.year.detected.is_none() {
                if let Some(year) = detect_year(&header) {
                    debug!("{}: statement year {} from header", page.source, year);
                    state.year.detected = Some(year);
                }
            }
        }

        if let Some(dialect) = self.known_dialect(state, &header)? {
            state.dialect = Some(dialect.id());
            return Ok(self.run(dialect, state, page).outcome);
        }

        Ok(self.trial(state, page))
    }

    pub fn parse_statement(&self, pages: &[PageInput]) -> Result<StatementOutcome> {
        self.parse_statement_with(self.options.year, pages)
    }

    pub fn parse_statement_with(
        &self,
        year: YearContext,
        pages: &[PageInput],
    ) -> Result<StatementOutcome> {
        if pages.iter().all(PageInput::is_blank) {
            return Err(PassbookError::NoText);
        }

        let mut state = self.begin_with_year(year);
        let mut transactions = Vec::new();
        let mut diagnostics = Vec::new();
        for page in pages {
            let outcome = self.parse_page(&mut state, page)?;
            transactions.extend(outcome.transactions);
            diagnostics.extend(outcome.diagnostics);
        }

        Ok(StatementOutcome {
            source: pages[0].source.clone(),
            dialect: state.dialect,
            opening_balance: state.opening,
            closing_balance: state.closing,
            transactions,
            diagnostics,
        })
    }

    /// Pinned by the caller, chosen earlier in this statement, or
    /// recognized from this page's header.
    fn known_dialect(&self, state: &StatementState, header: &str) -> Result<Option<&Dialect>> {
        if let BankHint::Dialect(id) = &self.options.bank {
            return self
                .registry
                .get(id)
                .map(Some)
                .ok_or_else(|| PassbookError::UnknownDialect(id.clone()));
        }
        if let Some(dialect) = state.dialect.and_then(|id| self.registry.get(id)) {
            return Ok(Some(dialect));
        }
        let recognized = recognize(&self.registry, header);
        if let Some(dialect) = recognized {
            debug!("recognized {} from header", dialect.name());
        }
        Ok(recognized)
    }

    /// Try every dialect in priority order on a scratch copy of the state;
    /// the first that yields a record wins and is pinned. A page with only
    /// balance markers keeps their balances when every dialect that read
    /// a marker agrees, and pins nothing.
    fn trial(&self, state: &mut StatementState, page: &PageInput) -> PageOutcome {
        warn!(
            "{} page {}: no dialect signature matched, trying each dialect",
            page.source, page.number
        );
        let failure = Diagnostic::new(
            DiagnosticKind::DialectDetectionFailure,
            page.number,
            "no signature phrase matched",
        );

        let mut agreed: Option<StatementState> = None;
        let mut conflict = false;
        for dialect in self.registry.iter() {
            let mut scratch = state.clone();
            let run = self.run(dialect, &mut scratch, page);
            if run.records > 0 {
                debug!("trial parse picked {}", dialect.name());
                scratch.dialect = Some(dialect.id());
                *state = scratch;
                let mut outcome = run.outcome;
                outcome.diagnostics.insert(0, failure);
                return outcome;
            }
            if run.markers > 0 {
                if let Some(prev) = &agreed {
                    conflict |= !prev.same_balances(&scratch);
                } else {
                    agreed = Some(scratch);
                }
            }
        }

        match agreed {
            Some(scratch) if !conflict => {
                debug!("{} page {}: keeping marker balances", page.source, page.number);
                state.reconciliation = scratch.reconciliation;
                state.opening = scratch.opening;
                state.closing = scratch.closing;
            }
            Some(_) => warn!(
                "{} page {}: dialects disagree on marker balances, ignoring them",
                page.source, page.number
            ),
            None => {}
        }

        let mut outcome = PageOutcome::empty(page.number, None);
        outcome.diagnostics.push(failure);
        outcome
    }

    fn run(&self, dialect: &Dialect, state: &mut StatementState, page: &PageInput) -> Run {
        let Reconstruction {
            rows,
            mut diagnostics,
        } = reconstruct(dialect, page.lines.iter().cloned());

        let mut transactions = Vec::new();
        let mut records = 0;
        let mut markers = 0;
        for row in &rows {
            let ctx = RowContext {
                year: &state.year,
                last_date: state.last_date,
            };
            match parse_row(dialect, row, &ctx) {
                Ok(ParsedRow::Marker { kind, balance }) => {
                    markers += 1;
                    state.reconciliation.observe(balance);
                    match kind {
                        MarkerKind::Opening => {
                            state.opening.get_or_insert(balance);
                        }
                        MarkerKind::Closing => state.closing = Some(balance),
                    }
                }
                Ok(ParsedRow::Record(record)) => {
                    records += 1;
                    state.last_date = Some(record.date);
                    let classification = self.classifier.classify(
                        &mut state.reconciliation,
                        &record,
                        dialect.hints(),
                    );
                    match assemble(record, &classification, page.number, &page.source) {
                        Ok(transaction) => {
                            if transaction.needs_review {
                                diagnostics.push(
                                    Diagnostic::new(
                                        DiagnosticKind::AmbiguousClassification,
                                        page.number,
                                        "defaulted to credit",
                                    )
                                    .with_text(transaction.description.clone()),
                                );
                            }
                            transactions.push(transaction);
                        }
                        Err(diagnostic) => {
                            debug!("{}: {}", page.source, diagnostic);
                            diagnostics.push(diagnostic);
                        }
                    }
                }
                Err(diagnostic) => {
                    debug!("{}: {}", page.source, diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        Run {
            outcome: PageOutcome {
                page: page.number,
                dialect: Some(dialect.id()),
                transactions,
                diagnostics,
            },
            records,
            markers,
        }
    }
}
