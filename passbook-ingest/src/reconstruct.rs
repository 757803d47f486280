//! Physical lines to logical rows.
//!
//! A small state machine per page:
//!
//! ```text
//! Idle --row-start--> Accumulating --tail--> (emit) Idle          BeforeTail
//! Idle --row-start--> Accumulating --tail--> Complete --next--> (emit)   AfterTail
//! ```
//!
//! Ignored and blank lines never reach it. Balance markers are checked
//! before row-starts and interrupt whatever is pending. An interrupted row
//! without a tail is dropped, unless the dialect salvages rows that carry
//! an amount/balance pair somewhere in their text.

use log::debug;
use passbook_core::{Diagnostic, DiagnosticKind, LogicalRow, RawLine};
use std::mem;

use crate::dialect::{Continuation, Dialect, IncompletePolicy};

#[derive(Debug, Default)]
pub struct Reconstruction {
    pub rows: Vec<LogicalRow>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Accumulating(LogicalRow),
    /// Tail seen; collecting detail lines printed below it.
    Complete(LogicalRow),
}

pub struct Reconstructor<'d> {
    dialect: &'d Dialect,
    state: State,
    out: Reconstruction,
}

impl<'d> Reconstructor<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            state: State::Idle,
            out: Reconstruction::default(),
        }
    }

    pub fn feed(&mut self, line: RawLine) {
        let text = line.text.trim();
        if text.is_empty() || self.dialect.is_ignored(text) {
            return;
        }
        let is_marker = self.dialect.is_marker(text);
        let is_row_start = !is_marker && self.dialect.is_row_start(text);

        if is_marker {
            self.flush();
            self.out.rows.push(LogicalRow::marker(line));
            return;
        }
        if is_row_start {
            self.flush();
            self.state = self.settle(LogicalRow::open(line));
            return;
        }

        self.state = match mem::take(&mut self.state) {
            State::Idle => {
                debug!("page {}: stray line dropped: {}", line.page, line.text.trim());
                State::Idle
            }
            State::Accumulating(mut row) => {
                row.push(line);
                self.settle(row)
            }
            State::Complete(mut row) => {
                row.push(line);
                State::Complete(row)
            }
        };
    }

    /// Flush whatever is pending and hand back the page's rows.
    pub fn finish(mut self) -> Reconstruction {
        self.flush();
        self.out
    }

    fn settle(&mut self, mut row: LogicalRow) -> State {
        if !self.dialect.completes(&row.text()) {
            return State::Accumulating(row);
        }
        row.mark_complete();
        match self.dialect.continuation() {
            Continuation::BeforeTail => {
                self.out.rows.push(row);
                State::Idle
            }
            Continuation::AfterTail => State::Complete(row),
        }
    }

    fn flush(&mut self) {
        match mem::take(&mut self.state) {
            State::Idle => {}
            State::Complete(row) => self.out.rows.push(row),
            State::Accumulating(row) => self.incomplete(row),
        }
    }

    fn incomplete(&mut self, row: LogicalRow) {
        let text = row.text();
        if self.dialect.incomplete_policy() == IncompletePolicy::Salvage
            && self.dialect.carries_tail(&text)
        {
            debug!("page {}: salvaged row without trailing figures: {}", row.page, text);
            self.out.rows.push(row);
            return;
        }
        debug!("page {}: incomplete row dropped: {}", row.page, text);
        self.out.diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::IncompleteRow,
                row.page,
                "no amount/balance before the next row",
            )
            .with_text(text),
        );
    }
}

pub fn reconstruct<I>(dialect: &Dialect, lines: I) -> Reconstruction
where
    I: IntoIterator<Item = RawLine>,
{
    let mut reconstructor = Reconstructor::new(dialect);
    for line in lines {
        reconstructor.feed(line);
    }
    reconstructor.finish()
}
