//! passbook-core: data model, money/date parsing and balance reconciliation
//! for bank statement transaction reconstruction.

pub mod dates;
pub mod diagnostics;
pub mod error;
pub mod money;
pub mod reconcile;
pub mod types;

pub use dates::{StatementPeriod, YearContext, detect_year, detect_year_in_name};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{PassbookError, Result};
pub use money::{parse_amount, parse_balance, parse_column_amount};
pub use reconcile::{
    Basis, Classification, Classifier, DEFAULT_EPSILON, KeywordHints, ReconciliationState,
};
pub use types::{
    Direction, LinePosition, LogicalRow, MarkerKind, RawLine, RawRecord, RowKind, Transaction,
};
