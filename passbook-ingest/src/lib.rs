//! passbook-ingest: turn extracted statement page text into transactions.
//!
//! Pipeline per page: ignore filter -> [`reconstruct`] -> [`row_parser`] ->
//! balance classifier -> [`assembler`]. [`engine::StatementParser`] drives
//! it and picks the dialect.

pub mod assembler;
pub mod description;
pub mod dialect;
pub mod dialects;
pub mod engine;
pub mod layout;
pub mod reconstruct;
pub mod recognizer;
pub mod row_parser;

pub use dialect::{Continuation, DescriptionCleanup, Dialect, DialectSpec, IncompletePolicy};
pub use dialects::{BUILTIN, Registry};
pub use engine::{
    BankHint, PageInput, PageOutcome, ParseOptions, StatementOutcome, StatementParser,
    StatementState, split_document,
};
pub use layout::{DEFAULT_Y_TOLERANCE, PositionedWord, group_words};
pub use recognizer::{HEADER_LINES, header_of, recognize};
