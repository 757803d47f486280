//! Bank Islam statements: separate debit and credit columns, with `-` in
//! the unused one.
//!
//!   13/03/2025 10:22:11  PROFIT PAID      -        12.50     112.50

use passbook_core::{KeywordHints, MarkerKind};

use crate::dialect::{Continuation, DescriptionCleanup, DialectSpec, IncompletePolicy};

pub const SPEC: DialectSpec = DialectSpec {
    id: "bank_islam",
    name: "Bank Islam",
    signatures: &["BANK ISLAM"],
    ignore: &[
        r"^BANK ISLAM",
        r"^TRANSACTION DATE",
        r"^TARIKH TRANSAKSI",
        r"^DATE\s+TIME",
        r"^STATEMENT OF ACCOUNT",
        r"^PENYATA AKAUN",
        r"^PAGE\s+\d+",
        r"^TOTAL\b",
        r"^JUMLAH\b",
        r"PIDM",
    ],
    row_start: r"^\d{1,2}/\d{1,2}/\d{4}\s",
    tail: r"(?:[\d,]*\d\.\d{2}|-)\s+(?:[\d,]*\d\.\d{2}|-)\s+[(-]?[\d,]*\d\.\d{2}[)-]?",
    rows: &[concat!(
        r"^(?P<day>\d{1,2})/(?P<mon>\d{1,2})/(?P<year>\d{4})\s+",
        r"(?:\d{2}:\d{2}:\d{2}\s+)?",
        r"(?P<desc>.+?)\s+",
        r"(?P<debit>[\d,]*\d\.\d{2}|-)\s+",
        r"(?P<credit>[\d,]*\d\.\d{2}|-)\s+",
        r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
    )],
    markers: &[
        (
            MarkerKind::Opening,
            r"^(?:OPENING|BEGINNING) BALANCE\s*:?\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
        (
            MarkerKind::Closing,
            r"^(?:CLOSING|ENDING) BALANCE\s*:?\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
    ],
    continuation: Continuation::BeforeTail,
    incomplete: IncompletePolicy::Discard,
    cleanup: DescriptionCleanup::Collapse,
    hints: KeywordHints {
        inbound: &["PROFIT PAID", "HIBAH", "DEPOSIT", "INWARD", "CREDIT", "TRANSFER FROM"],
        outbound: &["WITHDRAWAL", "PAYMENT", "CHARGE", "FEE", "DEBIT", "TRANSFER TO"],
    },
};
