//! Public Bank (PBB) statements.
//!
//! Rows print day/month only. Same-day follow-up rows usually drop the
//! date and start with a transaction code instead (`DEP-`, `DR-`, `CHQ`),
//! and long descriptions wrap onto lines above the figures:
//!
//!   02/05 DEP-ECP 125453                 1,411.99     2,780.16
//!         TSFR FUND
//!         MBB CT- ALI BIN ABU 000123        20.09     2,800.25
//!
//! Some extractions put the figures right after the date and the
//! description after them (`02/05 1,411.99 2,780.16 DEP-ECP`).

use passbook_core::{KeywordHints, MarkerKind};

use crate::dialect::{Continuation, DescriptionCleanup, DialectSpec, IncompletePolicy};

pub const SPEC: DialectSpec = DialectSpec {
    id: "public_bank",
    name: "Public Bank (PBB)",
    signatures: &["PUBLIC BANK", "PBB"],
    ignore: &[
        r"^TARIKH\b",
        r"^DATE\s+TRANSACTION",
        r"^DATE\s+DESCRIPTION",
        r"^PUBLIC BANK",
        r"^PUBLIC ISLAMIC BANK",
        r"^STATEMENT OF ACCOUNT",
        r"^PENYATA AKAUN",
        r"^PAGE\b",
        r"^MUKA SURAT",
        r"^TOTAL\b",
        r"^JUMLAH\b",
        r"PIDM",
        r"^ACCOUNT NO",
        r"^NO\. AKAUN",
        r"^STATEMENT DATE",
        r"^DEBIT\s+CREDIT\s+BALANCE",
    ],
    row_start: r"^(?:\d{2}/\d{2}\s|DEP-|DR-|CR-|CHQ\s|TSFR\s|TRSF\s)",
    tail: r"[\d,]*\d\.\d{2}\s+[(-]?[\d,]*\d\.\d{2}[)-]?",
    rows: &[
        concat!(
            r"^(?P<day>\d{2})/(?P<mon>\d{2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?:(?P<ref>\d{6,12})\s+)?",
            r"(?P<amount>[\d,]*\d\.\d{2})\s+",
            r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
        ),
        concat!(
            r"^(?P<desc>(?:DEP-|DR-|CR-|CHQ|TSFR|TRSF).*?)\s+",
            r"(?:(?P<ref>\d{6,12})\s+)?",
            r"(?P<amount>[\d,]*\d\.\d{2})\s+",
            r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
        ),
        concat!(
            r"^(?P<day>\d{2})/(?P<mon>\d{2})\s+",
            r"(?P<amount>[\d,]*\d\.\d{2})\s+",
            r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)\s+",
            r"(?P<desc>.+)$"
        ),
    ],
    markers: &[
        (
            MarkerKind::Opening,
            r"^(?:\d{2}/\d{2}\s+)?BALANCE\s+B/F\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
        (
            MarkerKind::Closing,
            r"^(?:\d{2}/\d{2}\s+)?BALANCE\s+C/F\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
    ],
    continuation: Continuation::BeforeTail,
    incomplete: IncompletePolicy::Salvage,
    cleanup: DescriptionCleanup::Collapse,
    hints: KeywordHints {
        inbound: &["DEP-", "CR-", "CREDIT", "DEPOSIT", "INWARD", "PROFIT"],
        outbound: &["DR-", "CHRG", "PYMT", "CHQ", "WITHDRAWAL", "DEBIT", "FEE"],
    },
};
