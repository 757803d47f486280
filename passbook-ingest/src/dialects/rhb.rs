//! RHB Bank statements.
//!
//!   07Mar  CDTCASHDEPOSIT            0000004321    1,000.00    6,000.00
//!
//! The date is a glued day+month token. The text extractor also tends to
//! glue description words together, so descriptions go through token
//! repair (`CDTCASHDEPOSIT` -> `CDT CASH DEPOSIT`).

use passbook_core::{KeywordHints, MarkerKind};

use crate::dialect::{Continuation, DescriptionCleanup, DialectSpec, IncompletePolicy};

/// Words the extractor is known to glue together.
pub const KNOWN_TOKENS: &[&str] = &[
    "CDT",
    "CASH",
    "DEPOSIT",
    "ANNUAL",
    "FEES",
    "DUITNOW",
    "QR",
    "P2P",
    "CR",
    "DR",
    "RPP",
    "INWARD",
    "INST",
    "TRF",
    "MBK",
    "INSTANT",
    "MYDEBIT",
    "FUND",
    "MB",
    "ATM",
    "WITHDRAWAL",
    "PAYMENT",
    "TRANSFER",
];

pub const SPEC: DialectSpec = DialectSpec {
    id: "rhb",
    name: "RHB Bank",
    signatures: &["RHB"],
    ignore: &[
        r"^RHB BANK",
        r"^RHB ISLAMIC",
        r"^DATE\s+DESCRIPTION",
        r"^TARIKH\s+DISKRIPSI",
        r"^ACCOUNT ACTIVITY",
        r"^AKTIVITI AKAUN",
        r"^PAGE\s+\d+",
        r"^TOTAL COUNT",
        r"^TOTAL (?:DEBIT|CREDIT)",
        r"^MEMBER OF PIDM",
        r"^STATEMENT PERIOD",
    ],
    row_start: r"^\d{1,2}[A-Z]{3}\s",
    tail: r"[\d,]*\d\.\d{2}\s+[(-]?[\d,]*\d\.\d{2}[)-]?",
    rows: &[concat!(
        r"^(?P<day>\d{1,2})(?P<mon>[A-Z]{3})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?:(?P<ref>\d{6,12})\s+)?",
        r"(?P<amount>[\d,]*\d\.\d{2})\s+",
        r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
    )],
    markers: &[
        (
            MarkerKind::Opening,
            r"^(?:\d{1,2}[A-Z]{3}\s+)?B/F\s+BALANCE\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
        (
            MarkerKind::Closing,
            r"^(?:\d{1,2}[A-Z]{3}\s+)?C/F\s+BALANCE\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
    ],
    continuation: Continuation::BeforeTail,
    incomplete: IncompletePolicy::Discard,
    cleanup: DescriptionCleanup::SplitGlued(KNOWN_TOKENS),
    hints: KeywordHints {
        inbound: &["CR", "CDT", "DEPOSIT", "INWARD"],
        outbound: &[
            "DR",
            "ANNUAL FEES",
            "FEES",
            "WITHDRAWAL",
            "PAYMENT",
            "MYDEBIT",
            "ATM",
        ],
    },
};
