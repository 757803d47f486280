//! CIMB Bank current/savings account statements.
//!
//! Expected extracted-text rows:
//!   Date        Description                          Ref No      Amount     Balance
//!   03/04/2025  DUITNOW TO ACCOUNT                   782134      150.00     4,850.00
//!               SITI AMINAH
//!               Fund transfer
//!
//! The figures sit on the first line of a transaction; recipient and
//! purpose lines follow below them.

use passbook_core::{KeywordHints, MarkerKind};

use crate::dialect::{Continuation, DescriptionCleanup, DialectSpec, IncompletePolicy};

pub const SPEC: DialectSpec = DialectSpec {
    id: "cimb",
    name: "CIMB Bank",
    signatures: &["CIMB"],
    ignore: &[
        r"^CONTINUE NEXT PAGE",
        r"^You can perform",
        r"^For more information",
        r"^Statement of Account",
        r"^Page / Halaman",
        r"^CIMB BANK",
        r"^CIMB ISLAMIC",
        r"^\(Protected by",
        r"^Date\s+Description",
        r"^Tarikh\s+Diskripsi",
        r"^\(RM\)",
        r"^Account No",
        r"^No\. of (?:Withdrawals|Deposits)",
        r"^Total (?:Withdrawal|Deposit)",
    ],
    row_start: r"^\d{2}/\d{2}/\d{4}\s",
    tail: r"[\d,]*\d\.\d{2}\s+[(-]?[\d,]*\d\.\d{2}[)-]?",
    rows: &[concat!(
        r"^(?P<day>\d{2})/(?P<mon>\d{2})/(?P<year>\d{4})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?:(?P<ref>\d{6,12})\s+)?",
        r"(?P<amount>[\d,]*\d\.\d{2})\s+",
        r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
    )],
    markers: &[
        (
            MarkerKind::Opening,
            r"^OPENING BALANCE\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
        (
            MarkerKind::Closing,
            r"^CLOSING BALANCE(?:\s*/\s*BAKI PENUTUP)?\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
    ],
    continuation: Continuation::AfterTail,
    incomplete: IncompletePolicy::Discard,
    cleanup: DescriptionCleanup::Collapse,
    hints: KeywordHints {
        inbound: &[
            "CR ADVICE",
            "DEPOSIT",
            "INCOMING",
            "TRANSFER FROM",
            "TR FROM",
            "REMITTANCE CR",
            "INTEREST",
            "SALARY",
        ],
        outbound: &[
            "DR ADVICE",
            "TRANSFER TO",
            "TR TO",
            "DUITNOW TO",
            "DEBIT",
            "CHARGE",
            "FEE",
            "PAYMENT",
            "WITHDRAWAL",
            "JOMPAY",
        ],
    },
};
