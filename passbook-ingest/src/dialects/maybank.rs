//! Maybank (Malayan Banking) statements.
//!
//! Two print styles share one dialect:
//!   01 Apr 2025  TRANSFER FR A/C        1,000.00 +   5,922.00     (MBB)
//!   01/04        CASH WITHDRAWAL          78.00-     4,922.00     (MTASB)
//! The amount carries an explicit `+`/`-`; payee and reference details are
//! printed on the lines below.

use passbook_core::{KeywordHints, MarkerKind};

use crate::dialect::{Continuation, DescriptionCleanup, DialectSpec, IncompletePolicy};

pub const SPEC: DialectSpec = DialectSpec {
    id: "maybank",
    name: "Maybank",
    signatures: &["MAYBANK", "MALAYAN BANKING"],
    ignore: &[
        r"^ENTRY DATE",
        r"^TARIKH MASUK",
        r"^VALUE DATE",
        r"^TRANSACTION DESCRIPTION",
        r"^MALAYAN BANKING",
        r"^STATEMENT DATE",
        r"^TARIKH PENYATA",
        r"^ACCOUNT NUMBER",
        r"^NOMBOR AKAUN",
        r"^PAGE\s*:?\s*\d+",
        r"^MUKA\s*/?\s*SURAT",
        r"^TOTAL (?:DEBIT|CREDIT)",
        r"^\(RM\)",
        r"^PERHATIAN",
        r"^PROTECTED BY PIDM",
        r"^DILINDUNGI OLEH PIDM",
    ],
    row_start: r"^(?:\d{2}/\d{2}(?:/\d{4})?\s|\d{2}\s+[A-Z]{3}\s+\d{4}\s)",
    tail: r"[\d,]*\d\.\d{2}\s*[+-]\s+[(-]?[\d,]*\d\.\d{2}[)-]?",
    rows: &[
        concat!(
            r"^(?P<day>\d{2})\s+(?P<mon>[A-Z]{3})\s+(?P<year>\d{4})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>[\d,]*\d\.\d{2})\s*(?P<sign>[+-])\s+",
            r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
        ),
        concat!(
            r"^(?P<day>\d{2})/(?P<mon>\d{2})(?:/(?P<year>\d{4}))?\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>[\d,]*\d\.\d{2})\s*(?P<sign>[+-])\s+",
            r"(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$"
        ),
    ],
    markers: &[
        (
            MarkerKind::Opening,
            r"^(?:\d{2}/\d{2}\s+)?(?:BEGINNING|OPENING) BALANCE\s*:?\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
        (
            MarkerKind::Closing,
            r"^(?:\d{2}/\d{2}\s+)?(?:ENDING|CLOSING) BALANCE\s*:?\s+(?P<balance>[(-]?[\d,]*\d\.\d{2}[)-]?)$",
        ),
    ],
    continuation: Continuation::AfterTail,
    incomplete: IncompletePolicy::Discard,
    cleanup: DescriptionCleanup::Collapse,
    hints: KeywordHints {
        inbound: &[
            "CR",
            "CREDIT",
            "DEPOSIT",
            "TRANSFER FR",
            "TRANSFER FROM",
            "INWARD",
            "PROFIT PAID",
            "HIBAH PAID",
            "SALARY",
        ],
        outbound: &[
            "DR",
            "DEBIT",
            "CHG",
            "CHARGE",
            "TRANSFER TO",
            "WITHDRAWAL",
            "PAYMENT",
            "FPX",
            "MYDEBIT",
        ],
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::testing::parse_page;
    use chrono::NaiveDate;
    use passbook_core::{Direction, YearContext};
    use rust_decimal_macros::dec;

    #[test]
    fn test_mtasb_rows_with_detail_lines() {
        let text = "
MALAYAN BANKING BERHAD (3813-K)
ENTRY DATE   TRANSACTION DESCRIPTION   TRANSACTION AMOUNT   STATEMENT BALANCE
BEGINNING BALANCE 5,000.00
01/04 CASH WITHDRAWAL 78.00- 4,922.00
      ATM 12345 KL SENTRAL
02/04 TRANSFER FR A/C 1,000.00+ 5,922.00
      JOHN DOE*
ENDING BALANCE : 5,922.00
";
        let page = parse_page(&SPEC, text, YearContext::with_default(2025));
        assert!(page.diagnostics.is_empty(), "{:?}", page.diagnostics);
        assert_eq!(page.transactions.len(), 2);

        let first = &page.transactions[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(first.description, "CASH WITHDRAWAL ATM 12345 KL SENTRAL");
        assert_eq!(first.debit, dec!(78.00));
        assert_eq!(first.balance, dec!(4922.00));

        let second = &page.transactions[1];
        assert_eq!(second.description, "TRANSFER FR A/C JOHN DOE*");
        assert_eq!(second.credit, dec!(1000.00));
    }

    #[test]
    fn test_mbb_row_uses_printed_sign_without_prior_balance() {
        let text = "\
03 Apr 2025 FPX PAYMENT TNB 120.00 - 880.00
            REF 99887766
";
        let page = parse_page(&SPEC, text, YearContext::default());
        assert_eq!(page.transactions.len(), 1);
        let t = &page.transactions[0];
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
        assert_eq!(t.direction(), Direction::Debit);
        assert_eq!(t.debit, dec!(120.00));
        assert_eq!(t.description, "FPX PAYMENT TNB REF 99887766");
        assert!(!t.needs_review);
    }
}
