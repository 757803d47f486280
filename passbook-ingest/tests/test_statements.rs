use passbook_core::{DiagnosticKind, Direction, YearContext};
use passbook_ingest::{ParseOptions, StatementParser, split_document};
use rust_decimal_macros::dec;
use std::thread;

const PBB_STATEMENT: &str = "\
PUBLIC BANK BERHAD
STATEMENT OF ACCOUNT
Statement Date 31/05/2025
DATE TRANSACTION DEBIT CREDIT BALANCE
01/05 Balance B/F 100.00
02/05 DEP-ECP 125453 50.00 150.00
31/05 Balance C/F 150.00
\x0c
PUBLIC BANK BERHAD
Page 2
02/06 MISC ADJ 30.00 120.00
03/06 TSFR FUND
      MBB CT- ALI
      BIN ABU 000123 20.00 140.00
04/06 ORPHAN LINE
05/06 SVC CHRG 1.00 139.00
\x0c";

fn parser() -> StatementParser {
    StatementParser::new(ParseOptions::default()).unwrap()
}

#[test]
fn test_state_threads_across_pages() {
    let pages = split_document("pbb_may.txt", PBB_STATEMENT);
    assert_eq!(pages.len(), 2);

    let out = parser().parse_statement(&pages).unwrap();
    assert_eq!(out.dialect, Some("public_bank"));
    assert_eq!(out.opening_balance, Some(dec!(100.00)));
    assert_eq!(out.closing_balance, Some(dec!(150.00)));

    let misc = out
        .transactions
        .iter()
        .find(|t| t.description == "MISC ADJ")
        .unwrap();
    // only the carried balance can tell this one is a debit
    assert_eq!(misc.direction(), Direction::Debit);
    assert_eq!(misc.page, 2);
    assert_eq!(misc.source, "pbb_may.txt");
    assert!(!misc.needs_review);
    assert_eq!(misc.date.to_string(), "2025-06-02");
}

#[test]
fn test_boundary_rows() {
    let pages = split_document("pbb_may.txt", PBB_STATEMENT);
    let out = parser().parse_statement(&pages).unwrap();

    let descriptions: Vec<_> = out.transactions.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(
        descriptions,
        ["DEP-ECP", "MISC ADJ", "TSFR FUND MBB CT- ALI BIN ABU", "SVC CHRG"]
    );
    assert_eq!(out.count(DiagnosticKind::IncompleteRow), 1);
    let dropped = out
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::IncompleteRow)
        .unwrap();
    assert_eq!(dropped.page, 2);
    assert_eq!(dropped.text.as_deref(), Some("04/06 ORPHAN LINE"));
    assert_eq!(out.transactions[3].debit, dec!(1.00));
}

#[test]
fn test_statements_do_not_share_balances() {
    let first = "\
PUBLIC BANK BERHAD
01/05 Balance B/F 100.00
02/05 SVC CHRG 30.00 70.00
";
    // With the first statement's 70.00 leaking in, this would read as a debit.
    let second = "\
PUBLIC BANK BERHAD
05/05 MISC 30.00 40.00
";
    let parser = parser();
    let year = YearContext::with_default(2025);

    let (a, b) = thread::scope(|s| {
        let a = s.spawn(|| {
            parser
                .parse_statement_with(year, &split_document("a.txt", first))
                .unwrap()
        });
        let b = s.spawn(|| {
            parser
                .parse_statement_with(year, &split_document("b.txt", second))
                .unwrap()
        });
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(a.transactions[0].direction(), Direction::Debit);
    assert_eq!(b.transactions[0].direction(), Direction::Credit);
    assert!(b.transactions[0].needs_review);
    assert_eq!(b.transactions[0].source, "b.txt");
}

#[test]
fn test_after_tail_statement() {
    let text = "\
CIMB BANK BERHAD (13491-P)
Statement of Account
OPENING BALANCE 5,000.00
03/04/2025  DUITNOW TO ACCOUNT   782134   150.00   4,850.00
            SITI AMINAH
            Fund transfer
05/04/2025  IBG CREDIT   3,200.00   8,050.00
            ACME SDN BHD
CLOSING BALANCE / BAKI PENUTUP 8,050.00
";
    let out = parser()
        .parse_statement(&split_document("cimb.txt", text))
        .unwrap();
    assert_eq!(out.dialect, Some("cimb"));
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
    assert_eq!(
        out.transactions[0].description,
        "DUITNOW TO ACCOUNT SITI AMINAH Fund transfer"
    );
    assert_eq!(out.transactions[1].description, "IBG CREDIT ACME SDN BHD");
    assert_eq!(out.net_movement(), dec!(3050.00));
    assert_eq!(out.closing_balance, Some(dec!(8050.00)));
}

#[test]
fn test_outcome_serializes() {
    let out = parser()
        .parse_statement(&split_document("pbb_may.txt", PBB_STATEMENT))
        .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["dialect"], "public_bank");
    assert_eq!(json["opening_balance"], "100.00");
    assert_eq!(json["transactions"][0]["credit"], "50.00");
    assert_eq!(json["transactions"][0]["date"], "2025-05-02");
    assert_eq!(json["diagnostics"][0]["kind"], "incomplete_row");
}
