use chrono::NaiveDate;
use passbook_core::{DiagnosticKind, Direction, YearContext};
use passbook_ingest::{BankHint, PageInput, PageOutcome, ParseOptions, StatementParser};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn parser(bank: &str) -> StatementParser {
    StatementParser::new(ParseOptions {
        bank: bank.parse().unwrap(),
        year: YearContext::with_default(2025),
        ..ParseOptions::default()
    })
    .unwrap()
}

fn one_page(parser: &StatementParser, text: &str) -> PageOutcome {
    let mut state = parser.begin();
    parser
        .parse_page(&mut state, &PageInput::from_text(1, "stmt.txt", text))
        .unwrap()
}

#[test]
fn test_scenario_a_first_row_uses_keywords() {
    let page = one_page(&parser("public_bank"), "02/05 DEP-ECP 125453 1,411.99 2,780.16\n");
    assert_eq!(page.transactions.len(), 1);
    let t = &page.transactions[0];
    assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
    assert_eq!(t.credit, dec!(1411.99));
    assert_eq!(t.debit, dec!(0.00));
    assert_eq!(t.balance, dec!(2780.16));
    assert!(!t.needs_review);
}

#[test]
fn test_scenario_b_and_c_balance_delta() {
    let text = "\
02/05 DEP-ECP 125453 1,411.99 2,780.16
03/05 SOMETHING 20.09 2,800.25
";
    let page = one_page(&parser("public_bank"), text);
    assert_eq!(page.transactions[1].direction(), Direction::Credit);
    assert_eq!(page.transactions[1].credit, dec!(20.09));

    let text = "\
01/05 Balance B/F 100.00
04/05 DEPOSIT REVERSAL 30.00 70.00
";
    let page = one_page(&parser("public_bank"), text);
    assert_eq!(page.transactions.len(), 1);
    assert_eq!(page.transactions[0].direction(), Direction::Debit);
    assert_eq!(page.transactions[0].debit, dec!(30.00));
}

#[test]
fn test_scenario_d_marker_seeds_state_only() {
    let parser = parser("public_bank");
    let mut state = parser.begin();
    let page = parser
        .parse_page(&mut state, &PageInput::from_text(1, "s", "Balance B/F 23,154.70\n"))
        .unwrap();
    assert!(page.transactions.is_empty());
    assert!(page.diagnostics.is_empty());
    assert_eq!(state.balance(), Some(dec!(23154.70)));
    assert_eq!(state.opening_balance(), Some(dec!(23154.70)));
}

#[test]
fn test_scenario_e_unknown_header_trial_parses() {
    let text = "\
ACCOUNT STATEMENT
07Mar CDTCASHDEPOSIT 0000004321 1,000.00 6,000.00
08Mar ATM WITHDRAWAL 200.00 5,800.00
";
    let parser = parser("auto");
    let mut state = parser.begin();
    let page = parser
        .parse_page(&mut state, &PageInput::from_text(1, "s", text))
        .unwrap();
    assert_eq!(page.dialect, Some("rhb"));
    assert_eq!(state.dialect(), Some("rhb"));
    assert_eq!(page.transactions.len(), 2);
    assert_eq!(page.count(DiagnosticKind::DialectDetectionFailure), 1);
    assert_eq!(page.transactions[1].debit, dec!(200.00));

    let page = parser
        .parse_page(&mut state, &PageInput::from_text(2, "s", "09Mar CDT 50.00 5,850.00\n"))
        .unwrap();
    assert_eq!(page.dialect, Some("rhb"));
    assert_eq!(page.count(DiagnosticKind::DialectDetectionFailure), 0);
    assert_eq!(page.transactions[0].credit, dec!(50.00));
}

#[test]
fn test_scenario_e_nothing_matches() {
    let parser = parser("auto");
    let mut state = parser.begin();
    let page = parser
        .parse_page(&mut state, &PageInput::from_text(1, "s", "Dear customer,\nthank you.\n"))
        .unwrap();
    assert!(page.transactions.is_empty());
    assert_eq!(page.dialect, None);
    assert_eq!(state.dialect(), None);
    assert_eq!(page.count(DiagnosticKind::DialectDetectionFailure), 1);
}

#[test]
fn test_losing_trial_does_not_touch_state() {
    let parser = parser("auto");
    let mut state = parser.begin();
    parser
        .parse_page(&mut state, &PageInput::from_text(1, "s", "nothing here\n"))
        .unwrap();
    assert_eq!(state.balance(), None);
    assert_eq!(state.opening_balance(), None);
}

#[test]
fn test_ambiguous_row_is_kept_and_flagged() {
    let text = "\
01/05 Balance B/F 100.00
02/05 MISC ADJ 30.00 105.00
";
    let page = one_page(&parser("public_bank"), text);
    assert_eq!(page.transactions.len(), 1);
    assert!(page.transactions[0].needs_review);
    assert_eq!(page.transactions[0].credit, dec!(30.00));
    assert_eq!(page.count(DiagnosticKind::AmbiguousClassification), 1);
}

#[test]
fn test_sum_matches_balance_movement() {
    let text = "\
PUBLIC BANK BERHAD
01/05 Balance B/F 1,368.17
02/05 DEP-ECP 125453 1,411.99 2,780.16
03/05 TSFR FUND
      MBB CT- ALI BIN ABU 000123 20.09 2,800.25
DR-ECP 45.00 2,755.25
05/05 SVC CHRG 2.00 2,753.25
CHQ 000457 753.25 2,000.00
31/05 Balance C/F 2,000.00
";
    let parser = parser("auto");
    let out = parser
        .parse_statement(&[PageInput::from_text(1, "pbb.txt", text)])
        .unwrap();
    assert_eq!(out.dialect, Some("public_bank"));
    assert_eq!(out.transactions.len(), 5);
    let opening = out.opening_balance.unwrap();
    let closing = out.closing_balance.unwrap();
    assert!((out.net_movement() - (closing - opening)).abs() <= dec!(0.01));

    let mut prev = opening;
    for t in &out.transactions {
        assert!((t.balance - (prev - t.debit + t.credit)).abs() <= dec!(0.01));
        prev = t.balance;
    }
}

#[test]
fn test_round_trip_synthetic_page() {
    // (day, description, signed amount)
    let ledger: [(u32, &str, Decimal); 5] = [
        (2, "DEP-ECP", dec!(1411.99)),
        (3, "TSFR FUND ALI", dec!(20.09)),
        (3, "SVC CHRG", dec!(-2.00)),
        (9, "PYMT TNB", dec!(-1250.50)),
        (12, "CR-IBG SALARY", dec!(3000.00)),
    ];

    let mut balance = dec!(500.00);
    let mut text = format!("01/05 Balance B/F {}\n", money(balance));
    let mut expected = Vec::new();
    for (day, description, amount) in ledger {
        balance += amount;
        text.push_str(&format!(
            "{day:02}/05 {description} {} {}\n",
            money(amount.abs()),
            money(balance)
        ));
        expected.push((day, description, amount, balance));
    }

    let page = one_page(&parser("public_bank"), &text);
    assert!(page.diagnostics.is_empty(), "{:?}", page.diagnostics);
    assert_eq!(page.transactions.len(), expected.len());
    for (t, (day, description, amount, balance)) in page.transactions.iter().zip(expected) {
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2025, 5, day).unwrap());
        assert_eq!(t.description, description);
        assert_eq!(t.net(), amount);
        assert_eq!(t.balance, balance);
    }
}

#[test]
fn test_parsing_is_idempotent() {
    let text = "\
PUBLIC BANK BERHAD
02/05 DEP-ECP 125453 1,411.99 2,780.16
03/05 TSFR FUND
      BROKEN
04/05 MISC 10.00 2,770.16
";
    let parser = parser("auto");
    let first = one_page(&parser, text);
    let second = one_page(&parser, text);
    assert_eq!(first, second);
}

#[test]
fn test_overdraft_balance_is_negative() {
    let text = "\
01/05 Balance B/F 50.00
06/05 CHQ 000456 80.00 30.00-
07/05 DEP-CASH 100.00 70.00
";
    let page = one_page(&parser("public_bank"), text);
    assert_eq!(page.transactions[0].balance, dec!(-30.00));
    assert_eq!(page.transactions[0].debit, dec!(80.00));
    assert_eq!(page.transactions[1].credit, dec!(100.00));
}

/// Two-place string form the statements print, e.g. `1,250.50`.
fn money(value: Decimal) -> String {
    let text = format!("{:.2}", value.abs());
    let (int, frac) = text.split_once('.').unwrap();
    let mut grouped = String::new();
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}.{frac}")
}
