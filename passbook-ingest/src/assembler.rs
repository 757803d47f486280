//! Final validation of a classified record.

use passbook_core::{Classification, Diagnostic, DiagnosticKind, RawRecord, Transaction};

pub fn assemble(
    record: RawRecord,
    classification: &Classification,
    page: u32,
    source: &str,
) -> Result<Transaction, Diagnostic> {
    let reject = |detail: &str| {
        Diagnostic::new(DiagnosticKind::InvalidRecord, page, detail)
            .with_text(format!("{} {}", record.raw_date, record.description).trim().to_string())
    };

    let description = record.description.trim();
    if description.is_empty() {
        return Err(reject("empty description"));
    }

    // Two-column layouts print both columns; only one may carry a value.
    if record.amounts.iter().filter(|a| !a.is_zero()).count() > 1 {
        return Err(reject("both debit and credit set"));
    }

    let (debit, credit) = classification.split();
    if debit.is_sign_negative() || credit.is_sign_negative() {
        return Err(reject("negative amount"));
    }
    if debit.is_zero() && credit.is_zero() {
        return Err(reject("zero amount"));
    }
    Ok(Transaction {
        date: record.date,
        description: description.to_string(),
        debit,
        credit,
        balance: record.balance,
        page,
        source: source.to_string(),
        reference: record.reference,
        needs_review: classification.is_ambiguous(),
    })
}
