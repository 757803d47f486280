//! Balance-driven debit/credit classification.
//!
//! Flattened statement text loses the column a figure was printed in, so
//! the amount alone does not say whether money went in or out. The running
//! balance printed on every row does: if the balance moved up by the
//! amount it was a credit, down by the amount a debit. Keyword hints and
//! the row's own sign markers only decide when that test is unavailable
//! or fails.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Direction, RawRecord};

/// 0.01 currency units.
pub const DEFAULT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Last known running balance of the statement being processed.
///
/// Create one per statement and feed pages through it in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationState {
    balance: Option<Decimal>,
}

impl ReconciliationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(balance: Decimal) -> Self {
        Self {
            balance: Some(balance),
        }
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.balance
    }

    pub fn observe(&mut self, balance: Decimal) {
        self.balance = Some(balance);
    }

    pub fn reset(&mut self) {
        self.balance = None;
    }
}

/// Phrases that strongly suggest money in (`inbound`) or out (`outbound`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordHints {
    pub inbound: &'static [&'static str],
    pub outbound: &'static [&'static str],
}

impl KeywordHints {
    /// `None` when neither side or both sides match.
    pub fn direction(&self, description: &str) -> Option<Direction> {
        let inbound = self
            .inbound
            .iter()
            .any(|p| contains_phrase(description, p));
        let outbound = self
            .outbound
            .iter()
            .any(|p| contains_phrase(description, p));
        match (inbound, outbound) {
            (true, false) => Some(Direction::Credit),
            (false, true) => Some(Direction::Debit),
            _ => None,
        }
    }
}

/// Case-insensitive phrase search that respects word boundaries: the
/// phrase must start at a word boundary, and if it ends in a letter or
/// digit it must end at one too (`CR` matches `P2P CR` but not `CREDIT`;
/// `DEP-` matches `DEP-ECP`).
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let needle = phrase.trim().to_ascii_uppercase();
    if needle.is_empty() {
        return false;
    }
    let hay = haystack.to_ascii_uppercase();
    let bytes = hay.as_bytes();
    let open_end = needle
        .as_bytes()
        .last()
        .is_some_and(|b| b.is_ascii_alphanumeric());

    hay.match_indices(&needle).any(|(start, _)| {
        let end = start + needle.len();
        let starts_clean = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let ends_clean = !open_end || end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        starts_clean && ends_clean
    })
}

/// Which rule decided a row's direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    BalanceDelta,
    Stated,
    Keyword,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub direction: Direction,
    pub amount: Decimal,
    pub basis: Basis,
}

impl Classification {
    pub fn is_ambiguous(&self) -> bool {
        self.basis == Basis::Default
    }

    /// `(debit, credit)`, with the unused side as a two-place zero.
    pub fn split(&self) -> (Decimal, Decimal) {
        let zero = Decimal::new(0, 2);
        match self.direction {
            Direction::Debit => (self.amount, zero),
            Direction::Credit => (zero, self.amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    epsilon: Decimal,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl Classifier {
    pub fn new(epsilon: Decimal) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    pub fn epsilon(&self) -> Decimal {
        self.epsilon
    }

    /// Classify one record against the running balance, then advance the
    /// state to the record's balance whichever rule decided.
    pub fn classify(
        &self,
        state: &mut ReconciliationState,
        record: &RawRecord,
        hints: &KeywordHints,
    ) -> Classification {
        let amount = record.amount();
        let by_delta = state
            .balance()
            .and_then(|prev| self.delta_direction(prev, record.balance, amount));

        let (direction, basis) = match by_delta {
            Some(direction) => (direction, Basis::BalanceDelta),
            None => {
                if let Some(prev) = state.balance() {
                    debug!(
                        "balance {} -> {} does not move by {} ({})",
                        prev, record.balance, amount, record.description
                    );
                }
                match (record.stated, hints.direction(&record.description)) {
                    (Some(direction), _) => (direction, Basis::Stated),
                    (None, Some(direction)) => (direction, Basis::Keyword),
                    (None, None) => {
                        warn!(
                            "no direction evidence for '{}' ({}), defaulting to credit",
                            record.description, amount
                        );
                        (Direction::Credit, Basis::Default)
                    }
                }
            }
        };

        state.observe(record.balance);

        Classification {
            direction,
            amount,
            basis,
        }
    }

    fn delta_direction(&self, prev: Decimal, balance: Decimal, amount: Decimal) -> Option<Direction> {
        let delta = balance - prev;
        if (delta - amount).abs() <= self.epsilon {
            Some(Direction::Credit)
        } else if (delta + amount).abs() <= self.epsilon {
            Some(Direction::Debit)
        } else {
            None
        }
    }
}
