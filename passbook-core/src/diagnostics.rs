//! Row- and page-local skip reasons. None of these stop a run.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No row grammar matched; row dropped.
    UnrecognizedRow,
    /// An amount or balance token had the wrong shape; row dropped.
    MalformedNumber,
    /// No amount/balance tail before the next row-start or end of page; row dropped.
    IncompleteRow,
    /// Emitted with the default direction and flagged for review.
    AmbiguousClassification,
    /// No signature phrase matched; the page was trial-parsed.
    DialectDetectionFailure,
    /// Parsed, but failed assembly checks; row dropped.
    InvalidRecord,
    /// Day/month date with no year available; row dropped.
    MissingYear,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnrecognizedRow => "unrecognized_row",
            Self::MalformedNumber => "malformed_number",
            Self::IncompleteRow => "incomplete_row",
            Self::AmbiguousClassification => "ambiguous_classification",
            Self::DialectDetectionFailure => "dialect_detection_failure",
            Self::InvalidRecord => "invalid_record",
            Self::MissingYear => "missing_year",
        }
    }

    /// Whether the affected row was kept in the output.
    pub fn row_kept(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousClassification | Self::DialectDetectionFailure
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub page: u32,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, page: u32, detail: impl Into<String>) -> Self {
        Self {
            kind,
            page,
            detail: detail.into(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}: {}", self.page, self.kind.as_str(), self.detail)?;
        if let Some(text) = &self.text {
            write!(f, " [{text}]")?;
        }
        Ok(())
    }
}

/// Count diagnostics of one kind.
pub fn count(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> usize {
    diagnostics.iter().filter(|d| d.kind == kind).count()
}
