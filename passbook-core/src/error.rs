use thiserror::Error;

/// Hard errors only. Data-quality problems (bad rows, unknown layouts) are
/// reported as [`crate::Diagnostic`] values and never surface here.
#[derive(Error, Debug)]
pub enum PassbookError {
    #[error("no statement text supplied")]
    NoText,

    #[error("page numbers start at 1 (got {0})")]
    InvalidPage(u32),

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("invalid grammar in dialect {dialect}: {source}")]
    Grammar {
        dialect: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("invalid statement period '{0}' (expected YYYY-MM)")]
    InvalidPeriod(String),

    #[error("invalid tolerance '{0}'")]
    InvalidTolerance(String),
}

pub type Result<T> = std::result::Result<T, PassbookError>;
