//! Built-in bank dialects, one module per layout.

pub mod bank_islam;
pub mod cimb;
pub mod maybank;
pub mod public_bank;
pub mod rhb;

use passbook_core::Result;

use crate::dialect::{Dialect, DialectSpec};

/// Detection and trial-parse priority. Earlier entries win ties.
pub const BUILTIN: &[&DialectSpec] = &[
    &cimb::SPEC,
    &maybank::SPEC,
    &public_bank::SPEC,
    &rhb::SPEC,
    &bank_islam::SPEC,
];

/// Compiled dialects in priority order.
#[derive(Debug)]
pub struct Registry {
    dialects: Vec<Dialect>,
}

impl Registry {
    pub fn builtin() -> Result<Self> {
        Self::from_specs(BUILTIN)
    }

    pub fn from_specs(specs: &[&'static DialectSpec]) -> Result<Self> {
        let dialects = specs
            .iter()
            .map(|&spec| Dialect::compile(spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dialects })
    }

    /// Look up by id, ignoring case.
    pub fn get(&self, id: &str) -> Option<&Dialect> {
        self.dialects
            .iter()
            .find(|d| d.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dialect> {
        self.dialects.iter()
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
