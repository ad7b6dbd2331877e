//! Metrics accumulated during lexing.
//!
//! These feed the `.stats` sidecar and the statistics block of the JSON
//! artifacts: source metrics, a per-kind token distribution, the reserved
//! words actually used, and every `#`-variable lexeme seen.

use std::collections::{BTreeMap, BTreeSet};

use crate::token::TokenKind;

/// Lexical statistics for one source file.
#[derive(Clone, Debug, Default)]
pub struct LexStats {
    /// Total source lines (a trailing newline counts a final empty line).
    pub total_lines: usize,
    /// Total characters, newlines excluded.
    pub total_chars: usize,
    /// Token count per kind name, EOF included.
    pub tokens_by_kind: BTreeMap<&'static str, usize>,
    /// Reserved words that appeared in the source.
    pub reserved_used: BTreeSet<String>,
    /// Every variable lexeme seen, `#` prefix included.
    pub variables_seen: BTreeSet<String>,
}

impl LexStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one token of the given kind.
    pub fn record_token(&mut self, kind: TokenKind) {
        *self.tokens_by_kind.entry(kind.name()).or_insert(0) += 1;
    }

    /// Records a reserved word occurrence.
    pub fn record_reserved(&mut self, word: &str) {
        self.reserved_used.insert(word.to_string());
    }

    /// Records a variable lexeme.
    pub fn record_variable(&mut self, lexeme: &str) {
        self.variables_seen.insert(lexeme.to_string());
    }
}
