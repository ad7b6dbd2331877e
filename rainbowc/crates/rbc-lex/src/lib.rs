//! rbc-lex - Lexical analyzer for the Rainbow language.
//!
//! Transforms source text into a token stream plus lexical diagnostics and
//! statistics. The lexer always terminates and consumes every character:
//! constructs it cannot tokenize are reported and skipped.
//!
//! # Example
//!
//! ```
//! use rbc_lex::{lex, TokenKind};
//! use rbc_util::{Handler, Stage};
//!
//! let handler = Handler::new(Stage::Lexical);
//! let (tokens, stats) = lex("RAINBOW.\nmostrar(\"oi\").\n", &handler);
//!
//! assert!(!handler.has_errors());
//! assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::Rainbow));
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
//! assert_eq!(stats.total_lines, 3);
//! ```

pub mod cursor;
pub mod lexer;
pub mod stats;
pub mod token;

mod edge_cases;

pub use lexer::Lexer;
pub use stats::LexStats;
pub use token::{Token, TokenKind};

use rbc_util::Handler;

/// Tokenizes `source`, reporting lexical errors into `handler`.
///
/// The returned stream always ends with the EOF sentinel. Unclosed braces
/// are reported once the whole source has been consumed, one error per
/// unmatched `{`.
pub fn lex(source: &str, handler: &Handler) -> (Vec<Token>, LexStats) {
    let mut lexer = Lexer::new(source, handler);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    lexer.finish();

    let mut stats = lexer.into_stats();
    stats.total_lines = source.split('\n').count();
    stats.total_chars = source.chars().filter(|&c| c != '\n').count();

    (tokens, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbc_util::Stage;

    #[test]
    fn test_stats_metrics() {
        let handler = Handler::new(Stage::Lexical);
        let (_, stats) = lex("RAINBOW.\n#a recebe 1.\n", &handler);
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.total_chars, 20);
        assert!(stats.reserved_used.contains("RAINBOW"));
        assert!(stats.reserved_used.contains("recebe"));
        assert!(stats.variables_seen.contains("#a"));
    }

    #[test]
    fn test_stats_count_by_kind() {
        let handler = Handler::new(Stage::Lexical);
        let (_, stats) = lex("1 2 3 mostrar", &handler);
        assert_eq!(stats.tokens_by_kind.get("NUMERO"), Some(&3));
        assert_eq!(stats.tokens_by_kind.get("MOSTRAR"), Some(&1));
        assert_eq!(stats.tokens_by_kind.get("EOF"), Some(&1));
    }

    #[test]
    fn test_empty_source_yields_only_eof() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, stats) = lex("", &handler);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!(stats.total_lines, 1);
        assert_eq!(stats.total_chars, 0);
    }

    #[test]
    fn test_every_character_consumed() {
        // A soup of valid and invalid constructs must still drain.
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = lex("@#$ \"aberta\n123abc #_ }{ 2.x", &handler);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert!(handler.has_errors());
    }
}
