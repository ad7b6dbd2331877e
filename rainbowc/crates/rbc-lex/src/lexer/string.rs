//! String literal lexing.
//!
//! Rainbow strings are double-quoted and must close on the line they open.
//! The token keeps the quoted lexeme exactly as written; unescaping happens
//! at evaluation time.

use crate::token::Token;
use crate::Lexer;

/// Escape characters valid after a backslash inside a string.
pub(crate) const ESCAPES: [char; 6] = ['n', 't', 'r', '\\', '"', '\''];

/// Longest accepted string lexeme, quotes included.
pub(crate) const MAX_STRING_LENGTH: usize = 1000;

impl<'a> Lexer<'a> {
    /// Lexes a string literal starting at the opening quote.
    ///
    /// Returns `None` when the string never closes on its line; the
    /// diagnostic points at the opening quote and no token is emitted.
    pub(crate) fn lex_string(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        self.cursor.advance();

        loop {
            let c = self.cursor.current_char();

            if self.cursor.is_at_end() || c == '\n' {
                self.report_error("String não fechada");
                return None;
            }

            if c == '"' {
                self.cursor.advance();
                break;
            }

            if c == '\\' && self.cursor.peek_char(1) != '\n' && self.cursor.peek_char(1) != '\0' {
                self.cursor.advance();
                let escaped = self.cursor.current_char();
                if !ESCAPES.contains(&escaped) {
                    // The pair stays in the lexeme to aid recovery.
                    self.handler.error(
                        rbc_util::Span::new(self.cursor.line(), self.cursor.column()),
                        format!("Caractere de escape inválido '\\{}'", escaped),
                    );
                }
                self.cursor.advance();
            } else {
                self.cursor.advance();
            }
        }

        let lexeme = self.cursor.slice_from(start);
        if lexeme.chars().count() > MAX_STRING_LENGTH {
            self.report_error(format!(
                "String muito longa (máximo {} caracteres)",
                MAX_STRING_LENGTH
            ));
        }

        Some(self.token(crate::TokenKind::Text, lexeme))
    }
}

#[cfg(test)]
mod tests {
    use crate::token::TokenKind;
    use rbc_util::{Handler, Stage};

    const MAX_LEN: usize = super::MAX_STRING_LENGTH;

    fn lex(source: &str) -> (Vec<crate::Token>, Handler) {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex(source, &handler);
        (tokens, handler)
    }

    #[test]
    fn test_simple_string_keeps_quotes() {
        let (tokens, handler) = lex("\"Olá, mundo!\"");
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(tokens[0].lexeme, "\"Olá, mundo!\"");
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let (tokens, handler) = lex(r#""a\"b""#);
        assert_eq!(tokens[0].lexeme, r#""a\"b""#);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_valid_escapes() {
        let (_, handler) = lex(r#""a\nb\tc\rd\\e\'f""#);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_invalid_escape_reported_token_kept() {
        let (tokens, handler) = lex(r#""a\qb""#);
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert_eq!(
            handler.errors(),
            vec!["Linha: 01 - Coluna: 04 - Erro: Caractere de escape inválido '\\q'"]
        );
    }

    #[test]
    fn test_unterminated_string_no_token() {
        let (tokens, handler) = lex("mostrar(\"hello).\n#a recebe 2.");
        assert_eq!(
            handler.errors(),
            vec!["Linha: 01 - Coluna: 09 - Erro: String não fechada"]
        );
        // Line 2 still tokenizes after the recovery.
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Variable && t.lexeme == "#a"));
    }

    #[test]
    fn test_oversized_string_flagged_but_emitted() {
        let body = "x".repeat(MAX_LEN - 1);
        let (tokens, handler) = lex(&format!("\"{}\"", body));
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert!(handler.errors()[0].contains("String muito longa"));
    }

    #[test]
    fn test_string_at_exact_limit_accepted() {
        let body = "x".repeat(MAX_LEN - 2);
        let (tokens, handler) = lex(&format!("\"{}\"", body));
        assert_eq!(tokens[0].kind, TokenKind::Text);
        assert!(!handler.has_errors());
    }
}
