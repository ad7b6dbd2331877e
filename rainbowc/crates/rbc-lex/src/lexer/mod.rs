//! Core lexer implementation.
//!
//! Single pass over the source, dispatching on the current character.
//! Recognition order matters and follows the language rules: strings, then
//! numbers (including a leading `-` where it cannot be the subtraction
//! operator), then variables, two-character operators before
//! single-character ones, then reserved words.
//!
//! The lexer never fails catastrophically. Constructs that produce no token
//! (an unterminated string, a malformed variable, an unknown word) record a
//! diagnostic and scanning continues with the next character.

mod number;
mod string;
mod word;

use rbc_util::{Handler, Span};

use crate::cursor::Cursor;
use crate::stats::LexStats;
use crate::token::{Token, TokenKind};

/// Lexer for Rainbow source text.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) stats: LexStats,

    /// Open-brace positions awaiting their `}`.
    open_braces: Vec<Span>,

    /// Kind of the previously emitted token, for `-` disambiguation.
    prev_kind: Option<TokenKind>,

    /// Position of the first character of the token being lexed.
    pub(crate) token_line: u32,
    pub(crate) token_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source` reporting into `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            stats: LexStats::new(),
            open_braces: Vec::new(),
            prev_kind: None,
            token_line: 1,
            token_column: 1,
        }
    }

    /// Returns the next token, or the EOF sentinel at end of input.
    ///
    /// Lexical errors that swallow text without producing a token are
    /// reported through the handler and scanning resumes, so a caller
    /// looping until EOF consumes the entire source.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_trivia();

            self.token_line = self.cursor.line();
            self.token_column = self.cursor.column();

            if self.cursor.is_at_end() {
                let token = Token::new(TokenKind::Eof, "", self.token_line, self.token_column);
                self.stats.record_token(token.kind);
                return token;
            }

            let c = self.cursor.current_char();
            let produced = match c {
                '"' => self.lex_string(),
                c if c.is_ascii_digit() => self.lex_number(),
                '-' if self.cursor.peek_char(1).is_ascii_digit() && !self.prev_ends_operand() => {
                    self.lex_number()
                }
                '#' => self.lex_variable(),
                '<' | '>' | '+' | '-' | '*' | '/' | '%' | '(' | ')' | '{' | '}' | '[' | ']'
                | '.' | ',' => self.lex_operator(c),
                c if c.is_alphabetic() => self.lex_word(),
                c => {
                    self.report_error(format!("Símbolo não reconhecido: '{}'", c));
                    self.cursor.advance();
                    None
                }
            };

            if let Some(token) = produced {
                self.stats.record_token(token.kind);
                self.prev_kind = Some(token.kind);
                return token;
            }
        }
    }

    /// Reports one error per brace still open at end of input.
    ///
    /// Call after the EOF token has been produced.
    pub fn finish(&mut self) {
        for span in std::mem::take(&mut self.open_braces) {
            self.handler
                .error(span, "Chave aberta não foi fechada");
        }
    }

    /// Consumes the accumulated statistics.
    pub fn into_stats(self) -> LexStats {
        self.stats
    }

    fn skip_trivia(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c.is_whitespace() {
                self.cursor.advance();
            } else if c == '/' && self.cursor.peek_char(1) == '/' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
            } else {
                break;
            }
        }
    }

    fn lex_operator(&mut self, c: char) -> Option<Token> {
        // Two-character relational operators first.
        if c == '<' && self.cursor.peek_char(1) == '=' {
            self.cursor.advance();
            self.cursor.advance();
            return Some(self.token(TokenKind::LessEq, "<="));
        }
        if c == '>' && self.cursor.peek_char(1) == '=' {
            self.cursor.advance();
            self.cursor.advance();
            return Some(self.token(TokenKind::GreaterEq, ">="));
        }

        let kind = match c {
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            _ => unreachable!("caller filtered the character set"),
        };

        match kind {
            TokenKind::LBrace => {
                self.open_braces
                    .push(Span::new(self.token_line, self.token_column));
            }
            TokenKind::RBrace => {
                if self.open_braces.pop().is_none() {
                    self.report_error("Chave de fechamento sem correspondente");
                }
            }
            _ => {}
        }

        self.cursor.advance();
        Some(self.token(kind, c.to_string()))
    }

    /// Whether the previously emitted token can end an operand, which makes
    /// a following `-` the subtraction operator rather than a sign.
    fn prev_ends_operand(&self) -> bool {
        self.prev_kind.map_or(false, TokenKind::ends_operand)
    }

    pub(crate) fn token(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        Token::new(kind, lexeme, self.token_line, self.token_column)
    }

    pub(crate) fn report_error(&self, message: impl Into<String>) {
        self.handler.error(
            Span::new(self.token_line, self.token_column),
            message.into(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbc_util::Stage;

    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex(source, &handler);
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_hello_world_tokens() {
        let kinds = lex_kinds("RAINBOW.\nmostrar(\"Olá, mundo!\").\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Rainbow,
                TokenKind::Dot,
                TokenKind::Mostrar,
                TokenKind::LParen,
                TokenKind::Text,
                TokenKind::RParen,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex("RAINBOW.\n#a recebe 1.", &handler);
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 8));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 1));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 4));
    }

    #[test]
    fn test_comment_consumed_to_end_of_line() {
        let kinds = lex_kinds("RAINBOW. // cabeçalho { \" 123\nmostrar(1).");
        assert_eq!(kinds[2], TokenKind::Mostrar);
        assert!(!kinds.contains(&TokenKind::LBrace));
    }

    #[test]
    fn test_two_char_operators_before_single() {
        let kinds = lex_kinds("<= >= < >");
        assert_eq!(
            &kinds[..4],
            &[
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::Less,
                TokenKind::Greater,
            ]
        );
    }

    #[test]
    fn test_minus_after_operand_is_subtraction() {
        let kinds = lex_kinds("5 -3");
        assert_eq!(
            &kinds[..3],
            &[TokenKind::Number, TokenKind::Minus, TokenKind::Number]
        );
    }

    #[test]
    fn test_minus_after_recebe_signs_the_literal() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex("#a recebe -3.", &handler);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].lexeme, "-3");
    }

    #[test]
    fn test_stray_closing_brace() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex("}", &handler);
        assert_eq!(tokens[0].kind, TokenKind::RBrace);
        assert_eq!(
            handler.errors(),
            vec!["Linha: 01 - Coluna: 01 - Erro: Chave de fechamento sem correspondente"]
        );
    }

    #[test]
    fn test_unclosed_braces_reported_each() {
        let handler = Handler::new(Stage::Lexical);
        let _ = crate::lex("{ {", &handler);
        assert_eq!(handler.error_count(), 2);
        assert!(handler.errors()[0].contains("Chave aberta não foi fechada"));
    }

    #[test]
    fn test_unknown_symbol_recovers() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex("@ mostrar", &handler);
        assert_eq!(
            handler.errors(),
            vec!["Linha: 01 - Coluna: 01 - Erro: Símbolo não reconhecido: '@'"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Mostrar);
    }

    #[test]
    fn test_eof_position_after_trailing_newline() {
        let handler = Handler::new(Stage::Lexical);
        let (tokens, _) = crate::lex("RAINBOW.\n", &handler);
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!((eof.line, eof.column), (2, 1));
    }
}
