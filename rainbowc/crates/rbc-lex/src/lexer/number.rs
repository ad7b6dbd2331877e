//! Number literal lexing.
//!
//! Rainbow numbers are a digit run with an optional `.`-separated decimal
//! part and an optional leading `-`. A trailing `.` is never part of the
//! number when followed by whitespace or end of line — that is the
//! statement terminator.

use crate::token::{Token, TokenKind};
use crate::Lexer;

/// Longest accepted numeric lexeme, sign included.
pub(crate) const MAX_NUMBER_LENGTH: usize = 20;

impl<'a> Lexer<'a> {
    /// Lexes a number literal, integer or decimal.
    ///
    /// Returns `None` on a malformed number (`2.a3`): the digits and the
    /// dot are consumed, a diagnostic is recorded, and no token is emitted.
    pub(crate) fn lex_number(&mut self) -> Option<Token> {
        let start = self.cursor.position();

        if self.cursor.current_char() == '-' {
            self.cursor.advance();
        }

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' {
            let next = self.cursor.peek_char(1);
            if next.is_ascii_digit() {
                self.cursor.advance();
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            } else if next != ' ' && next != '\t' && next != '\n' && next != '\0' {
                self.report_error("Número mal formado");
                self.cursor.advance();
                return None;
            }
            // Otherwise the dot is the statement terminator; leave it.
        }

        let lexeme = self.cursor.slice_from(start);
        if lexeme.len() > MAX_NUMBER_LENGTH {
            self.report_error(format!("Número muito grande: {}", lexeme));
        }

        Some(self.token(TokenKind::Number, lexeme))
    }
}
