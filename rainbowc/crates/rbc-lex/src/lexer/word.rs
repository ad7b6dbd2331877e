//! Variables and reserved words.
//!
//! `#`-variables are the only user-named entities in Rainbow. Any other
//! word must match the reserved vocabulary; an unknown word is a lexical
//! error, not an identifier token.

use crate::token::{Token, TokenKind};
use crate::Lexer;

/// Longest accepted variable lexeme, `#` included.
pub(crate) const MAX_IDENTIFIER_LENGTH: usize = 50;

/// Maps a word to its reserved token kind.
///
/// The `cor_`-prefixed type spellings are legacy aliases for the bare
/// forms and lex to the same kinds.
pub(crate) fn reserved_kind(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "RAINBOW" => TokenKind::Rainbow,
        "numero" | "cor_numero" => TokenKind::TyNumero,
        "texto" | "cor_texto" => TokenKind::TyTexto,
        "logico" | "cor_logico" => TokenKind::TyLogico,
        "lista" | "cor_lista" => TokenKind::TyLista,
        "igual" => TokenKind::Igual,
        "diferente" => TokenKind::Diferente,
        "recebe" => TokenKind::Recebe,
        "E" => TokenKind::E,
        "OU" => TokenKind::Ou,
        "NAO" => TokenKind::Nao,
        "se" => TokenKind::Se,
        "senao" => TokenKind::Senao,
        "senaose" => TokenKind::Senaose,
        "para" => TokenKind::Para,
        "enquanto" => TokenKind::Enquanto,
        "mostrar" => TokenKind::Mostrar,
        "ler" => TokenKind::Ler,
        "Verdadeiro" => TokenKind::Verdadeiro,
        "Falso" => TokenKind::Falso,
        "de" => TokenKind::De,
        "ate" => TokenKind::Ate,
        "passo" => TokenKind::Passo,
        _ => return None,
    };
    Some(kind)
}

impl<'a> Lexer<'a> {
    /// Lexes a `#`-variable.
    ///
    /// `#` must be followed by a letter; the rest is letters, digits and
    /// underscores. Oversized names are flagged but still tokenized.
    pub(crate) fn lex_variable(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        self.cursor.advance();

        if !self.cursor.current_char().is_alphabetic() {
            self.report_error("Variável mal formada");
            return None;
        }

        while self.cursor.current_char().is_alphanumeric() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start);
        if lexeme.chars().count() > MAX_IDENTIFIER_LENGTH {
            let prefix: String = lexeme.chars().take(20).collect();
            self.report_error(format!("Nome de variável muito longo: {}...", prefix));
        }

        self.stats.record_variable(lexeme);
        Some(self.token(TokenKind::Variable, lexeme))
    }

    /// Lexes a bare word: a reserved word or an invalid-identifier error.
    pub(crate) fn lex_word(&mut self) -> Option<Token> {
        let start = self.cursor.position();

        while self.cursor.current_char().is_alphanumeric() || self.cursor.current_char() == '_' {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(start);
        match reserved_kind(lexeme) {
            Some(kind) => {
                self.stats.record_reserved(lexeme);
                Some(self.token(kind, lexeme))
            }
            None => {
                self.report_error(format!("Identificador inválido: {}", lexeme));
                None
            }
        }
    }
}
