//! Token model for the Rainbow language.
//!
//! Token kinds form a closed enumeration; Rainbow has no user-named
//! entities other than `#`-variables, so every bare word in a program is
//! either a reserved word or a lexical error.

use std::fmt;

use rbc_util::Span;

/// The closed set of Rainbow token kinds.
///
/// Variant names follow the Rainbow keywords where one exists (`Se`,
/// `Mostrar`, `Recebe`); [`TokenKind::name`] yields the uppercase kind
/// names used by the `.tokens`, `.json` and error artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// Program header keyword `RAINBOW`.
    Rainbow,

    // Type keywords (`cor_`-prefixed spellings are accepted as legacy
    // aliases and lex to the same kinds).
    TyNumero,
    TyTexto,
    TyLogico,
    TyLista,

    /// `#name` variable.
    Variable,

    // Relational operators.
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Igual,
    Diferente,

    // Arithmetic operators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    /// Assignment keyword `recebe`.
    Recebe,

    // Logical operators.
    E,
    Ou,
    Nao,

    // Control keywords.
    Se,
    Senao,
    Senaose,
    Para,
    Enquanto,

    // Built-in functions.
    Mostrar,
    Ler,

    // Literals.
    Verdadeiro,
    Falso,
    Text,
    Number,

    // Delimiters.
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// Statement terminator `.`.
    Dot,
    Comma,

    // Range auxiliaries.
    De,
    Ate,
    Passo,

    /// End-of-input sentinel.
    Eof,
}

impl TokenKind {
    /// The kind name used in reports and JSON artifacts.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Rainbow => "RAINBOW",
            TokenKind::TyNumero => "TIPO_NUMERO",
            TokenKind::TyTexto => "TIPO_TEXTO",
            TokenKind::TyLogico => "TIPO_LOGICO",
            TokenKind::TyLista => "TIPO_LISTA",
            TokenKind::Variable => "VARIAVEL",
            TokenKind::Less => "OPER_MENOR",
            TokenKind::Greater => "OPER_MAIOR",
            TokenKind::LessEq => "OPER_MENOR_IGUAL",
            TokenKind::GreaterEq => "OPER_MAIOR_IGUAL",
            TokenKind::Igual => "OPER_IGUAL",
            TokenKind::Diferente => "OPER_DIFERENTE",
            TokenKind::Plus => "OPER_SOMA",
            TokenKind::Minus => "OPER_SUBTRACAO",
            TokenKind::Star => "OPER_MULTIPLICACAO",
            TokenKind::Slash => "OPER_DIVISAO",
            TokenKind::Percent => "OPER_MODULO",
            TokenKind::Recebe => "OPER_ATRIBUICAO",
            TokenKind::E => "OPER_E",
            TokenKind::Ou => "OPER_OU",
            TokenKind::Nao => "OPER_NAO",
            TokenKind::Se => "SE",
            TokenKind::Senao => "SENAO",
            TokenKind::Senaose => "SENAOSE",
            TokenKind::Para => "PARA",
            TokenKind::Enquanto => "ENQUANTO",
            TokenKind::Mostrar => "MOSTRAR",
            TokenKind::Ler => "LER",
            TokenKind::Verdadeiro => "VERDADEIRO",
            TokenKind::Falso => "FALSO",
            TokenKind::Text => "TEXTO",
            TokenKind::Number => "NUMERO",
            TokenKind::LParen => "ABRE_PARENTESES",
            TokenKind::RParen => "FECHA_PARENTESES",
            TokenKind::LBrace => "ABRE_CHAVES",
            TokenKind::RBrace => "FECHA_CHAVES",
            TokenKind::LBracket => "ABRE_COLCHETE",
            TokenKind::RBracket => "FECHA_COLCHETE",
            TokenKind::Dot => "FIM_LINHA",
            TokenKind::Comma => "VIRGULA",
            TokenKind::De => "DE",
            TokenKind::Ate => "ATE",
            TokenKind::Passo => "PASSO",
            TokenKind::Eof => "EOF",
        }
    }

    /// Whether a token of this kind can end an operand.
    ///
    /// Used by the lexer to decide if a following `-` is the subtraction
    /// operator or the sign of a numeric literal: `5 -3` subtracts, while
    /// `recebe -3` starts a negative number.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::Text
                | TokenKind::Variable
                | TokenKind::Verdadeiro
                | TokenKind::Falso
                | TokenKind::RParen
                | TokenKind::RBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token: kind, exact lexeme, and the position of its first character.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// The token's source position.
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linha: {:02} - Coluna: {:02} - Token:<{}, {}>",
            self.line,
            self.column,
            self.kind.name(),
            self.lexeme
        )
    }
}
