//! Recursive-descent statement parser.
//!
//! One token of lookahead, panic-mode recovery. On an unexpected token the
//! parser records a diagnostic and skips forward to the next
//! synchronization point (statement terminator, control-construct opener,
//! or closing brace), so one mistake produces one error instead of a
//! cascade.

use rbc_lex::{Token, TokenKind};
use rbc_util::{Handler, Span};

use crate::ast::{Branch, Node, NodeKind, TypeName};

/// Iteration cap for a single block body; progress is forced when a
/// statement consumes nothing, so the cap only trips on degenerate input.
const MAX_BLOCK_ITERATIONS: usize = 1000;

/// Parser over a lexed token stream.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens`, reporting into `handler`.
    ///
    /// The stream is expected to end with the EOF sentinel, as produced by
    /// [`rbc_lex::lex`].
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Parses a complete program.
    ///
    /// Returns `None` when no tree could be built; the handler then holds
    /// at least one error. A partial tree plus errors is the normal outcome
    /// for malformed input.
    pub fn parse(&mut self) -> Option<Node> {
        if self.tokens.is_empty() {
            self.handler.error(Span::DUMMY, "Lista de tokens vazia");
            return None;
        }

        let ast = self.program();

        if !self.check(TokenKind::Eof) {
            self.error("Tokens inesperados após o fim do programa");
        }

        ast
    }

    // ------------------------------------------------------------------
    // Grammar rules
    // ------------------------------------------------------------------

    /// `program = "RAINBOW" "." statement*`
    fn program(&mut self) -> Option<Node> {
        if !self.check(TokenKind::Rainbow) {
            self.error("Programa deve começar com 'RAINBOW'");
            return None;
        }

        let (line, column) = self.position_here();
        self.advance();

        if !self.expect(TokenKind::Dot) {
            self.synchronize();
        }

        let mut children = Vec::new();
        while !self.check(TokenKind::Eof) {
            let before = self.position;
            if let Some(statement) = self.statement() {
                children.push(statement);
            }
            if self.position == before {
                self.error(format!(
                    "Token não processado: {}",
                    self.current().kind.name()
                ));
                self.advance();
            }
        }

        Some(Node::new(NodeKind::Program(children), line, column))
    }

    /// Dispatches on the current token kind.
    pub(crate) fn statement(&mut self) -> Option<Node> {
        match self.current().kind {
            TokenKind::TyNumero
            | TokenKind::TyTexto
            | TokenKind::TyLogico
            | TokenKind::TyLista => self.var_decl(),
            TokenKind::Variable => self.assign(),
            TokenKind::Se => self.conditional(),
            TokenKind::Para => self.for_loop(),
            TokenKind::Enquanto => self.while_loop(),
            TokenKind::Mostrar | TokenKind::Ler => self.call_statement(),
            TokenKind::Eof => None,
            kind => {
                self.error(format!("Declaração inválida: {}", kind.name()));
                self.synchronize();
                if self.check(TokenKind::Dot) {
                    self.advance();
                }
                None
            }
        }
    }

    /// `vardecl = type var "."`
    fn var_decl(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        let declared_type = match self.current().kind {
            TokenKind::TyNumero => TypeName::Numero,
            TokenKind::TyTexto => TypeName::Texto,
            TokenKind::TyLogico => TypeName::Logico,
            _ => TypeName::Lista,
        };
        self.advance();

        if !self.check(TokenKind::Variable) {
            self.error("Esperado nome de variável após tipo");
            return None;
        }
        let name = self.current().lexeme.clone();
        self.advance();

        if !self.expect(TokenKind::Dot) {
            return None;
        }

        Some(Node::new(
            NodeKind::VarDecl {
                declared_type,
                name,
            },
            line,
            column,
        ))
    }

    /// `assign = var "recebe" expr "."`
    fn assign(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        let name = self.current().lexeme.clone();
        self.advance();

        if !self.expect(TokenKind::Recebe) {
            return None;
        }

        let value = self.expression()?;

        if !self.expect(TokenKind::Dot) {
            return None;
        }

        Some(Node::new(
            NodeKind::Assign {
                name,
                value: Box::new(value),
            },
            line,
            column,
        ))
    }

    /// `if = "se" ["("] expr [")"] block ("senaose" "(" expr ")" block)* ("senao" block)?`
    ///
    /// The leading condition is parenthesis-optional (legacy); `senaose`
    /// requires parentheses.
    fn conditional(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        self.advance();

        let parenthesized = self.check(TokenKind::LParen);
        if parenthesized {
            self.advance();
        }

        let cond = match self.expression() {
            Some(cond) => cond,
            None => {
                self.skip_until(&[TokenKind::LBrace, TokenKind::Dot]);
                return None;
            }
        };

        if parenthesized && !self.expect(TokenKind::RParen) {
            self.skip_until(&[TokenKind::LBrace, TokenKind::Dot]);
        }

        let block = self.block()?;
        let mut branches = vec![Branch { cond, block }];

        while self.check(TokenKind::Senaose) {
            self.advance();

            if !self.expect(TokenKind::LParen) {
                break;
            }
            let cond = match self.expression() {
                Some(cond) => cond,
                None => break,
            };
            if !self.expect(TokenKind::RParen) {
                break;
            }
            let block = match self.block() {
                Some(block) => block,
                None => break,
            };
            branches.push(Branch { cond, block });
        }

        let mut else_block = None;
        if self.check(TokenKind::Senao) {
            self.advance();
            if let Some(block) = self.block() {
                else_block = Some(Box::new(block));
            }
        }

        Some(Node::new(
            NodeKind::If {
                branches,
                else_block,
            },
            line,
            column,
        ))
    }

    /// `for = "para" var "de" expr "ate" expr "passo" expr block`
    fn for_loop(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        self.advance();

        if !self.check(TokenKind::Variable) {
            self.error("Esperado variável após 'para'");
            return None;
        }
        let var = self.current().lexeme.clone();
        self.advance();

        if !self.expect(TokenKind::De) {
            return None;
        }
        let start = self.expression()?;

        if !self.expect(TokenKind::Ate) {
            return None;
        }
        let end = self.expression()?;

        if !self.expect(TokenKind::Passo) {
            return None;
        }
        let step = self.expression()?;

        let body = self.block()?;

        Some(Node::new(
            NodeKind::ForRange {
                var,
                start: Box::new(start),
                end: Box::new(end),
                step: Box::new(step),
                body: Box::new(body),
            },
            line,
            column,
        ))
    }

    /// `while = "enquanto" "(" expr ")" block`
    fn while_loop(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        self.advance();

        if !self.expect(TokenKind::LParen) {
            return None;
        }
        let cond = self.expression()?;
        if !self.expect(TokenKind::RParen) {
            return None;
        }

        let body = self.block()?;

        Some(Node::new(
            NodeKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            line,
            column,
        ))
    }

    /// `call = ("mostrar" | "ler") "(" expr? ")" "."`
    fn call_statement(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();
        let name = self.current().lexeme.clone();
        self.advance();

        if !self.expect(TokenKind::LParen) {
            return None;
        }

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            if let Some(arg) = self.expression() {
                args.push(arg);
            }
        }

        if !self.expect(TokenKind::RParen) {
            return None;
        }
        if !self.expect(TokenKind::Dot) {
            return None;
        }

        Some(Node::new(NodeKind::Call { name, args }, line, column))
    }

    /// `block = "{" statement* "}"`
    pub(crate) fn block(&mut self) -> Option<Node> {
        if !self.check(TokenKind::LBrace) {
            self.error("Esperado '{' para início do bloco");
            return None;
        }

        let (line, column) = self.position_here();
        self.advance();

        let mut statements = Vec::new();
        let mut iterations = 0;

        while !self.check(TokenKind::RBrace)
            && !self.check(TokenKind::Eof)
            && iterations < MAX_BLOCK_ITERATIONS
        {
            let before = self.position;
            if let Some(statement) = self.statement() {
                statements.push(statement);
            }
            if self.position == before {
                self.error(format!(
                    "Token não processado no bloco: {}",
                    self.current().kind.name()
                ));
                self.advance();
            }
            iterations += 1;
        }

        if iterations >= MAX_BLOCK_ITERATIONS {
            self.error("Limite de iterações atingido no bloco - possível loop infinito");
        }

        if self.check(TokenKind::RBrace) {
            self.advance();
        } else if !self.check(TokenKind::Eof) {
            self.error("Esperado '}' para fechar o bloco");
        }

        Some(Node::new(NodeKind::Block(statements), line, column))
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        // The stream ends with EOF; position never passes it.
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    pub(crate) fn position_here(&self) -> (u32, u32) {
        let token = self.current();
        (token.line, token.column)
    }

    pub(crate) fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consumes a token of the expected kind, or reports a mismatch and
    /// stays put.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            self.error(format!(
                "Esperado {}, encontrado {}",
                expected.name(),
                self.current().kind.name()
            ));
            false
        }
    }

    /// Skips forward until one of `targets` or EOF, consuming nothing else.
    pub(crate) fn skip_until(&mut self, targets: &[TokenKind]) {
        while !self.check(TokenKind::Eof) && !targets.contains(&self.current().kind) {
            self.advance();
        }
    }

    /// Panic-mode recovery: skip to the next safe synchronization point.
    pub(crate) fn synchronize(&mut self) {
        self.skip_until(&[
            TokenKind::Dot,
            TokenKind::Se,
            TokenKind::Para,
            TokenKind::Enquanto,
            TokenKind::RBrace,
        ]);
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.handler.error(self.current().span(), message.into());
    }
}
