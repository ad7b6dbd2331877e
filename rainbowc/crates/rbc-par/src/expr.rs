//! Expression parsing.
//!
//! One method per precedence level, weakest first: `OU`, `E`, equality,
//! relational, additive, multiplicative, unary, primary. All binary
//! operators associate left; the iterative loops below encode that without
//! left recursion.

use rbc_lex::TokenKind;

use crate::ast::{BinOp, Literal, Node, NodeKind, UnOp};
use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// `expr = or_expr`
    pub(crate) fn expression(&mut self) -> Option<Node> {
        self.or_expr()
    }

    /// `or_expr = and_expr ( "OU" and_expr )*`
    fn or_expr(&mut self) -> Option<Node> {
        let mut lhs = self.and_expr()?;

        while self.check(TokenKind::Ou) {
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.and_expr()?;
            lhs = binary(BinOp::Ou, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `and_expr = eq_expr ( "E" eq_expr )*`
    fn and_expr(&mut self) -> Option<Node> {
        let mut lhs = self.equality_expr()?;

        while self.check(TokenKind::E) {
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.equality_expr()?;
            lhs = binary(BinOp::E, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `eq_expr = rel_expr ( ("igual" | "diferente") rel_expr )*`
    fn equality_expr(&mut self) -> Option<Node> {
        let mut lhs = self.relational_expr()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Igual => BinOp::Igual,
                TokenKind::Diferente => BinOp::Diferente,
                _ => break,
            };
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.relational_expr()?;
            lhs = binary(op, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `rel_expr = add_expr ( ("<" | ">" | "<=" | ">=") add_expr )*`
    fn relational_expr(&mut self) -> Option<Node> {
        let mut lhs = self.additive_expr()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Less => BinOp::Less,
                TokenKind::Greater => BinOp::Greater,
                TokenKind::LessEq => BinOp::LessEq,
                TokenKind::GreaterEq => BinOp::GreaterEq,
                _ => break,
            };
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.additive_expr()?;
            lhs = binary(op, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `add_expr = mul_expr ( ("+" | "-") mul_expr )*`
    fn additive_expr(&mut self) -> Option<Node> {
        let mut lhs = self.multiplicative_expr()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.multiplicative_expr()?;
            lhs = binary(op, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `mul_expr = un_expr ( ("*" | "/" | "%") un_expr )*`
    fn multiplicative_expr(&mut self) -> Option<Node> {
        let mut lhs = self.unary_expr()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let (line, column) = self.position_here();
            self.advance();
            let rhs = self.unary_expr()?;
            lhs = binary(op, lhs, rhs, line, column);
        }

        Some(lhs)
    }

    /// `un_expr = ("NAO" | "-") un_expr | primary`
    fn unary_expr(&mut self) -> Option<Node> {
        let op = match self.current().kind {
            TokenKind::Nao => Some(UnOp::Nao),
            TokenKind::Minus => Some(UnOp::Neg),
            _ => None,
        };

        if let Some(op) = op {
            let (line, column) = self.position_here();
            self.advance();
            let operand = self.unary_expr()?;
            return Some(Node::new(
                NodeKind::UnOp {
                    op,
                    operand: Box::new(operand),
                },
                line,
                column,
            ));
        }

        self.primary()
    }

    /// `primary = number | string | bool | var | "(" expr ")" | "ler" "(" expr? ")"`
    fn primary(&mut self) -> Option<Node> {
        let (line, column) = self.position_here();

        match self.current().kind {
            TokenKind::Number => {
                let lexeme = self.current().lexeme.clone();
                self.advance();
                let literal = match parse_number(&lexeme) {
                    Some(literal) => literal,
                    None => {
                        self.error(format!("Número mal formado: {}", lexeme));
                        return None;
                    }
                };
                Some(Node::new(NodeKind::Literal(literal), line, column))
            }
            TokenKind::Text => {
                let lexeme = self.current().lexeme.clone();
                self.advance();
                Some(Node::new(
                    NodeKind::Literal(Literal::Str(lexeme)),
                    line,
                    column,
                ))
            }
            TokenKind::Verdadeiro => {
                self.advance();
                Some(Node::new(
                    NodeKind::Literal(Literal::Bool(true)),
                    line,
                    column,
                ))
            }
            TokenKind::Falso => {
                self.advance();
                Some(Node::new(
                    NodeKind::Literal(Literal::Bool(false)),
                    line,
                    column,
                ))
            }
            TokenKind::Variable => {
                let name = self.current().lexeme.clone();
                self.advance();
                Some(Node::new(NodeKind::Var(name), line, column))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                if !self.expect(TokenKind::RParen) {
                    return None;
                }
                Some(inner)
            }
            TokenKind::Ler => {
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

                Some(Node::new(NodeKind::Call { name, args }, line, column))
            }
            kind => {
                self.error(format!("Expressão inválida: {}", kind.name()));
                None
            }
        }
    }
}

fn binary(op: BinOp, lhs: Node, rhs: Node, line: u32, column: u32) -> Node {
    Node::new(
        NodeKind::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        line,
        column,
    )
}

/// Converts a numeric lexeme into a literal.
///
/// Integers that overflow `i64` (the lexer allows up to 20 digits) fall
/// back to the decimal representation.
fn parse_number(lexeme: &str) -> Option<Literal> {
    if lexeme.contains('.') {
        lexeme.parse::<f64>().ok().map(Literal::Dec)
    } else {
        match lexeme.parse::<i64>() {
            Ok(value) => Some(Literal::Int(value)),
            Err(_) => lexeme.parse::<f64>().ok().map(Literal::Dec),
        }
    }
}
