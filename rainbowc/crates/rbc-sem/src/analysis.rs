//! The semantic analysis pass.
//!
//! Walks the AST once, maintaining the scoped symbol table, inferring the
//! type of every expression, and checking the type rules. Analysis is
//! defensive: a missing or partial AST still produces a symbol table, and
//! every check keeps going after recording its diagnostic.

use rbc_par::{Literal, Node, NodeKind};
use rbc_util::{Handler, Span};

use crate::table::SymbolTable;
use crate::types::{ScopeKind, SymbolType};

/// Semantic analyzer for a parsed program.
pub struct Analyzer<'a> {
    table: SymbolTable,
    handler: &'a Handler,
}

impl<'a> Analyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            table: SymbolTable::new(),
            handler,
        }
    }

    /// Analyzes the program, then reports every declared-but-unused
    /// variable exactly once.
    ///
    /// `None` (the parser built no tree at all) is itself a semantic error,
    /// but the table is still produced.
    pub fn analyze(&mut self, ast: Option<&Node>) {
        match ast {
            None => {
                self.handler
                    .error(Span::DUMMY, "AST não fornecida para análise semântica");
            }
            Some(node) => {
                self.visit(node);
                for symbol in self.table.unused_symbols() {
                    self.handler.warning(
                        Span::new(symbol.line, symbol.column),
                        format!("Variável '{}' declarada mas não utilizada", symbol.name),
                    );
                }
            }
        }
    }

    /// Consumes the analyzer, yielding the populated symbol table.
    pub fn into_table(self) -> SymbolTable {
        self.table
    }

    fn visit(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Program(children) => {
                for child in children {
                    self.visit(child);
                }
            }
            NodeKind::VarDecl {
                declared_type,
                name,
            } => {
                let ty = SymbolType::from(*declared_type);
                if !self.table.declare(name, ty, node.line, node.column) {
                    self.error(
                        node,
                        format!("Variável '{}' já foi declarada neste escopo", name),
                    );
                }
            }
            NodeKind::Assign { name, value } => self.visit_assign(node, name, value),
            NodeKind::If {
                branches,
                else_block,
            } => {
                for branch in branches {
                    let cond_ty = self.type_of(&branch.cond);
                    if cond_ty != SymbolType::Logico && cond_ty != SymbolType::Indefinido {
                        self.error(
                            &branch.cond,
                            format!(
                                "Condição deve ser do tipo 'logico', encontrado '{}'",
                                cond_ty
                            ),
                        );
                    }
                    self.visit(&branch.block);
                }
                if let Some(block) = else_block {
                    self.visit(block);
                }
            }
            NodeKind::ForRange {
                var,
                start,
                end,
                step,
                body,
            } => {
                self.table.enter_scope(ScopeKind::Laco);
                self.table
                    .declare(var, SymbolType::Numero, node.line, node.column);
                self.table.mark_used(var);

                for bound in [start, end, step] {
                    let ty = self.type_of(bound);
                    if ty != SymbolType::Numero && ty != SymbolType::Indefinido {
                        self.error(node, "Expressões do laço 'para' devem ser do tipo 'numero'");
                    }
                }

                if is_zero_literal(step) {
                    self.error(step, "Passo do laço 'para' não pode ser zero");
                }

                self.visit(body);
                self.table.exit_scope();
            }
            NodeKind::While { cond, body } => {
                self.table.enter_scope(ScopeKind::Laco);
                let cond_ty = self.type_of(cond);
                if cond_ty != SymbolType::Logico && cond_ty != SymbolType::Indefinido {
                    self.error(node, "Condição do 'enquanto' deve ser do tipo 'logico'");
                }
                self.visit(body);
                self.table.exit_scope();
            }
            NodeKind::Call { name, args } => {
                self.check_call(node, name, args);
            }
            NodeKind::Block(children) => {
                self.table.enter_scope(ScopeKind::Bloco);
                for child in children {
                    self.visit(child);
                }
                self.table.exit_scope();
            }
            // Bare expressions cannot appear as statements, but a partial
            // tree is still typed rather than skipped.
            _ => {
                self.type_of(node);
            }
        }
    }

    fn visit_assign(&mut self, node: &Node, name: &str, value: &Node) {
        let value_ty = self.type_of(value);

        if self.table.lookup(name).is_none() {
            // Implicit declaration: first write binds the name in the
            // current frame with the inferred type.
            self.table.declare(name, value_ty, node.line, node.column);
            if let NodeKind::Literal(literal) = &value.kind {
                self.table.set_initial(name, literal.to_string());
            }
        }

        self.table.mark_used(name);

        if let Some(symbol) = self.table.lookup(name) {
            let declared_ty = symbol.ty;
            if value_ty != SymbolType::Indefinido
                && declared_ty != SymbolType::Indefinido
                && declared_ty != value_ty
                && !conversion_allowed(declared_ty, value_ty)
            {
                self.warning(
                    node,
                    format!(
                        "Possível incompatibilidade de tipos - esperado '{}', encontrado '{}'",
                        declared_ty, value_ty
                    ),
                );
            }
        }
    }

    fn check_call(&mut self, node: &Node, name: &str, args: &[Node]) {
        match name {
            "mostrar" => {
                if let Some(arg) = args.first() {
                    self.type_of(arg);
                }
            }
            "ler" => {
                if let Some(arg) = args.first() {
                    let ty = self.type_of(arg);
                    if ty != SymbolType::Texto && ty != SymbolType::Indefinido {
                        self.warning(node, "Argumento de 'ler' deve ser do tipo 'texto'");
                    }
                }
            }
            _ => {
                self.error(node, format!("Função '{}' não reconhecida", name));
            }
        }
    }

    /// Infers the type of an expression, recording any diagnostics on the
    /// way. Side effects include implicit declarations and used-marking.
    fn type_of(&mut self, node: &Node) -> SymbolType {
        match &node.kind {
            NodeKind::Literal(literal) => match literal {
                Literal::Int(_) | Literal::Dec(_) => SymbolType::Numero,
                Literal::Str(_) => SymbolType::Texto,
                Literal::Bool(_) => SymbolType::Logico,
            },
            NodeKind::Var(name) => {
                if self.table.lookup(name).is_none() {
                    self.warning(
                        node,
                        format!("Variável '{}' usada sem declaração explícita", name),
                    );
                    self.table
                        .declare(name, SymbolType::Indefinido, node.line, node.column);
                }
                self.table.mark_used(name);
                self.table
                    .lookup(name)
                    .map(|s| s.ty)
                    .unwrap_or(SymbolType::Indefinido)
            }
            NodeKind::BinOp { op, lhs, rhs } => {
                let lt = self.type_of(lhs);
                let rt = self.type_of(rhs);
                self.type_of_binop(node, *op, lt, rt)
            }
            NodeKind::UnOp { op, operand } => {
                let ty = self.type_of(operand);
                match op {
                    rbc_par::UnOp::Neg => {
                        if ty != SymbolType::Numero {
                            self.error(
                                node,
                                "Operador '-' unário requer operando do tipo 'numero'",
                            );
                        }
                        SymbolType::Numero
                    }
                    rbc_par::UnOp::Nao => {
                        if ty != SymbolType::Logico {
                            self.error(node, "Operador 'NAO' requer operando do tipo 'logico'");
                        }
                        SymbolType::Logico
                    }
                }
            }
            NodeKind::Call { name, args } => {
                self.check_call(node, name, args);
                if name == "ler" {
                    SymbolType::Texto
                } else {
                    SymbolType::Indefinido
                }
            }
            _ => SymbolType::Indefinido,
        }
    }

    fn type_of_binop(
        &mut self,
        node: &Node,
        op: rbc_par::BinOp,
        lt: SymbolType,
        rt: SymbolType,
    ) -> SymbolType {
        use rbc_par::BinOp;

        match op {
            BinOp::Add => {
                if lt == SymbolType::Texto || rt == SymbolType::Texto {
                    SymbolType::Texto
                } else if lt == SymbolType::Numero && rt == SymbolType::Numero {
                    SymbolType::Numero
                } else {
                    self.error(node, "Operador '+' requer tipos compatíveis");
                    SymbolType::Indefinido
                }
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                if lt != SymbolType::Numero || rt != SymbolType::Numero {
                    self.error(
                        node,
                        format!("Operador '{}' requer operandos do tipo 'numero'", op),
                    );
                }
                SymbolType::Numero
            }
            BinOp::Less
            | BinOp::Greater
            | BinOp::LessEq
            | BinOp::GreaterEq
            | BinOp::Igual
            | BinOp::Diferente => {
                if lt != rt
                    && lt != SymbolType::Indefinido
                    && rt != SymbolType::Indefinido
                    && !comparable(lt, rt)
                {
                    self.warning(
                        node,
                        format!("Comparação entre tipos diferentes ('{}' e '{}')", lt, rt),
                    );
                }
                SymbolType::Logico
            }
            BinOp::E | BinOp::Ou => {
                if lt != SymbolType::Logico || rt != SymbolType::Logico {
                    self.error(
                        node,
                        format!("Operador '{}' requer operandos do tipo 'logico'", op),
                    );
                }
                SymbolType::Logico
            }
        }
    }

    fn error(&self, node: &Node, message: impl Into<String>) {
        self.handler.error(node.span(), message.into());
    }

    fn warning(&self, node: &Node, message: impl Into<String>) {
        self.handler.warning(node.span(), message.into());
    }
}

/// Implicit conversions tolerated on assignment: anything displayable may
/// flow into a text slot (concatenation), and text may flow into a number
/// slot (parsed input).
fn conversion_allowed(target: SymbolType, source: SymbolType) -> bool {
    matches!(
        (target, source),
        (SymbolType::Texto, SymbolType::Numero)
            | (SymbolType::Texto, SymbolType::Logico)
            | (SymbolType::Numero, SymbolType::Texto)
    )
}

/// Number↔text comparison is permitted (implicit coercion at runtime).
fn comparable(a: SymbolType, b: SymbolType) -> bool {
    matches!(
        (a, b),
        (SymbolType::Texto, SymbolType::Numero) | (SymbolType::Numero, SymbolType::Texto)
    )
}

fn is_zero_literal(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Literal(Literal::Int(0)) => true,
        NodeKind::Literal(Literal::Dec(value)) => *value == 0.0,
        _ => false,
    }
}
