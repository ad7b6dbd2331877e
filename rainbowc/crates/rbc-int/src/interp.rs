//! Tree-walking evaluator.
//!
//! Executes the parser's AST directly; precedence and block structure were
//! settled at parse time, so evaluation is a plain recursive walk. I/O
//! goes through two callbacks: an output sink receiving each `mostrar`
//! line, and an input source mapping a prompt to one line of user text.

use thiserror::Error;
use tracing::warn;

use rbc_par::{BinOp, Node, NodeKind, UnOp};

use crate::env::Environment;
use crate::value::Value;

/// Iteration cap observed by `enquanto` loops.
pub const MAX_LOOP_ITERATIONS: usize = 1000;

/// A runtime failure; execution aborts at the first one.
#[derive(Debug, Error)]
#[error("Erro na linha {line}: {message}")]
pub struct RuntimeError {
    pub line: u32,
    pub message: String,
}

impl RuntimeError {
    fn at(node: &Node, message: impl Into<String>) -> Self {
        Self {
            line: node.line,
            message: message.into(),
        }
    }
}

/// The evaluator: a flat variable store plus the two I/O callbacks.
pub struct Interpreter<'io> {
    env: Environment,
    output: Vec<String>,
    write: Box<dyn FnMut(&str) + 'io>,
    read: Box<dyn FnMut(&str) -> String + 'io>,
}

impl<'io> Interpreter<'io> {
    pub fn new(
        write: impl FnMut(&str) + 'io,
        read: impl FnMut(&str) -> String + 'io,
    ) -> Self {
        Self {
            env: Environment::new(),
            output: Vec::new(),
            write: Box::new(write),
            read: Box::new(read),
        }
    }

    /// Runs a program and returns the aggregated output, one line per
    /// `mostrar` call.
    pub fn run(&mut self, program: &Node) -> Result<String, RuntimeError> {
        self.exec(program)?;
        Ok(self.output.join("\n"))
    }

    fn exec(&mut self, node: &Node) -> Result<(), RuntimeError> {
        match &node.kind {
            NodeKind::Program(children) | NodeKind::Block(children) => {
                for child in children {
                    self.exec(child)?;
                }
                Ok(())
            }
            // Declarations carry no initializer; the variable stays
            // unbound until the first assignment.
            NodeKind::VarDecl { .. } => Ok(()),
            NodeKind::Assign { name, value } => {
                let value = self.eval(value)?;
                self.env.set(name, value);
                Ok(())
            }
            NodeKind::If {
                branches,
                else_block,
            } => {
                for branch in branches {
                    if self.eval_condition(&branch.cond)? {
                        return self.exec(&branch.block);
                    }
                }
                if let Some(block) = else_block {
                    self.exec(block)?;
                }
                Ok(())
            }
            NodeKind::While { cond, body } => {
                let mut iterations = 0;
                while self.eval_condition(cond)? {
                    if iterations >= MAX_LOOP_ITERATIONS {
                        return Err(RuntimeError::at(node, "Loop infinito detectado!"));
                    }
                    self.exec(body)?;
                    iterations += 1;
                }
                Ok(())
            }
            NodeKind::ForRange {
                var,
                start,
                end,
                step,
                body,
            } => self.exec_for(var, start, end, step, body),
            NodeKind::Call { name, args } => match name.as_str() {
                "mostrar" => {
                    let line = match args.first() {
                        Some(arg) => self.eval(arg)?.display(),
                        None => String::new(),
                    };
                    self.emit(line);
                    Ok(())
                }
                // Statement-position `ler`: prompt, then discard the line.
                "ler" => {
                    self.eval(node).map(drop)
                }
                _ => Err(RuntimeError::at(
                    node,
                    format!("Função '{}' não reconhecida", name),
                )),
            },
            // Expression in statement position: evaluate for effects.
            _ => self.eval(node).map(drop),
        }
    }

    fn exec_for(
        &mut self,
        var: &str,
        start: &Node,
        end: &Node,
        step: &Node,
        body: &Node,
    ) -> Result<(), RuntimeError> {
        // Bounds and step are evaluated once, before the first iteration.
        let start_value = self.eval(start)?;
        let end_value = self.eval(end)?;
        let step_value = self.eval(step)?;

        let step_num = self.to_number(&step_value, step)?;
        if step_num == 0.0 {
            return Err(RuntimeError::at(step, "Passo do laço 'para' não pode ser zero"));
        }

        match (&start_value, &end_value, &step_value) {
            (Value::Int(a), Value::Int(b), Value::Int(s)) => {
                let (a, b, s) = (*a, *b, *s);
                let mut v = a;
                while (s > 0 && v <= b) || (s < 0 && v >= b) {
                    self.env.set(var, Value::Int(v));
                    self.exec(body)?;
                    match v.checked_add(s) {
                        Some(next) => v = next,
                        None => break,
                    }
                }
            }
            _ => {
                let a = self.to_number(&start_value, start)?;
                let b = self.to_number(&end_value, end)?;
                let mut v = a;
                while (step_num > 0.0 && v <= b) || (step_num < 0.0 && v >= b) {
                    self.env.set(var, Value::Dec(v));
                    self.exec(body)?;
                    v += step_num;
                }
            }
        }

        Ok(())
    }

    fn eval(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        match &node.kind {
            NodeKind::Literal(literal) => Ok(Value::from_literal(literal)),
            NodeKind::Var(name) => match self.env.get(name) {
                Some(value) => Ok(value.clone()),
                None => Err(RuntimeError::at(
                    node,
                    format!("Variável {} não definida", name),
                )),
            },
            NodeKind::Call { name, args } => {
                if name != "ler" {
                    return Err(RuntimeError::at(
                        node,
                        format!("Função '{}' não reconhecida", name),
                    ));
                }
                let prompt = match args.first() {
                    Some(arg) => self.eval(arg)?.display(),
                    None => String::new(),
                };
                Ok(Value::Text((self.read)(&prompt)))
            }
            NodeKind::UnOp { op, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnOp::Neg => match value {
                        Value::Int(v) => Ok(v
                            .checked_neg()
                            .map(Value::Int)
                            .unwrap_or(Value::Dec(-(v as f64)))),
                        Value::Dec(v) => Ok(Value::Dec(-v)),
                        other => {
                            let n = self.to_number(&other, operand)?;
                            Ok(Value::Dec(-n))
                        }
                    },
                    UnOp::Nao => match value {
                        Value::Bool(v) => Ok(Value::Bool(!v)),
                        _ => Err(RuntimeError::at(
                            node,
                            "Operador 'NAO' requer operando do tipo 'logico'",
                        )),
                    },
                }
            }
            NodeKind::BinOp { op, lhs, rhs } => self.eval_binop(node, *op, lhs, rhs),
            _ => Err(RuntimeError::at(node, "Expressão malformada")),
        }
    }

    fn eval_binop(
        &mut self,
        node: &Node,
        op: BinOp,
        lhs: &Node,
        rhs: &Node,
    ) -> Result<Value, RuntimeError> {
        // Logical operators short-circuit; everything else evaluates both
        // sides up front.
        if matches!(op, BinOp::E | BinOp::Ou) {
            return self.eval_logical(node, op, lhs, rhs);
        }

        let left = self.eval(lhs)?;
        let right = self.eval(rhs)?;

        match op {
            BinOp::Add => {
                // Any text operand turns `+` into concatenation.
                if matches!(left, Value::Text(_)) || matches!(right, Value::Text(_)) {
                    return Ok(Value::Text(format!("{}{}", left, right)));
                }
                self.arith(node, op, &left, &right, lhs, rhs)
            }
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                self.arith(node, op, &left, &right, lhs, rhs)
            }
            BinOp::Less | BinOp::Greater | BinOp::LessEq | BinOp::GreaterEq => {
                let ordering = self.compare(node, &left, &right)?;
                let result = match op {
                    BinOp::Less => ordering.is_lt(),
                    BinOp::Greater => ordering.is_gt(),
                    BinOp::LessEq => ordering.is_le(),
                    _ => ordering.is_ge(),
                };
                Ok(Value::Bool(result))
            }
            BinOp::Igual => Ok(Value::Bool(values_equal(&left, &right))),
            BinOp::Diferente => Ok(Value::Bool(!values_equal(&left, &right))),
            BinOp::E | BinOp::Ou => unreachable!("handled above"),
        }
    }

    fn eval_logical(
        &mut self,
        node: &Node,
        op: BinOp,
        lhs: &Node,
        rhs: &Node,
    ) -> Result<Value, RuntimeError> {
        let message = format!("Operador '{}' requer operandos do tipo 'logico'", op);

        let Value::Bool(left) = self.eval(lhs)? else {
            return Err(RuntimeError::at(node, message));
        };

        match (op, left) {
            (BinOp::E, false) => Ok(Value::Bool(false)),
            (BinOp::Ou, true) => Ok(Value::Bool(true)),
            _ => match self.eval(rhs)? {
                Value::Bool(right) => Ok(Value::Bool(right)),
                _ => Err(RuntimeError::at(node, message)),
            },
        }
    }

    fn arith(
        &self,
        node: &Node,
        op: BinOp,
        left: &Value,
        right: &Value,
        lhs: &Node,
        rhs: &Node,
    ) -> Result<Value, RuntimeError> {
        if let (Value::Int(a), Value::Int(b)) = (left, right) {
            if let Some(result) = int_arith(node, op, *a, *b) {
                return Ok(result);
            }
            // Overflow falls through to the decimal path.
        }

        let a = self.to_number(left, lhs)?;
        let b = self.to_number(right, rhs)?;

        let result = match op {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => {
                if b == 0.0 {
                    warn!(linha = node.line, "divisão por zero avaliada como 0");
                    return Ok(Value::Int(0));
                }
                a / b
            }
            BinOp::Mod => {
                if b == 0.0 {
                    warn!(linha = node.line, "módulo por zero avaliado como 0");
                    return Ok(Value::Int(0));
                }
                a % b
            }
            _ => unreachable!("arith only receives arithmetic operators"),
        };

        Ok(Value::Dec(result))
    }

    fn compare(
        &self,
        node: &Node,
        left: &Value,
        right: &Value,
    ) -> Result<std::cmp::Ordering, RuntimeError> {
        if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
            return Ok(a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal));
        }
        if let (Value::Text(a), Value::Text(b)) = (left, right) {
            return Ok(a.cmp(b));
        }
        Err(RuntimeError::at(
            node,
            format!(
                "Não é possível comparar valores do tipo '{}' e '{}'",
                left.type_label(),
                right.type_label()
            ),
        ))
    }

    fn eval_condition(&mut self, cond: &Node) -> Result<bool, RuntimeError> {
        match self.eval(cond)? {
            Value::Bool(value) => Ok(value),
            other => Err(RuntimeError::at(
                cond,
                format!(
                    "Condição deve resultar em valor lógico, encontrado '{}'",
                    other.type_label()
                ),
            )),
        }
    }

    fn to_number(&self, value: &Value, node: &Node) -> Result<f64, RuntimeError> {
        value.as_number().ok_or_else(|| {
            RuntimeError::at(
                node,
                format!("Não é possível converter para número: {}", value),
            )
        })
    }

    fn emit(&mut self, line: String) {
        (self.write)(&line);
        self.output.push(line);
    }
}

/// Integer fast path; `None` on overflow (the caller retries in `f64`).
fn int_arith(node: &Node, op: BinOp, a: i64, b: i64) -> Option<Value> {
    match op {
        BinOp::Add => a.checked_add(b).map(Value::Int),
        BinOp::Sub => a.checked_sub(b).map(Value::Int),
        BinOp::Mul => a.checked_mul(b).map(Value::Int),
        BinOp::Div => {
            if b == 0 {
                warn!(linha = node.line, "divisão por zero avaliada como 0");
                Some(Value::Int(0))
            } else {
                match (a.checked_rem(b), a.checked_div(b)) {
                    (Some(0), Some(quotient)) => Some(Value::Int(quotient)),
                    // Inexact (or overflowing) division promotes to decimal.
                    _ => Some(Value::Dec(a as f64 / b as f64)),
                }
            }
        }
        BinOp::Mod => {
            if b == 0 {
                warn!(linha = node.line, "módulo por zero avaliado como 0");
                Some(Value::Int(0))
            } else {
                // i64::MIN % -1 has remainder zero but overflows checked_rem.
                Some(a.checked_rem(b).map(Value::Int).unwrap_or(Value::Int(0)))
            }
        }
        _ => None,
    }
}

/// `igual`/`diferente` semantics: numeric views compare numerically (so
/// `"5" igual 5` holds), otherwise equality requires matching types.
fn values_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (left.as_number(), right.as_number()) {
        return a == b;
    }
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}
