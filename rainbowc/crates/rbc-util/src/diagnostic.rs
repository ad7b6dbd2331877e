//! Diagnostic collection and rendering.
//!
//! Every pipeline stage accumulates its findings in a [`Handler`] instead of
//! failing early. A stage runs to completion, the driver then queries the
//! handler for the rendered error and warning lists and decides whether the
//! next stage may trust the artifact.
//!
//! Rendered diagnostics use the stable Rainbow report format:
//!
//! ```text
//! Linha: 02 - Coluna: 05 - Erro Sintático: Esperado FIM_LINHA, encontrado SE
//! Linha: 03 - Coluna: 01 - Aviso: Variável '#x' declarada mas não utilizada
//! ```

use std::cell::RefCell;
use std::fmt;

use crate::span::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Prevents the downstream stage from trusting the artifact.
    Error,
    /// Reported but never blocking.
    Warning,
}

/// The pipeline stage a diagnostic originates from.
///
/// The stage selects the label rendered after the position: lexical and
/// semantic errors read `Erro`, syntactic errors read `Erro Sintático`.
/// Warnings always read `Aviso` regardless of stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Syntactic,
    Semantic,
}

/// A single diagnostic with severity and source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub stage: Stage,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    fn label(&self) -> &'static str {
        match (self.level, self.stage) {
            (Level::Warning, _) => "Aviso",
            (Level::Error, Stage::Syntactic) => "Erro Sintático",
            (Level::Error, _) => "Erro",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Linha: {:02} - Coluna: {:02} - {}: {}",
            self.span.line,
            self.span.column,
            self.label(),
            self.message
        )
    }
}

/// Accumulator for the diagnostics of one stage.
///
/// # Examples
///
/// ```
/// use rbc_util::{Handler, Span, Stage};
///
/// let handler = Handler::new(Stage::Lexical);
/// handler.error(Span::new(2, 9), "String não fechada");
/// assert!(handler.has_errors());
/// assert_eq!(handler.error_count(), 1);
/// ```
pub struct Handler {
    stage: Stage,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates an empty handler for the given stage.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Records an error at the given position.
    pub fn error(&self, span: Span, message: impl Into<String>) {
        self.diagnostics.borrow_mut().push(Diagnostic {
            level: Level::Error,
            stage: self.stage,
            span,
            message: message.into(),
        });
    }

    /// Records a warning at the given position.
    pub fn warning(&self, span: Span, message: impl Into<String>) {
        self.diagnostics.borrow_mut().push(Diagnostic {
            level: Level::Warning,
            stage: self.stage,
            span,
            message: message.into(),
        });
    }

    /// Returns true if any error has been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Number of warnings recorded so far.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    /// All diagnostics in the order they were recorded.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Rendered error messages, in order.
    pub fn errors(&self) -> Vec<String> {
        self.rendered(Level::Error)
    }

    /// Rendered warning messages, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.rendered(Level::Warning)
    }

    fn rendered(&self, level: Level) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.to_string())
            .collect()
    }
}
