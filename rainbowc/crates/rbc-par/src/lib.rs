//! rbc-par - Syntactic analyzer for the Rainbow language.
//!
//! A recursive-descent parser with one token of lookahead turns the token
//! stream into an AST. Each non-terminal of the grammar has a parsing
//! method; expression precedence is encoded as one method per level (see
//! `expr.rs`). On malformed input the parser records diagnostics, resumes
//! at the next synchronization point, and still returns the partial tree —
//! it never panics, and it terminates on any input because a statement
//! that consumes nothing forces one token of progress.
//!
//! # Example
//!
//! ```
//! use rbc_par::Parser;
//! use rbc_util::{Handler, Stage};
//!
//! let lex_handler = Handler::new(Stage::Lexical);
//! let (tokens, _) = rbc_lex::lex("RAINBOW.\nmostrar(1).\n", &lex_handler);
//!
//! let handler = Handler::new(Stage::Syntactic);
//! let ast = Parser::new(tokens, &handler).parse();
//! assert!(ast.is_some());
//! assert!(!handler.has_errors());
//! ```

pub mod ast;
mod expr;
mod parser;
pub mod render;

mod edge_cases;

pub use ast::{BinOp, Branch, Literal, Node, NodeKind, TypeName, UnOp};
pub use parser::Parser;
pub use render::render_ast;
