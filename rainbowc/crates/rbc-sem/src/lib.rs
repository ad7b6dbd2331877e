//! rbc-sem - Semantic analyzer for the Rainbow language.
//!
//! Walks the AST with a scoped symbol table, infers types, and checks the
//! language's type rules. Errors and warnings accumulate in the handler;
//! the symbol table — live frames plus the history of popped frames — is
//! part of the output artifact and feeds the `.simbolos` and
//! `.semantic.json` sidecars.
//!
//! # Example
//!
//! ```
//! use rbc_sem::Analyzer;
//! use rbc_util::{Handler, Stage};
//!
//! let lex_handler = Handler::new(Stage::Lexical);
//! let (tokens, _) = rbc_lex::lex("RAINBOW.\nnumero #x.\nmostrar(\"hi\").\n", &lex_handler);
//! let parse_handler = Handler::new(Stage::Syntactic);
//! let ast = rbc_par::Parser::new(tokens, &parse_handler).parse();
//!
//! let handler = Handler::new(Stage::Semantic);
//! let mut analyzer = Analyzer::new(&handler);
//! analyzer.analyze(ast.as_ref());
//!
//! assert!(!handler.has_errors());
//! assert_eq!(handler.warning_count(), 1); // #x declared but never used
//! ```

pub mod analysis;
pub mod table;
pub mod types;

mod edge_cases;

pub use analysis::Analyzer;
pub use table::SymbolTable;
pub use types::{ScopeKind, Symbol, SymbolType};
