//! rbc-int - Tree-walking interpreter for the Rainbow language.
//!
//! Execution is gated on a compile check: the source is lexed and parsed
//! in-process, and any lexical or syntactic error refuses execution with a
//! human-readable message. Semantic warnings never block. The evaluator
//! then walks the AST; there is no re-lexing and no string-splitting
//! expression evaluation.
//!
//! # Example
//!
//! ```
//! use rbc_int::execute;
//!
//! let (ok, output) = execute(
//!     "RAINBOW.\nmostrar(\"Olá, mundo!\").\n",
//!     |_line| {},
//!     |_prompt| String::new(),
//! );
//! assert!(ok);
//! assert_eq!(output, "Olá, mundo!");
//! ```

pub mod env;
pub mod interp;
pub mod value;

pub use env::Environment;
pub use interp::{Interpreter, RuntimeError, MAX_LOOP_ITERATIONS};
pub use value::Value;

use rbc_util::{Handler, Stage};
use tracing::debug;

/// Message returned when the compile gate refuses execution.
pub const COMPILE_GATE_MESSAGE: &str = "Erro na compilação. Verifique os erros.";

/// Compiles and runs a Rainbow program.
///
/// `write` receives each output line as it is produced; `read` services
/// `ler`, mapping a prompt to one line of user text (empty on EOF).
///
/// Returns `(success, aggregated-output-or-error-message)`.
pub fn execute<'io>(
    source: &str,
    write: impl FnMut(&str) + 'io,
    read: impl FnMut(&str) -> String + 'io,
) -> (bool, String) {
    let lex_handler = Handler::new(Stage::Lexical);
    let (tokens, _) = rbc_lex::lex(source, &lex_handler);
    if lex_handler.has_errors() {
        debug!(
            erros = lex_handler.error_count(),
            "execução recusada por erros léxicos"
        );
        return (false, COMPILE_GATE_MESSAGE.to_string());
    }

    let parse_handler = Handler::new(Stage::Syntactic);
    let ast = rbc_par::Parser::new(tokens, &parse_handler).parse();
    let ast = match ast {
        Some(ast) if !parse_handler.has_errors() => ast,
        _ => {
            debug!(
                erros = parse_handler.error_count(),
                "execução recusada por erros sintáticos"
            );
            return (false, COMPILE_GATE_MESSAGE.to_string());
        }
    };

    let mut interpreter = Interpreter::new(write, read);
    match interpreter.run(&ast) {
        Ok(output) => (true, output),
        Err(error) => (false, error.to_string()),
    }
}
