//! rbc-drv - Pipeline driver for the Rainbow compiler.
//!
//! Orchestrates the stages and writes their artifacts. Each stage command
//! follows the same shape: read the source, run the stage (and whatever it
//! depends on), write the sidecar files next to the source, echo
//! diagnostics to stderr, and report whether the stage was clean — the
//! binary turns that into the exit code. Warnings never affect it.

mod artifacts;
mod json;

pub mod error;

pub use error::{RbcError, Result};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use rbc_lex::{LexStats, Token};
use rbc_par::Node;
use rbc_sem::Symbol;
use rbc_util::{Handler, Stage};

/// Lexer stage output.
pub struct LexAnalysis {
    pub tokens: Vec<Token>,
    pub stats: LexStats,
    pub errors: Vec<String>,
}

/// Parser stage output.
pub struct ParseAnalysis {
    pub ast: Option<Node>,
    pub errors: Vec<String>,
}

/// Semantic stage output.
pub struct SemAnalysis {
    pub symbols: Vec<Symbol>,
    pub unused: Vec<Symbol>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Runs the lexer over `source`.
pub fn lex_source(source: &str) -> LexAnalysis {
    let handler = Handler::new(Stage::Lexical);
    let (tokens, stats) = rbc_lex::lex(source, &handler);
    debug!(tokens = tokens.len(), erros = handler.error_count(), "análise léxica concluída");
    LexAnalysis {
        tokens,
        stats,
        errors: handler.errors(),
    }
}

/// Runs the parser over a token stream.
pub fn parse_tokens(tokens: Vec<Token>) -> ParseAnalysis {
    let handler = Handler::new(Stage::Syntactic);
    let ast = rbc_par::Parser::new(tokens, &handler).parse();
    debug!(erros = handler.error_count(), "análise sintática concluída");
    ParseAnalysis {
        ast,
        errors: handler.errors(),
    }
}

/// Runs the semantic analyzer over a (possibly missing) AST.
pub fn analyze_ast(ast: Option<&Node>) -> SemAnalysis {
    let handler = Handler::new(Stage::Semantic);
    let mut analyzer = rbc_sem::Analyzer::new(&handler);
    analyzer.analyze(ast);
    let table = analyzer.into_table();
    debug!(
        erros = handler.error_count(),
        avisos = handler.warning_count(),
        "análise semântica concluída"
    );
    SemAnalysis {
        unused: table.unused_symbols().into_iter().cloned().collect(),
        symbols: table.all_symbols(),
        errors: handler.errors(),
        warnings: handler.warnings(),
    }
}

/// `lex <file>`: tokens, errors, stats and JSON sidecars.
///
/// Returns true when the stage found no lexical errors.
pub fn lex_command(path: &Path) -> Result<bool> {
    let source = read_source(path)?;
    let lex = lex_source(&source);
    echo(&lex.errors);

    write_artifact(
        &sidecar(path, "tokens"),
        artifacts::tokens_report(&lex.tokens, &lex.stats),
    )?;
    write_artifact(
        &sidecar(path, "errors"),
        artifacts::lex_errors_report(&lex.errors),
    )?;
    write_artifact(
        &sidecar(path, "stats"),
        artifacts::stats_report(&lex.tokens, &lex.errors, &lex.stats),
    )?;
    write_json(
        &sidecar(path, "json"),
        &json::lex_document(&lex.tokens, &lex.errors, &lex.stats),
    )?;

    Ok(lex.errors.is_empty())
}

/// `parse <file>`: AST dump, AST JSON and syntax-error sidecars.
///
/// Returns true when the stage found no syntax errors; lexical errors are
/// echoed but judged by the `lex` command.
pub fn parse_command(path: &Path) -> Result<bool> {
    let source = read_source(path)?;
    let lex = lex_source(&source);
    echo(&lex.errors);
    let parse = parse_tokens(lex.tokens);
    echo(&parse.errors);

    write_artifact(&sidecar(path, "ast"), artifacts::ast_report(parse.ast.as_ref()))?;
    write_json(
        &sidecar(path, "ast.json"),
        &json::ast_document(parse.ast.as_ref(), &parse.errors),
    )?;
    write_artifact(
        &sidecar(path, "syntax.errors"),
        artifacts::syntax_errors_report(&parse.errors),
    )?;

    Ok(parse.errors.is_empty())
}

/// `analyze <file>`: symbol table, semantic errors and JSON sidecars.
///
/// The analyzer runs even over a partial or missing AST, so a symbol
/// table is always produced. Returns true when there are no semantic
/// errors; warnings never fail the stage.
pub fn analyze_command(path: &Path) -> Result<bool> {
    let source = read_source(path)?;
    let lex = lex_source(&source);
    let parse = parse_tokens(lex.tokens);
    let sem = analyze_ast(parse.ast.as_ref());
    echo(&sem.errors);
    echo(&sem.warnings);

    write_artifact(
        &sidecar(path, "simbolos"),
        artifacts::symbols_report(
            &sem.symbols,
            &sem.unused,
            sem.errors.len(),
            sem.warnings.len(),
        ),
    )?;
    write_artifact(
        &sidecar(path, "semantic.errors"),
        artifacts::semantic_errors_report(&sem.errors, &sem.warnings),
    )?;
    write_json(
        &sidecar(path, "semantic.json"),
        &json::semantic_document(&sem.symbols, sem.unused.len(), &sem.errors, &sem.warnings),
    )?;

    Ok(sem.errors.is_empty())
}

/// `compile <file>`: the lexer and parser stages plus the combined
/// `.analysis.json`.
///
/// Returns true only when both stages are clean.
pub fn compile_command(path: &Path) -> Result<bool> {
    let source = read_source(path)?;
    let lex = lex_source(&source);
    echo(&lex.errors);
    let parse = parse_tokens(lex.tokens.clone());
    echo(&parse.errors);

    write_artifact(
        &sidecar(path, "tokens"),
        artifacts::tokens_report(&lex.tokens, &lex.stats),
    )?;
    write_artifact(
        &sidecar(path, "errors"),
        artifacts::lex_errors_report(&lex.errors),
    )?;
    write_artifact(
        &sidecar(path, "stats"),
        artifacts::stats_report(&lex.tokens, &lex.errors, &lex.stats),
    )?;
    write_json(
        &sidecar(path, "json"),
        &json::lex_document(&lex.tokens, &lex.errors, &lex.stats),
    )?;
    write_artifact(&sidecar(path, "ast"), artifacts::ast_report(parse.ast.as_ref()))?;
    write_json(
        &sidecar(path, "ast.json"),
        &json::ast_document(parse.ast.as_ref(), &parse.errors),
    )?;
    write_artifact(
        &sidecar(path, "syntax.errors"),
        artifacts::syntax_errors_report(&parse.errors),
    )?;
    write_json(
        &sidecar(path, "analysis.json"),
        &json::analysis_document(
            &lex.tokens,
            &lex.errors,
            &lex.stats,
            parse.ast.as_ref(),
            &parse.errors,
        ),
    )?;

    Ok(lex.errors.is_empty() && parse.errors.is_empty())
}

/// `run <file>`: compile gate plus execution against stdin/stdout.
///
/// Output lines stream to stdout as they are produced; on failure the
/// error message lands on stderr. Returns true on successful execution.
pub fn run_command(path: &Path) -> Result<bool> {
    use std::io::{BufRead, Write};

    let source = read_source(path)?;

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();

    let (ok, message) = rbc_int::execute(
        &source,
        |line| println!("{}", line),
        |prompt| {
            let mut out = stdout.lock();
            let _ = write!(out, "{}", prompt);
            let _ = out.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(_) => line.trim_end_matches(['\n', '\r']).to_string(),
                Err(_) => String::new(),
            }
        },
    );

    if !ok {
        eprintln!("{}", message);
    }

    Ok(ok)
}

/// Builds the sidecar path: same directory and stem, stage extension.
fn sidecar(path: &Path, extension: &str) -> PathBuf {
    path.with_extension(extension)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RbcError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents).map_err(|source| RbcError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!(arquivo = %path.display(), "artefato gerado");
    Ok(())
}

fn write_json(path: &Path, document: &serde_json::Value) -> Result<()> {
    let contents = serde_json::to_string_pretty(document)?;
    fs::write(path, contents).map_err(|source| RbcError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!(arquivo = %path.display(), "artefato gerado");
    Ok(())
}

fn echo(messages: &[String]) {
    for message in messages {
        eprintln!("{}", message);
    }
}
