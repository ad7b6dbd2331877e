//! Text sidecar formatting.
//!
//! Every report opens with a banner plus a generation timestamp and closes
//! with a `=== RESUMO ===` footer. Formats are stable: tests and external
//! tooling parse them.

use std::fmt::Write;

use chrono::Local;
use rbc_lex::{LexStats, Token, TokenKind};
use rbc_par::Node;
use rbc_sem::Symbol;

pub(crate) fn stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {} ===", title);
    let _ = writeln!(out, "Gerado em: {}", stamp());
    let _ = writeln!(out);
}

/// Non-EOF token count, the total every report quotes.
pub(crate) fn token_total(tokens: &[Token]) -> usize {
    tokens.iter().filter(|t| t.kind != TokenKind::Eof).count()
}

/// The `.tokens` report: one line per token plus summary.
pub(crate) fn tokens_report(tokens: &[Token], stats: &LexStats) -> String {
    let mut out = String::new();
    header(&mut out, "RELATÓRIO DE TOKENS");

    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let _ = writeln!(out, "{}", token);
    }

    let _ = writeln!(out, "\n=== RESUMO ===");
    let _ = writeln!(out, "Total de tokens: {}", token_total(tokens));
    let _ = writeln!(out, "Total de linhas: {}", stats.total_lines);
    let _ = writeln!(out, "Total de caracteres: {}", stats.total_chars);
    out
}

/// The `.errors` report for lexical diagnostics.
pub(crate) fn lex_errors_report(errors: &[String]) -> String {
    let mut out = String::new();
    header(&mut out, "RELATÓRIO DE ERROS");

    if errors.is_empty() {
        let _ = writeln!(out, "Nenhum erro encontrado!");
    } else {
        for error in errors {
            let _ = writeln!(out, "{}", error);
        }
    }

    let _ = writeln!(out, "\n=== RESUMO ===");
    let _ = writeln!(out, "Total de erros: {}", errors.len());
    out
}

/// The `.stats` report: metrics, distribution, vocabulary.
pub(crate) fn stats_report(tokens: &[Token], errors: &[String], stats: &LexStats) -> String {
    let total = token_total(tokens);
    let rate = errors.len() as f64 / (total.max(1)) as f64 * 100.0;

    let mut out = String::new();
    header(&mut out, "ESTATÍSTICAS DA ANÁLISE LÉXICA");

    let _ = writeln!(out, "=== MÉTRICAS GERAIS ===");
    let _ = writeln!(out, "Total de linhas: {}", stats.total_lines);
    let _ = writeln!(out, "Total de caracteres: {}", stats.total_chars);
    let _ = writeln!(out, "Total de tokens: {}", total);
    let _ = writeln!(out, "Total de erros: {}", errors.len());
    let _ = writeln!(out, "Taxa de erro: {:.2}%\n", rate);

    let _ = writeln!(out, "=== DISTRIBUIÇÃO DE TOKENS ===");
    for (kind, count) in &stats.tokens_by_kind {
        if *kind != "EOF" {
            let _ = writeln!(out, "{}: {}", kind, count);
        }
    }

    let _ = writeln!(out, "\n=== PALAVRAS RESERVADAS UTILIZADAS ===");
    for word in &stats.reserved_used {
        let _ = writeln!(out, "- {}", word);
    }

    let _ = writeln!(out, "\n=== VARIÁVEIS DECLARADAS ===");
    for var in &stats.variables_seen {
        let _ = writeln!(out, "- {}", var);
    }
    out
}

/// The `.ast` report: indented tree dump.
pub(crate) fn ast_report(ast: Option<&Node>) -> String {
    let mut out = String::new();
    header(&mut out, "ÁRVORE SINTÁTICA ABSTRATA");

    match ast {
        Some(node) => out.push_str(&rbc_par::render_ast(node)),
        None => {
            let _ = writeln!(out, "AST não foi gerada devido a erros.");
        }
    }
    out
}

/// The `.syntax.errors` report.
pub(crate) fn syntax_errors_report(errors: &[String]) -> String {
    let mut out = String::new();
    header(&mut out, "RELATÓRIO DE ERROS SINTÁTICOS");

    if errors.is_empty() {
        let _ = writeln!(out, "Nenhum erro sintático encontrado!");
    } else {
        for error in errors {
            let _ = writeln!(out, "{}", error);
        }
    }

    let _ = writeln!(out, "\n=== RESUMO ===");
    let _ = writeln!(out, "Total de erros sintáticos: {}", errors.len());
    out
}

/// The `.simbolos` report: symbol list with usage markers.
pub(crate) fn symbols_report(
    symbols: &[Symbol],
    unused: &[Symbol],
    error_total: usize,
    warning_total: usize,
) -> String {
    let mut out = String::new();
    header(&mut out, "TABELA DE SÍMBOLOS");

    if symbols.is_empty() {
        let _ = writeln!(out, "Nenhum símbolo declarado.");
    } else {
        let mut sorted: Vec<&Symbol> = symbols.iter().collect();
        sorted.sort_by_key(|s| (s.line, s.column));

        let _ = writeln!(out, "=== SÍMBOLOS DECLARADOS ===");
        for symbol in sorted {
            let marker = if symbol.used { "✓" } else { "✗" };
            let _ = writeln!(
                out,
                "{} {} | Tipo: {} | Escopo: {} | Linha: {:02}, Coluna: {:02}",
                marker, symbol.name, symbol.ty, symbol.scope, symbol.line, symbol.column
            );
        }

        if !unused.is_empty() {
            let _ = writeln!(out, "\n=== SÍMBOLOS NÃO UTILIZADOS ===");
            for symbol in unused {
                let _ = writeln!(out, "- {} (Linha: {:02})", symbol.name, symbol.line);
            }
        }
    }

    let _ = writeln!(out, "\n=== RESUMO ===");
    let _ = writeln!(out, "Total de símbolos: {}", symbols.len());
    let _ = writeln!(out, "Total de erros: {}", error_total);
    let _ = writeln!(out, "Total de avisos: {}", warning_total);
    out
}

/// The `.semantic.errors` report: errors, then warnings when present.
pub(crate) fn semantic_errors_report(errors: &[String], warnings: &[String]) -> String {
    let mut out = String::new();
    header(&mut out, "RELATÓRIO DE ERROS SEMÂNTICOS");

    if errors.is_empty() {
        let _ = writeln!(out, "Nenhum erro semântico encontrado!");
    } else {
        let _ = writeln!(out, "=== ERROS ===");
        for error in errors {
            let _ = writeln!(out, "{}", error);
        }
    }

    if !warnings.is_empty() {
        let _ = writeln!(out, "\n=== AVISOS ===");
        for warning in warnings {
            let _ = writeln!(out, "{}", warning);
        }
    }

    let _ = writeln!(out, "\n=== RESUMO ===");
    let _ = writeln!(out, "Total de erros semânticos: {}", errors.len());
    let _ = writeln!(out, "Total de avisos: {}", warnings.len());
    out
}
