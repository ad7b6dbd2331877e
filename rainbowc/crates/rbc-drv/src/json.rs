//! Machine-readable artifact construction.
//!
//! DTOs mirror the field names of the text reports' vocabulary (`tipo`,
//! `lexema`, `linha`, `coluna`, ...), so both artifact families describe
//! the same data. Serialization stays in the driver; the stage crates know
//! nothing about serde.

use chrono::Local;
use serde::Serialize;
use serde_json::{json, Value};

use rbc_lex::{LexStats, Token, TokenKind};
use rbc_par::{Node, NodeKind};
use rbc_sem::Symbol;

use crate::artifacts::token_total;

fn timestamp() -> String {
    Local::now().to_rfc3339()
}

#[derive(Serialize)]
struct TokenDto<'a> {
    tipo: &'static str,
    lexema: &'a str,
    linha: u32,
    coluna: u32,
}

impl<'a> From<&'a Token> for TokenDto<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            tipo: token.kind.name(),
            lexema: &token.lexeme,
            linha: token.line,
            coluna: token.column,
        }
    }
}

#[derive(Serialize)]
struct SymbolDto<'a> {
    nome: &'a str,
    tipo: &'static str,
    escopo: &'static str,
    linha: u32,
    coluna: u32,
    declarado: bool,
    usado: bool,
    valor_inicial: Option<&'a str>,
}

impl<'a> From<&'a Symbol> for SymbolDto<'a> {
    fn from(symbol: &'a Symbol) -> Self {
        Self {
            nome: &symbol.name,
            tipo: symbol.ty.name(),
            escopo: symbol.scope.name(),
            linha: symbol.line,
            coluna: symbol.column,
            declarado: symbol.declared,
            usado: symbol.used,
            valor_inicial: symbol.initial.as_deref(),
        }
    }
}

fn tokens_value(tokens: &[Token]) -> Value {
    let dtos: Vec<TokenDto> = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(TokenDto::from)
        .collect();
    json!(dtos)
}

fn stats_value(stats: &LexStats) -> Value {
    json!({
        "total_linhas": stats.total_lines,
        "total_caracteres": stats.total_chars,
        "tokens_por_tipo": &stats.tokens_by_kind,
        "palavras_reservadas_usadas": &stats.reserved_used,
        "variaveis_declaradas": &stats.variables_seen,
    })
}

/// Recursive node object: `tipo`, `valor`, `filhos`, `linha`, `coluna`.
fn node_value(node: &Node) -> Value {
    let valor = match &node.kind {
        NodeKind::VarDecl {
            declared_type,
            name,
        } => json!({ "tipo": declared_type.keyword(), "nome": name }),
        _ => json!(node.value_string()),
    };

    let filhos: Vec<Value> = node.children().into_iter().map(node_value).collect();

    json!({
        "tipo": node.kind_name(),
        "valor": valor,
        "filhos": filhos,
        "linha": node.line,
        "coluna": node.column,
    })
}

/// The `.json` document of the lexer stage.
pub(crate) fn lex_document(tokens: &[Token], errors: &[String], stats: &LexStats) -> Value {
    json!({
        "metadata": {
            "timestamp": timestamp(),
            "total_tokens": token_total(tokens),
            "total_erros": errors.len(),
            "estatisticas": stats_value(stats),
        },
        "tokens": tokens_value(tokens),
        "erros": errors,
    })
}

/// The `.ast.json` document of the parser stage.
pub(crate) fn ast_document(ast: Option<&Node>, errors: &[String]) -> Value {
    json!({
        "metadata": {
            "timestamp": timestamp(),
            "total_erros": errors.len(),
        },
        "ast": ast.map(node_value),
        "erros": errors,
    })
}

/// The `.semantic.json` document of the semantic stage.
pub(crate) fn semantic_document(
    symbols: &[Symbol],
    unused_total: usize,
    errors: &[String],
    warnings: &[String],
) -> Value {
    let dtos: Vec<SymbolDto> = symbols.iter().map(SymbolDto::from).collect();

    let mut by_type = std::collections::BTreeMap::new();
    let mut by_scope = std::collections::BTreeMap::new();
    for symbol in symbols {
        *by_type.entry(symbol.ty.name()).or_insert(0usize) += 1;
        *by_scope.entry(symbol.scope.name()).or_insert(0usize) += 1;
    }

    json!({
        "metadata": {
            "timestamp": timestamp(),
            "total_simbolos": symbols.len(),
            "total_erros": errors.len(),
            "total_avisos": warnings.len(),
        },
        "simbolos": dtos,
        "erros": errors,
        "avisos": warnings,
        "estatisticas": {
            "simbolos_por_tipo": by_type,
            "simbolos_por_escopo": by_scope,
            "simbolos_nao_usados": unused_total,
        },
    })
}

/// The combined `.analysis.json` document of the `compile` pipeline.
pub(crate) fn analysis_document(
    tokens: &[Token],
    lex_errors: &[String],
    stats: &LexStats,
    ast: Option<&Node>,
    syntax_errors: &[String],
) -> Value {
    json!({
        "metadata": {
            "timestamp": timestamp(),
            "versao_compilador": env!("CARGO_PKG_VERSION"),
            "linguagem": "Rainbow",
        },
        "analise_lexica": {
            "total_tokens": token_total(tokens),
            "tokens": tokens_value(tokens),
            "erros": lex_errors,
            "estatisticas": stats_value(stats),
        },
        "analise_sintatica": {
            "ast": ast.map(node_value),
            "erros": syntax_errors,
            "sucesso": syntax_errors.is_empty(),
        },
        "resumo": {
            "total_erros_lexicos": lex_errors.len(),
            "total_erros_sintaticos": syntax_errors.len(),
            "compilacao_bem_sucedida": lex_errors.is_empty() && syntax_errors.is_empty(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbc_util::{Handler, Stage};

    fn pipeline(source: &str) -> (Vec<Token>, LexStats, Vec<String>, Option<Node>, Vec<String>) {
        let lex_handler = Handler::new(Stage::Lexical);
        let (tokens, stats) = rbc_lex::lex(source, &lex_handler);
        let parse_handler = Handler::new(Stage::Syntactic);
        let ast = rbc_par::Parser::new(tokens.clone(), &parse_handler).parse();
        (
            tokens,
            stats,
            lex_handler.errors(),
            ast,
            parse_handler.errors(),
        )
    }

    #[test]
    fn test_lex_document_shape() {
        let (tokens, stats, errors, _, _) = pipeline("RAINBOW.\n#a recebe 1.\n");
        let doc = lex_document(&tokens, &errors, &stats);
        assert_eq!(doc["metadata"]["total_erros"], 0);
        assert_eq!(doc["metadata"]["total_tokens"], 6);
        assert_eq!(doc["tokens"][0]["tipo"], "RAINBOW");
        assert_eq!(doc["tokens"][2]["lexema"], "#a");
        assert_eq!(doc["tokens"][2]["linha"], 2);
    }

    #[test]
    fn test_ast_document_nests_children() {
        let (_, _, _, ast, errors) = pipeline("RAINBOW.\nmostrar(1 + 2).\n");
        let doc = ast_document(ast.as_ref(), &errors);
        let call = &doc["ast"]["filhos"][0];
        assert_eq!(call["tipo"], "CHAMADA_FUNCAO");
        assert_eq!(call["valor"], "mostrar");
        assert_eq!(call["filhos"][0]["tipo"], "EXPRESSAO_BINARIA");
        assert_eq!(call["filhos"][0]["valor"], "+");
    }

    #[test]
    fn test_ast_document_null_on_failure() {
        let (_, _, _, ast, errors) = pipeline("mostrar(1).\n");
        let doc = ast_document(ast.as_ref(), &errors);
        assert!(doc["ast"].is_null());
        assert!(doc["metadata"]["total_erros"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn test_vardecl_valor_is_object() {
        let (_, _, _, ast, errors) = pipeline("RAINBOW.\nnumero #x.\n");
        let doc = ast_document(ast.as_ref(), &errors);
        let decl = &doc["ast"]["filhos"][0];
        assert_eq!(decl["valor"]["tipo"], "numero");
        assert_eq!(decl["valor"]["nome"], "#x");
    }

    #[test]
    fn test_analysis_document_summary() {
        let (tokens, stats, lex_errors, ast, syn_errors) =
            pipeline("RAINBOW.\nmostrar(\"oi\").\n");
        let doc = analysis_document(&tokens, &lex_errors, &stats, ast.as_ref(), &syn_errors);
        assert_eq!(doc["metadata"]["linguagem"], "Rainbow");
        assert_eq!(doc["resumo"]["compilacao_bem_sucedida"], true);
        assert_eq!(doc["analise_sintatica"]["sucesso"], true);
    }

    #[test]
    fn test_semantic_document_counts() {
        let source = "RAINBOW.\nnumero #x.\n#a recebe 1.\nmostrar(#a).\n";
        let (_, _, _, ast, _) = pipeline(source);
        let handler = Handler::new(Stage::Semantic);
        let mut analyzer = rbc_sem::Analyzer::new(&handler);
        analyzer.analyze(ast.as_ref());
        let table = analyzer.into_table();

        let doc = semantic_document(
            &table.all_symbols(),
            table.unused_symbols().len(),
            &handler.errors(),
            &handler.warnings(),
        );
        assert_eq!(doc["metadata"]["total_simbolos"], 2);
        assert_eq!(doc["estatisticas"]["simbolos_por_tipo"]["NUMERO"], 2);
        assert_eq!(doc["estatisticas"]["simbolos_nao_usados"], 1);
        assert_eq!(doc["simbolos"][0]["nome"], "#x");
    }
}
