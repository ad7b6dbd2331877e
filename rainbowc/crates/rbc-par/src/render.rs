//! Indented text rendering of the AST, the body of the `.ast` sidecar.

use std::fmt::Write;

use crate::ast::Node;

/// Renders the tree as indented lines, two spaces per level:
///
/// ```text
/// PROGRAMA: RAINBOW (L:1, C:1)
///   CHAMADA_FUNCAO: mostrar (L:2, C:1)
///     LITERAL: "Olá, mundo!" (L:2, C:9)
/// ```
pub fn render_ast(node: &Node) -> String {
    let mut out = String::new();
    render_node(&mut out, node, 0);
    out
}

fn render_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{}", indent, node.kind_name());
    if let Some(value) = node.value_string() {
        let _ = write!(out, ": {}", value);
    }
    let _ = writeln!(out, " (L:{}, C:{})", node.line, node.column);

    for child in node.children() {
        render_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use rbc_util::{Handler, Stage};

    fn parse(source: &str) -> Node {
        let lex_handler = Handler::new(Stage::Lexical);
        let (tokens, _) = rbc_lex::lex(source, &lex_handler);
        let handler = Handler::new(Stage::Syntactic);
        Parser::new(tokens, &handler).parse().unwrap()
    }

    #[test]
    fn test_render_hello_world() {
        let ast = parse("RAINBOW.\nmostrar(\"oi\").\n");
        let rendered = render_ast(&ast);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "PROGRAMA: RAINBOW (L:1, C:1)");
        assert_eq!(lines[1], "  CHAMADA_FUNCAO: mostrar (L:2, C:1)");
        assert_eq!(lines[2], "    LITERAL: \"oi\" (L:2, C:9)");
    }

    #[test]
    fn test_render_depth_follows_nesting() {
        let ast = parse("RAINBOW.\nse (Verdadeiro) {\nmostrar(1).\n}\n");
        let rendered = render_ast(&ast);
        assert!(rendered.contains("\n  CONDICIONAL: se"));
        assert!(rendered.contains("\n    LITERAL: Verdadeiro"));
        assert!(rendered.contains("\n    BLOCO: bloco"));
        assert!(rendered.contains("\n      CHAMADA_FUNCAO: mostrar"));
    }

    #[test]
    fn test_render_reparse_same_shape() {
        // Rendering is stable: the same source renders identically across
        // parses, so the dump can serve as a structural fingerprint.
        let source = "RAINBOW.\npara #i de 1 ate 3 passo 1 {\nmostrar(#i * 2).\n}\n";
        let first = render_ast(&parse(source));
        let second = render_ast(&parse(source));
        assert_eq!(first, second);
    }
}
