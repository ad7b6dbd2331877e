//! Edge case tests for rbc-par

#[cfg(test)]
mod tests {
    use crate::{Node, NodeKind, Parser};
    use rbc_util::{Handler, Stage};

    fn parse(source: &str) -> (Option<Node>, Handler) {
        let lex_handler = Handler::new(Stage::Lexical);
        let (tokens, _) = rbc_lex::lex(source, &lex_handler);
        let handler = Handler::new(Stage::Syntactic);
        let ast = Parser::new(tokens, &handler).parse();
        (ast, handler)
    }

    fn children(ast: &Node) -> &[Node] {
        match &ast.kind {
            NodeKind::Program(children) => children,
            _ => panic!("expected program"),
        }
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_program_body() {
        let (ast, handler) = parse("RAINBOW.\n");
        assert!(!handler.has_errors());
        assert!(children(&ast.unwrap()).is_empty());
    }

    #[test]
    fn test_edge_empty_source() {
        let (ast, handler) = parse("");
        assert!(ast.is_none());
        assert!(handler.errors()[0].contains("Programa deve começar com 'RAINBOW'"));
    }

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let source = "RAINBOW.\n\
            se (Verdadeiro) {\n\
            se (Verdadeiro) {\n\
            se (Verdadeiro) {\n\
            mostrar(1).\n\
            }\n\
            }\n\
            }\n";
        let (ast, handler) = parse(source);
        assert!(!handler.has_errors(), "{:?}", handler.errors());
        assert_eq!(children(&ast.unwrap()).len(), 1);
    }

    #[test]
    fn test_edge_mostrar_without_argument() {
        let (ast, handler) = parse("RAINBOW.\nmostrar().\n");
        assert!(!handler.has_errors());
        let ast = ast.unwrap();
        assert!(matches!(
            &children(&ast)[0].kind,
            NodeKind::Call { args, .. } if args.is_empty()
        ));
    }

    #[test]
    fn test_edge_ler_statement_form() {
        let (ast, handler) = parse("RAINBOW.\nler(\"tecle enter\").\n");
        assert!(!handler.has_errors());
        assert!(matches!(
            &children(&ast.unwrap())[0].kind,
            NodeKind::Call { name, .. } if name == "ler"
        ));
    }

    #[test]
    fn test_edge_assign_from_ler() {
        let (ast, handler) = parse("RAINBOW.\n#nome recebe ler(\"Nome: \").\n");
        assert!(!handler.has_errors());
        match &children(&ast.unwrap())[0].kind {
            NodeKind::Assign { value, .. } => {
                assert!(matches!(&value.kind, NodeKind::Call { name, .. } if name == "ler"));
            }
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn test_edge_unclosed_block_at_eof_is_lexers_problem() {
        // The brace balance error belongs to the lexer; the parser closes
        // the block silently at EOF.
        let (ast, handler) = parse("RAINBOW.\nse (#t > 0) {\nmostrar(1).\n");
        assert!(!handler.has_errors(), "{:?}", handler.errors());
        assert!(ast.is_some());
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_err_senaose_requires_parens() {
        let source = "RAINBOW.\nse (#a > 1) {\nmostrar(1).\n} senaose #a igual 1 {\nmostrar(2).\n}\n";
        let (_, handler) = parse(source);
        assert!(handler
            .errors()
            .iter()
            .any(|e| e.contains("Esperado ABRE_PARENTESES")));
    }

    #[test]
    fn test_err_partial_tree_with_errors() {
        let source = "RAINBOW.\n#a recebe .\nmostrar(7).\n";
        let (ast, handler) = parse(source);
        assert!(handler.has_errors());
        // The bad assignment is dropped, the valid call survives.
        let ast = ast.unwrap();
        assert_eq!(children(&ast).len(), 1);
    }

    #[test]
    fn test_err_decl_without_variable() {
        let (_, handler) = parse("RAINBOW.\nnumero recebe 1.\n");
        assert!(handler
            .errors()
            .iter()
            .any(|e| e.contains("Esperado nome de variável após tipo")));
    }

    #[test]
    fn test_err_para_without_variable() {
        let (_, handler) = parse("RAINBOW.\npara de 1 ate 3 passo 1 {\n}\n");
        assert!(handler
            .errors()
            .iter()
            .any(|e| e.contains("Esperado variável após 'para'")));
    }

    #[test]
    fn test_err_missing_block_brace() {
        let (_, handler) = parse("RAINBOW.\nenquanto (#a < 1)\nmostrar(1).\n");
        assert!(handler
            .errors()
            .iter()
            .any(|e| e.contains("Esperado '{' para início do bloco")));
    }

    #[test]
    fn test_err_statement_inside_block_recovers() {
        let source = "RAINBOW.\nse (Verdadeiro) {\nde.\nmostrar(1).\n}\n";
        let (ast, handler) = parse(source);
        assert!(handler.has_errors());
        let ast = ast.unwrap();
        match &children(&ast)[0].kind {
            NodeKind::If { branches, .. } => match &branches[0].block.kind {
                NodeKind::Block(statements) => assert_eq!(statements.len(), 1),
                _ => panic!("expected block"),
            },
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn test_err_every_error_carries_position() {
        let (_, handler) = parse("RAINBOW.\n#a recebe\nmostrar(1)\n");
        for error in handler.errors() {
            assert!(error.starts_with("Linha: "), "{}", error);
        }
    }

    #[test]
    fn test_err_terminates_on_token_soup() {
        let (_, handler) = parse("RAINBOW.\n{ . } ( ) se { } para enquanto mostrar ler , de\n");
        assert!(handler.has_errors());
    }
}
