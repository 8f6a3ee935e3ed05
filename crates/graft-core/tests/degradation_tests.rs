//! One unsupported construct must not take its neighbours down with it

mod common;

use common::{block, expression_statement, ident, list, n, num, source_file, t, variable};
use graft_core::cst::TsSyntaxKind as K;
use graft_core::{
    DiagnosticCode, ErrorKind, GraftError, Layout, PipelineOptions, Printer, ReconstructOptions, RenderOptions,
    TokenPrinter, emit, reconstruct, validate,
};
use rowan::{GreenToken, NodeOrToken, SyntaxKind};

/// `let a = 1; <br/>; let b = 2;`
fn program_with_jsx() -> rowan::GreenNode {
    let jsx = n(
        K::JsxSelfClosingElement,
        vec![t(K::LessThan), ident("br"), t(K::Slash), t(K::GreaterThan)],
    );
    source_file(vec![
        variable(K::LetKw, "a", num("1")),
        expression_statement(jsx),
        variable(K::LetKw, "b", num("2")),
    ])
}

#[test]
fn test_siblings_survive_unsupported_kind() {
    let store = common::ingest(&program_with_jsx());
    let root = common::root_id(&store);

    let reconstruction = reconstruct(&store, &root, &ReconstructOptions::default()).unwrap();
    let text = reconstruction.text();
    assert!(text.contains("leta=1;"), "{text}");
    assert!(text.contains("/* unsupported: JsxSelfClosingElement */;"), "{text}");
    assert!(text.contains("letb=2;"), "{text}");

    let unsupported: Vec<_> = reconstruction
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.code == DiagnosticCode::UnsupportedKind)
        .collect();
    assert_eq!(unsupported.len(), 1);
    assert_eq!(unsupported[0].kind_name, "JsxSelfClosingElement");
}

#[test]
fn test_validator_lists_the_placeholder() {
    let store = common::ingest(&program_with_jsx());
    let root = common::root_id(&store);
    let reconstruction = reconstruct(&store, &root, &ReconstructOptions::default()).unwrap();

    let err = validate(&reconstruction).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedKind);
    match err {
        GraftError::Unsupported { root_id, occurrences } => {
            assert_eq!(root_id.as_str(), root);
            assert_eq!(occurrences.len(), 1);
            assert_eq!(occurrences[0].kind_name, "Placeholder");
            assert_eq!(
                occurrences[0].path.last().map(String::as_str),
                Some("Placeholder")
            );
            assert!(occurrences[0].path.contains(&"ExpressionStatement".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_emit_refuses_unsupported_output() {
    let store = common::ingest(&program_with_jsx());
    let root = common::root_id(&store);
    let err = emit(&store, &root, &TokenPrinter::new(), &PipelineOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedKind);
    assert!(err.to_string().contains("1 unsupported element"));
}

#[test]
fn test_supported_sibling_emits_alone() {
    let store = common::ingest(&program_with_jsx());
    let last = store
        .nodes()
        .filter(|node| node.is(K::VariableStatement))
        .last()
        .unwrap()
        .clone();

    let text = emit(&store, last.id().as_str(), &TokenPrinter::new(), &PipelineOptions::default()).unwrap();
    assert_eq!(text.trim(), "let b = 2;");
}

/// `<4242> function f() {}` where 4242 is a kind outside the grammar
fn function_after_unknown_kind() -> rowan::GreenNode {
    let unknown = NodeOrToken::Token(GreenToken::new(SyntaxKind(4242), ""));
    source_file(vec![n(
        K::FunctionDeclaration,
        vec![
            unknown,
            t(K::FunctionKw),
            ident("f"),
            t(K::OpenParen),
            list(vec![]),
            t(K::CloseParen),
            block(vec![]),
        ],
    )])
}

#[test]
fn test_unknown_kind_does_not_take_a_header_slot() {
    let store = common::ingest(&function_after_unknown_kind());
    let root = common::root_id(&store);

    let reconstruction = reconstruct(&store, &root, &ReconstructOptions::default()).unwrap();
    assert_eq!(
        reconstruction.text(),
        "/* unsupported: Unknown(4242) */functionf(){}"
    );
    assert_eq!(reconstruction.diagnostics.len(), 1);
    assert_eq!(reconstruction.diagnostics[0].kind_name, "Unknown(4242)");

    let compact = RenderOptions {
        layout: Layout::Compact,
        ..RenderOptions::default()
    };
    let text = TokenPrinter::new().render(&reconstruction.green, &compact).unwrap();
    assert_eq!(text.trim(), "/* unsupported: Unknown(4242) */ function f() {}");
}
