//! Reconstruct, render and re-ingest every sample program
//!
//! A round trip must come back structurally equivalent to what was stored,
//! and rendering must be deterministic.

mod common;

use graft_core::{
    Equivalence, EquivalenceOptions, Layout, PipelineOptions, RenderOptions, TokenPrinter, emit,
    verify_round_trip,
};

fn options(layout: Layout) -> PipelineOptions {
    PipelineOptions {
        render: RenderOptions {
            layout,
            ..RenderOptions::default()
        },
        ..PipelineOptions::default()
    }
}

#[test]
fn test_corpus_round_trips_equivalent() {
    for (name, tree) in common::corpus() {
        let store = common::ingest(&tree);
        let root = common::root_id(&store);
        let report = verify_round_trip(&store, &root, &TokenPrinter::new(), &PipelineOptions::default())
            .unwrap_or_else(|err| panic!("{name}: {err}"));
        assert_eq!(report.equivalence, Equivalence::Equivalent, "{name}");
        assert!(report.diagnostics.is_empty(), "{name}: {:?}", report.diagnostics);
    }
}

#[test]
fn test_round_trip_preserves_comments() {
    let store = common::ingest(&common::exported_template());
    let root = common::root_id(&store);
    let mut options = PipelineOptions::default();
    options.equivalence = EquivalenceOptions {
        compare_comments: true,
    };

    let report = verify_round_trip(&store, &root, &TokenPrinter::new(), &options).unwrap();
    assert!(report.is_equivalent());
    assert!(report.rendered.starts_with("// greeting\n"));
}

#[test]
fn test_every_layout_renders_the_corpus() {
    for layout in Layout::ALL {
        for (name, tree) in common::corpus() {
            let store = common::ingest(&tree);
            let root = common::root_id(&store);
            let first = emit(&store, &root, &TokenPrinter::new(), &options(layout)).unwrap();
            let second = emit(&store, &root, &TokenPrinter::new(), &options(layout)).unwrap();
            assert_eq!(first, second, "{name} ({layout})");
            assert!(!first.trim().is_empty(), "{name} ({layout})");
        }
    }
}

#[test]
fn test_emit_subtree() {
    let store = common::ingest(&common::function_declaration());
    let statement = store
        .nodes()
        .find(|node| node.is(graft_core::TsSyntaxKind::ReturnStatement))
        .unwrap()
        .clone();

    let text = emit(&store, statement.id().as_str(), &TokenPrinter::new(), &options(Layout::Compact)).unwrap();
    assert_eq!(text.trim(), "return a + b;");
}

#[test]
fn test_readable_function() {
    let store = common::ingest(&common::function_declaration());
    let root = common::root_id(&store);
    let text = emit(&store, &root, &TokenPrinter::new(), &options(Layout::Readable)).unwrap();
    insta::assert_snapshot!(text, @r"
    function add(a: number, b: number): number {
      return a + b;
    }
    ");
}

#[test]
fn test_minified_constant() {
    let store = common::ingest(&common::typed_constant());
    let root = common::root_id(&store);
    let text = emit(&store, &root, &TokenPrinter::new(), &options(Layout::Minified)).unwrap();
    assert_eq!(text.trim(), "const answer:number=42;");
}

fn compact(tree: &rowan::GreenNode) -> String {
    let store = common::ingest(tree);
    let root = common::root_id(&store);
    emit(&store, &root, &TokenPrinter::new(), &options(Layout::Compact))
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn test_dotted_namespace_text() {
    assert_eq!(compact(&common::dotted_namespace()), "namespace a.b { let x = 1; }");
}

#[test]
fn test_template_raw_value_is_escaped() {
    assert_eq!(compact(&common::template_constant("a`b")), "const s = `a\\`b`;");
    assert_eq!(compact(&common::template_constant("`")), "const s = `\\``;");
    assert_eq!(compact(&common::template_constant("${x}")), "const s = `\\${x}`;");
    assert_eq!(compact(&common::template_constant("`a\\`b`")), "const s = `a\\`b`;");
}

#[test]
fn test_dangling_else_through_loop_keeps_its_if() {
    assert_eq!(
        compact(&common::dangling_else_in_loop()),
        "if (a) { while (c) if (b) x; } else y;"
    );

    let store = common::ingest(&common::dangling_else_in_loop());
    let root = common::root_id(&store);
    let report = verify_round_trip(&store, &root, &TokenPrinter::new(), &options(Layout::Compact)).unwrap();
    assert!(report.is_equivalent(), "{:?}", report.equivalence);
    assert_eq!(report.rendered.trim(), "if (a) { while (c) if (b) x; } else y;");
}

#[test]
fn test_round_trip_reports_printed_text() {
    for (name, tree) in common::corpus() {
        let store = common::ingest(&tree);
        let root = common::root_id(&store);
        let printed = emit(&store, &root, &TokenPrinter::new(), &PipelineOptions::default()).unwrap();
        let report = verify_round_trip(&store, &root, &TokenPrinter::new(), &PipelineOptions::default())
            .unwrap_or_else(|err| panic!("{name}: {err}"));
        assert_eq!(report.rendered, printed, "{name}");
    }
}
