//! Shared fixtures: small TypeScript programs as concrete trees, ingested
//! into stores the way a parser front end would deliver them

#![allow(dead_code)]

use graft_core::cst::TsSyntaxKind as K;
use graft_core::cst::green::{self, GreenElement};
use graft_core::{CstIngester, Store};
use rowan::GreenNode;

pub fn t(kind: K) -> GreenElement {
    green::canonical(kind)
}

pub fn ident(name: &str) -> GreenElement {
    green::token(K::Identifier, name)
}

pub fn num(text: &str) -> GreenElement {
    green::token(K::NumericLiteral, text)
}

pub fn string(text: &str) -> GreenElement {
    green::token(K::StringLiteral, text)
}

pub fn comment(text: &str) -> GreenElement {
    green::token(K::SingleLineComment, text)
}

pub fn n(kind: K, children: Vec<GreenElement>) -> GreenElement {
    green::node(kind, children)
}

pub fn list(children: Vec<GreenElement>) -> GreenElement {
    n(K::SyntaxList, children)
}

pub fn block(statements: Vec<GreenElement>) -> GreenElement {
    n(K::Block, vec![t(K::OpenBrace), list(statements), t(K::CloseBrace)])
}

pub fn binary(left: GreenElement, op: K, right: GreenElement) -> GreenElement {
    n(K::BinaryExpression, vec![left, t(op), right])
}

pub fn expression_statement(expr: GreenElement) -> GreenElement {
    n(K::ExpressionStatement, vec![expr, t(K::Semicolon)])
}

pub fn parameter(name: &str, ty: K) -> GreenElement {
    n(K::Parameter, vec![ident(name), t(K::Colon), t(ty)])
}

/// `keyword name = value;`
pub fn variable(keyword: K, name: &str, value: GreenElement) -> GreenElement {
    n(
        K::VariableStatement,
        vec![
            n(
                K::VariableDeclarationList,
                vec![
                    t(keyword),
                    list(vec![n(K::VariableDeclaration, vec![ident(name), t(K::Equals), value])]),
                ],
            ),
            t(K::Semicolon),
        ],
    )
}

pub fn source_file(statements: Vec<GreenElement>) -> GreenNode {
    n(K::SourceFile, vec![list(statements), t(K::EndOfFile)])
        .into_node()
        .unwrap()
}

/// `const answer: number = 42;`
pub fn typed_constant() -> GreenNode {
    source_file(vec![n(
        K::VariableStatement,
        vec![
            n(
                K::VariableDeclarationList,
                vec![
                    t(K::ConstKw),
                    list(vec![n(
                        K::VariableDeclaration,
                        vec![ident("answer"), t(K::Colon), t(K::NumberKw), t(K::Equals), num("42")],
                    )]),
                ],
            ),
            t(K::Semicolon),
        ],
    )])
}

/// `function add(a: number, b: number): number { return a + b; }`
pub fn function_declaration() -> GreenNode {
    source_file(vec![n(
        K::FunctionDeclaration,
        vec![
            t(K::FunctionKw),
            ident("add"),
            t(K::OpenParen),
            list(vec![
                parameter("a", K::NumberKw),
                t(K::Comma),
                parameter("b", K::NumberKw),
            ]),
            t(K::CloseParen),
            t(K::Colon),
            t(K::NumberKw),
            block(vec![n(
                K::ReturnStatement,
                vec![
                    t(K::ReturnKw),
                    binary(ident("a"), K::Plus, ident("b")),
                    t(K::Semicolon),
                ],
            )]),
        ],
    )])
}

/// `if (a > b) { max = a; } else { max = b; }`
pub fn if_else() -> GreenNode {
    source_file(vec![n(
        K::IfStatement,
        vec![
            t(K::IfKw),
            t(K::OpenParen),
            binary(ident("a"), K::GreaterThan, ident("b")),
            t(K::CloseParen),
            block(vec![expression_statement(binary(ident("max"), K::Equals, ident("a")))]),
            t(K::ElseKw),
            block(vec![expression_statement(binary(ident("max"), K::Equals, ident("b")))]),
        ],
    )])
}

/// `let total = 0; for (let i = 0; i < 10; i++) { total += i; }`
pub fn counting_loop() -> GreenNode {
    source_file(vec![
        variable(K::LetKw, "total", num("0")),
        n(
            K::ForStatement,
            vec![
                t(K::ForKw),
                t(K::OpenParen),
                n(
                    K::VariableDeclarationList,
                    vec![
                        t(K::LetKw),
                        list(vec![n(K::VariableDeclaration, vec![ident("i"), t(K::Equals), num("0")])]),
                    ],
                ),
                t(K::Semicolon),
                binary(ident("i"), K::LessThan, num("10")),
                t(K::Semicolon),
                n(K::PostfixUnaryExpression, vec![ident("i"), t(K::PlusPlus)]),
                t(K::CloseParen),
                block(vec![expression_statement(binary(ident("total"), K::PlusEquals, ident("i")))]),
            ],
        ),
    ])
}

/// `class Counter extends Base { private count = 0; increment(): void { this.count++; } }`
pub fn class_declaration() -> GreenNode {
    let property = n(
        K::PropertyDeclaration,
        vec![
            list(vec![t(K::PrivateKw)]),
            ident("count"),
            t(K::Equals),
            num("0"),
            t(K::Semicolon),
        ],
    );
    let this_count = n(
        K::PropertyAccessExpression,
        vec![t(K::ThisKw), t(K::Dot), ident("count")],
    );
    let method = n(
        K::MethodDeclaration,
        vec![
            ident("increment"),
            t(K::OpenParen),
            list(vec![]),
            t(K::CloseParen),
            t(K::Colon),
            t(K::VoidKw),
            block(vec![expression_statement(n(
                K::PostfixUnaryExpression,
                vec![this_count, t(K::PlusPlus)],
            ))]),
        ],
    );
    source_file(vec![n(
        K::ClassDeclaration,
        vec![
            t(K::ClassKw),
            ident("Counter"),
            list(vec![n(
                K::HeritageClause,
                vec![
                    t(K::ExtendsKw),
                    list(vec![n(K::ExpressionWithTypeArguments, vec![ident("Base")])]),
                ],
            )]),
            t(K::OpenBrace),
            list(vec![property, method]),
            t(K::CloseBrace),
        ],
    )])
}

/// `interface Shape { readonly name: string; area(): number; }`
pub fn interface_declaration() -> GreenNode {
    source_file(vec![n(
        K::InterfaceDeclaration,
        vec![
            t(K::InterfaceKw),
            ident("Shape"),
            t(K::OpenBrace),
            list(vec![
                n(
                    K::PropertySignature,
                    vec![
                        list(vec![t(K::ReadonlyKw)]),
                        ident("name"),
                        t(K::Colon),
                        t(K::StringKw),
                        t(K::Semicolon),
                    ],
                ),
                n(
                    K::MethodSignature,
                    vec![
                        ident("area"),
                        t(K::OpenParen),
                        list(vec![]),
                        t(K::CloseParen),
                        t(K::Colon),
                        t(K::NumberKw),
                        t(K::Semicolon),
                    ],
                ),
            ]),
            t(K::CloseBrace),
        ],
    )])
}

/// `type Id = string | number;`
pub fn type_alias() -> GreenNode {
    source_file(vec![n(
        K::TypeAliasDeclaration,
        vec![
            t(K::TypeKw),
            ident("Id"),
            t(K::Equals),
            n(K::UnionType, vec![list(vec![t(K::StringKw), t(K::Bar), t(K::NumberKw)])]),
            t(K::Semicolon),
        ],
    )])
}

/// `import { readFile as read, join } from "fs";`
pub fn named_import() -> GreenNode {
    source_file(vec![n(
        K::ImportDeclaration,
        vec![
            t(K::ImportKw),
            n(
                K::ImportClause,
                vec![n(
                    K::NamedImports,
                    vec![
                        t(K::OpenBrace),
                        list(vec![
                            n(K::ImportSpecifier, vec![ident("readFile"), t(K::AsKw), ident("read")]),
                            t(K::Comma),
                            n(K::ImportSpecifier, vec![ident("join")]),
                        ]),
                        t(K::CloseBrace),
                    ],
                )],
            ),
            t(K::FromKw),
            string("\"fs\""),
            t(K::Semicolon),
        ],
    )])
}

/// ``// greeting\nexport const greeting = `hello ${name}!`;``
pub fn exported_template() -> GreenNode {
    let template = n(
        K::TemplateExpression,
        vec![
            green::token(K::TemplateHead, "`hello ${"),
            list(vec![n(
                K::TemplateSpan,
                vec![ident("name"), green::token(K::TemplateTail, "}!`")],
            )]),
        ],
    );
    source_file(vec![
        comment("// greeting"),
        n(
            K::VariableStatement,
            vec![
                list(vec![t(K::ExportKw)]),
                n(
                    K::VariableDeclarationList,
                    vec![
                        t(K::ConstKw),
                        list(vec![n(
                            K::VariableDeclaration,
                            vec![ident("greeting"), t(K::Equals), template],
                        )]),
                    ],
                ),
                t(K::Semicolon),
            ],
        ),
    ])
}

/// `namespace a.b { let x = 1; }`
pub fn dotted_namespace() -> GreenNode {
    let body = n(
        K::ModuleBlock,
        vec![t(K::OpenBrace), list(vec![variable(K::LetKw, "x", num("1"))]), t(K::CloseBrace)],
    );
    let inner = n(K::ModuleDeclaration, vec![ident("b"), body]);
    source_file(vec![n(
        K::ModuleDeclaration,
        vec![t(K::NamespaceKw), ident("a"), t(K::Dot), inner],
    )])
}

/// `const s = <template>;`, the template token spelled exactly as `raw`
pub fn template_constant(raw: &str) -> GreenNode {
    source_file(vec![variable(
        K::ConstKw,
        "s",
        green::token(K::NoSubstitutionTemplateLiteral, raw),
    )])
}

/// `if (a) while (c) if (b) x; else y;` where the `else` belongs to the
/// outer `if`
pub fn dangling_else_in_loop() -> GreenNode {
    let inner_if = n(
        K::IfStatement,
        vec![
            t(K::IfKw),
            t(K::OpenParen),
            ident("b"),
            t(K::CloseParen),
            expression_statement(ident("x")),
        ],
    );
    let loop_ = n(
        K::WhileStatement,
        vec![t(K::WhileKw), t(K::OpenParen), ident("c"), t(K::CloseParen), inner_if],
    );
    source_file(vec![n(
        K::IfStatement,
        vec![
            t(K::IfKw),
            t(K::OpenParen),
            ident("a"),
            t(K::CloseParen),
            loop_,
            t(K::ElseKw),
            expression_statement(ident("y")),
        ],
    )])
}

/// Every sample program, by name
pub fn corpus() -> Vec<(&'static str, GreenNode)> {
    vec![
        ("typed constant", typed_constant()),
        ("function declaration", function_declaration()),
        ("if else", if_else()),
        ("counting loop", counting_loop()),
        ("class declaration", class_declaration()),
        ("interface declaration", interface_declaration()),
        ("type alias", type_alias()),
        ("named import", named_import()),
        ("exported template", exported_template()),
        ("dotted namespace", dotted_namespace()),
        ("escaped template", template_constant("`a\\`b`")),
        ("dangling else in loop", dangling_else_in_loop()),
    ]
}

/// Store holding `tree` as its only version
pub fn ingest(tree: &GreenNode) -> Store {
    CstIngester::new()
        .ingest_into(&Store::new("sample.ts"), tree, Some("initial".to_string()))
        .unwrap()
}

/// Store holding each tree as one version, in order
pub fn ingest_all(trees: &[GreenNode]) -> Store {
    let mut ingester = CstIngester::new();
    let mut store = Store::new("sample.ts");
    for (index, tree) in trees.iter().enumerate() {
        store = ingester
            .ingest_into(&store, tree, Some(format!("edit {}", index + 1)))
            .unwrap();
    }
    store
}

/// Latest root id of a store
pub fn root_id(store: &Store) -> String {
    store.latest_root().unwrap().id().as_str().to_string()
}
