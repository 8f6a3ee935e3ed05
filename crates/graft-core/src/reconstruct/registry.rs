//! Builder registry: one entry per syntactic kind
//!
//! The match below is exhaustive over [`TsSyntaxKind`], so adding a kind to
//! the grammar without deciding how it is rebuilt fails to compile. Kinds
//! mapped to `None` are reconstructed as placeholders.

use super::builders::{
    bindings, classes, declarations, expressions, functions, literals, modules, names, statements,
    tokens, types,
};
use super::context::Cx;
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::result::Result;

/// Reconstructs one node from its context
pub type BuilderFn = fn(&mut Cx<'_, '_>) -> Result<GreenElement>;

/// Builder for `kind`, `None` when the kind has no reconstruction support
pub fn builder_for(kind: TsSyntaxKind) -> Option<BuilderFn> {
    use TsSyntaxKind::*;
    let builder: BuilderFn = match kind {
        SingleLineComment | MultiLineComment => tokens::comment,

        OpenBrace | CloseBrace | OpenParen | CloseParen | OpenBracket | CloseBracket | Dot
        | DotDotDot | Semicolon | Comma | QuestionDot | LessThan | GreaterThan
        | LessThanEquals | GreaterThanEquals | EqualsEquals | ExclamationEquals
        | EqualsEqualsEquals | ExclamationEqualsEquals | EqualsGreaterThan | Plus | Minus
        | Asterisk | AsteriskAsterisk | Slash | Percent | PlusPlus | MinusMinus
        | LessThanLessThan | GreaterThanGreaterThan | GreaterThanGreaterThanGreaterThan
        | Ampersand | Bar | Caret | Exclamation | Tilde | AmpersandAmpersand | BarBar
        | QuestionQuestion | Question | Colon | At | Equals | PlusEquals | MinusEquals
        | AsteriskEquals | SlashEquals | PercentEquals | AsteriskAsteriskEquals
        | AmpersandEquals | BarEquals | CaretEquals | LessThanLessThanEquals
        | GreaterThanGreaterThanEquals | GreaterThanGreaterThanGreaterThanEquals
        | AmpersandAmpersandEquals | BarBarEquals | QuestionQuestionEquals | EndOfFile => tokens::fixed,

        BreakKw | CaseKw | CatchKw | ClassKw | ConstKw | ContinueKw | DebuggerKw
        | DefaultKw | DeleteKw | DoKw | ElseKw | EnumKw | ExportKw | ExtendsKw | FalseKw
        | FinallyKw | ForKw | FunctionKw | IfKw | ImportKw | InKw | InstanceOfKw | NewKw
        | NullKw | ReturnKw | SuperKw | SwitchKw | ThisKw | ThrowKw | TrueKw | TryKw
        | TypeOfKw | VarKw | VoidKw | WhileKw | WithKw | ImplementsKw | InterfaceKw | LetKw
        | PrivateKw | ProtectedKw | PublicKw | StaticKw | YieldKw | AbstractKw | AccessorKw
        | AsKw | AsyncKw | AwaitKw | ConstructorKw | DeclareKw | GetKw | SetKw | OfKw
        | ReadonlyKw | TypeKw | NamespaceKw | ModuleKw | KeyOfKw | UniqueKw | OverrideKw
        | FromKw | SatisfiesKw | IsKw | OutKw | InferKw | AnyKw | BooleanKw | NumberKw
        | StringKw | SymbolKw | UndefinedKw | UnknownKw | NeverKw | ObjectKw | BigIntKw => tokens::fixed,

        NumericLiteral => literals::numeric,
        BigIntLiteral => literals::big_int,
        StringLiteral => literals::string,
        RegularExpressionLiteral => literals::regular_expression,
        NoSubstitutionTemplateLiteral | TemplateHead | TemplateMiddle | TemplateTail => {
            literals::template_piece
        }
        Identifier => tokens::identifier,
        PrivateIdentifier => tokens::private_identifier,

        SourceFile => statements::source_file,
        SyntaxList => tokens::syntax_list,

        QualifiedName => names::qualified_name,
        ComputedPropertyName => names::computed_property_name,
        TypeParameter => names::type_parameter,
        Parameter => names::parameter,
        Decorator => names::decorator,

        PropertySignature => types::property_signature,
        MethodSignature => types::method_signature,
        CallSignature => types::call_signature,
        ConstructSignature => types::construct_signature,
        IndexSignature => types::index_signature,

        PropertyDeclaration => classes::property_declaration,
        MethodDeclaration => classes::method_declaration,
        Constructor => classes::constructor,
        GetAccessor | SetAccessor => classes::accessor,
        ClassStaticBlockDeclaration => classes::class_static_block,
        SemicolonClassElement => classes::semicolon_class_element,

        TypeReference => types::type_reference,
        FunctionType => types::function_type,
        ConstructorType => types::constructor_type,
        TypeQuery => types::type_query,
        TypeLiteral => types::type_literal,
        ArrayType => types::array_type,
        TupleType => types::tuple_type,
        OptionalType => types::optional_type,
        RestType => types::rest_type,
        UnionType => types::union_type,
        IntersectionType => types::intersection_type,
        ConditionalType => types::conditional_type,
        InferType => types::infer_type,
        ParenthesizedType => types::parenthesized_type,
        ThisType => types::this_type,
        TypeOperator => types::type_operator,
        IndexedAccessType => types::indexed_access_type,
        LiteralType => types::literal_type,
        NamedTupleMember => types::named_tuple_member,
        TypePredicate => types::type_predicate,

        ObjectBindingPattern => bindings::object_binding_pattern,
        ArrayBindingPattern => bindings::array_binding_pattern,
        BindingElement => bindings::binding_element,

        ArrayLiteralExpression => expressions::array_literal,
        ObjectLiteralExpression => expressions::object_literal,
        PropertyAccessExpression => expressions::property_access,
        ElementAccessExpression => expressions::element_access,
        CallExpression => expressions::call,
        NewExpression => expressions::new,
        TaggedTemplateExpression => expressions::tagged_template,
        TypeAssertionExpression => expressions::type_assertion,
        ParenthesizedExpression => expressions::parenthesized,
        FunctionExpression => functions::function_expression,
        ArrowFunction => functions::arrow_function,
        DeleteExpression | TypeOfExpression | VoidExpression | AwaitExpression => {
            expressions::keyword_unary
        }
        PrefixUnaryExpression => expressions::prefix_unary,
        PostfixUnaryExpression => expressions::postfix_unary,
        BinaryExpression => expressions::binary,
        ConditionalExpression => expressions::conditional,
        TemplateExpression => expressions::template_expression,
        YieldExpression => expressions::yield_expression,
        SpreadElement => expressions::spread_element,
        ClassExpression => classes::class_expression,
        OmittedExpression => expressions::omitted,
        ExpressionWithTypeArguments => expressions::expression_with_type_arguments,
        AsExpression | SatisfiesExpression => expressions::type_relation,
        NonNullExpression => expressions::non_null,
        MetaProperty => expressions::meta_property,
        TemplateSpan => expressions::template_span,

        Block | CaseBlock => statements::block,
        EmptyStatement => statements::empty_statement,
        VariableStatement => declarations::variable_statement,
        ExpressionStatement => statements::expression_statement,
        IfStatement => statements::if_statement,
        DoStatement => statements::do_statement,
        WhileStatement => statements::while_statement,
        ForStatement => statements::for_statement,
        ForInStatement | ForOfStatement => statements::for_in_of,
        ContinueStatement | BreakStatement => statements::jump,
        ReturnStatement => statements::return_statement,
        SwitchStatement => statements::switch_statement,
        LabeledStatement => statements::labeled_statement,
        ThrowStatement => statements::throw_statement,
        TryStatement => statements::try_statement,
        DebuggerStatement => statements::debugger_statement,

        VariableDeclaration => declarations::variable_declaration,
        VariableDeclarationList => declarations::variable_declaration_list,
        FunctionDeclaration => functions::function_declaration,
        ClassDeclaration => classes::class_declaration,
        InterfaceDeclaration => declarations::interface_declaration,
        TypeAliasDeclaration => declarations::type_alias_declaration,
        EnumDeclaration => declarations::enum_declaration,
        ModuleDeclaration => declarations::module_declaration,
        ModuleBlock => declarations::module_block,
        ImportDeclaration => modules::import_declaration,
        ImportClause => modules::import_clause,
        NamespaceImport | NamespaceExport => modules::namespace_binding,
        NamedImports | NamedExports => modules::named_bindings,
        ImportSpecifier | ExportSpecifier => modules::specifier,
        ExportAssignment => modules::export_assignment,
        ExportDeclaration => modules::export_declaration,

        CaseClause => statements::case_clause,
        DefaultClause => statements::default_clause,
        HeritageClause => classes::heritage_clause,
        CatchClause => statements::catch_clause,

        PropertyAssignment => expressions::property_assignment,
        ShorthandPropertyAssignment => expressions::shorthand_property_assignment,
        SpreadAssignment => expressions::spread_assignment,
        EnumMember => declarations::enum_member,

        WithStatement | MappedType | JsxElement | JsxSelfClosingElement | JsxFragment
        | Placeholder | Unknown => return None,
    };
    Some(builder)
}

/// Whether `kind` has a builder
pub fn is_supported(kind: TsSyntaxKind) -> bool {
    builder_for(kind).is_some()
}
