//! Syntax kinds of the target grammar
//!
//! The node store is kind-agnostic and keeps raw `u16` codes; this table is
//! the closed enumeration those codes are drawn from. Codes are grouped in
//! ranges the same way the concrete tree language lays them out:
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-9 | Trivia (comments) |
//! | 10-69 | Punctuation and operators |
//! | 70-89 | Literals and names |
//! | 100-199 | Keywords |
//! | 200-399 | Composite nodes |
//! | 400-499 | Kinds that have no reconstruction support |
//! | 900+ | Synthetic kinds (placeholder, unknown) |

macro_rules! syntax_kinds {
    ( $( $(#[$doc:meta])* $name:ident = $code:literal $(=> $text:literal)? ),* $(,)? ) => {
        /// Every syntactic category of the target grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum TsSyntaxKind {
            $( $(#[$doc])* $name = $code ),*
        }

        impl TsSyntaxKind {
            /// All kinds, in declaration order
            pub const ALL: &'static [TsSyntaxKind] = &[ $( TsSyntaxKind::$name ),* ];

            /// Resolve a raw code, `None` when the code is not part of the grammar
            pub fn from_raw(raw: u16) -> Option<Self> {
                match raw {
                    $( $code => Some(TsSyntaxKind::$name), )*
                    _ => None,
                }
            }

            /// Stable name, used in diagnostics and validation paths
            pub fn name(self) -> &'static str {
                match self {
                    $( TsSyntaxKind::$name => stringify!($name), )*
                }
            }

            /// Fixed source text of token kinds whose spelling never varies
            pub fn canonical_text(self) -> Option<&'static str> {
                match self {
                    $( TsSyntaxKind::$name => syntax_kinds!(@text $($text)?), )*
                }
            }
        }
    };
    (@text $text:literal) => { Some($text) };
    (@text) => { None };
}

syntax_kinds! {
    // Trivia
    SingleLineComment = 2,
    MultiLineComment = 3,

    // Punctuation and operators
    OpenBrace = 10 => "{",
    CloseBrace = 11 => "}",
    OpenParen = 12 => "(",
    CloseParen = 13 => ")",
    OpenBracket = 14 => "[",
    CloseBracket = 15 => "]",
    Dot = 16 => ".",
    DotDotDot = 17 => "...",
    Semicolon = 18 => ";",
    Comma = 19 => ",",
    QuestionDot = 20 => "?.",
    LessThan = 21 => "<",
    GreaterThan = 22 => ">",
    LessThanEquals = 23 => "<=",
    GreaterThanEquals = 24 => ">=",
    EqualsEquals = 25 => "==",
    ExclamationEquals = 26 => "!=",
    EqualsEqualsEquals = 27 => "===",
    ExclamationEqualsEquals = 28 => "!==",
    EqualsGreaterThan = 29 => "=>",
    Plus = 30 => "+",
    Minus = 31 => "-",
    Asterisk = 32 => "*",
    AsteriskAsterisk = 33 => "**",
    Slash = 34 => "/",
    Percent = 35 => "%",
    PlusPlus = 36 => "++",
    MinusMinus = 37 => "--",
    LessThanLessThan = 38 => "<<",
    GreaterThanGreaterThan = 39 => ">>",
    GreaterThanGreaterThanGreaterThan = 40 => ">>>",
    Ampersand = 41 => "&",
    Bar = 42 => "|",
    Caret = 43 => "^",
    Exclamation = 44 => "!",
    Tilde = 45 => "~",
    AmpersandAmpersand = 46 => "&&",
    BarBar = 47 => "||",
    QuestionQuestion = 48 => "??",
    Question = 49 => "?",
    Colon = 50 => ":",
    At = 51 => "@",
    Equals = 52 => "=",
    PlusEquals = 53 => "+=",
    MinusEquals = 54 => "-=",
    AsteriskEquals = 55 => "*=",
    SlashEquals = 56 => "/=",
    PercentEquals = 57 => "%=",
    AsteriskAsteriskEquals = 58 => "**=",
    AmpersandEquals = 59 => "&=",
    BarEquals = 60 => "|=",
    CaretEquals = 61 => "^=",
    LessThanLessThanEquals = 62 => "<<=",
    GreaterThanGreaterThanEquals = 63 => ">>=",
    GreaterThanGreaterThanGreaterThanEquals = 64 => ">>>=",
    AmpersandAmpersandEquals = 65 => "&&=",
    BarBarEquals = 66 => "||=",
    QuestionQuestionEquals = 67 => "??=",
    EndOfFile = 69 => "",

    // Literals and names
    NumericLiteral = 70,
    BigIntLiteral = 71,
    StringLiteral = 72,
    RegularExpressionLiteral = 73,
    NoSubstitutionTemplateLiteral = 74,
    TemplateHead = 75,
    TemplateMiddle = 76,
    TemplateTail = 77,
    Identifier = 80,
    PrivateIdentifier = 81,

    // Keywords
    BreakKw = 100 => "break",
    CaseKw = 101 => "case",
    CatchKw = 102 => "catch",
    ClassKw = 103 => "class",
    ConstKw = 104 => "const",
    ContinueKw = 105 => "continue",
    DebuggerKw = 106 => "debugger",
    DefaultKw = 107 => "default",
    DeleteKw = 108 => "delete",
    DoKw = 109 => "do",
    ElseKw = 110 => "else",
    EnumKw = 111 => "enum",
    ExportKw = 112 => "export",
    ExtendsKw = 113 => "extends",
    FalseKw = 114 => "false",
    FinallyKw = 115 => "finally",
    ForKw = 116 => "for",
    FunctionKw = 117 => "function",
    IfKw = 118 => "if",
    ImportKw = 119 => "import",
    InKw = 120 => "in",
    InstanceOfKw = 121 => "instanceof",
    NewKw = 122 => "new",
    NullKw = 123 => "null",
    ReturnKw = 124 => "return",
    SuperKw = 125 => "super",
    SwitchKw = 126 => "switch",
    ThisKw = 127 => "this",
    ThrowKw = 128 => "throw",
    TrueKw = 129 => "true",
    TryKw = 130 => "try",
    TypeOfKw = 131 => "typeof",
    VarKw = 132 => "var",
    VoidKw = 133 => "void",
    WhileKw = 134 => "while",
    WithKw = 135 => "with",
    ImplementsKw = 136 => "implements",
    InterfaceKw = 137 => "interface",
    LetKw = 138 => "let",
    PrivateKw = 139 => "private",
    ProtectedKw = 140 => "protected",
    PublicKw = 141 => "public",
    StaticKw = 142 => "static",
    YieldKw = 143 => "yield",
    AbstractKw = 144 => "abstract",
    AccessorKw = 145 => "accessor",
    AsKw = 146 => "as",
    AsyncKw = 147 => "async",
    AwaitKw = 148 => "await",
    ConstructorKw = 149 => "constructor",
    DeclareKw = 150 => "declare",
    GetKw = 151 => "get",
    SetKw = 152 => "set",
    OfKw = 153 => "of",
    ReadonlyKw = 154 => "readonly",
    TypeKw = 155 => "type",
    NamespaceKw = 156 => "namespace",
    ModuleKw = 157 => "module",
    KeyOfKw = 158 => "keyof",
    UniqueKw = 159 => "unique",
    OverrideKw = 160 => "override",
    FromKw = 161 => "from",
    SatisfiesKw = 162 => "satisfies",
    IsKw = 163 => "is",
    OutKw = 164 => "out",
    InferKw = 165 => "infer",
    AnyKw = 170 => "any",
    BooleanKw = 171 => "boolean",
    NumberKw = 172 => "number",
    StringKw = 173 => "string",
    SymbolKw = 174 => "symbol",
    UndefinedKw = 175 => "undefined",
    UnknownKw = 176 => "unknown",
    NeverKw = 177 => "never",
    ObjectKw = 178 => "object",
    BigIntKw = 179 => "bigint",

    // Root and grouping
    SourceFile = 200,
    /// Synthetic grouping of an ordered run of siblings
    SyntaxList = 201,

    // Names
    QualifiedName = 210,
    ComputedPropertyName = 211,

    // Signature elements
    TypeParameter = 215,
    Parameter = 216,
    Decorator = 217,

    // Type members
    PropertySignature = 220,
    MethodSignature = 221,
    CallSignature = 222,
    ConstructSignature = 223,
    IndexSignature = 224,

    // Class members
    PropertyDeclaration = 230,
    MethodDeclaration = 231,
    Constructor = 232,
    GetAccessor = 233,
    SetAccessor = 234,
    ClassStaticBlockDeclaration = 235,
    SemicolonClassElement = 236,

    // Types
    TypeReference = 240,
    FunctionType = 241,
    ConstructorType = 242,
    TypeQuery = 243,
    TypeLiteral = 244,
    ArrayType = 245,
    TupleType = 246,
    OptionalType = 247,
    RestType = 248,
    UnionType = 249,
    IntersectionType = 250,
    ConditionalType = 251,
    InferType = 252,
    ParenthesizedType = 253,
    ThisType = 254,
    TypeOperator = 255,
    IndexedAccessType = 256,
    MappedType = 257,
    LiteralType = 258,
    NamedTupleMember = 259,
    TypePredicate = 260,

    // Binding patterns
    ObjectBindingPattern = 270,
    ArrayBindingPattern = 271,
    BindingElement = 272,

    // Expressions
    ArrayLiteralExpression = 280,
    ObjectLiteralExpression = 281,
    PropertyAccessExpression = 282,
    ElementAccessExpression = 283,
    CallExpression = 284,
    NewExpression = 285,
    TaggedTemplateExpression = 286,
    TypeAssertionExpression = 287,
    ParenthesizedExpression = 288,
    FunctionExpression = 289,
    ArrowFunction = 290,
    DeleteExpression = 291,
    TypeOfExpression = 292,
    VoidExpression = 293,
    AwaitExpression = 294,
    PrefixUnaryExpression = 295,
    PostfixUnaryExpression = 296,
    BinaryExpression = 297,
    ConditionalExpression = 298,
    TemplateExpression = 299,
    YieldExpression = 300,
    SpreadElement = 301,
    ClassExpression = 302,
    OmittedExpression = 303,
    ExpressionWithTypeArguments = 304,
    AsExpression = 305,
    NonNullExpression = 306,
    SatisfiesExpression = 307,
    MetaProperty = 308,
    TemplateSpan = 310,

    // Statements
    Block = 320,
    EmptyStatement = 321,
    VariableStatement = 322,
    ExpressionStatement = 323,
    IfStatement = 324,
    DoStatement = 325,
    WhileStatement = 326,
    ForStatement = 327,
    ForInStatement = 328,
    ForOfStatement = 329,
    ContinueStatement = 330,
    BreakStatement = 331,
    ReturnStatement = 332,
    WithStatement = 333,
    SwitchStatement = 334,
    LabeledStatement = 335,
    ThrowStatement = 336,
    TryStatement = 337,
    DebuggerStatement = 338,

    // Declarations
    VariableDeclaration = 340,
    VariableDeclarationList = 341,
    FunctionDeclaration = 342,
    ClassDeclaration = 343,
    InterfaceDeclaration = 344,
    TypeAliasDeclaration = 345,
    EnumDeclaration = 346,
    ModuleDeclaration = 347,
    ModuleBlock = 348,
    CaseBlock = 349,
    ImportDeclaration = 350,
    ImportClause = 351,
    NamespaceImport = 352,
    NamedImports = 353,
    ImportSpecifier = 354,
    ExportAssignment = 355,
    ExportDeclaration = 356,
    NamedExports = 357,
    NamespaceExport = 358,
    ExportSpecifier = 359,

    // Clauses
    CaseClause = 360,
    DefaultClause = 361,
    HeritageClause = 362,
    CatchClause = 363,

    // Object literal members
    PropertyAssignment = 370,
    ShorthandPropertyAssignment = 371,
    SpreadAssignment = 372,
    EnumMember = 375,

    // JSX
    JsxElement = 400,
    JsxSelfClosingElement = 401,
    JsxFragment = 402,

    // Synthetic
    /// Stand-in for a node whose kind has no builder
    Placeholder = 900,
    /// Raw code outside the grammar
    Unknown = 901,
}

impl TsSyntaxKind {
    /// Raw code of this kind
    pub fn raw(self) -> u16 {
        self as u16
    }

    /// Display name of a raw code, falling back to `Unknown(<code>)`
    pub fn name_of_raw(raw: u16) -> String {
        match Self::from_raw(raw) {
            Some(kind) => kind.name().to_string(),
            None => format!("Unknown({raw})"),
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }

    /// Punctuation and operator tokens
    pub fn is_punctuation(self) -> bool {
        (10..70).contains(&self.raw())
    }

    pub fn is_keyword(self) -> bool {
        (100..200).contains(&self.raw())
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral
                | Self::BigIntLiteral
                | Self::StringLiteral
                | Self::RegularExpressionLiteral
                | Self::NoSubstitutionTemplateLiteral
                | Self::TemplateHead
                | Self::TemplateMiddle
                | Self::TemplateTail
        )
    }

    /// Leaf kinds: everything reconstructed as a single token
    pub fn is_token(self) -> bool {
        self.raw() < 200 || matches!(self, Self::Placeholder | Self::Unknown)
    }

    /// Keywords that may appear in a declaration's modifier list
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::ExportKw
                | Self::DefaultKw
                | Self::DeclareKw
                | Self::AbstractKw
                | Self::PublicKw
                | Self::PrivateKw
                | Self::ProtectedKw
                | Self::StaticKw
                | Self::ReadonlyKw
                | Self::AsyncKw
                | Self::ConstKw
                | Self::OverrideKw
                | Self::AccessorKw
                | Self::InKw
                | Self::OutKw
        )
    }

    /// Keywords that spell a type on their own (`string`, `any`, ...)
    pub fn is_type_keyword(self) -> bool {
        (170..180).contains(&self.raw())
            || matches!(self, Self::VoidKw | Self::NullKw | Self::NeverKw)
    }

    /// Kinds that only ever appear in type position
    pub fn is_type(self) -> bool {
        (240..261).contains(&self.raw()) || self.is_type_keyword()
    }

    /// Assignment operators (`=`, `+=`, ...)
    pub fn is_assignment_operator(self) -> bool {
        self == Self::Equals || (53..=67).contains(&self.raw())
    }

    /// Binary operator tokens, including keyword operators
    pub fn is_binary_operator(self) -> bool {
        matches!(
            self,
            Self::LessThan
                | Self::GreaterThan
                | Self::LessThanEquals
                | Self::GreaterThanEquals
                | Self::EqualsEquals
                | Self::ExclamationEquals
                | Self::EqualsEqualsEquals
                | Self::ExclamationEqualsEquals
                | Self::Plus
                | Self::Minus
                | Self::Asterisk
                | Self::AsteriskAsterisk
                | Self::Slash
                | Self::Percent
                | Self::LessThanLessThan
                | Self::GreaterThanGreaterThan
                | Self::GreaterThanGreaterThanGreaterThan
                | Self::Ampersand
                | Self::Bar
                | Self::Caret
                | Self::AmpersandAmpersand
                | Self::BarBar
                | Self::QuestionQuestion
                | Self::Comma
                | Self::InKw
                | Self::InstanceOfKw
        ) || self.is_assignment_operator()
    }

    /// Prefix unary operator tokens
    pub fn is_prefix_operator(self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Tilde
                | Self::Exclamation
                | Self::PlusPlus
                | Self::MinusMinus
        )
    }

    /// Statement kinds, the items of statement lists
    pub fn is_statement(self) -> bool {
        (320..339).contains(&self.raw())
            || matches!(
                self,
                Self::FunctionDeclaration
                    | Self::ClassDeclaration
                    | Self::InterfaceDeclaration
                    | Self::TypeAliasDeclaration
                    | Self::EnumDeclaration
                    | Self::ModuleDeclaration
                    | Self::ImportDeclaration
                    | Self::ExportAssignment
                    | Self::ExportDeclaration
            )
    }

    /// Class and interface members
    pub fn is_member(self) -> bool {
        (220..237).contains(&self.raw())
    }

    /// Synthetic wrappers whose only job is bracketing an expression or type
    pub fn is_parenthesized(self) -> bool {
        matches!(self, Self::ParenthesizedExpression | Self::ParenthesizedType)
    }

    /// Closing delimiters of lists
    pub fn is_closing(self) -> bool {
        matches!(
            self,
            Self::CloseBrace | Self::CloseBracket | Self::CloseParen | Self::GreaterThan
        )
    }
}

impl std::fmt::Display for TsSyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<TsSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: TsSyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_roundtrip() {
        for &kind in TsSyntaxKind::ALL {
            assert_eq!(TsSyntaxKind::from_raw(kind.raw()), Some(kind), "{kind:?}");
        }
    }

    #[test]
    fn test_unknown_raw_codes() {
        assert_eq!(TsSyntaxKind::from_raw(1), None);
        assert_eq!(TsSyntaxKind::from_raw(4242), None);
        assert_eq!(TsSyntaxKind::name_of_raw(4242), "Unknown(4242)");
        assert_eq!(TsSyntaxKind::name_of_raw(80), "Identifier");
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(TsSyntaxKind::OpenBrace.canonical_text(), Some("{"));
        assert_eq!(TsSyntaxKind::InstanceOfKw.canonical_text(), Some("instanceof"));
        assert_eq!(TsSyntaxKind::Identifier.canonical_text(), None);
        assert_eq!(TsSyntaxKind::Block.canonical_text(), None);
    }

    #[test]
    fn test_every_fixed_token_has_text() {
        for &kind in TsSyntaxKind::ALL {
            if kind.is_punctuation() || kind.is_keyword() {
                assert!(kind.canonical_text().is_some(), "{kind:?} lacks text");
            }
        }
    }

    #[test]
    fn test_classification() {
        assert!(TsSyntaxKind::StaticKw.is_modifier());
        assert!(!TsSyntaxKind::ClassKw.is_modifier());
        assert!(TsSyntaxKind::StringKw.is_type());
        assert!(TsSyntaxKind::UnionType.is_type());
        assert!(!TsSyntaxKind::BinaryExpression.is_type());
        assert!(TsSyntaxKind::PlusEquals.is_assignment_operator());
        assert!(TsSyntaxKind::InstanceOfKw.is_binary_operator());
        assert!(TsSyntaxKind::ReturnStatement.is_statement());
        assert!(TsSyntaxKind::ClassDeclaration.is_statement());
        assert!(TsSyntaxKind::Constructor.is_member());
        assert!(TsSyntaxKind::Identifier.is_token());
        assert!(!TsSyntaxKind::SyntaxList.is_token());
    }
}
