/// Root node representing one compilation unit (.spy file).
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// Top-level and block-level statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Interface(InterfaceDecl),
    Class(ClassDecl),
    Function(FunctionDecl),
    Final(FinalDecl),
    Expression(ExpressionStmt),
    Pass(PassStmt),
    Return(ReturnStmt),
    Raise(RaiseStmt),
    Import(ImportStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
}

/// Interface declaration: named method signatures, no bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub methods: Vec<MethodSignature>,
    pub bases: Vec<String>,
    pub line: usize,
}

/// Method signature inside an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<String>,
    pub line: usize,
}

/// Function/method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default: Option<Expr>,
}

/// Class declaration with modifiers.
///
/// `bases` holds classes named via `extends` or the parenthesized base
/// list; `interfaces` holds names from the `implements` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub body: Vec<Stmt>,
    pub bases: Vec<String>,
    pub interfaces: Vec<String>,
    pub is_abstract: bool,
    pub is_final: bool,
    pub line: usize,
}

/// Function or method declaration. `body` is absent for abstract
/// members, which are semicolon-terminated stubs.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Option<Vec<Stmt>>,
    pub return_type: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub decorators: Vec<String>,
    pub line: usize,
}

/// `final NAME [: type] = expr` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalDecl {
    pub name: String,
    pub type_annotation: Option<String>,
    pub value: Expr,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub has_semicolon: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassStmt {
    pub has_semicolon: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub has_semicolon: bool,
}

/// Raise statement; a bare `raise` re-raises the current exception.
#[derive(Debug, Clone, PartialEq)]
pub struct RaiseStmt {
    pub exception: Option<Expr>,
    pub has_semicolon: bool,
}

/// `import a.b [as c]` or `from a.b import x [as y], z`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    pub module: String,
    /// Imported names for from-imports, empty for plain imports
    pub names: Vec<ImportedName>,
    /// Module alias for plain imports
    pub alias: Option<String>,
    pub is_from: bool,
    pub has_semicolon: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedName {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: Vec<Stmt>,
    pub elif_branches: Vec<(Expr, Vec<Stmt>)>,
    pub else_body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub subject: Expr,
    pub cases: Vec<CaseClause>,
    pub default: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub value: Expr,
    pub body: Vec<Stmt>,
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
        operator: AssignOp,
        line: usize,
    },
    Logical {
        operator: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Binary {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
    Identifier {
        name: String,
        line: usize,
    },
    Attribute {
        object: Box<Expr>,
        name: String,
    },
    Literal(Literal),
    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
    },
    Lambda {
        params: Vec<Parameter>,
        body: Box<Expr>,
        return_type: Option<String>,
    },
    Subscript {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        start: Option<Box<Expr>>,
        stop: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    Comprehension(Box<ComprehensionExpr>),
}

/// Call argument, positional or named.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
}

/// `element for target in iter [if condition]` with its surrounding
/// delimiter kind. Dict comprehensions carry the key expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensionExpr {
    pub element: Expr,
    pub key: Option<Expr>,
    pub target: Expr,
    pub iter: Expr,
    pub condition: Option<Expr>,
    pub kind: ComprehensionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComprehensionKind {
    List,
    Set,
    Dict,
    Generator,
}

/// Literal values. String-like variants store the raw lexeme including
/// quotes and any prefix, so emission is a straight copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(String),
    Str(String),
    FStr(String),
    RStr(String),
    FrStr(String),
    RegexStr(String),
    Boolean(bool),
    None,
    List(Vec<Expr>),
    Set(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<DictEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    FloorDiv,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Pow => "**=",
            AssignOp::FloorDiv => "//=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    FloorDiv,
    Pow,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    NotIn,
    Is,
    IsNot,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
        }
    }
}
