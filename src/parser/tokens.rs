use std::fmt;

/// Token kinds for the Spice language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Literals
    Number,
    String,
    FString,
    RString,
    FrString,
    Regex,
    Identifier,

    // Python keywords
    Def,
    Class,
    If,
    Elif,
    Else,
    For,
    While,
    Return,
    Import,
    From,
    As,
    With,
    Try,
    Except,
    Finally,
    Raise,
    Pass,
    Break,
    Continue,
    TrueLit,
    FalseLit,
    NoneLit,
    And,
    Or,
    Not,
    In,
    Is,
    Lambda,

    // Spice keywords
    Interface,
    Abstract,
    Final,
    Static,
    Extends,
    Implements,
    Switch,
    Case,
    Default,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    DoubleSlash,
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    DoubleStarAssign,
    DoubleSlashAssign,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Arrow,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Colon,
    Semicolon,

    // Structural
    Newline,
    Indent,
    Dedent,
    Eof,
    Comment,

    /// Canonical grouping kind for `True`/`False`, used only by the follow-set table
    Boolean,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Keyword spellings mapped to their token kinds.
pub static KEYWORDS: phf::Map<&'static str, TokenType> = phf::phf_map! {
    // Python keywords
    "def" => TokenType::Def,
    "class" => TokenType::Class,
    "if" => TokenType::If,
    "elif" => TokenType::Elif,
    "else" => TokenType::Else,
    "for" => TokenType::For,
    "while" => TokenType::While,
    "return" => TokenType::Return,
    "import" => TokenType::Import,
    "from" => TokenType::From,
    "as" => TokenType::As,
    "with" => TokenType::With,
    "try" => TokenType::Try,
    "except" => TokenType::Except,
    "finally" => TokenType::Finally,
    "raise" => TokenType::Raise,
    "pass" => TokenType::Pass,
    "break" => TokenType::Break,
    "continue" => TokenType::Continue,
    "True" => TokenType::TrueLit,
    "False" => TokenType::FalseLit,
    "None" => TokenType::NoneLit,
    "and" => TokenType::And,
    "or" => TokenType::Or,
    "not" => TokenType::Not,
    "in" => TokenType::In,
    "is" => TokenType::Is,
    "lambda" => TokenType::Lambda,

    // Spice keywords
    "interface" => TokenType::Interface,
    "abstract" => TokenType::Abstract,
    "final" => TokenType::Final,
    "static" => TokenType::Static,
    "extends" => TokenType::Extends,
    "implements" => TokenType::Implements,
    "switch" => TokenType::Switch,
    "case" => TokenType::Case,
    "default" => TokenType::Default,
};

/// A single lexical token. Immutable once created.
///
/// Lines are 1-based, columns are 0-based byte offsets into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: Option<String>,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: Option<String>, line: usize, column: usize) -> Self {
        Self {
            token_type,
            value,
            line,
            column,
        }
    }

    /// The raw source text of this token, empty for structural tokens.
    pub fn lexeme(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}('{}')", self.token_type, value),
            None => write!(f, "{}", self.token_type),
        }
    }
}
