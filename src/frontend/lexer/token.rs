use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    // type keywords
    Int,
    Char,
    Float,
    Double,
    Void,
    Short,
    Long,
    Unsigned,
    Signed,
    Struct,
    // statement keywords
    If,
    Else,
    While,
    Do,
    For,
    Switch,
    Case,
    Default,
    Break,
    Goto,
    Return,
    // values
    Identifier(String),
    Number(String),
    StringLiteral(String),
    // punctuation
    LParen,
    RParen,
    LCurly,
    RCurly,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,
    // operators
    Plus,
    Minus,
    Star,
    FSlash,
    Percent,
    LThan,
    GThan,
    LThanE,
    GThanE,
    Equals,
    NotEquals,
    And,
    Or,
    Not,
    Assign,
    Increment,
    Decrement,
    Eof,
}

impl Token {
    pub fn name(&self) -> String {
        match self {
            Self::Int => "int".into(),
            Self::Char => "char".into(),
            Self::Float => "float".into(),
            Self::Double => "double".into(),
            Self::Void => "void".into(),
            Self::Short => "short".into(),
            Self::Long => "long".into(),
            Self::Unsigned => "unsigned".into(),
            Self::Signed => "signed".into(),
            Self::Struct => "struct".into(),
            Self::If => "if".into(),
            Self::Else => "else".into(),
            Self::While => "while".into(),
            Self::Do => "do".into(),
            Self::For => "for".into(),
            Self::Switch => "switch".into(),
            Self::Case => "case".into(),
            Self::Default => "default".into(),
            Self::Break => "break".into(),
            Self::Goto => "goto".into(),
            Self::Return => "return".into(),
            Self::Identifier(name) => name.clone(),
            Self::Number(text) => text.clone(),
            Self::StringLiteral(text) => text.clone(),
            Self::LParen => "(".into(),
            Self::RParen => ")".into(),
            Self::LCurly => "{".into(),
            Self::RCurly => "}".into(),
            Self::LBracket => "[".into(),
            Self::RBracket => "]".into(),
            Self::Semicolon => ";".into(),
            Self::Colon => ":".into(),
            Self::Comma => ",".into(),
            Self::Dot => ".".into(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::FSlash => "/".into(),
            Self::Percent => "%".into(),
            Self::LThan => "<".into(),
            Self::GThan => ">".into(),
            Self::LThanE => "<=".into(),
            Self::GThanE => ">=".into(),
            Self::Equals => "==".into(),
            Self::NotEquals => "!=".into(),
            Self::And => "&&".into(),
            Self::Or => "||".into(),
            Self::Not => "!".into(),
            Self::Assign => "=".into(),
            Self::Increment => "++".into(),
            Self::Decrement => "--".into(),
            Self::Eof => "EOF".into(),
        }
    }

    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Char
                | Self::Float
                | Self::Double
                | Self::Void
                | Self::Short
                | Self::Long
                | Self::Unsigned
                | Self::Signed
        )
    }

    pub fn is_type_start(&self) -> bool {
        self.is_type_name() || matches!(self, Self::Struct)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
