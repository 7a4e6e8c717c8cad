use crate::frontend::sourceloc::SourceLoc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    InvalidChar(InvalidCharError),
    UnterminatedString(SourceLoc),
    UnterminatedComment(SourceLoc),
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChar(invalid_char) => {
                write!(f, "Invalid char {} at {}", invalid_char.c, invalid_char.pos)
            }
            Self::UnterminatedString(pos) => {
                write!(f, "Unterminated string literal starting at {}", pos)
            }
            Self::UnterminatedComment(pos) => {
                write!(f, "Unterminated comment starting at {}", pos)
            }
        }
    }
}

impl LexError {
    pub fn invalid_char(c: char, pos: SourceLoc) -> Self {
        Self::InvalidChar(InvalidCharError { c, pos })
    }

    pub fn unterminated_string(pos: SourceLoc) -> Self {
        Self::UnterminatedString(pos)
    }

    pub fn unterminated_comment(pos: SourceLoc) -> Self {
        Self::UnterminatedComment(pos)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCharError {
    c: char,
    pos: SourceLoc,
}
