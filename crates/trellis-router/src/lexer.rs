//! Tokenizer for the route pattern mini-language.
//!
//! A raw pattern is made of literal characters, `:name` / `:name=default`
//! variable markers and `[`/`]` optional group delimiters. The lexer walks the
//! input one Unicode scalar value at a time and never looks at bracket
//! balance; that is left to its consumers.

use crate::error::PatternSyntaxError;

/// Maximum length of a variable name.
///
/// Variable names become named capture groups, which the regex engine limits.
pub const MAX_VARIABLE_NAME_LENGTH: usize = 32;

/// A token of a raw route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A character matched verbatim.
    Literal(char),
    /// A variable marker.
    Variable {
        /// The variable name.
        name: &'a str,
        /// The inline default value, if one was declared.
        default: Option<&'a str>,
    },
    /// `[`
    OptionalStart,
    /// `]`
    OptionalEnd,
}

/// A lexer over a raw route pattern.
pub struct Lexer<'a> {
    /// The raw pattern.
    input: &'a str,
    /// The current byte position.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given pattern.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Scans `:name(=default)?`, starting at the `:`.
    fn scan_variable(&mut self) -> Result<Token<'a>, PatternSyntaxError> {
        let start = self.pos;
        self.advance(); // :

        if !self.peek().is_some_and(is_name_start) {
            return Err(PatternSyntaxError::InvalidVariable {
                pattern: self.input.to_string(),
                position: start,
            });
        }

        let name_start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.advance();
        }
        let name = &self.input[name_start..self.pos];

        // Names are ASCII, so the byte length is the character count.
        if name.len() > MAX_VARIABLE_NAME_LENGTH {
            return Err(PatternSyntaxError::VariableNameTooLong {
                pattern: self.input.to_string(),
                name: name.to_string(),
                max: MAX_VARIABLE_NAME_LENGTH,
            });
        }

        // An `=` only opens a default when at least one value character follows.
        let mut default = None;
        if self.peek() == Some('=') && self.peek_next().is_some_and(is_default_char) {
            self.advance(); // =
            let default_start = self.pos;
            while self.peek().is_some_and(is_default_char) {
                self.advance();
            }
            default = Some(&self.input[default_start..self.pos]);
        }

        Ok(Token::Variable { name, default })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, PatternSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peek()? {
            ':' => Some(self.scan_variable()),
            '[' => {
                self.advance();
                Some(Ok(Token::OptionalStart))
            }
            ']' => {
                self.advance();
                Some(Ok(Token::OptionalEnd))
            }
            _ => self.advance().map(|c| Ok(Token::Literal(c))),
        }
    }
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

const fn is_default_char(c: char) -> bool {
    !matches!(c, ':' | '[' | ']' | '/')
}
