//! Category-coded tokens for index entry markup.
//!
//! Tokens follow the TeX model: every character carries a category code, and
//! a backslash introduces a control sequence. Only the categories the index
//! grammar cares about are distinguished.

use std::fmt;

/// Name of the escape sequence that marks where a page number goes.
pub const PAGE_NUMBER_MACRO: &str = "index-page-number";

/// Character category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatCode {
    BeginGroup,
    EndGroup,
    Space,
    Letter,
    Other,
}

/// A single input token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Char { ch: char, cat: CatCode },
    /// Escape sequence, stored without the leading backslash
    ControlSequence(String),
}

impl Token {
    /// Create a character token using the default category table
    pub fn char(ch: char) -> Self {
        Token::Char {
            ch,
            cat: classify_char(ch),
        }
    }

    pub fn control(name: impl Into<String>) -> Self {
        Token::ControlSequence(name.into())
    }

    pub fn catcode(&self) -> Option<CatCode> {
        match self {
            Token::Char { cat, .. } => Some(*cat),
            Token::ControlSequence(_) => None,
        }
    }

    /// Letters, other printable characters and spaces.
    /// Only these can act as entry separators.
    pub fn is_alphanumeric(&self) -> bool {
        matches!(
            self.catcode(),
            Some(CatCode::Letter | CatCode::Other | CatCode::Space)
        )
    }

    pub fn is_letter(&self) -> bool {
        self.catcode() == Some(CatCode::Letter)
    }

    /// True when this is the character `c` in an alphanumeric category
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Token::Char { ch, .. } if *ch == c) && self.is_alphanumeric()
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Token::Char { ch, .. } => Some(*ch),
            Token::ControlSequence(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Char { ch, .. } => write!(f, "{}", ch),
            Token::ControlSequence(name) => write!(f, "\\{}", name),
        }
    }
}

fn classify_char(ch: char) -> CatCode {
    match ch {
        '{' => CatCode::BeginGroup,
        '}' => CatCode::EndGroup,
        c if c.is_whitespace() => CatCode::Space,
        c if c.is_alphabetic() => CatCode::Letter,
        _ => CatCode::Other,
    }
}

/// Render a token slice back to source text
pub fn tokens_to_source(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (i, tok) in tokens.iter().enumerate() {
        out.push_str(&tok.to_string());
        // Keep control words from swallowing a following letter
        if let Token::ControlSequence(name) = tok {
            let is_word = name.chars().all(char::is_alphabetic);
            if is_word && tokens.get(i + 1).is_some_and(Token::is_letter) {
                out.push(' ');
            }
        }
    }
    out
}

/// Split source text into tokens.
///
/// Whitespace runs collapse into one space token, spaces after control
/// words are skipped and `%` starts a comment running to the end of the
/// line.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(c) if c.is_alphabetic() => {
                    let mut name = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if !next.is_alphabetic() {
                            break;
                        }
                        name.push(next);
                        chars.next();
                    }
                    while chars.peek().is_some_and(|c| c.is_whitespace()) {
                        chars.next();
                    }
                    tokens.push(Token::ControlSequence(name));
                }
                Some(c) => tokens.push(Token::ControlSequence(c.to_string())),
                None => tokens.push(Token::char('\\')),
            },
            '%' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
                tokens.push(Token::Char {
                    ch: ' ',
                    cat: CatCode::Space,
                });
            }
            c => tokens.push(Token::char(c)),
        }
    }

    tokens
}
