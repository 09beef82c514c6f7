use super::token::{PAGE_NUMBER_MACRO, Token, tokenize};
use super::types::{EntryType, IndexEntry};
use crate::document::{DestinationRef, Expand, Fragment};
use std::mem;

/// Most levels an entry can have; later `!` separators are kept as text
pub const MAX_LEVELS: usize = 64;

/// Entry pieces before expansion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub key: Vec<Vec<Token>>,
    pub sort_key: Vec<Vec<Token>>,
    /// Tokens after the `|` separator, if one was seen
    pub format: Option<Vec<Token>>,
}

/// Parse one entry specification into an [`IndexEntry`].
///
/// The grammar is the makeindex one: `!` separates levels, `sort@key`
/// gives a level an explicit sort key, `|` introduces the page format and
/// `"` quotes the next token. Malformed input never fails; it produces
/// shorter or empty segments instead. An entry has at most [`MAX_LEVELS`]
/// levels, the last one keeping any further `!` literally.
pub fn parse_entry<E: Expand + ?Sized>(
    tokens: &[Token],
    expander: &E,
    node: DestinationRef,
) -> IndexEntry {
    split_entry(tokens).resolve(expander, node)
}

/// Tokenize and parse an entry given as source text
pub fn parse_entry_str<E: Expand + ?Sized>(
    source: &str,
    expander: &E,
    node: DestinationRef,
) -> IndexEntry {
    parse_entry(&tokenize(source), expander, node)
}

/// Split an entry into key, sort key and format token buffers
pub fn split_entry(tokens: &[Token]) -> RawEntry {
    EntryParser::new(tokens).parse()
}

struct EntryParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    current: Vec<Token>,
    raw: RawEntry,
}

impl<'a> EntryParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            current: Vec::new(),
            raw: RawEntry::default(),
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn parse(mut self) -> RawEntry {
        while let Some(tok) = self.next() {
            if !tok.is_alphanumeric() {
                self.current.push(tok.clone());
                continue;
            }

            if tok.is_char('"') {
                if let Some(quoted) = self.next() {
                    self.current.push(quoted.clone());
                }
                continue;
            }

            // Separators are literal inside the format
            if self.raw.format.is_some() {
                self.current.push(tok.clone());
                continue;
            }

            match tok.as_char() {
                Some('!') if self.raw.key.len() + 1 < MAX_LEVELS => self.close_level(),
                Some('@') => {
                    let sort_key = mem::take(&mut self.current);
                    self.raw.sort_key.push(sort_key);
                }
                Some('|') => {
                    self.close_level();
                    self.raw.format = Some(Vec::new());
                }
                _ => self.current.push(tok.clone()),
            }
        }

        match self.raw.format.as_mut() {
            Some(format) => *format = mem::take(&mut self.current),
            None => self.close_level(),
        }
        self.raw
    }

    /// Push the buffer as a key level, defaulting its sort key to the same
    /// tokens when no explicit one was given
    fn close_level(&mut self) {
        let segment = mem::take(&mut self.current);
        if self.raw.sort_key.len() <= self.raw.key.len() {
            self.raw.sort_key.push(segment.clone());
        }
        self.raw.key.push(segment);
    }
}

impl RawEntry {
    /// Expand the buffers and build the entry
    pub fn resolve<E: Expand + ?Sized>(self, expander: &E, node: DestinationRef) -> IndexEntry {
        let sort_key = self
            .sort_key
            .iter()
            .map(|tokens| Some(expander.expand_to_text(tokens)))
            .collect();
        let key = self.key.iter().map(|tokens| expander.expand(tokens)).collect();

        let (format, entry_type) = match self.format {
            Some(tokens) if !tokens.is_empty() => {
                let (format, entry_type) = build_format(tokens, expander);
                (Some(format), entry_type)
            }
            _ => (None, EntryType::Normal),
        };

        IndexEntry::new(key, node, sort_key, format, entry_type)
    }
}

/// Turn `name rest` into `\name rest\index-page-number` and expand it
fn build_format<E: Expand + ?Sized>(mut tokens: Vec<Token>, expander: &E) -> (Fragment, EntryType) {
    let name_len = tokens.iter().take_while(|t| t.is_letter()).count();
    let name: String = tokens.drain(..name_len).filter_map(|t| t.as_char()).collect();

    let mut entry_type = EntryType::Normal;
    if !name.is_empty() {
        entry_type = EntryType::from_macro(&name);
        tokens.insert(0, Token::ControlSequence(name));
    }
    tokens.push(Token::control(PAGE_NUMBER_MACRO));

    (expander.expand(&tokens), entry_type)
}
