//! Index entry markup.
//!
//! - [`token`] - Category-coded tokens and a tokenizer for entry source
//! - [`parser`] - The `sort@key!sub|format` entry grammar
//! - [`types`] - [`IndexEntry`] and [`EntryType`]

pub mod parser;
pub mod token;
pub mod types;

pub use parser::{MAX_LEVELS, RawEntry, parse_entry, parse_entry_str, split_entry};
pub use token::{CatCode, PAGE_NUMBER_MACRO, Token, tokenize, tokens_to_source};
pub use types::{EntryType, IndexEntry};
