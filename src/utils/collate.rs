//! Pluggable collation and transliteration.
//!
//! Index ordering goes through a [`Collate`] provider that maps a string to a
//! comparable [`CollationKey`]; grouping by leading letter goes through a
//! [`Transliterate`] provider that folds text to ASCII. Both are optional:
//! a missing provider is reported once and replaced by case folding or the
//! identity respectively.

use deunicode::deunicode_char;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Once;
use tracing::warn;

static COLLATOR_FALLBACK: Once = Once::new();
static TRANSLITERATOR_FALLBACK: Once = Once::new();

/// Comparable form of a string under some collation
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollationKey(Vec<u32>);

impl CollationKey {
    pub fn new(weights: Vec<u32>) -> Self {
        Self(weights)
    }
}

impl From<&str> for CollationKey {
    fn from(text: &str) -> Self {
        Self(text.chars().map(u32::from).collect())
    }
}

pub trait Collate: Send + Sync {
    fn collation_key(&self, text: &str) -> CollationKey;
}

impl<F> Collate for F
where
    F: Fn(&str) -> CollationKey + Send + Sync,
{
    fn collation_key(&self, text: &str) -> CollationKey {
        self(text)
    }
}

pub trait Transliterate: Send + Sync {
    /// Fold text to an ASCII approximation
    fn transliterate(&self, text: &str) -> String;
}

impl<F> Transliterate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// Case-insensitive code point order
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFold;

impl Collate for CaseFold {
    fn collation_key(&self, text: &str) -> CollationKey {
        CollationKey::from(text.to_lowercase().as_str())
    }
}

/// Case- and accent-insensitive order: text is transliterated to ASCII
/// before case folding, so `Éclair` sorts with `eclair`
#[derive(Debug, Clone, Copy, Default)]
pub struct AccentFold;

impl Collate for AccentFold {
    fn collation_key(&self, text: &str) -> CollationKey {
        CollationKey::from(LatinFold.transliterate(text).to_lowercase().as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transliterate for Identity {
    fn transliterate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Transliteration to Latin ASCII: accented letters lose their marks,
/// other scripts are romanized and ligatures are spelled out.
/// Characters without a mapping pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinFold;

impl Transliterate for LatinFold {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match deunicode_char(ch) {
                Some(folded) => out.push_str(folded),
                None => out.push(ch),
            }
        }
        out
    }
}

/// Built-in collators selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollationKind {
    #[default]
    AccentFold,
    CaseFold,
}

/// Built-in transliterators selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransliterationKind {
    #[default]
    Latin,
    Identity,
}

/// The collation and transliteration providers used for one index
pub struct Collation {
    collator: Box<dyn Collate>,
    transliterator: Box<dyn Transliterate>,
}

impl Collation {
    pub fn new(collator: Box<dyn Collate>, transliterator: Box<dyn Transliterate>) -> Self {
        Self {
            collator,
            transliterator,
        }
    }

    /// Use the given providers, falling back to case folding and the
    /// identity for any that are missing
    pub fn with_providers(
        collator: Option<Box<dyn Collate>>,
        transliterator: Option<Box<dyn Transliterate>>,
    ) -> Self {
        let collator = collator.unwrap_or_else(|| {
            COLLATOR_FALLBACK.call_once(|| {
                warn!(
                    capability = "collation",
                    "no collation provider available, sorting index entries by case-folded text"
                );
            });
            Box::new(CaseFold)
        });
        let transliterator = transliterator.unwrap_or_else(|| {
            TRANSLITERATOR_FALLBACK.call_once(|| {
                warn!(
                    capability = "transliteration",
                    "no transliteration provider available, expect issues with index grouping"
                );
            });
            Box::new(Identity)
        });
        Self::new(collator, transliterator)
    }

    /// Fallback providers only
    pub fn fallback() -> Self {
        Self::with_providers(None, None)
    }

    pub fn from_kinds(collation: CollationKind, transliteration: TransliterationKind) -> Self {
        let collator: Box<dyn Collate> = match collation {
            CollationKind::AccentFold => Box::new(AccentFold),
            CollationKind::CaseFold => Box::new(CaseFold),
        };
        let transliterator: Box<dyn Transliterate> = match transliteration {
            TransliterationKind::Latin => Box::new(LatinFold),
            TransliterationKind::Identity => Box::new(Identity),
        };
        Self::new(collator, transliterator)
    }

    pub fn key(&self, text: &str) -> CollationKey {
        self.collator.collation_key(text)
    }

    pub fn transliterate(&self, text: &str) -> String {
        self.transliterator.transliterate(text)
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::from_kinds(CollationKind::default(), TransliterationKind::default())
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_fold_ignores_case() {
        let collation = Collation::fallback();
        assert_eq!(collation.key("Apple"), collation.key("apple"));
        assert!(collation.key("apple") < collation.key("Banana"));
        assert_eq!(collation.transliterate("Éclair"), "Éclair");
    }

    #[test]
    fn test_accent_fold() {
        let collation = Collation::default();
        assert_eq!(collation.key("Éclair"), collation.key("eclair"));
        assert!(collation.key("Éclair") < collation.key("fig"));
        assert_eq!(collation.transliterate("Ærø"), "AEro");
        assert_eq!(collation.transliterate("naïve"), "naive");
    }

    #[test]
    fn test_latin_fold_beyond_latin_1() {
        let fold = LatinFold;
        assert_eq!(fold.transliterate("Ŝoĳ"), "Soij");
        assert_eq!(fold.transliterate("Ĳssel"), "IJssel");
        assert!(fold.transliterate("αβγ").starts_with('a'));
        assert_eq!(fold.transliterate("Straße"), "Strasse");
        assert_eq!(Collation::default().key("Ŝako"), Collation::default().key("sako"));
    }

    #[test]
    fn test_closure_providers() {
        let reversed = |text: &str| CollationKey::new(text.chars().rev().map(u32::from).collect());
        let upper = |text: &str| text.to_uppercase();
        let collation = Collation::with_providers(Some(Box::new(reversed)), Some(Box::new(upper)));
        assert!(collation.key("ab") > collation.key("ba"));
        assert_eq!(collation.transliterate("abc"), "ABC");
    }

    #[test]
    fn test_kinds_deserialize() {
        let kind: CollationKind = serde_json::from_str("\"case-fold\"").unwrap();
        assert_eq!(kind, CollationKind::CaseFold);
        let kind: TransliterationKind = serde_json::from_str("\"identity\"").unwrap();
        assert_eq!(kind, TransliterationKind::Identity);
    }
}
