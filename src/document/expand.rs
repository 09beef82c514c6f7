use super::{Fragment, Inline};
use crate::entry::{CatCode, PAGE_NUMBER_MACRO, Token};
use rustc_hash::FxHashMap;

/// Deepest brace nesting that becomes groups; deeper braces stay literal text
pub const MAX_NESTING: usize = 128;

/// Turns token sequences into rendered content
pub trait Expand {
    fn expand(&self, tokens: &[Token]) -> Fragment;

    fn expand_to_text(&self, tokens: &[Token]) -> String {
        self.expand(tokens).text_content()
    }
}

/// Minimal macro expander.
///
/// Commands with a registered arity take exactly that many arguments; any
/// other command takes the brace groups that immediately follow it. Control
/// symbols such as `\&` expand to their character. Braces nested deeper than
/// [`MAX_NESTING`] are kept as text.
#[derive(Debug, Clone)]
pub struct MacroExpander {
    arities: FxHashMap<String, usize>,
    replacements: FxHashMap<String, String>,
}

impl Default for MacroExpander {
    fn default() -> Self {
        let mut expander = Self {
            arities: FxHashMap::default(),
            replacements: FxHashMap::default(),
        };
        // Cross references take the target text and the page number
        expander.define("see", 2);
        expander.define("seealso", 2);
        for name in [
            "textbf", "textit", "textsl", "textsc", "textsf", "texttt", "textrm", "emph",
            "underline", "hyperpage",
        ] {
            expander.define(name, 1);
        }
        for (name, text) in [
            ("TeX", "TeX"),
            ("LaTeX", "LaTeX"),
            ("ldots", "..."),
            ("textbackslash", "\\"),
        ] {
            expander.replace(name, text);
        }
        expander
    }
}

impl MacroExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command taking `arity` arguments
    pub fn define(&mut self, name: &str, arity: usize) {
        self.arities.insert(name.to_string(), arity);
    }

    /// Register a command that expands to fixed text
    pub fn replace(&mut self, name: &str, text: &str) {
        self.replacements.insert(name.to_string(), text.to_string());
    }
}

impl Expand for MacroExpander {
    fn expand(&self, tokens: &[Token]) -> Fragment {
        Expansion {
            expander: self,
            tokens,
            pos: 0,
            depth: 0,
            literal_braces: 0,
        }
        .parse_sequence(false)
    }
}

struct Expansion<'a> {
    expander: &'a MacroExpander,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    /// Open braces past the nesting limit, emitted as text
    literal_braces: usize,
}

impl<'a> Expansion<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|t| t.catcode() == Some(CatCode::Space)) {
            self.pos += 1;
        }
    }

    fn parse_sequence(&mut self, in_group: bool) -> Fragment {
        let mut fragment = Fragment::new();
        while let Some(tok) = self.next() {
            match tok {
                Token::Char {
                    cat: CatCode::BeginGroup,
                    ..
                } => match self.parse_group() {
                    Some(body) => fragment.push(Inline::Group { body }),
                    None => fragment.push_text("{"),
                },
                Token::Char {
                    cat: CatCode::EndGroup,
                    ..
                } => {
                    if self.literal_braces > 0 {
                        self.literal_braces -= 1;
                        fragment.push_text("}");
                    } else if in_group {
                        return fragment;
                    }
                    // Unbalanced closing brace, dropped
                }
                Token::Char { ch, .. } => {
                    let mut buf = [0u8; 4];
                    fragment.push_text(ch.encode_utf8(&mut buf));
                }
                Token::ControlSequence(name) => self.expand_control(name, &mut fragment),
            }
        }
        fragment
    }

    /// Body of a group whose `{` was just consumed, or `None` when the
    /// nesting limit is reached and the brace is literal
    fn parse_group(&mut self) -> Option<Fragment> {
        if self.depth >= MAX_NESTING {
            self.literal_braces += 1;
            return None;
        }
        self.depth += 1;
        let body = self.parse_sequence(true);
        self.depth -= 1;
        Some(body)
    }

    fn expand_control(&mut self, name: &str, out: &mut Fragment) {
        if name == PAGE_NUMBER_MACRO {
            out.push(Inline::PageNumber);
            return;
        }
        if let Some(text) = self.expander.replacements.get(name) {
            out.push_text(text);
            return;
        }
        if !name.chars().all(char::is_alphabetic) {
            out.push_text(name);
            return;
        }

        let arity = self.expander.arities.get(name).copied();
        let mut literal_open = false;
        let args = match arity {
            Some(arity) => (0..arity).map_while(|_| self.parse_argument()).collect(),
            None => {
                let mut args = Vec::new();
                while self
                    .peek()
                    .is_some_and(|t| t.catcode() == Some(CatCode::BeginGroup))
                {
                    self.pos += 1;
                    match self.parse_group() {
                        Some(arg) => args.push(arg),
                        None => {
                            literal_open = true;
                            break;
                        }
                    }
                }
                args
            }
        };
        out.push(Inline::Command {
            name: name.to_string(),
            args,
        });
        if literal_open {
            out.push_text("{");
        }
    }

    /// One undelimited argument: a brace group or a single token
    fn parse_argument(&mut self) -> Option<Fragment> {
        self.skip_spaces();
        let tok = self.peek()?;
        match tok.catcode() {
            Some(CatCode::EndGroup) => None,
            Some(CatCode::BeginGroup) => {
                self.pos += 1;
                Some(self.parse_group().unwrap_or_else(|| Fragment::text("{")))
            }
            _ => {
                self.pos += 1;
                Some(self.expander.expand(std::slice::from_ref(tok)))
            }
        }
    }
}
