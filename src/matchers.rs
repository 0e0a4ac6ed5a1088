use std::fmt;

use crate::captures::CaptureSlots;

pub(crate) const DIGITS: &str = "0123456789";
pub(crate) const WORD_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Members of a bracket expression, sorted and deduplicated at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    polarity: Polarity,
    members: Vec<char>,
}

impl CharSet {
    pub fn new(polarity: Polarity, members: impl IntoIterator<Item = char>) -> Self {
        let mut members: Vec<char> = members.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self { polarity, members }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn members(&self) -> &[char] {
        &self.members
    }

    pub fn allows(&self, c: char) -> bool {
        let hit = self.members.binary_search(&c).is_ok();
        match self.polarity {
            Polarity::Positive => hit,
            Polarity::Negative => !hit,
        }
    }
}

/// Predicate attached to every consuming edge of the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterMatcher {
    Literal(char),
    Digit,
    Word,
    Wildcard,
    Set(CharSet),
    /// Zero-based group index.
    GroupBackref(usize),
}

impl CharacterMatcher {
    /// Returns the number of code points consumed at `offset`, or `None`.
    ///
    /// Callers guarantee `offset < text.len()`; the matcher never consumes at
    /// the end of input.
    pub(crate) fn consume(
        &self,
        text: &[char],
        offset: usize,
        captures: &CaptureSlots,
    ) -> Option<usize> {
        let c = *text.get(offset)?;
        let single = match self {
            CharacterMatcher::Literal(expected) => c == *expected,
            CharacterMatcher::Digit => c.is_ascii_digit(),
            CharacterMatcher::Word => is_word(c),
            CharacterMatcher::Wildcard => true,
            CharacterMatcher::Set(set) => set.allows(c),
            CharacterMatcher::GroupBackref(group) => {
                let (start, end) = captures.span(*group)?;
                let captured = &text[start..end];
                let rest = &text[offset..];
                return rest.starts_with(captured).then_some(captured.len());
            }
        };
        single.then_some(1)
    }
}

pub(crate) fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl fmt::Display for CharacterMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterMatcher::Literal(c) => write!(f, "{c:?}"),
            CharacterMatcher::Digit => f.write_str("\\d"),
            CharacterMatcher::Word => f.write_str("\\w"),
            CharacterMatcher::Wildcard => f.write_str("."),
            CharacterMatcher::Set(set) => {
                f.write_str("[")?;
                if set.polarity == Polarity::Negative {
                    f.write_str("^")?;
                }
                for c in &set.members {
                    write!(f, "{}", c.escape_debug())?;
                }
                f.write_str("]")
            }
            CharacterMatcher::GroupBackref(group) => write!(f, "\\{}", group + 1),
        }
    }
}
