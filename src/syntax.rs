use crate::matchers::CharSet;
use crate::pattern::Anchor;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Char(char),
    Dot,                             // .
    Digit,                           // \d
    Word,                            // \w
    CharClass(CharSet),              // [abc] or [^abc]
    Backreference(usize),            // \1 refers to group 0
    Group {
        index: usize,
        alternatives: Vec<Vec<Node>>,
    },
    Question(Box<Node>),             // ?
    Plus(Box<Node>),                 // +
    Star(Box<Node>),                 // *
}

/// Parsed pattern with anchors stripped and groups numbered.
#[derive(Debug, Clone, PartialEq)]
pub struct Syntax {
    pub anchor: Anchor,
    /// Top-level `|` branches; a pattern without `|` has exactly one.
    pub alternatives: Vec<Vec<Node>>,
    pub group_count: usize,
}
