use std::fmt;
use std::str::FromStr;

use log::{debug, trace};

use crate::automaton::{Automaton, StateId};
use crate::compiler::{Compiler, Program};
use crate::error::{CompileError, MatchError};
use crate::matcher::MatchContext;
use crate::parser::parse_pattern;

/// Where a match has to sit within the input line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    None,
    StartOfLine,
    EndOfLine,
    /// The whole line, starting at offset 0.
    BothEnds,
}

impl Anchor {
    pub fn from_flags(start: bool, end: bool) -> Self {
        match (start, end) {
            (false, false) => Anchor::None,
            (true, false) => Anchor::StartOfLine,
            (false, true) => Anchor::EndOfLine,
            (true, true) => Anchor::BothEnds,
        }
    }

    pub fn anchors_start(self) -> bool {
        matches!(self, Anchor::StartOfLine | Anchor::BothEnds)
    }

    pub fn anchors_end(self) -> bool {
        matches!(self, Anchor::EndOfLine | Anchor::BothEnds)
    }
}

/// A compiled pattern.
///
/// Compiling validates the whole pattern up front; matching never fails.
/// The automaton is never written to after compilation, so one `Pattern`
/// can serve any number of calls, from any number of threads.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    anchor: Anchor,
    automaton: Automaton,
    start: StateId,
    group_count: usize,
}

/// Shorthand for [`Pattern::compile`].
pub fn compile(pattern: &str) -> Result<Pattern, CompileError> {
    Pattern::compile(pattern)
}

impl Pattern {
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        let syntax = parse_pattern(pattern)?;
        let Program { automaton, start } = Compiler::compile(&syntax);

        debug!(
            "compiled {pattern:?}: {} states, {} groups, anchor {:?}",
            automaton.len(),
            syntax.group_count,
            syntax.anchor
        );
        trace!("automaton for {pattern:?}:\n{automaton}");

        Ok(Self {
            source: pattern.to_string(),
            anchor: syntax.anchor,
            automaton,
            start,
            group_count: syntax.group_count,
        })
    }

    /// Whether any position of `text` starts a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.with_context(text, None, |context| {
            matches!(context.search(self.start, self.anchor), Ok(Some(_)))
        })
    }

    /// Captured text of each group for the leftmost match, in group order.
    ///
    /// Returns `None` when there is no match. A group that did not take part
    /// in the match is reported as `None`.
    pub fn captures(&self, text: &str) -> Option<Vec<Option<String>>> {
        self.with_context(text, None, |context| {
            match context.search(self.start, self.anchor) {
                Ok(Some(_)) => Some(context.captures()),
                _ => None,
            }
        })
    }

    /// Like [`Pattern::is_match`], but gives up once `max_steps` automaton
    /// states have been explored.
    pub fn try_is_match(&self, text: &str, max_steps: u64) -> Result<bool, MatchError> {
        self.with_context(text, Some(max_steps), |context| {
            context
                .search(self.start, self.anchor)
                .map(|found| found.is_some())
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn state_count(&self) -> usize {
        self.automaton.len()
    }

    fn with_context<R>(
        &self,
        text: &str,
        max_steps: Option<u64>,
        f: impl FnOnce(&mut MatchContext<'_, '_>) -> R,
    ) -> R {
        let chars: Vec<char> = text.chars().collect();
        let mut context = MatchContext::new(&self.automaton, self.group_count, &chars, max_steps);
        f(&mut context)
    }
}

impl FromStr for Pattern {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
