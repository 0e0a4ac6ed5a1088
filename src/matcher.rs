//! Backtracking search over a compiled automaton.
//!
//! The search is depth-first and runs on an explicit stack of [`Frame`]s
//! instead of native recursion. A state's transitions are pushed in reverse
//! so the first one is explored first. Every capture mutation pushes a
//! restore frame underneath the work it enables: when all of that work has
//! failed the restore frame pops and the slot goes back to what it was.

use log::trace;

use crate::automaton::{Automaton, Marker, StateId, TransitionKind};
use crate::captures::{CaptureSlots, Slot};
use crate::error::MatchError;
use crate::pattern::Anchor;

enum Frame {
    Explore { state: StateId, offset: usize },
    RestoreSlot { group: usize, slot: Slot },
    RestoreVisit { state: StateId, offset: Option<usize> },
}

/// All mutable state of one match call. The automaton is only read.
pub(crate) struct MatchContext<'p, 't> {
    automaton: &'p Automaton,
    text: &'t [char],
    captures: CaptureSlots,
    /// Offset at which each state was last entered on the current path.
    visits: Vec<Option<usize>>,
    stack: Vec<Frame>,
    steps: u64,
    max_steps: Option<u64>,
}

impl<'p, 't> MatchContext<'p, 't> {
    pub(crate) fn new(
        automaton: &'p Automaton,
        group_count: usize,
        text: &'t [char],
        max_steps: Option<u64>,
    ) -> Self {
        Self {
            automaton,
            text,
            captures: CaptureSlots::new(group_count),
            visits: vec![None; automaton.len()],
            stack: Vec::new(),
            steps: 0,
            max_steps,
        }
    }

    /// Leftmost search. Returns the matched span in code-point offsets.
    pub(crate) fn search(
        &mut self,
        start: StateId,
        anchor: Anchor,
    ) -> Result<Option<(usize, usize)>, MatchError> {
        let last_start = if anchor.anchors_start() {
            0
        } else {
            self.text.len()
        };

        for offset in 0..=last_start {
            if let Some(end) = self.attempt(start, offset, anchor.anchors_end())? {
                trace!("matched {offset}..{end} after {} steps", self.steps);
                return Ok(Some((offset, end)));
            }
        }
        trace!("no match after {} steps", self.steps);
        Ok(None)
    }

    /// Captured text of the last successful search, one entry per group.
    pub(crate) fn captures(&self) -> Vec<Option<String>> {
        self.captures.extract(self.text)
    }

    fn attempt(
        &mut self,
        start: StateId,
        offset: usize,
        require_end: bool,
    ) -> Result<Option<usize>, MatchError> {
        trace!("attempt at offset {offset}");
        self.captures.reset();
        self.visits.fill(None);
        self.stack.clear();
        self.stack.push(Frame::Explore {
            state: start,
            offset,
        });

        while let Some(frame) = self.stack.pop() {
            let (state, offset) = match frame {
                Frame::Explore { state, offset } => (state, offset),
                Frame::RestoreSlot { group, slot } => {
                    self.captures.restore(group, slot);
                    continue;
                }
                Frame::RestoreVisit { state, offset } => {
                    self.visits[state.index()] = offset;
                    continue;
                }
            };

            self.steps += 1;
            if let Some(max_steps) = self.max_steps {
                if self.steps > max_steps {
                    return Err(MatchError::StepLimitExceeded { steps: self.steps });
                }
            }

            // back at a state without consuming anything: an empty loop
            let previous = self.visits[state.index()];
            if previous == Some(offset) {
                continue;
            }
            self.stack.push(Frame::RestoreVisit {
                state,
                offset: previous,
            });
            self.visits[state.index()] = Some(offset);

            let automaton = self.automaton;
            let node = &automaton[state];
            match node.marker {
                Marker::Final => {
                    if !require_end || offset == self.text.len() {
                        return Ok(Some(offset));
                    }
                    continue;
                }
                Marker::GroupStart(group) => {
                    if let Some(slot) = self.captures.open(group, offset) {
                        self.stack.push(Frame::RestoreSlot { group, slot });
                    }
                }
                Marker::GroupEnd(group) => {
                    if let Some(slot) = self.captures.close(group, offset) {
                        self.stack.push(Frame::RestoreSlot { group, slot });
                    }
                }
                Marker::Plain => {}
            }

            debug_assert!(
                !node.transitions.is_empty(),
                "non-final state {state} has no transitions"
            );

            for transition in node.transitions.iter().rev() {
                match &transition.kind {
                    TransitionKind::Epsilon => self.stack.push(Frame::Explore {
                        state: transition.to,
                        offset,
                    }),
                    TransitionKind::Consume(matcher) => {
                        if offset == self.text.len() {
                            continue;
                        }
                        if let Some(len) = matcher.consume(self.text, offset, &self.captures) {
                            self.stack.push(Frame::Explore {
                                state: transition.to,
                                offset: offset + len,
                            });
                        }
                    }
                }
            }
        }

        Ok(None)
    }
}
