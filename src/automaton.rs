//! Arena storage for the compiled automaton.
//!
//! States live in a single `Vec` and refer to each other by [`StateId`], so
//! the back-edges introduced by repetition are plain indices rather than
//! owning pointers.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::matchers::CharacterMatcher;

/// Index into [`Automaton`]'s state arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Role a state plays in capture bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Plain,
    Final,
    GroupStart(usize),
    GroupEnd(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Epsilon,
    Consume(CharacterMatcher),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub to: StateId,
}

#[derive(Clone, Debug)]
pub struct State {
    pub marker: Marker,
    /// Tried in order; earlier edges take precedence.
    pub transitions: Vec<Transition>,
}

#[derive(Clone, Debug, Default)]
pub struct Automaton {
    states: Vec<State>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, marker: Marker) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(State {
            marker,
            transitions: Vec::new(),
        });
        id
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self[from].transitions.push(Transition {
            kind: TransitionKind::Epsilon,
            to,
        });
    }

    pub fn add_consume(&mut self, from: StateId, matcher: CharacterMatcher, to: StateId) {
        self[from].transitions.push(Transition {
            kind: TransitionKind::Consume(matcher),
            to,
        });
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (StateId(index), state))
    }

    /// Checks the structural invariants every compiled automaton upholds:
    /// exactly one final state, no dead-end non-final states, and no edge
    /// pointing outside the arena.
    pub fn is_well_formed(&self) -> bool {
        let finals = self
            .states
            .iter()
            .filter(|state| state.marker == Marker::Final)
            .count();
        finals == 1
            && self.states.iter().all(|state| {
                (state.marker == Marker::Final || !state.transitions.is_empty())
                    && state.transitions.iter().all(|t| t.to.0 < self.states.len())
            })
    }
}

impl Index<StateId> for Automaton {
    type Output = State;

    #[inline]
    fn index(&self, id: StateId) -> &State {
        &self.states[id.0]
    }
}

impl IndexMut<StateId> for Automaton {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.0]
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, state) in self.states() {
            match state.marker {
                Marker::Plain => writeln!(f, "{id}:")?,
                Marker::Final => writeln!(f, "{id}: final")?,
                Marker::GroupStart(group) => writeln!(f, "{id}: open {}", group + 1)?,
                Marker::GroupEnd(group) => writeln!(f, "{id}: close {}", group + 1)?,
            }
            for transition in &state.transitions {
                match &transition.kind {
                    TransitionKind::Epsilon => writeln!(f, "    -> {}", transition.to)?,
                    TransitionKind::Consume(matcher) => {
                        writeln!(f, "    {matcher} -> {}", transition.to)?
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_keep_insertion_order() {
        let mut automaton = Automaton::new();
        let a = automaton.add_state(Marker::Plain);
        let b = automaton.add_state(Marker::Final);
        automaton.add_consume(a, CharacterMatcher::Digit, b);
        automaton.add_epsilon(a, b);

        let kinds: Vec<_> = automaton[a].transitions.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![&TransitionKind::Consume(CharacterMatcher::Digit), &TransitionKind::Epsilon]
        );
        assert!(automaton.is_well_formed());
    }

    #[test]
    fn dead_end_state_is_malformed() {
        let mut automaton = Automaton::new();
        automaton.add_state(Marker::Plain);
        automaton.add_state(Marker::Final);
        assert!(!automaton.is_well_formed());
    }

    #[test]
    fn cycles_are_plain_indices() {
        let mut automaton = Automaton::new();
        let a = automaton.add_state(Marker::Plain);
        let b = automaton.add_state(Marker::Plain);
        let end = automaton.add_state(Marker::Final);
        automaton.add_consume(a, CharacterMatcher::Literal('x'), b);
        automaton.add_epsilon(b, a);
        automaton.add_epsilon(b, end);
        assert!(automaton.is_well_formed());
        assert_eq!(automaton[b].transitions[0].to, a);
    }

    #[test]
    fn display_lists_states() {
        let mut automaton = Automaton::new();
        let a = automaton.add_state(Marker::GroupStart(0));
        let b = automaton.add_state(Marker::Final);
        automaton.add_consume(a, CharacterMatcher::Literal('q'), b);
        assert_eq!(automaton.to_string(), "s0: open 1\n    'q' -> s1\ns1: final\n");
    }
}
