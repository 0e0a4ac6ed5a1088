//! Lowers a [`Syntax`] tree into an [`Automaton`].
//!
//! Every atom becomes a fragment with one entry and one exit state. A
//! sequence is built by joining each fragment's exit to the next fragment's
//! entry with an epsilon edge, the last one joining the tail it was compiled
//! against. Quantifiers only ever add epsilon edges around an existing
//! fragment, so nothing is cloned:
//!
//! ```text
//! a?   entry -> [a] -> exit        a+   [a] -> exit -> next
//!        \_____________^             ^______/
//! ```
//!
//! Edge order is match precedence. `?` tries the atom before the bypass and
//! `+` puts its back-edge ahead of the continuation, which makes both greedy.

use crate::automaton::{Automaton, Marker, StateId};
use crate::matchers::CharacterMatcher;
use crate::syntax::{Node, Syntax};

pub(crate) struct Program {
    pub(crate) automaton: Automaton,
    pub(crate) start: StateId,
}

#[derive(Clone, Copy, Debug)]
struct Fragment {
    entry: StateId,
    exit: StateId,
}

pub(crate) struct Compiler {
    automaton: Automaton,
}

impl Compiler {
    pub(crate) fn compile(syntax: &Syntax) -> Program {
        let mut compiler = Compiler {
            automaton: Automaton::new(),
        };
        let start = compiler.automaton.add_state(Marker::Plain);
        let accept = compiler.automaton.add_state(Marker::Final);
        compiler.branches(start, &syntax.alternatives, accept);

        debug_assert!(
            compiler.automaton.is_well_formed(),
            "malformed automaton:\n{}",
            compiler.automaton
        );
        Program {
            automaton: compiler.automaton,
            start,
        }
    }

    /// Connects `from` to `to` through each alternative, in order.
    fn branches(&mut self, from: StateId, alternatives: &[Vec<Node>], to: StateId) {
        for alternative in alternatives {
            let entry = self.sequence(alternative, to);
            self.automaton.add_epsilon(from, entry);
        }
    }

    /// Builds `nodes` in front of `tail` and returns the entry state. An
    /// empty sequence is just `tail`.
    fn sequence(&mut self, nodes: &[Node], tail: StateId) -> StateId {
        let fragments: Vec<Fragment> = nodes.iter().map(|node| self.fragment(node)).collect();

        fragments.iter().rev().fold(tail, |next, fragment| {
            self.automaton.add_epsilon(fragment.exit, next);
            fragment.entry
        })
    }

    fn fragment(&mut self, node: &Node) -> Fragment {
        match node {
            Node::Char(c) => self.consume(CharacterMatcher::Literal(*c)),
            Node::Dot => self.consume(CharacterMatcher::Wildcard),
            Node::Digit => self.consume(CharacterMatcher::Digit),
            Node::Word => self.consume(CharacterMatcher::Word),
            Node::CharClass(set) => self.consume(CharacterMatcher::Set(set.clone())),
            Node::Backreference(group) => self.consume(CharacterMatcher::GroupBackref(*group)),
            Node::Group {
                index,
                alternatives,
            } => {
                let entry = self.automaton.add_state(Marker::GroupStart(*index));
                let exit = self.automaton.add_state(Marker::GroupEnd(*index));
                self.branches(entry, alternatives, exit);
                Fragment { entry, exit }
            }
            Node::Question(inner) => {
                let inner = self.fragment(inner);
                self.optional(inner)
            }
            Node::Plus(inner) => {
                let inner = self.fragment(inner);
                self.repeat(inner)
            }
            Node::Star(inner) => {
                let inner = self.fragment(inner);
                let repeated = self.repeat(inner);
                self.optional(repeated)
            }
        }
    }

    fn consume(&mut self, matcher: CharacterMatcher) -> Fragment {
        let entry = self.automaton.add_state(Marker::Plain);
        let exit = self.automaton.add_state(Marker::Plain);
        self.automaton.add_consume(entry, matcher, exit);
        Fragment { entry, exit }
    }

    fn optional(&mut self, inner: Fragment) -> Fragment {
        let entry = self.automaton.add_state(Marker::Plain);
        let exit = self.automaton.add_state(Marker::Plain);
        self.automaton.add_epsilon(entry, inner.entry);
        self.automaton.add_epsilon(entry, exit);
        self.automaton.add_epsilon(inner.exit, exit);
        Fragment { entry, exit }
    }

    fn repeat(&mut self, inner: Fragment) -> Fragment {
        self.automaton.add_epsilon(inner.exit, inner.entry);
        inner
    }
}
