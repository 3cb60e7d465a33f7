use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::collections::btree_map;

use bit_set::BitSet;

use crate::transition::{Label, StateId, Transition};

/// A nondeterministic automaton with epsilon moves, as produced by Thompson's
/// construction: one start state, one end state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: usize,
    transitions: BTreeMap<Transition, BTreeSet<StateId>>,
    start: StateId,
    end: StateId,
}

impl Nfa {
    pub(crate) fn new() -> Nfa {
        Nfa {
            states: 0,
            transitions: BTreeMap::new(),
            start: 0,
            end: 0,
        }
    }

    /// Allocates a fresh state.
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = self.states;
        self.states += 1;
        id
    }

    pub(crate) fn add_transition(&mut self, from: StateId, label: Label, to: StateId) {
        debug_assert!(from < self.states && to < self.states);
        self.transitions
            .entry(Transition::new(from, label))
            .or_insert_with(BTreeSet::new)
            .insert(to);
    }

    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, Label::Epsilon, to);
    }

    pub(crate) fn set_bounds(&mut self, start: StateId, end: StateId) {
        self.start = start;
        self.end = end;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn end(&self) -> StateId {
        self.end
    }

    /// Number of allocated states. Every id below this is a state.
    pub fn state_count(&self) -> usize {
        self.states
    }

    /// All transitions, ordered by source state and then label.
    pub fn transitions(&self) -> btree_map::Iter<'_, Transition, BTreeSet<StateId>> {
        self.transitions.iter()
    }

    /// Direct successors of `state` along edges labelled `label`.
    pub fn successors(&self, state: StateId, label: Label) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&Transition::new(state, label))
            .into_iter()
            .flat_map(|to| to.iter().cloned())
    }

    /// States reachable from `state` through one or more epsilon moves.
    /// `state` itself is only in the result if an epsilon cycle leads back to it.
    pub fn epsilon_closure(&self, state: StateId) -> BitSet {
        let mut closure = BitSet::with_capacity(self.states);
        let mut queue: VecDeque<StateId> = self.successors(state, Label::Epsilon).collect();
        while let Some(s) = queue.pop_front() {
            if closure.insert(s) {
                queue.extend(self.successors(s, Label::Epsilon));
            }
        }
        closure
    }

    pub fn epsilon_closure_set(&self, states: &BitSet) -> BitSet {
        let mut closure = BitSet::with_capacity(self.states);
        for s in states.iter() {
            closure.union_with(&self.epsilon_closure(s));
        }
        closure
    }

    /// One move on `symbol` out of `state`, followed by any number of epsilon
    /// moves.
    pub fn connected_states(&self, state: StateId, symbol: char) -> BitSet {
        let mut moved = BitSet::with_capacity(self.states);
        moved.extend(self.successors(state, Label::Symbol(symbol)));
        if !moved.is_empty() {
            let closure = self.epsilon_closure_set(&moved);
            moved.union_with(&closure);
        }
        moved
    }

    /// The start state together with its epsilon closure.
    pub fn start_set(&self) -> BitSet {
        let mut set = self.epsilon_closure(self.start);
        set.insert(self.start);
        set
    }

    /// Simulates the automaton directly on `input`, tracking the full set of
    /// live states.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = self.start_set();
        for c in input.chars() {
            let mut next = BitSet::with_capacity(self.states);
            for s in current.iter() {
                next.union_with(&self.connected_states(s, c));
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }
        current.contains(self.end)
    }
}
