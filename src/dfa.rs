use std::collections::btree_map::{self, Entry};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use bit_set::BitSet;
use log::{debug, trace};
use vec_map::VecMap;

use crate::nfa::Nfa;
use crate::transition::{StateId, Transition};

/// A deterministic automaton obtained from an `Nfa` by subset construction.
///
/// State 0 is the start state. Every state stands for one set of NFA states;
/// a missing transition means the input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    states: usize,
    transitions: BTreeMap<Transition, StateId>,
    accepting: BitSet,
    labels: VecMap<String>,
}

type Worklist = (BTreeMap<BitSet, StateId>, VecDeque<(StateId, BitSet)>);

impl Dfa {
    pub fn from_nfa(nfa: &Nfa, alphabet: &BTreeSet<char>) -> Dfa {
        // Returns the id of `subset`, numbering and queueing it the first
        // time it is seen.
        fn index(worklist: &mut Worklist, subset: BitSet) -> StateId {
            let next_index = worklist.0.len();
            match worklist.0.entry(subset) {
                Entry::Vacant(view) => {
                    worklist.1.push_back((next_index, view.key().clone()));
                    view.insert(next_index);
                    next_index
                }
                Entry::Occupied(view) => *view.get(),
            }
        }

        let mut result = Dfa {
            states: 0,
            transitions: BTreeMap::new(),
            accepting: BitSet::new(),
            labels: VecMap::new(),
        };
        let mut worklist = (BTreeMap::new(), VecDeque::new());

        index(&mut worklist, nfa.start_set());

        while let Some((id, subset)) = worklist.1.pop_front() {
            if subset.contains(nfa.end()) {
                result.accepting.insert(id);
            }
            let label = render_subset(&subset);
            trace!("dfa state {} = {}", id, label);
            result.labels.insert(id, label);

            for &symbol in alphabet {
                let mut next = BitSet::with_capacity(nfa.state_count());
                for state in subset.iter() {
                    next.union_with(&nfa.connected_states(state, symbol));
                }
                if next.is_empty() {
                    continue;
                }
                let target = index(&mut worklist, next);
                result.transitions.insert(Transition::on(id, symbol), target);
            }
        }
        result.states = worklist.0.len();

        debug!(
            "subset construction: {} nfa states -> {} dfa states, {} accepting",
            nfa.state_count(),
            result.states,
            result.accepting.len()
        );
        result
    }

    pub fn start(&self) -> StateId {
        0
    }

    pub fn state_count(&self) -> usize {
        self.states
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state)
    }

    /// The NFA states `state` stands for, rendered as `{0, 2, 5}`.
    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get(state).map(|s| s.as_str())
    }

    pub fn transitions(&self) -> btree_map::Iter<'_, Transition, StateId> {
        self.transitions.iter()
    }

    pub fn step(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.transitions.get(&Transition::on(state, symbol)).cloned()
    }

    /// Runs the automaton over `input`. Characters without a transition,
    /// including ones outside the alphabet, reject at once.
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.start();
        for c in input.chars() {
            match self.step(state, c) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }
}

fn render_subset(subset: &BitSet) -> String {
    let members: Vec<String> = subset.iter().map(|s| s.to_string()).collect();
    format!("{{{}}}", members.join(", "))
}
