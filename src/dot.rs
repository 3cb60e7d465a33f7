//! Graphviz rendering of both automata.
//!
//! Output is fully determined by the automaton: states are listed in id
//! order and edges by source, label and destination.

use std::borrow::Cow;
use std::fmt;

use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::transition::{Label, StateId};

/// Read-only view of an automaton, enough to draw it.
pub trait Graph {
    /// Name of the emitted `digraph`.
    const NAME: &'static str;

    fn start(&self) -> StateId;
    fn state_count(&self) -> usize;
    fn is_accepting(&self, state: StateId) -> bool;
    fn state_label(&self, state: StateId) -> Cow<'_, str>;
    /// Every edge as `(source, label, destination)`, in ascending order.
    fn edges(&self) -> Box<dyn Iterator<Item = (StateId, Label, StateId)> + '_>;
}

impl Graph for Nfa {
    const NAME: &'static str = "nfa";

    fn start(&self) -> StateId {
        Nfa::start(self)
    }

    fn state_count(&self) -> usize {
        Nfa::state_count(self)
    }

    fn is_accepting(&self, state: StateId) -> bool {
        state == self.end()
    }

    fn state_label(&self, state: StateId) -> Cow<'_, str> {
        Cow::Owned(state.to_string())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (StateId, Label, StateId)> + '_> {
        Box::new(
            self.transitions()
                .flat_map(|(t, to)| to.iter().map(move |&dest| (t.state, t.label, dest))),
        )
    }
}

impl Graph for Dfa {
    const NAME: &'static str = "dfa";

    fn start(&self) -> StateId {
        Dfa::start(self)
    }

    fn state_count(&self) -> usize {
        Dfa::state_count(self)
    }

    fn is_accepting(&self, state: StateId) -> bool {
        Dfa::is_accepting(self, state)
    }

    fn state_label(&self, state: StateId) -> Cow<'_, str> {
        match self.label(state) {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(state.to_string()),
        }
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (StateId, Label, StateId)> + '_> {
        Box::new(self.transitions().map(|(t, &dest)| (t.state, t.label, dest)))
    }
}

/// Displays a graph in DOT syntax.
pub struct Dot<'a, G>(pub &'a G);

impl<'a, G: Graph> fmt::Display for Dot<'a, G> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let g = self.0;
        writeln!(f, "digraph {} {{", G::NAME)?;
        writeln!(f, "    rankdir=LR;")?;
        for state in (0..g.state_count()).filter(|&s| g.is_accepting(s)) {
            writeln!(f, "    {} [shape=doublecircle];", state)?;
        }
        writeln!(f, "    start [shape=point, style=invis];")?;
        writeln!(f, "    start -> {};", g.start())?;
        for state in 0..g.state_count() {
            writeln!(f, "    {} [label=\"{}\"];", state, escape(&g.state_label(state)))?;
        }
        for (from, label, to) in g.edges() {
            writeln!(f, "    {} -> {} [label=\"{}\"];", from, to, escape(&label.to_string()))?;
        }
        writeln!(f, "}}")
    }
}

/// Renders `graph` as DOT text.
pub fn serialize<G: Graph>(graph: &G) -> String {
    Dot(graph).to_string()
}

fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(|c: char| c == '"' || c == '\\') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}
