use std::fmt;

/// Index of a state in an automaton. Ids are handed out in increasing order
/// and never reused.
pub type StateId = usize;

/// What an edge is labelled with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// The empty move. Only NFAs have these.
    Epsilon,
    /// Consumes exactly this character.
    Symbol(char),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Label::Epsilon => write!(f, "epsilon"),
            Label::Symbol(c) => write!(f, "{}", c),
        }
    }
}

/// A (state, label) pair, the key of both automata's transition maps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub state: StateId,
    pub label: Label,
}

impl Transition {
    pub fn new(state: StateId, label: Label) -> Transition {
        Transition { state, label }
    }

    pub fn epsilon(state: StateId) -> Transition {
        Transition::new(state, Label::Epsilon)
    }

    pub fn on(state: StateId, symbol: char) -> Transition {
        Transition::new(state, Label::Symbol(symbol))
    }
}
