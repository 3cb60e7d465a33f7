//! Regular expressions over a finite alphabet, compiled to a Thompson NFA and
//! then to a DFA by subset construction.
//!
//! ```
//! use std::collections::BTreeSet;
//!
//! let alphabet: BTreeSet<char> = "abc".chars().collect();
//! let nfa = grepy::build_nfa("(a+b)*c", &alphabet).unwrap();
//! let dfa = grepy::build_dfa(&nfa, &alphabet);
//! assert!(dfa.accepts("abac"));
//! assert!(!dfa.accepts("ca"));
//! println!("{}", grepy::serialize(&dfa));
//! ```
//!
//! The DFA may have up to 2^n states for an NFA with n states; it is not
//! minimized.

use std::collections::BTreeSet;

pub use crate::dfa::Dfa;
pub use crate::dot::{serialize, Dot, Graph};
pub use crate::nfa::Nfa;
pub use crate::regex::ParseError;
pub use crate::transition::{Label, StateId, Transition};
pub mod dfa;
pub mod dot;
pub mod nfa;
pub mod regex;
pub mod transition;

/// Parses `regex` into an NFA. See [`regex::parse`].
pub fn build_nfa(regex: &str, alphabet: &BTreeSet<char>) -> Result<Nfa, ParseError> {
    regex::parse(regex, alphabet)
}

/// Determinizes `nfa` over `alphabet`.
pub fn build_dfa(nfa: &Nfa, alphabet: &BTreeSet<char>) -> Dfa {
    Dfa::from_nfa(nfa, alphabet)
}
