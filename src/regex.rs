use std::collections::BTreeSet;
use std::iter::Peekable;
use std::{error, fmt};

use log::debug;

use crate::nfa::Nfa;
use crate::transition::{Label, StateId};

/*
Union  : Concat
       : Concat '+' Union
Concat : Kleene
       : Kleene Concat
Kleene : Symbol
       : Symbol '*'
Symbol : '(' Union ')'
       : CHAR            (any member of the alphabet)
*/

/// Why a regex was rejected. Offsets count characters from the start of the
/// regex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The regex ended where a symbol or a group was required.
    UnexpectedEndOfInput { offset: usize },
    /// A symbol was required but this character is not in the alphabet.
    CharacterNotInAlphabet { offset: usize, found: char },
    /// The group opened at `offset` is never closed.
    UnmatchedParenthesis { offset: usize },
    /// A complete expression was followed by more input.
    TrailingInput { offset: usize, found: char },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::UnexpectedEndOfInput { offset } => {
                write!(f, "unexpected end of regex at offset {}", offset)
            }
            ParseError::CharacterNotInAlphabet { offset, found } => {
                write!(f, "character `{}` at offset {} is not in the alphabet", found, offset)
            }
            ParseError::UnmatchedParenthesis { offset } => {
                write!(f, "unmatched '(' at offset {}", offset)
            }
            ParseError::TrailingInput { offset, found } => {
                write!(f, "invalid characters beyond regex starting with `{}` at offset {}", found, offset)
            }
        }
    }
}

impl error::Error for ParseError {}

/// Boundary states of the sub-automaton built for one sub-expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Fragment {
    start: StateId,
    end: StateId,
}

struct Parser<'a, I: Iterator<Item = char>> {
    it: Peekable<I>,
    offset: usize,
    alphabet: &'a BTreeSet<char>,
    nfa: Nfa,
}

type Res<T> = Result<T, ParseError>;

impl<'a, I: Iterator<Item = char>> Parser<'a, I> {
    fn peek(&mut self) -> Option<char> {
        self.it.peek().cloned()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.it.next();
        if c.is_some() {
            self.offset += 1;
        }
        c
    }

    fn symbol(&mut self) -> Res<Fragment> {
        match self.peek() {
            Some('(') => {
                let open = self.offset;
                self.bump();
                let inner = self.union()?;
                match self.bump() {
                    Some(')') => Ok(inner),
                    // a union only stops at ')' or the end of input
                    _ => Err(ParseError::UnmatchedParenthesis { offset: open }),
                }
            }
            Some(c) if self.alphabet.contains(&c) => {
                self.bump();
                let start = self.nfa.add_state();
                let end = self.nfa.add_state();
                self.nfa.add_transition(start, Label::Symbol(c), end);
                Ok(Fragment { start, end })
            }
            Some(c) => Err(ParseError::CharacterNotInAlphabet { offset: self.offset, found: c }),
            None => Err(ParseError::UnexpectedEndOfInput { offset: self.offset }),
        }
    }

    fn kleene(&mut self) -> Res<Fragment> {
        let r = self.symbol()?;
        if let Some('*') = self.peek() {
            self.bump();
            self.nfa.add_epsilon(r.end, r.start);
            self.nfa.add_epsilon(r.start, r.end);
        }
        Ok(r)
    }

    fn concat(&mut self) -> Res<Fragment> {
        let first = self.kleene()?;
        let mut last = first;
        loop {
            match self.peek() {
                None | Some(')') | Some('+') => break,
                Some(_) => {
                    let next = self.kleene()?;
                    self.nfa.add_epsilon(last.end, next.start);
                    last = next;
                }
            }
        }
        Ok(Fragment { start: first.start, end: last.end })
    }

    fn union(&mut self) -> Res<Fragment> {
        let mut lefts = Vec::new();
        let mut r = self.concat()?;
        loop {
            match self.peek() {
                None | Some(')') => break,
                Some('+') => {
                    self.bump();
                    lefts.push(r);
                    r = self.concat()?;
                }
                Some(c) => return Err(ParseError::TrailingInput { offset: self.offset, found: c }),
            }
        }
        // `a+b+c` nests to the right, so the innermost union gets its
        // boundary states first.
        while let Some(left) = lefts.pop() {
            let start = self.nfa.add_state();
            let end = self.nfa.add_state();
            self.nfa.add_epsilon(start, left.start);
            self.nfa.add_epsilon(start, r.start);
            self.nfa.add_epsilon(left.end, end);
            self.nfa.add_epsilon(r.end, end);
            r = Fragment { start, end };
        }
        Ok(r)
    }

    fn parse(it: I, alphabet: &'a BTreeSet<char>) -> Res<Nfa> {
        let mut parser = Parser { it: it.peekable(), offset: 0, alphabet, nfa: Nfa::new() };
        let r = parser.union()?;
        if let Some(c) = parser.peek() {
            return Err(ParseError::TrailingInput { offset: parser.offset, found: c });
        }
        let mut nfa = parser.nfa;
        nfa.set_bounds(r.start, r.end);
        Ok(nfa)
    }
}

/// Builds the Thompson NFA of `regex` over `alphabet`.
///
/// Only characters in `alphabet` may appear as literals. `+` is union, `*` is
/// Kleene star, adjacency is concatenation and parentheses group. The first
/// error aborts the whole construction.
pub fn parse(regex: &str, alphabet: &BTreeSet<char>) -> Result<Nfa, ParseError> {
    let nfa = Parser::parse(regex.chars(), alphabet)?;
    debug!(
        "built nfa for {:?}: {} states, start {}, end {}",
        regex,
        nfa.state_count(),
        nfa.start(),
        nfa.end()
    );
    Ok(nfa)
}
