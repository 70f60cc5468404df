// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pattern matching state machine.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::dictionary::Pattern;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct StateId(u32);

impl StateId {
    const ROOT: Self = Self(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct State {
    transitions: SmallVec<[(char, StateId); 2]>,
    /// Longest proper suffix of this state's key that is also a key.
    fallback: Option<StateId>,
    /// End-aligned weights to overlay when this state is reached.
    matched: Option<Box<[u8]>>,
}

impl State {
    fn next(&self, ch: char) -> Option<StateId> {
        self.transitions
            .iter()
            .find_map(|(c, id)| (*c == ch).then_some(*id))
    }
}

/// A state machine with one state per pattern prefix.
///
/// Feeding a word through the machine visits, at every character, the longest
/// pattern prefix ending there. Fallback links make the walk total, in the
/// manner of Aho-Corasick.
#[derive(Clone, Debug)]
pub(crate) struct Automaton {
    states: Vec<State>,
}

impl Automaton {
    pub(crate) fn build(patterns: &[Pattern]) -> Self {
        let mut states = vec![State::default()];
        let mut keys: HashMap<String, StateId> = HashMap::new();
        keys.insert(String::new(), StateId::ROOT);

        let add_state = |states: &mut Vec<State>| {
            let id = StateId(u32::try_from(states.len()).unwrap_or(u32::MAX));
            states.push(State::default());
            id
        };

        for pattern in patterns {
            let word = pattern.letters.as_str();
            let (mut state, mut existed) = match keys.get(word) {
                Some(id) => (*id, true),
                None => {
                    let id = add_state(&mut states);
                    keys.insert(word.to_string(), id);
                    (id, false)
                }
            };
            states[state.index()].matched = Some(pattern.trimmed_weights().into());

            // Walk back through the prefixes, linking each new state to its parent.
            let mut prefix = word;
            while !existed {
                let Some(ch) = prefix.chars().next_back() else {
                    break;
                };
                prefix = &prefix[..prefix.len() - ch.len_utf8()];
                let child = state;
                (state, existed) = match keys.get(prefix) {
                    Some(id) => (*id, true),
                    None => {
                        let id = add_state(&mut states);
                        keys.insert(prefix.to_string(), id);
                        (id, false)
                    }
                };
                states[state.index()].transitions.push((ch, child));
            }
        }

        for (key, id) in &keys {
            states[id.index()].fallback = key
                .char_indices()
                .skip(1)
                .map(|(at, _)| &key[at..])
                .chain((!key.is_empty()).then_some(""))
                .find_map(|suffix| keys.get(suffix).copied());
        }

        Self { states }
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Computes raw gap weights for `word`, already lowercased.
    ///
    /// The result has one entry per character of `word`; entry `i` is the
    /// weight of the gap after character `i`. Gaps too close to either end of
    /// the word are forced to zero.
    pub(crate) fn weights(&self, word: &[char]) -> Vec<u8> {
        let len = word.len();
        if len < 3 {
            return vec![0; len];
        }
        let prepared: Vec<char> = core::iter::once('.')
            .chain(word.iter().copied())
            .chain(core::iter::once('.'))
            .collect();
        // Entry `p` is the gap after prepared character `p`.
        let mut gaps = vec![0_u8; prepared.len() + 1];
        let mut state = Some(StateId::ROOT);

        'letters: for (i, &ch) in prepared.iter().enumerate() {
            let mut current = state;
            let next = loop {
                let Some(id) = current else {
                    state = Some(StateId::ROOT);
                    continue 'letters;
                };
                let candidate = &self.states[id.index()];
                if let Some(next) = candidate.next(ch) {
                    break next;
                }
                current = candidate.fallback;
            };
            state = Some(next);

            if let Some(matched) = &self.states[next.index()].matched {
                let Some(offset) = (i + 1).checked_sub(matched.len()) else {
                    continue;
                };
                for (gap, weight) in gaps[offset..].iter_mut().zip(matched.iter()) {
                    *gap = (*gap).max(*weight);
                }
            }
        }

        // Drop the leading boundary marker so entry `i` describes `word[i]`.
        let mut weights: Vec<u8> = gaps[1..=len].to_vec();
        weights[0] = 0;
        for weight in &mut weights[len - 2..] {
            *weight = 0;
        }
        weights
    }
}
