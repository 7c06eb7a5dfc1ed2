use heap_core::{ErrorInfo, HeapError, Key, State, StateSequence, Swap, SwapSequence};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::recording::Recording;

/// How the parser treats steps that are not a single pairwise exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPolicy {
    /// Drop such steps and keep parsing.
    #[default]
    Lenient,
    /// Reject the recording when a step changed one or more than two positions.
    Strict,
}

/// Initial array, state sequence and swap sequence observed in a recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawObservedTrace")]
pub struct ObservedTrace {
    input: Vec<Key>,
    states: StateSequence,
    swaps: SwapSequence,
}

impl ObservedTrace {
    /// Builds an observed trace by applying `swaps` to `input`.
    pub fn from_swaps(input: &[Key], swaps: &[Swap]) -> Self {
        Self {
            input: input.to_vec(),
            states: states_from_swaps(input, swaps),
            swaps: swaps.to_vec(),
        }
    }

    /// Returns the exercise input (the first recorded step).
    pub fn input(&self) -> &[Key] {
        &self.input
    }

    /// Returns the retained states, starting with the input.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the swaps between consecutive retained states.
    pub fn swaps(&self) -> &[Swap] {
        &self.swaps
    }

    /// Returns the last retained state.
    pub fn final_state(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    /// Returns the number of array positions.
    pub fn heap_size(&self) -> usize {
        self.input.len()
    }
}

#[derive(Deserialize)]
struct RawObservedTrace {
    input: Vec<Key>,
    states: StateSequence,
    swaps: SwapSequence,
}

impl TryFrom<RawObservedTrace> for ObservedTrace {
    type Error = HeapError;

    fn try_from(raw: RawObservedTrace) -> Result<Self, HeapError> {
        let starts_at_input = raw
            .states
            .first()
            .is_some_and(|first| first.values() == raw.input.as_slice());
        if !starts_at_input || raw.states.len() != raw.swaps.len() + 1 {
            let info = ErrorInfo::new(
                "inconsistent-observed-trace",
                "states must start at the input and follow one swap each",
            )
            .with_context("states", raw.states.len())
            .with_context("swaps", raw.swaps.len());
            return Err(HeapError::Trace(info));
        }
        Ok(ObservedTrace {
            input: raw.input,
            states: raw.states,
            swaps: raw.swaps,
        })
    }
}

/// Parses a recording with the lenient step policy.
pub fn parse(recording: &Recording) -> Result<ObservedTrace, HeapError> {
    parse_with(recording, StepPolicy::Lenient)
}

/// Parses a recording with the given step policy.
pub fn parse_with(recording: &Recording, policy: StepPolicy) -> Result<ObservedTrace, HeapError> {
    parse_values(recording.steps().iter().map(|step| step.values()), policy)
}

/// Parses a sequence of array snapshots into an observed trace.
///
/// Every step is compared against the last retained state. Exactly two
/// changed positions record a swap; no change is a recorder no-op. Any other
/// change count is dropped under [`StepPolicy::Lenient`] and rejected under
/// [`StepPolicy::Strict`].
pub fn parse_values<I>(steps: I, policy: StepPolicy) -> Result<ObservedTrace, HeapError>
where
    I: IntoIterator<Item = Vec<Key>>,
{
    let mut steps = steps.into_iter();
    let input = steps.next().ok_or_else(|| {
        HeapError::Trace(ErrorInfo::new(
            "empty-recording",
            "recording contains no steps",
        ))
    })?;

    let mut states = vec![State::from(input.as_slice())];
    let mut swaps = Vec::new();
    for (offset, values) in steps.enumerate() {
        let step_index = offset + 1;
        if values.len() != input.len() {
            let info = ErrorInfo::new(
                "step-width-mismatch",
                "step has a different number of positions than the input",
            )
            .with_context("step", step_index.to_string())
            .with_context("expected", input.len().to_string())
            .with_context("actual", values.len().to_string());
            return Err(HeapError::Trace(info));
        }

        let previous = &states[states.len() - 1];
        let changed: Vec<usize> = (0..values.len())
            .filter(|&idx| values[idx] != previous[idx])
            .collect();
        match changed.len() {
            0 => trace!(step = step_index, "recorder no-op step"),
            2 => {
                swaps.push(Swap(changed[0], changed[1]));
                states.push(State::new(values));
            }
            count => {
                if policy == StepPolicy::Strict {
                    let info = ErrorInfo::new(
                        "malformed-step",
                        "step is not a single pairwise exchange",
                    )
                    .with_context("step", step_index.to_string())
                    .with_context("changed_positions", count.to_string());
                    return Err(HeapError::Trace(info));
                }
                warn!(
                    step = step_index,
                    changed_positions = count,
                    "dropping step that is not a pairwise exchange"
                );
            }
        }
    }

    Ok(ObservedTrace {
        input,
        states,
        swaps,
    })
}

/// Replays `swaps` on a copy of `input`, returning every intermediate state.
pub fn states_from_swaps(input: &[Key], swaps: &[Swap]) -> StateSequence {
    let mut array = input.to_vec();
    let mut states = Vec::with_capacity(swaps.len() + 1);
    states.push(State::from(input));
    for swap in swaps {
        array.swap(swap.0, swap.1);
        states.push(State::from(array.as_slice()));
    }
    states
}

/// Recovers the swap between each pair of consecutive states.
///
/// Consecutive states that do not differ in exactly two positions contribute
/// no swap.
pub fn swaps_from_states(states: &[State]) -> SwapSequence {
    states
        .windows(2)
        .filter_map(|pair| {
            let changed: Vec<usize> = (0..pair[1].len())
                .filter(|&idx| pair[0].get(idx) != pair[1].get(idx))
                .collect();
            match changed.as_slice() {
                [a, b] => Some(Swap(*a, *b)),
                _ => None,
            }
        })
        .collect()
}
