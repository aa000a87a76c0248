//! Unidirectional status flow.
//!
//! ```text
//! StatusEvent ──→ StatusReducer ──→ LoadingState ──→ LoadingObserver
//!      ↑                                                  │
//!      └──────────── controller reacts, emits more ───────┘
//! ```
//!
//! Reducers are pure; whoever owns the state decides when to feed them.

/// Something that happened to a list: a load started, finished or failed.
pub trait Intent: Send + 'static {}

/// State a reducer produces. `Default` is the state before anything happened.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Pure `(State, Intent) -> State` transition function.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

/// Run `intent` through `R` in place. Returns whether the state changed.
pub fn apply<R: Reducer>(state: &mut R::State, intent: R::Intent) -> bool {
    let previous = std::mem::take(state);
    let next = R::reduce(previous.clone(), intent);
    let changed = next != previous;
    *state = next;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter(u32);

    impl UiState for Counter {}

    enum Step {
        Add(u32),
        Hold,
    }

    impl Intent for Step {}

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = Step;

        fn reduce(state: Counter, intent: Step) -> Counter {
            match intent {
                Step::Add(n) => Counter(state.0 + n),
                Step::Hold => state,
            }
        }
    }

    #[test]
    fn apply_reports_changes() {
        let mut state = Counter::default();
        assert!(apply::<CounterReducer>(&mut state, Step::Add(2)));
        assert_eq!(state, Counter(2));
        assert!(!apply::<CounterReducer>(&mut state, Step::Hold));
        assert_eq!(state, Counter(2));
    }
}
