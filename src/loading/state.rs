use crate::error::LoadError;
use crate::loading::intent::LoadingIntent;
use crate::mvi::{Intent, Reducer, UiState};

/// Loading status of a list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Before the list first appeared.
    #[default]
    NotInitiated,
    /// Appeared, no data yet, eligible to start a load.
    Initiated,
    /// A pipeline is in flight for this intent.
    Loading(LoadingIntent),
    HasData,
    /// The last load completed with zero cells.
    Empty,
    /// The last load failed and no cells are present.
    Error(LoadError),
}

impl UiState for LoadingState {}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn loading_intent(&self) -> Option<&LoadingIntent> {
        match self {
            LoadingState::Loading(intent) => Some(intent),
            _ => None,
        }
    }

    /// States reached after at least one load was attempted.
    pub fn is_data_bearing(&self) -> bool {
        matches!(
            self,
            LoadingState::Loading(_)
                | LoadingState::HasData
                | LoadingState::Empty
                | LoadingState::Error(_)
        )
    }
}

/// Things that move a list between loading states.
#[derive(Debug, Clone)]
pub enum StatusEvent {
    Appeared,
    Started(LoadingIntent),
    /// Pipeline completed; `cell_count` is the total after merging.
    Completed { cell_count: usize },
    /// A page load completed without adding cells.
    PageUnchanged,
    Failed { error: LoadError, cell_count: usize },
    Cancelled,
}

impl Intent for StatusEvent {}

/// Pure transition function for [`LoadingState`].
pub struct StatusReducer;

impl Reducer for StatusReducer {
    type State = LoadingState;
    type Intent = StatusEvent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            // Only the first appearance leaves NotInitiated.
            (LoadingState::NotInitiated, StatusEvent::Appeared) => LoadingState::Initiated,
            (LoadingState::NotInitiated, _) => LoadingState::NotInitiated,

            (_, StatusEvent::Started(intent)) => LoadingState::Loading(intent),
            (_, StatusEvent::Cancelled) => LoadingState::Initiated,

            (LoadingState::Loading(_), StatusEvent::Completed { cell_count: 0 }) => {
                LoadingState::Empty
            }
            (LoadingState::Loading(_), StatusEvent::Completed { .. }) => LoadingState::HasData,
            (LoadingState::Loading(_), StatusEvent::PageUnchanged) => LoadingState::HasData,
            (LoadingState::Loading(_), StatusEvent::Failed { error, cell_count }) => {
                if cell_count > 0 {
                    LoadingState::HasData
                } else {
                    LoadingState::Error(error)
                }
            }

            // Terminal events outside Loading belong to a superseded run.
            (other, _) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading() -> LoadingState {
        LoadingState::Loading(LoadingIntent::Initial)
    }

    #[test]
    fn first_appearance_initiates() {
        let state = StatusReducer::reduce(LoadingState::NotInitiated, StatusEvent::Appeared);
        assert_eq!(state, LoadingState::Initiated);
    }

    #[test]
    fn not_initiated_ignores_everything_but_appearance() {
        let state = StatusReducer::reduce(
            LoadingState::NotInitiated,
            StatusEvent::Started(LoadingIntent::Initial),
        );
        assert_eq!(state, LoadingState::NotInitiated);
    }

    #[test]
    fn later_appearance_keeps_state() {
        let state = StatusReducer::reduce(LoadingState::HasData, StatusEvent::Appeared);
        assert_eq!(state, LoadingState::HasData);
    }

    #[test]
    fn completion_with_zero_cells_is_empty() {
        let state = StatusReducer::reduce(loading(), StatusEvent::Completed { cell_count: 0 });
        assert_eq!(state, LoadingState::Empty);
        let state = StatusReducer::reduce(loading(), StatusEvent::Completed { cell_count: 4 });
        assert_eq!(state, LoadingState::HasData);
    }

    #[test]
    fn failure_keeps_data_when_cells_exist() {
        let error = LoadError::configuration("boom");
        let state = StatusReducer::reduce(
            loading(),
            StatusEvent::Failed {
                error: error.clone(),
                cell_count: 2,
            },
        );
        assert_eq!(state, LoadingState::HasData);

        let state = StatusReducer::reduce(
            loading(),
            StatusEvent::Failed {
                error: error.clone(),
                cell_count: 0,
            },
        );
        assert_eq!(state, LoadingState::Error(error));
    }

    #[test]
    fn cancel_returns_to_initiated() {
        let state = StatusReducer::reduce(loading(), StatusEvent::Cancelled);
        assert_eq!(state, LoadingState::Initiated);
    }

    #[test]
    fn stale_completion_outside_loading_is_ignored() {
        let state =
            StatusReducer::reduce(LoadingState::Empty, StatusEvent::Completed { cell_count: 3 });
        assert_eq!(state, LoadingState::Empty);
    }
}
