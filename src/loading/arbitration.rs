//! Decides what happens to a new intent given the current loading state.

use crate::loading::intent::LoadingIntent;
use crate::loading::state::LoadingState;

/// Outcome of offering an intent to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    /// Nothing in flight; start the new load.
    Accept,
    /// Cancel the in-flight load and start the new one.
    Supersede,
    /// Drop the new intent.
    Reject,
}

impl Arbitration {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Arbitration::Reject)
    }
}

/// Arbitrate `intent` against `state`.
///
/// Rules, in order, while a load is in flight:
/// 1. `PullToRefresh` and `Force { keep_existing_data: false }` always supersede.
/// 2. An intent equal to the in-flight one is rejected.
/// 3. A page intent is rejected while another page is loading, whatever the page numbers.
/// 4. Anything else supersedes.
pub fn arbitrate(state: &LoadingState, intent: &LoadingIntent) -> Arbitration {
    let Some(current) = state.loading_intent() else {
        return Arbitration::Accept;
    };

    if intent.preempts() {
        return Arbitration::Supersede;
    }
    if intent == current {
        return Arbitration::Reject;
    }
    if intent.is_page() && current.is_page() {
        return Arbitration::Reject;
    }
    Arbitration::Supersede
}
