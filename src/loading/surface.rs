//! Collaborators the list controller talks to.

use crate::loading::intent::LoadingIntent;
use crate::loading::section::{IndexPath, Section};
use crate::loading::state::LoadingState;

/// The visual list that displays sections.
///
/// Implementations render; the controller only tells them when.
pub trait RenderSurface<C>: Send {
    /// Redraw whatever is currently visible.
    fn reload_visible(&mut self);

    /// Make sure every cell kind in `sections` can be rendered.
    fn register_renderers(&mut self, sections: &[Section<C>]);

    /// Cells currently on screen.
    fn visible_items(&self) -> Vec<IndexPath>;
}

/// Owner callbacks. All methods default to no-ops.
pub trait LoadingObserver: Send {
    fn on_progress_start(&mut self, _intent: &LoadingIntent) {}

    fn on_progress_stop(&mut self, _intent: &LoadingIntent) {}

    /// Called whenever the empty/error placeholder may need to change.
    fn on_empty_state_changed(&mut self, _state: &LoadingState) {}

    fn on_last_cell_displayed(&mut self) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LoadingObserver for NoopObserver {}
