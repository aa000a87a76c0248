use tokio::sync::oneshot;

use crate::loading::behavior::LoadingBehavior;
use crate::loading::intent::LoadingIntent;
use crate::loading::section::{IndexPath, Section};
use crate::loading::source::PipelineEvent;
use crate::loading::state::LoadingState;

/// Everything the list controller reacts to.
///
/// Commands are processed one at a time by the task that owns the
/// controller, which is what keeps state and sections single-writer.
#[derive(Debug)]
pub enum LoaderCommand<C> {
    Appear,
    Disappear,
    Load(LoadingIntent),
    Cancel,
    SetBehavior(LoadingBehavior),
    /// The rendering surface is about to display this cell.
    ItemDisplayed(IndexPath),
    AutoupdateTick,
    Pipeline {
        generation: u64,
        event: PipelineEvent<C>,
    },
    Snapshot(oneshot::Sender<ListSnapshot<C>>),
    /// Cancel everything and stop processing commands.
    Shutdown,
}

/// Point-in-time copy of the controller's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<C> {
    pub state: LoadingState,
    pub sections: Vec<Section<C>>,
    pub behavior: LoadingBehavior,
    pub autoupdating: bool,
}
