//! Boundary between the list controller and whatever produces sections.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::error::LoadError;
use crate::loading::command::LoaderCommand;
use crate::loading::intent::LoadingIntent;
use crate::loading::section::Section;

/// One section-list update. `None` means "no update" and is not an error.
pub type SectionUpdate<C> = Option<Vec<Section<C>>>;

/// What a running pipeline reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent<C> {
    Sections(SectionUpdate<C>),
    Completed,
    Failed(LoadError),
}

/// Something that runs a pipeline for an intent.
pub trait SectionSource<C>: Send + Sync {
    /// Start a pipeline for `intent`, reporting through `sink`.
    ///
    /// Must not block; the work runs elsewhere and reports back
    /// asynchronously.
    fn start(&self, intent: LoadingIntent, sink: PipelineSink<C>) -> Subscription;
}

/// Sender half handed to a pipeline run.
///
/// Events are tagged with the generation of the load that started the
/// run, so the controller can drop events from superseded runs.
pub struct PipelineSink<C> {
    generation: u64,
    inbox: UnboundedSender<LoaderCommand<C>>,
}

impl<C> PipelineSink<C> {
    pub fn new(generation: u64, inbox: UnboundedSender<LoaderCommand<C>>) -> Self {
        Self { generation, inbox }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn emit(&self, update: SectionUpdate<C>) {
        self.send(PipelineEvent::Sections(update));
    }

    pub fn complete(self) {
        self.send(PipelineEvent::Completed);
    }

    pub fn fail(self, error: LoadError) {
        self.send(PipelineEvent::Failed(error));
    }

    fn send(&self, event: PipelineEvent<C>) {
        let command = LoaderCommand::Pipeline {
            generation: self.generation,
            event,
        };
        if self.inbox.send(command).is_err() {
            tracing::debug!(generation = self.generation, "List is gone, dropping pipeline event");
        }
    }
}

/// Handle to an in-flight pipeline run.
///
/// Disposing stops further deliveries. Dropping without disposing lets
/// the run finish.
#[derive(Debug, Default)]
pub struct Subscription {
    abort: Option<AbortHandle>,
}

impl Subscription {
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort: Some(abort) }
    }

    /// A subscription with nothing to cancel.
    pub fn empty() -> Self {
        Self { abort: None }
    }

    pub fn dispose(self) {
        if let Some(abort) = self.abort {
            abort.abort();
        }
    }
}
