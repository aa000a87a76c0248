//! The list loading state machine.
//!
//! `ListController` owns the loading state, the visible sections and the
//! in-flight pipeline. It is not thread-safe: every call must come from
//! the one task that owns it (see [`crate::loading::runtime`]).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};

use crate::config::EngineConfig;
use crate::error::LoadError;
use crate::loading::arbitration::{arbitrate, Arbitration};
use crate::loading::autoupdate::AutoupdateTimer;
use crate::loading::behavior::LoadingBehavior;
use crate::loading::command::{ListSnapshot, LoaderCommand};
use crate::loading::intent::LoadingIntent;
use crate::loading::merge::merge_sections;
use crate::loading::section::{cell_count, last_cell, next_page, IndexPath, Section};
use crate::loading::source::{
    PipelineEvent, PipelineSink, SectionSource, SectionUpdate, Subscription,
};
use crate::loading::state::{LoadingState, StatusEvent, StatusReducer};
use crate::loading::surface::{LoadingObserver, NoopObserver, RenderSurface};
use crate::mvi;

pub struct ListController<C> {
    state: LoadingState,
    sections: Vec<Section<C>>,
    behavior: LoadingBehavior,
    autoupdate_period: Duration,
    cells_before_load: usize,
    generation: u64,
    in_flight: Option<Subscription>,
    autoupdate: Option<AutoupdateTimer>,
    source: Arc<dyn SectionSource<C>>,
    surface: Box<dyn RenderSurface<C>>,
    observer: Box<dyn LoadingObserver>,
    inbox: WeakUnboundedSender<LoaderCommand<C>>,
}

impl<C: Clone + Send + 'static> ListController<C> {
    /// Create a controller.
    ///
    /// `inbox` is the sender side of the channel this controller's
    /// commands arrive on; pipeline runs and the auto-update timer post
    /// back through it. The controller only keeps it weakly, so the
    /// channel closes once every other sender is gone.
    pub fn new(
        source: Arc<dyn SectionSource<C>>,
        surface: Box<dyn RenderSurface<C>>,
        inbox: UnboundedSender<LoaderCommand<C>>,
    ) -> Self {
        let config = EngineConfig::default();
        Self {
            state: LoadingState::NotInitiated,
            sections: Vec::new(),
            behavior: config.behavior,
            autoupdate_period: config.autoupdate_period(),
            cells_before_load: 0,
            generation: 0,
            in_flight: None,
            autoupdate: None,
            source,
            surface,
            observer: Box::new(NoopObserver),
            inbox: inbox.downgrade(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn LoadingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.behavior = config.behavior;
        self.autoupdate_period = config.autoupdate_period();
        self
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn sections(&self) -> &[Section<C>] {
        &self.sections
    }

    pub fn cell_count(&self) -> usize {
        cell_count(&self.sections)
    }

    pub fn behavior(&self) -> LoadingBehavior {
        self.behavior
    }

    pub fn is_autoupdating(&self) -> bool {
        self.autoupdate.is_some()
    }

    pub fn next_page(&self) -> u32 {
        next_page(&self.sections)
    }

    pub fn snapshot(&self) -> ListSnapshot<C> {
        ListSnapshot {
            state: self.state.clone(),
            sections: self.sections.clone(),
            behavior: self.behavior,
            autoupdating: self.is_autoupdating(),
        }
    }

    /// Dispatch one command.
    pub fn handle(&mut self, command: LoaderCommand<C>) {
        match command {
            LoaderCommand::Appear => self.appear(),
            LoaderCommand::Disappear => self.disappear(),
            LoaderCommand::Load(intent) => {
                self.load(intent);
            }
            LoaderCommand::Cancel => self.cancel_loading(),
            LoaderCommand::SetBehavior(behavior) => self.set_behavior(behavior),
            LoaderCommand::ItemDisplayed(index) => self.item_displayed(index),
            LoaderCommand::AutoupdateTick => {
                self.load(LoadingIntent::Autoupdate);
            }
            LoaderCommand::Pipeline { generation, event } => {
                self.handle_pipeline_event(generation, event)
            }
            LoaderCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            LoaderCommand::Shutdown => self.shutdown(),
        }
    }

    /// The list became visible.
    pub fn appear(&mut self) {
        if self.state == LoadingState::NotInitiated {
            self.transition(StatusEvent::Appeared);
            if self.behavior.initial {
                self.load(LoadingIntent::Initial);
            }
        } else if self.behavior.appearance {
            self.load(LoadingIntent::Appearance);
        }

        if self.behavior.autoupdate {
            self.ensure_autoupdate();
        }
    }

    /// The list went off screen.
    pub fn disappear(&mut self) {
        if !self.behavior.autoupdate_background {
            self.stop_autoupdate();
        }
    }

    /// Offer an intent. Returns what arbitration decided.
    pub fn load(&mut self, intent: LoadingIntent) -> Arbitration {
        if self.state == LoadingState::NotInitiated {
            tracing::debug!(intent = ?intent, "Ignoring intent before first appearance");
            return Arbitration::Reject;
        }

        let decision = arbitrate(&self.state, &intent);
        match decision {
            Arbitration::Reject => {
                tracing::debug!(intent = ?intent, state = ?self.state, "Intent rejected");
                return decision;
            }
            Arbitration::Supersede => {
                tracing::debug!(
                    intent = ?intent,
                    superseded = ?self.state,
                    "Superseding in-flight load"
                );
                self.cancel_loading();
            }
            Arbitration::Accept => {}
        }

        self.start(intent);
        decision
    }

    /// Drop the in-flight pipeline, if any, and go back to `Initiated`.
    pub fn cancel_loading(&mut self) {
        if let Some(subscription) = self.in_flight.take() {
            subscription.dispose();
        }
        self.transition(StatusEvent::Cancelled);
    }

    pub fn set_behavior(&mut self, behavior: LoadingBehavior) {
        self.behavior = behavior;
        if !behavior.autoupdate {
            self.stop_autoupdate();
        } else if self.state.is_data_bearing() {
            self.ensure_autoupdate();
        }
    }

    /// The rendering surface is about to show `index`.
    pub fn item_displayed(&mut self, index: IndexPath) {
        if last_cell(&self.sections) != Some(index) {
            return;
        }
        self.observer.on_last_cell_displayed();
        if self.behavior.paging && self.state == LoadingState::HasData {
            self.load(LoadingIntent::Page {
                page_number: self.next_page(),
            });
        }
    }

    pub fn shutdown(&mut self) {
        self.stop_autoupdate();
        if let Some(subscription) = self.in_flight.take() {
            subscription.dispose();
        }
    }

    fn start(&mut self, intent: LoadingIntent) {
        if intent.clears_existing_data() {
            self.sections.clear();
            self.surface.reload_visible();
            self.observer.on_empty_state_changed(&self.state);
        }

        self.cells_before_load = self.cell_count();
        self.generation += 1;
        self.observer.on_progress_start(&intent);
        self.transition(StatusEvent::Started(intent));

        tracing::info!(
            intent = ?intent,
            generation = self.generation,
            cells = self.cells_before_load,
            "Load started"
        );

        let Some(inbox) = self.inbox.upgrade() else {
            tracing::debug!(intent = ?intent, "Command channel closed, not starting pipeline");
            return;
        };
        let sink = PipelineSink::new(self.generation, inbox);
        self.in_flight = Some(self.source.start(intent, sink));
    }

    fn handle_pipeline_event(&mut self, generation: u64, event: PipelineEvent<C>) {
        if generation != self.generation || !self.state.is_loading() {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping event from superseded pipeline"
            );
            return;
        }

        match event {
            PipelineEvent::Sections(update) => self.apply_update(update),
            PipelineEvent::Completed => self.complete(),
            PipelineEvent::Failed(error) => self.fail(error),
        }
    }

    fn apply_update(&mut self, update: SectionUpdate<C>) {
        let outcome = match merge_sections(&mut self.sections, &self.state, update) {
            Ok(outcome) => outcome,
            // State is Loading here; anything else is a bug in this controller.
            Err(err) => panic!("{err}"),
        };
        if outcome.needs_reload() {
            self.surface.register_renderers(&self.sections);
            self.surface.reload_visible();
        }
    }

    fn complete(&mut self) {
        let Some(intent) = self.state.loading_intent().copied() else {
            return;
        };
        self.in_flight = None;
        let cells = self.cell_count();
        let mut chain_page = false;

        if intent.is_page() && cells == self.cells_before_load {
            // Nothing new on this page: stop here so paging can't loop.
            self.transition(StatusEvent::PageUnchanged);
        } else {
            self.transition(StatusEvent::Completed { cell_count: cells });
            if cells == 0 {
                self.observer.on_empty_state_changed(&self.state);
            } else {
                chain_page = self.tail_is_visible();
            }
        }

        tracing::info!(intent = ?intent, cells, state = ?self.state, "Load completed");
        self.observer.on_progress_stop(&intent);

        if chain_page {
            self.load(LoadingIntent::Page {
                page_number: self.next_page(),
            });
        }
    }

    fn fail(&mut self, error: LoadError) {
        let Some(intent) = self.state.loading_intent().copied() else {
            return;
        };
        self.in_flight = None;
        let cells = self.cell_count();

        tracing::warn!(intent = ?intent, cells, error = %error, "Load failed");
        self.transition(StatusEvent::Failed {
            error,
            cell_count: cells,
        });
        self.observer.on_empty_state_changed(&self.state);
        self.observer.on_progress_stop(&intent);
    }

    /// Whether the last cell of the last section is on screen.
    fn tail_is_visible(&self) -> bool {
        let Some(last) = last_cell(&self.sections) else {
            return false;
        };
        self.surface.visible_items().iter().max() == Some(&last)
    }

    fn ensure_autoupdate(&mut self) {
        if self.autoupdate.is_none() {
            self.autoupdate = AutoupdateTimer::start(self.autoupdate_period, self.inbox.clone());
        }
    }

    fn stop_autoupdate(&mut self) {
        self.autoupdate = None;
    }

    fn transition(&mut self, event: StatusEvent) {
        if mvi::apply::<StatusReducer>(&mut self.state, event) {
            tracing::trace!(state = ?self.state, "Status changed");
        }
    }
}
