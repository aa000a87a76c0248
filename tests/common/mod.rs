//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod scripted_source;

use listflow::loading::{
    command_channel, IndexPath, ListController, LoaderCommand, LoadingBehavior, LoadingIntent,
    LoadingObserver, LoadingState, RenderSurface, Section,
};
use listflow::EngineConfig;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub use scripted_source::ScriptedSource;

/// Create a temporary config file with the given TOML body.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn section(page: u32, cells: &[&str]) -> Section<String> {
    Section::new(page, cells.iter().map(|c| c.to_string()).collect())
}

// -- Surface / observer spies -------------------------------------------------

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub reloads: usize,
    pub registrations: usize,
    pub visible: Vec<IndexPath>,
}

/// Rendering surface that records calls into a shared log.
pub struct SpySurface(Arc<Mutex<SurfaceLog>>);

impl RenderSurface<String> for SpySurface {
    fn reload_visible(&mut self) {
        self.0.lock().reloads += 1;
    }

    fn register_renderers(&mut self, _sections: &[Section<String>]) {
        self.0.lock().registrations += 1;
    }

    fn visible_items(&self) -> Vec<IndexPath> {
        self.0.lock().visible.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    ProgressStart(LoadingIntent),
    ProgressStop(LoadingIntent),
    EmptyState(LoadingState),
    LastCellDisplayed,
}

pub struct SpyObserver(Arc<Mutex<Vec<ObserverEvent>>>);

impl LoadingObserver for SpyObserver {
    fn on_progress_start(&mut self, intent: &LoadingIntent) {
        self.0.lock().push(ObserverEvent::ProgressStart(*intent));
    }

    fn on_progress_stop(&mut self, intent: &LoadingIntent) {
        self.0.lock().push(ObserverEvent::ProgressStop(*intent));
    }

    fn on_empty_state_changed(&mut self, state: &LoadingState) {
        self.0.lock().push(ObserverEvent::EmptyState(state.clone()));
    }

    fn on_last_cell_displayed(&mut self) {
        self.0.lock().push(ObserverEvent::LastCellDisplayed);
    }
}

// -- Controller harness -------------------------------------------------------

/// A controller wired to a scripted source and spies.
///
/// Commands the controller posts to itself (pipeline events, timer ticks)
/// are applied only when the test calls [`Harness::pump`].
pub struct Harness {
    pub controller: ListController<String>,
    pub commands: UnboundedReceiver<LoaderCommand<String>>,
    /// Stands in for a loader handle; the controller only holds the channel weakly.
    pub sender: UnboundedSender<LoaderCommand<String>>,
    pub source: Arc<ScriptedSource>,
    pub surface: Arc<Mutex<SurfaceLog>>,
    pub events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl Harness {
    pub fn new(behavior: LoadingBehavior) -> Self {
        Self::with_config(EngineConfig {
            behavior,
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let (sender, commands) = command_channel();
        let source = Arc::new(ScriptedSource::default());
        let surface = Arc::new(Mutex::new(SurfaceLog::default()));
        let events = Arc::new(Mutex::new(Vec::new()));

        let controller = ListController::new(
            source.clone(),
            Box::new(SpySurface(surface.clone())),
            sender.clone(),
        )
        .with_observer(Box::new(SpyObserver(events.clone())))
        .with_config(&config);

        Self {
            controller,
            commands,
            sender,
            source,
            surface,
            events,
        }
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.controller.handle(command);
            applied += 1;
        }
        applied
    }

    /// Emit `sections` on the latest run and complete it.
    pub fn resolve_latest(&mut self, sections: Vec<Section<String>>) {
        let run = self.source.latest_run();
        self.source.emit(run, Some(sections));
        self.source.complete(run);
        self.pump();
    }

    /// Appear and resolve the initial load with `sections`.
    pub fn loaded_with(behavior: LoadingBehavior, sections: Vec<Section<String>>) -> Self {
        let mut harness = Self::new(behavior);
        harness.controller.appear();
        harness.resolve_latest(sections);
        assert_eq!(*harness.controller.state(), LoadingState::HasData);
        harness.clear_spies();
        harness
    }

    pub fn set_visible(&self, visible: Vec<IndexPath>) {
        self.surface.lock().visible = visible;
    }

    pub fn reloads(&self) -> usize {
        self.surface.lock().reloads
    }

    pub fn observed(&self) -> Vec<ObserverEvent> {
        self.events.lock().clone()
    }

    pub fn progress_stops(&self) -> usize {
        self.observed()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::ProgressStop(_)))
            .count()
    }

    pub fn clear_spies(&self) {
        self.events.lock().clear();
        let mut surface = self.surface.lock();
        surface.reloads = 0;
        surface.registrations = 0;
    }
}
