//! Single-writer task around a [`ListController`].
//!
//! The controller is moved into one tokio task and fed commands over an
//! unbounded channel. Any thread can hold a [`LoaderHandle`] and post
//! intents; they are applied one at a time, in order, on the owning task.

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::loading::behavior::LoadingBehavior;
use crate::loading::command::{ListSnapshot, LoaderCommand};
use crate::loading::controller::ListController;
use crate::loading::intent::LoadingIntent;
use crate::loading::section::IndexPath;

/// The owning task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("list loader is no longer running")]
pub struct LoaderClosed;

/// Create the command channel a controller and its runtime share.
pub fn command_channel<C>() -> (
    UnboundedSender<LoaderCommand<C>>,
    UnboundedReceiver<LoaderCommand<C>>,
) {
    mpsc::unbounded_channel()
}

pub struct LoaderRuntime<C> {
    controller: ListController<C>,
    commands: UnboundedReceiver<LoaderCommand<C>>,
}

impl<C: Clone + Send + 'static> LoaderRuntime<C> {
    pub fn new(
        controller: ListController<C>,
        commands: UnboundedReceiver<LoaderCommand<C>>,
    ) -> Self {
        Self {
            controller,
            commands,
        }
    }

    /// Process commands until `Shutdown` arrives or every handle is dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            let stop = matches!(command, LoaderCommand::Shutdown);
            self.controller.handle(command);
            if stop {
                tracing::debug!("List loader shut down");
                return;
            }
        }
        tracing::debug!("All list loader handles dropped, shutting down");
        self.controller.shutdown();
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

/// Cloneable, thread-safe front door to a running list loader.
pub struct LoaderHandle<C> {
    commands: UnboundedSender<LoaderCommand<C>>,
}

impl<C> Clone for LoaderHandle<C> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<C: Send + 'static> LoaderHandle<C> {
    pub fn new(commands: UnboundedSender<LoaderCommand<C>>) -> Self {
        Self { commands }
    }

    pub fn appear(&self) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::Appear)
    }

    pub fn disappear(&self) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::Disappear)
    }

    pub fn load(&self, intent: LoadingIntent) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::Load(intent))
    }

    pub fn cancel(&self) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::Cancel)
    }

    pub fn set_behavior(&self, behavior: LoadingBehavior) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::SetBehavior(behavior))
    }

    pub fn item_displayed(&self, index: IndexPath) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::ItemDisplayed(index))
    }

    pub fn shutdown(&self) -> Result<(), LoaderClosed> {
        self.send(LoaderCommand::Shutdown)
    }

    /// Copy of the current state, taken after every earlier command was applied.
    pub async fn snapshot(&self) -> Result<ListSnapshot<C>, LoaderClosed> {
        let (reply, response) = oneshot::channel();
        self.send(LoaderCommand::Snapshot(reply))?;
        response.await.map_err(|_| LoaderClosed)
    }

    fn send(&self, command: LoaderCommand<C>) -> Result<(), LoaderClosed> {
        self.commands.send(command).map_err(|_| LoaderClosed)
    }
}

/// Spawn `controller` on its own task and return a handle to it.
pub fn spawn_list_loader<C: Clone + Send + 'static>(
    controller: ListController<C>,
    sender: UnboundedSender<LoaderCommand<C>>,
    commands: UnboundedReceiver<LoaderCommand<C>>,
) -> (LoaderHandle<C>, JoinHandle<()>) {
    let task = LoaderRuntime::new(controller, commands).spawn();
    (LoaderHandle::new(sender), task)
}
