//! Cache-then-network execution of a two-stage loader.
//!
//! One run executes the loader twice: first against the cache store, then
//! against the network store. The cache branch's sections are emitted
//! first. The network branch's sections follow, unless the network layer
//! answered the dependent request from its own cache, in which case the
//! UI already shows the same data and nothing is emitted.
//!
//! The branches are concatenated: if the cache branch fails, the run
//! fails and the network branch never starts.

use std::sync::{Arc, Weak};

use crate::error::LoadError;
use crate::loading::intent::LoadingIntent;
use crate::loading::source::{PipelineSink, SectionSource, SectionUpdate, Subscription};
use crate::pipeline::pair::RequestPair;
use crate::pipeline::request::Request;
use crate::pipeline::store::{fetch, Store};
use crate::pipeline::two_stage::{StageResults, TwoStageLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Cache,
    Network,
}

impl Branch {
    fn label(&self) -> &'static str {
        match self {
            Branch::Cache => "cache",
            Branch::Network => "network",
        }
    }
}

/// Run one loader through the cache branch then the network branch.
///
/// `emit` is called once per emitted update, cache first. Returns the
/// first error raised by request building or a store.
pub async fn execute<L, F>(
    loader: &L,
    cache: &dyn Store,
    network: &dyn Store,
    intent: LoadingIntent,
    mut emit: F,
) -> Result<(), LoadError>
where
    L: TwoStageLoader,
    F: FnMut(SectionUpdate<L::Cell>),
{
    let requests = loader.build_first_requests(&intent)?;

    if let Some(update) = run_branch(loader, cache, &requests, &intent, Branch::Cache).await? {
        emit(update);
    }
    if let Some(update) = run_branch(loader, network, &requests, &intent, Branch::Network).await? {
        emit(update);
    }
    Ok(())
}

/// Returns `None` when the branch's emission is suppressed.
async fn run_branch<L: TwoStageLoader>(
    loader: &L,
    store: &dyn Store,
    requests: &RequestPair<L::RequestA, L::RequestB>,
    intent: &LoadingIntent,
    branch: Branch,
) -> Result<Option<SectionUpdate<L::Cell>>, LoadError> {
    let (first, second) = requests.fetch(store).await?;
    let dependent = loader.build_second_request(intent, &first, &second)?;
    let third = fetch(store, &dependent).await?;

    if branch == Branch::Network && third.served_from_cache() {
        tracing::debug!(
            intent = ?intent,
            key = %dependent.key(),
            "Network answered from its cache, suppressing duplicate update"
        );
        return Ok(None);
    }

    let results = StageResults {
        first,
        second,
        third,
    };
    let update = loader.map_to_sections(&results, intent);
    loader.on_results_received(&results, intent);

    tracing::debug!(
        branch = branch.label(),
        intent = ?intent,
        sections = ?update.as_ref().map(Vec::len),
        "Branch produced update"
    );
    Ok(Some(update))
}

/// [`SectionSource`] that runs [`execute`] on a spawned tokio task.
///
/// The loader is held weakly: if its owner dropped it, runs complete
/// without emitting anything.
pub struct CacheNetworkPipeline<L> {
    loader: Weak<L>,
    cache: Arc<dyn Store>,
    network: Arc<dyn Store>,
}

impl<L: TwoStageLoader> CacheNetworkPipeline<L> {
    pub fn new(loader: &Arc<L>, cache: Arc<dyn Store>, network: Arc<dyn Store>) -> Self {
        Self {
            loader: Arc::downgrade(loader),
            cache,
            network,
        }
    }
}

impl<L: TwoStageLoader> SectionSource<L::Cell> for CacheNetworkPipeline<L> {
    fn start(&self, intent: LoadingIntent, sink: PipelineSink<L::Cell>) -> Subscription {
        let loader = self.loader.clone();
        let cache = Arc::clone(&self.cache);
        let network = Arc::clone(&self.network);

        let task = tokio::spawn(async move {
            let Some(loader) = loader.upgrade() else {
                tracing::debug!(intent = ?intent, "Loader dropped before pipeline start");
                sink.complete();
                return;
            };

            let outcome = execute(&*loader, &*cache, &*network, intent, |update| {
                sink.emit(update)
            })
            .await;

            match outcome {
                Ok(()) => sink.complete(),
                Err(err) => {
                    tracing::warn!(
                        intent = ?intent,
                        generation = sink.generation(),
                        kind = err.kind(),
                        error = %err,
                        "Pipeline failed"
                    );
                    sink.fail(err);
                }
            }
        });

        Subscription::new(task.abort_handle())
    }
}
