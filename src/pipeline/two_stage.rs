//! The per-feature loader contract.
//!
//! A two-stage loader turns an intent into two independent requests,
//! derives a third request from their answers, and maps all three answers
//! to sections.

use crate::error::LoadError;
use crate::loading::intent::LoadingIntent;
use crate::loading::section::Section;
use crate::pipeline::pair::RequestPair;
use crate::pipeline::request::{Fetched, Request};

/// The three answers of one two-stage run.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResults<A, B, C> {
    pub first: Fetched<A>,
    pub second: Fetched<B>,
    pub third: Fetched<C>,
}

type Output<R> = <R as Request>::Output;

/// Stage results as seen by a particular loader.
pub type LoaderResults<L> = StageResults<
    Output<<L as TwoStageLoader>::RequestA>,
    Output<<L as TwoStageLoader>::RequestB>,
    Output<<L as TwoStageLoader>::RequestC>,
>;

/// Feature-specific loader driven by the cache/network pipeline.
pub trait TwoStageLoader: Sized + Send + Sync + 'static {
    type RequestA: Request;
    type RequestB: Request;
    type RequestC: Request;
    type Cell: Send + 'static;

    /// Build the two independent first-stage requests.
    fn build_first_requests(
        &self,
        intent: &LoadingIntent,
    ) -> Result<RequestPair<Self::RequestA, Self::RequestB>, LoadError>;

    /// Build the dependent second-stage request from the first-stage answers.
    fn build_second_request(
        &self,
        intent: &LoadingIntent,
        first: &Fetched<Output<Self::RequestA>>,
        second: &Fetched<Output<Self::RequestB>>,
    ) -> Result<Self::RequestC, LoadError>;

    /// Map the answers to sections. `None` means "no section update".
    fn map_to_sections(
        &self,
        results: &LoaderResults<Self>,
        intent: &LoadingIntent,
    ) -> Option<Vec<Section<Self::Cell>>>;

    /// Side-effect hook called after `map_to_sections` for every emitted branch.
    fn on_results_received(&self, _results: &LoaderResults<Self>, _intent: &LoadingIntent) {}
}
