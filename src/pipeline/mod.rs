//! Two-stage loaders and the cache/network race that drives them.

pub mod pair;
pub mod race;
pub mod request;
pub mod store;
pub mod two_stage;

pub use pair::RequestPair;
pub use race::{execute, CacheNetworkPipeline};
pub use request::{Fetched, Request, Source};
pub use store::{fetch, MemoryStore, Store};
pub use two_stage::{LoaderResults, StageResults, TwoStageLoader};
