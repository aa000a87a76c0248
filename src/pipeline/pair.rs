use crate::error::LoadError;
use crate::pipeline::request::{Fetched, Request};
use crate::pipeline::store::{fetch, Store};

/// Two independent requests fetched together from one store.
#[derive(Debug, Clone)]
pub struct RequestPair<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: Request, B: Request> RequestPair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Fetch both requests concurrently and wait for both answers.
    ///
    /// Absent answers are fine; the first failure wins.
    pub async fn fetch(
        &self,
        store: &dyn Store,
    ) -> Result<(Fetched<A::Output>, Fetched<B::Output>), LoadError> {
        tokio::try_join!(fetch(store, &self.first), fetch(store, &self.second))
    }
}
