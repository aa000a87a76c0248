//! Store abstraction and an in-memory implementation.
//!
//! Stores deal in raw JSON payloads keyed by [`Request::key`]; the typed
//! [`fetch`] helper decodes them into the request's output type.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::LoadError;
use crate::pipeline::request::{Fetched, Request, Source};

/// Something that can answer requests: a local cache or the network.
///
/// `fetch_raw` may be called concurrently for independent keys and must
/// answer each call at most once.
#[async_trait]
pub trait Store: Send + Sync {
    /// Name for logs and errors ("cache", "network").
    fn name(&self) -> &str;

    async fn fetch_raw(&self, key: &str) -> Result<Fetched<Value>, LoadError>;
}

/// Fetch `request` from `store` and decode the payload.
pub async fn fetch<R: Request>(
    store: &dyn Store,
    request: &R,
) -> Result<Fetched<R::Output>, LoadError> {
    let key = request.key();
    let raw = store.fetch_raw(&key).await?;
    tracing::debug!(
        store = store.name(),
        key = %key,
        present = raw.is_present(),
        source = ?raw.source,
        "Store answered"
    );

    let source = raw.source;
    match raw.value {
        None => Ok(Fetched::absent(source)),
        Some(value) => serde_json::from_value(value)
            .map(|decoded| Fetched::present(decoded, source))
            .map_err(|e| LoadError::Decode {
                key,
                message: e.to_string(),
            }),
    }
}

/// Thread-safe in-memory store.
///
/// Every entry carries the [`Source`] it is reported with, so a network
/// store can be told to answer some keys "from its own cache".
pub struct MemoryStore {
    name: String,
    default_source: Source,
    entries: RwLock<HashMap<String, (Value, Source)>>,
    failures: RwLock<HashMap<String, String>>,
    delay: Option<Duration>,
    requested: Mutex<Vec<String>>,
    fetch_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>, default_source: Source) -> Self {
        Self {
            name: name.into(),
            default_source,
            entries: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            delay: None,
            requested: Mutex::new(Vec::new()),
            fetch_count: AtomicUsize::new(0),
        }
    }

    /// Store answering with [`Source::Cache`].
    pub fn cache() -> Self {
        Self::new("cache", Source::Cache)
    }

    /// Store answering with [`Source::Network`].
    pub fn network() -> Self {
        Self::new("network", Source::Network)
    }

    /// Delay every answer, to simulate latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.entries
            .write()
            .insert(key.into(), (value, self.default_source));
    }

    pub fn insert_with_source(&self, key: impl Into<String>, value: Value, source: Source) {
        self.entries.write().insert(key.into(), (value, source));
    }

    /// Make every fetch of `key` fail with `message`.
    pub fn fail_on(&self, key: impl Into<String>, message: impl Into<String>) {
        self.failures.write().insert(key.into(), message.into());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Keys fetched so far, in call order.
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_raw(&self, key: &str) -> Result<Fetched<Value>, LoadError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(key.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = self.failures.read().get(key) {
            return Err(LoadError::fetch(&self.name, key, message.clone()));
        }

        let answer = match self.entries.read().get(key) {
            Some((value, source)) => Fetched::present(value.clone(), *source),
            None => Fetched::absent(self.default_source),
        };
        Ok(answer)
    }
}
