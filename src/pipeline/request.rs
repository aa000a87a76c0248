use std::fmt;

use serde::de::DeserializeOwned;

/// A fetchable resource, tagged with the type it decodes to.
pub trait Request: fmt::Debug + Send + Sync + 'static {
    type Output: DeserializeOwned + Send + Sync + 'static;

    /// Key the stores look the resource up by.
    fn key(&self) -> String;
}

/// Where a store answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The local cache store.
    Cache,
    /// The network, freshly.
    Network,
    /// The network layer answered from its own cache.
    NetworkCache,
}

/// A store answer: possibly absent, always tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: Option<T>,
    pub source: Source,
}

impl<T> Fetched<T> {
    pub fn present(value: T, source: Source) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }

    pub fn absent(source: Source) -> Self {
        Self {
            value: None,
            source,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// True when no fresh network round-trip produced this answer.
    pub fn served_from_cache(&self) -> bool {
        matches!(self.source, Source::Cache | Source::NetworkCache)
    }
}
