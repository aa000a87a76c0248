//! Loading engine for scrollable, paginated lists.
//!
//! Turns UI events into loading intents, arbitrates between overlapping
//! intents, runs a cache-then-network fetch for each accepted intent and
//! merges the resulting pages into the visible section list.

pub mod config;
pub mod demo;
pub mod error;
pub mod loading;
pub mod mvi;
pub mod pipeline;
pub mod telemetry;

pub use config::{ConfigError, EngineConfig};
pub use error::LoadError;
