//! Loading orchestration for a paginated list.
//!
//! # Flow
//!
//! ```text
//! appear / scroll / timer ──→ LoadingIntent ──→ arbitrate ──→ SectionSource
//!                                                                  │
//!        RenderSurface ←── merge_sections ←── PipelineEvent ←──────┘
//! ```
//!
//! [`ListController`] is the state machine; [`LoaderRuntime`] owns it on a
//! single task so state and sections have exactly one writer.

pub mod arbitration;
pub mod autoupdate;
pub mod behavior;
pub mod command;
pub mod controller;
pub mod intent;
pub mod merge;
pub mod runtime;
pub mod section;
pub mod source;
pub mod state;
pub mod surface;

pub use arbitration::{arbitrate, Arbitration};
pub use behavior::LoadingBehavior;
pub use command::{ListSnapshot, LoaderCommand};
pub use controller::ListController;
pub use intent::LoadingIntent;
pub use merge::{merge_sections, MergeOutcome};
pub use runtime::{command_channel, spawn_list_loader, LoaderClosed, LoaderHandle, LoaderRuntime};
pub use section::{IndexPath, Section};
pub use source::{PipelineEvent, PipelineSink, SectionSource, SectionUpdate, Subscription};
pub use state::{LoadingState, StatusEvent, StatusReducer};
pub use surface::{LoadingObserver, NoopObserver, RenderSurface};
