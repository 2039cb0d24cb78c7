//! State merge strategies for graph runs.
//!
//! - `GraphState`: a state type plus its partial update type and default merge
//! - `MergeUpdater`: default, uses `GraphState::merge`
//! - `FieldBasedUpdater`: custom merge from a closure

mod updater;

pub use updater::{
    boxed_updater, BoxedStateUpdater, FieldBasedUpdater, GraphState, MergeUpdater, StateUpdater,
};
