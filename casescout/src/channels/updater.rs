//! State updater: how a node's partial update is merged into the graph state.
//!
//! Nodes never mutate the state they are given. Each node returns a partial
//! update (`GraphState::Update`); after the node finishes, the compiled graph asks
//! its `StateUpdater` to build the next snapshot from the current one and that
//! update.
//!
//! # Background
//!
//! Per-field update strategies (similar to `Annotated` reducers in graph frameworks):
//!
//! ```python
//! class State(TypedDict):
//!     query: str                 # replace
//!     case_studies: list[dict]   # replace
//! ```
//!
//! In Rust the state type declares its update type and default merge via
//! [`GraphState`]; [`FieldBasedUpdater`] overrides the merge for one graph.
//!
//! # Example
//!
//! ```rust
//! use casescout::channels::{GraphState, FieldBasedUpdater, StateUpdater};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter { count: i32 }
//!
//! impl GraphState for Counter {
//!     type Update = i32;
//!     fn merge(&self, update: &i32) -> Self {
//!         Counter { count: *update }
//!     }
//! }
//!
//! // Sum instead of replace.
//! let updater = FieldBasedUpdater::new(|current: &Counter, update: &i32| Counter {
//!     count: current.count + update,
//! });
//! let next = updater.apply_update(&Counter { count: 2 }, &3);
//! assert_eq!(next.count, 5);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

/// State threaded through a graph, with its partial update type.
///
/// `merge` must not modify `self`; it returns the next snapshot.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Partial update returned by nodes.
    type Update: Clone + Send + Sync + Debug + 'static;

    /// Builds a new snapshot with `update` applied.
    fn merge(&self, update: &Self::Update) -> Self;
}

/// Trait for customizing how node updates are applied.
///
/// The default implementation (`MergeUpdater`) calls [`GraphState::merge`].
pub trait StateUpdater<S>: Send + Sync + Debug
where
    S: GraphState,
{
    /// Returns the snapshot that follows `current` once `update` is applied.
    fn apply_update(&self, current: &S, update: &S::Update) -> S;
}

/// Default state updater: delegates to the state's own [`GraphState::merge`].
#[derive(Debug, Clone, Default)]
pub struct MergeUpdater;

impl<S> StateUpdater<S> for MergeUpdater
where
    S: GraphState,
{
    fn apply_update(&self, current: &S, update: &S::Update) -> S {
        current.merge(update)
    }
}

/// A state updater built from a closure, for graphs that need a merge other than
/// the state's default one.
pub struct FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&S, &S::Update) -> S + Send + Sync + 'static,
{
    updater_fn: F,
    _marker: std::marker::PhantomData<S>,
}

impl<S, F> Debug for FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&S, &S::Update) -> S + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBasedUpdater")
            .field("updater_fn", &"<function>")
            .finish()
    }
}

impl<S, F> FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&S, &S::Update) -> S + Send + Sync + 'static,
{
    /// Creates a new FieldBasedUpdater with the given merge function.
    pub fn new(updater_fn: F) -> Self {
        Self {
            updater_fn,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, F> StateUpdater<S> for FieldBasedUpdater<S, F>
where
    S: GraphState,
    F: Fn(&S, &S::Update) -> S + Send + Sync + 'static,
{
    fn apply_update(&self, current: &S, update: &S::Update) -> S {
        (self.updater_fn)(current, update)
    }
}

/// Type alias for a boxed state updater.
pub type BoxedStateUpdater<S> = Arc<dyn StateUpdater<S>>;

/// Creates a boxed state updater from any `StateUpdater` implementation.
pub fn boxed_updater<S, U>(updater: U) -> BoxedStateUpdater<S>
where
    S: GraphState,
    U: StateUpdater<S> + 'static,
{
    Arc::new(updater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Notes {
        items: Vec<String>,
        title: String,
    }

    #[derive(Clone, Debug, Default)]
    struct NotesUpdate {
        items: Option<Vec<String>>,
        title: Option<String>,
    }

    impl GraphState for Notes {
        type Update = NotesUpdate;

        fn merge(&self, update: &NotesUpdate) -> Self {
            Notes {
                items: update.items.clone().unwrap_or_else(|| self.items.clone()),
                title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            }
        }
    }

    #[test]
    fn merge_updater_leaves_current_untouched() {
        let current = Notes {
            items: vec!["a".into()],
            title: "t".into(),
        };
        let update = NotesUpdate {
            title: Some("new".into()),
            ..Default::default()
        };
        let next = MergeUpdater.apply_update(&current, &update);
        assert_eq!(next.title, "new");
        assert_eq!(next.items, vec!["a".to_string()]);
        assert_eq!(current.title, "t");
    }

    #[test]
    fn field_based_updater_appends() {
        let updater = FieldBasedUpdater::new(|current: &Notes, update: &NotesUpdate| {
            let mut items = current.items.clone();
            items.extend(update.items.clone().unwrap_or_default());
            Notes {
                items,
                title: current.title.clone(),
            }
        });
        let current = Notes {
            items: vec!["a".into()],
            title: "t".into(),
        };
        let update = NotesUpdate {
            items: Some(vec!["b".into()]),
            title: Some("ignored".into()),
        };
        let next = updater.apply_update(&current, &update);
        assert_eq!(next.items, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(next.title, "t");
    }

    #[test]
    fn boxed_updater_is_usable_as_trait_object() {
        let boxed: BoxedStateUpdater<Notes> = boxed_updater(MergeUpdater);
        let next = boxed.apply_update(&Notes::default(), &NotesUpdate::default());
        assert_eq!(next, Notes::default());
    }
}
