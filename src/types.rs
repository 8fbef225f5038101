//! Core Types
//!
//! Capability contracts that application-defined destination, tab, and sheet
//! values must satisfy, plus the stack merge policy.

use crate::link::QueryParams;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A screen a tab's stack can hold.
///
/// Equality and hashing must describe the logical screen, so two values built
/// independently for the same screen compare equal.
pub trait Destination: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Destination for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// A destination that can be addressed by a deep link.
pub trait LinkableDestination: Destination {
    /// Path segment for this destination.
    ///
    /// Must be a stable function of the destination's logical identity: the
    /// same screen always produces the same segment, across releases.
    fn path(&self) -> String;

    /// Decode a destination from a path segment.
    ///
    /// `path` holds every segment up to and including `segment`. Must be pure:
    /// the same inputs always produce the same result, and no I/O is allowed.
    fn from_segment(segment: &str, path: &[String], query: &QueryParams) -> Option<Self>;
}

/// A top-level navigation context with its own stack.
pub trait Tab: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// The closed set of tabs, known ahead of time.
    fn all() -> Vec<Self>;

    /// Canonical textual form, matched against the `tab` query parameter.
    fn name(&self) -> &str;

    /// Resolve a tab by its canonical name. First match in `all()` wins.
    fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|tab| tab.name() == name)
    }
}

/// A modal overlay (sheet or full-screen cover).
pub trait Sheet: Clone + Debug + Send + Sync + 'static {
    /// Stable identity; does not change across reconstructions of the same overlay.
    type Id: Eq + Hash + Clone + Debug + Send + Sync;

    fn id(&self) -> Self::Id;

    /// Identity comparison used by modal stacks.
    fn same_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// How new destinations merge into an existing stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackPolicy {
    /// Stack becomes exactly the new destinations.
    #[default]
    Replace,
    /// New destinations are pushed on top.
    Append,
    /// The current top is swapped for the new destinations.
    ReplaceTop,
}

impl StackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            StackPolicy::Replace => "replace",
            StackPolicy::Append => "append",
            StackPolicy::ReplaceTop => "replace_top",
        }
    }
}
