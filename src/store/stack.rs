//! Per-tab destination stacks and the merge policies applied to them.

use crate::types::{Destination, StackPolicy, Tab};
use std::collections::HashMap;
use tracing::warn;

/// Merge `destinations` into `stack` under `policy`.
///
/// `ReplaceTop` with nothing to add leaves the stack untouched; on an empty
/// stack it behaves like `Append`.
pub fn apply_policy<D>(stack: &mut Vec<D>, destinations: Vec<D>, policy: StackPolicy) {
    match policy {
        StackPolicy::Replace => *stack = destinations,
        StackPolicy::Append => stack.extend(destinations),
        StackPolicy::ReplaceTop => {
            if destinations.is_empty() {
                return;
            }
            stack.pop();
            stack.extend(destinations);
        }
    }
}

/// Drop from the top until `keep` matches the top element.
///
/// When nothing matches the stack is drained to empty.
pub fn pop_until<D, F>(stack: &mut Vec<D>, mut keep: F)
where
    F: FnMut(&D) -> bool,
{
    while let Some(top) = stack.last() {
        if keep(top) {
            break;
        }
        stack.pop();
    }
}

/// One stack per tab of the closed tab set.
///
/// Every tab returned by `T::all()` always has an entry, and no other key is
/// ever inserted.
#[derive(Debug, Clone)]
pub struct TabStacks<T, D> {
    stacks: HashMap<T, Vec<D>>,
}

impl<T: Tab, D: Destination> Default for TabStacks<T, D> {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl<T: Tab, D: Destination> TabStacks<T, D> {
    /// Seed stacks from `initial`; tabs missing from it start empty.
    pub fn new(mut initial: HashMap<T, Vec<D>>) -> Self {
        let mut stacks = HashMap::new();
        for tab in T::all() {
            let stack = initial.remove(&tab).unwrap_or_default();
            stacks.insert(tab, stack);
        }
        for tab in initial.keys() {
            warn!(tab = ?tab, "Discarding initial stack for tab outside the tab set");
        }
        Self { stacks }
    }

    pub fn get(&self, tab: &T) -> Option<&[D]> {
        self.stacks.get(tab).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, tab: &T) -> Option<&mut Vec<D>> {
        self.stacks.get_mut(tab)
    }

    pub fn contains(&self, tab: &T) -> bool {
        self.stacks.contains_key(tab)
    }

    pub fn to_map(&self) -> HashMap<T, Vec<D>> {
        self.stacks.clone()
    }
}
