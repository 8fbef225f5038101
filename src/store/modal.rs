//! Modal Stack
//!
//! Ordered overlays (sheets or full-screen covers). The last item is the one
//! on screen. Identity comparisons go through [`Sheet::id`], never through
//! the overlay's other fields.

use crate::types::Sheet;

#[derive(Debug, Clone)]
pub struct ModalStack<S> {
    items: Vec<S>,
}

impl<S> Default for ModalStack<S> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S: Sheet> ModalStack<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push unconditionally; duplicates are allowed.
    pub fn present(&mut self, item: S) {
        self.items.push(item);
    }

    /// Remove the top overlay. No-op when empty.
    pub fn dismiss(&mut self) -> Option<S> {
        self.items.pop()
    }

    /// Remove up to `count` overlays from the top.
    pub fn dismiss_many(&mut self, count: usize) {
        let keep = self.items.len().saturating_sub(count);
        self.items.truncate(keep);
    }

    /// Remove overlays above `target`. Drains the stack if `target` is absent.
    pub fn dismiss_to(&mut self, target: &S) {
        while let Some(top) = self.items.last() {
            if top.same_as(target) {
                break;
            }
            self.items.pop();
        }
    }

    pub fn top(&self) -> Option<&S> {
        self.items.last()
    }

    /// Setter half of the "active item" accessor pair.
    ///
    /// `Some` pushes the item unless it already is the top; `None` pops.
    /// Returns whether the stack changed.
    pub fn set_active(&mut self, item: Option<S>) -> bool {
        match item {
            Some(item) => {
                if self.top().is_some_and(|top| top.same_as(&item)) {
                    return false;
                }
                self.items.push(item);
                true
            }
            None => self.items.pop().is_some(),
        }
    }

    pub fn contains(&self, item: &S) -> bool {
        self.items.iter().any(|i| i.same_as(item))
    }

    pub fn items(&self) -> &[S] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
