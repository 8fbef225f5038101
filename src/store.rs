//! Navigation State Store
//!
//! Owns the selected tab, one destination stack per tab, and the sheet and
//! full-screen-cover stacks. Every mutation goes through the operations here
//! and leaves the state fully formed; observers receive a [`NavigationEvent`]
//! for each field that changed.
//!
//! The state sits behind a lock that is never held across an `.await`, so a
//! suspended `navigate_async` or an in-flight deep push never exposes a torn
//! state.

use crate::config::NavigationConfig;
use crate::interceptor::{Interceptor, InterceptorChain};
use crate::types::{Destination, Sheet, StackPolicy, Tab};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub mod events;
pub mod modal;
pub mod stack;

pub use events::{EventBus, NavigationEvent};
pub use modal::ModalStack;
pub use stack::TabStacks;

/// Plain-data copy of the whole store state.
#[derive(Debug, Clone)]
pub struct NavigationSnapshot<T, D, S> {
    pub selected_tab: T,
    pub stacks: HashMap<T, Vec<D>>,
    pub sheets: Vec<S>,
    pub covers: Vec<S>,
}

/// Which modal stack an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModalKind {
    Sheet,
    Cover,
}

struct NavigationState<T, D, S> {
    selected_tab: T,
    stacks: TabStacks<T, D>,
    sheets: ModalStack<S>,
    covers: ModalStack<S>,
}

impl<T: Tab, D: Destination, S: Sheet> NavigationState<T, D, S> {
    fn modal(&self, kind: ModalKind) -> &ModalStack<S> {
        match kind {
            ModalKind::Sheet => &self.sheets,
            ModalKind::Cover => &self.covers,
        }
    }

    fn modal_mut(&mut self, kind: ModalKind) -> &mut ModalStack<S> {
        match kind {
            ModalKind::Sheet => &mut self.sheets,
            ModalKind::Cover => &mut self.covers,
        }
    }
}

/// Shared core of a store. Background deep-push steps hold only a `Weak`
/// reference to it.
pub(crate) struct StoreInner<T, D, S> {
    state: Mutex<NavigationState<T, D, S>>,
    interceptors: RwLock<InterceptorChain<D>>,
    bus: EventBus<T>,
    alive: AtomicBool,
    push_generation: AtomicU64,
    pending_push: Mutex<Option<JoinHandle<()>>>,
    pub(crate) config: NavigationConfig,
}

impl<T: Tab, D: Destination, S: Sheet> StoreInner<T, D, S> {
    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub(crate) fn selected_tab(&self) -> T {
        self.state.lock().selected_tab.clone()
    }

    pub(crate) fn push_generation(&self) -> u64 {
        self.push_generation.load(Ordering::Acquire)
    }

    /// Invalidate any in-flight deep push and return the new generation.
    pub(crate) fn bump_push_generation(&self) -> u64 {
        let generation = self.push_generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(handle) = self.pending_push.lock().take() {
            handle.abort();
        }
        generation
    }

    pub(crate) fn set_pending_push(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.pending_push.lock().replace(handle) {
            previous.abort();
        }
    }

    pub(crate) fn take_pending_push(&self) -> Option<JoinHandle<()>> {
        self.pending_push.lock().take()
    }

    /// Run `f` against the state of `tab`'s stack. Returns `false` when the
    /// store is torn down or `tab` is outside the tab set.
    pub(crate) fn mutate_stack<F>(&self, tab: &T, f: F) -> bool
    where
        F: FnOnce(&mut Vec<D>),
    {
        let event = {
            let mut state = self.state.lock();
            if !self.is_alive() {
                debug!(tab = ?tab, "Ignoring stack mutation on a torn-down store");
                return false;
            }
            let Some(stack) = state.stacks.get_mut(tab) else {
                warn!(tab = ?tab, "Ignoring stack mutation for tab outside the tab set");
                return false;
            };
            let before = stack.clone();
            f(&mut *stack);
            (*stack != before).then(|| NavigationEvent::StackChanged {
                tab: tab.clone(),
                depth: stack.len(),
            })
        };

        if let Some(event) = event {
            debug!(event = ?event, "Stack changed");
            self.bus.emit(event);
        }
        true
    }

    pub(crate) fn apply(&self, tab: &T, destinations: Vec<D>, policy: StackPolicy) -> bool {
        self.mutate_stack(tab, |stack| stack::apply_policy(stack, destinations, policy))
    }

    pub(crate) fn select_tab(&self, tab: T) -> bool {
        let event = {
            let mut state = self.state.lock();
            if !self.is_alive() {
                return false;
            }
            if !state.stacks.contains(&tab) {
                warn!(tab = ?tab, "Ignoring selection of tab outside the tab set");
                return false;
            }
            if state.selected_tab == tab {
                None
            } else {
                state.selected_tab = tab.clone();
                Some(NavigationEvent::TabSelected { tab })
            }
        };

        if let Some(event) = event {
            info!(event = ?event, "Tab selected");
            self.bus.emit(event);
        }
        true
    }

    fn mutate_modal<R, F>(&self, kind: ModalKind, f: F) -> Option<R>
    where
        F: FnOnce(&mut ModalStack<S>) -> R,
    {
        let (result, event) = {
            let mut state = self.state.lock();
            if !self.is_alive() {
                debug!(kind = ?kind, "Ignoring modal mutation on a torn-down store");
                return None;
            }
            let modal = state.modal_mut(kind);
            let before = modal.len();
            let top_before = modal.top().map(Sheet::id);
            let result = f(&mut *modal);
            let changed = modal.len() != before || modal.top().map(Sheet::id) != top_before;
            let depth = modal.len();
            let event = changed.then(|| match kind {
                ModalKind::Sheet => NavigationEvent::SheetsChanged { depth },
                ModalKind::Cover => NavigationEvent::CoversChanged { depth },
            });
            (result, event)
        };

        if let Some(event) = event {
            debug!(event = ?event, "Modal stack changed");
            self.bus.emit(event);
        }
        Some(result)
    }

    fn teardown(&self) {
        // Flipped under the state lock so no mutation straddles it
        let was_alive = {
            let _state = self.state.lock();
            self.alive.swap(false, Ordering::AcqRel)
        };
        if was_alive {
            self.bump_push_generation();
            self.bus.close();
            debug!("Navigation store torn down");
        }
    }
}

/// Navigation state for one UI session.
///
/// `T` is the tab type, `D` the destination type and `S` the overlay type
/// shared by sheets and full-screen covers. Operations that take
/// `tab: Option<&T>` act on the selected tab when given `None`.
///
/// The store is meant to be driven from a single UI task. Racing mutations
/// from several tasks are applied in lock order: last writer wins.
pub struct NavigationStore<T: Tab, D: Destination, S: Sheet> {
    pub(crate) inner: Arc<StoreInner<T, D, S>>,
}

impl<T: Tab, D: Destination, S: Sheet> NavigationStore<T, D, S> {
    /// Store with every stack empty and default configuration.
    pub fn new(initial_tab: T) -> Self {
        Self::with_stacks(initial_tab, HashMap::new())
    }

    /// Store seeded with per-tab stacks.
    pub fn with_stacks(initial_tab: T, stacks: HashMap<T, Vec<D>>) -> Self {
        Self::with_config(initial_tab, stacks, NavigationConfig::default())
    }

    pub fn with_config(
        initial_tab: T,
        stacks: HashMap<T, Vec<D>>,
        config: NavigationConfig,
    ) -> Self {
        let stacks = TabStacks::new(stacks);
        if !stacks.contains(&initial_tab) {
            warn!(tab = ?initial_tab, "Initial tab is outside the tab set");
        }

        let state = NavigationState {
            selected_tab: initial_tab,
            stacks,
            sheets: ModalStack::new(),
            covers: ModalStack::new(),
        };

        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                interceptors: RwLock::new(InterceptorChain::new()),
                bus: EventBus::default(),
                alive: AtomicBool::new(true),
                push_generation: AtomicU64::new(0),
                pending_push: Mutex::new(None),
                config,
            }),
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.inner.config
    }

    fn target(&self, tab: Option<&T>) -> T {
        match tab {
            Some(tab) => tab.clone(),
            None => self.inner.selected_tab(),
        }
    }

    // ---- reads -------------------------------------------------------------

    pub fn selected_tab(&self) -> T {
        self.inner.selected_tab()
    }

    /// Copy of `tab`'s stack; empty for tabs outside the tab set.
    pub fn stack(&self, tab: &T) -> Vec<D> {
        self.inner
            .state
            .lock()
            .stacks
            .get(tab)
            .map(<[D]>::to_vec)
            .unwrap_or_default()
    }

    pub fn current_stack(&self) -> Vec<D> {
        let state = self.inner.state.lock();
        state
            .stacks
            .get(&state.selected_tab)
            .map(<[D]>::to_vec)
            .unwrap_or_default()
    }

    /// Visible destination of a tab.
    pub fn top(&self, tab: Option<&T>) -> Option<D> {
        let tab = self.target(tab);
        self.inner
            .state
            .lock()
            .stacks
            .get(&tab)
            .and_then(|stack| stack.last().cloned())
    }

    pub fn depth(&self, tab: Option<&T>) -> usize {
        let tab = self.target(tab);
        self.inner
            .state
            .lock()
            .stacks
            .get(&tab)
            .map_or(0, <[D]>::len)
    }

    pub fn sheets(&self) -> Vec<S> {
        self.inner.state.lock().sheets.items().to_vec()
    }

    pub fn covers(&self) -> Vec<S> {
        self.inner.state.lock().covers.items().to_vec()
    }

    /// Topmost sheet, if any.
    pub fn active_sheet(&self) -> Option<S> {
        self.inner.state.lock().modal(ModalKind::Sheet).top().cloned()
    }

    /// Topmost full-screen cover, if any.
    pub fn active_cover(&self) -> Option<S> {
        self.inner.state.lock().modal(ModalKind::Cover).top().cloned()
    }

    pub fn snapshot(&self) -> NavigationSnapshot<T, D, S> {
        let state = self.inner.state.lock();
        NavigationSnapshot {
            selected_tab: state.selected_tab.clone(),
            stacks: state.stacks.to_map(),
            sheets: state.sheets.items().to_vec(),
            covers: state.covers.items().to_vec(),
        }
    }

    // ---- observation ---------------------------------------------------------

    /// Receive a [`NavigationEvent`] for every subsequent change.
    ///
    /// The receiver disconnects when the store is torn down.
    pub fn subscribe(&self) -> Receiver<NavigationEvent<T>> {
        self.inner.bus.subscribe()
    }

    // ---- tabs and stacks -----------------------------------------------------

    /// Select `tab`. Tabs outside the tab set are ignored.
    pub fn select_tab(&self, tab: T) {
        self.inner.select_tab(tab);
    }

    /// Merge a single destination into a tab's stack.
    pub fn navigate_to(&self, destination: D, policy: StackPolicy, tab: Option<&T>) {
        self.navigate_to_all(vec![destination], policy, tab);
    }

    /// Merge several destinations into a tab's stack in one step.
    pub fn navigate_to_all(&self, destinations: Vec<D>, policy: StackPolicy, tab: Option<&T>) {
        let tab = self.target(tab);
        debug!(
            tab = ?tab,
            policy = policy.as_str(),
            count = destinations.len(),
            "Navigating"
        );
        self.inner.apply(&tab, destinations, policy);
    }

    /// Drop the visible destination. Popping an empty stack does nothing.
    pub fn pop(&self, tab: Option<&T>) {
        let tab = self.target(tab);
        self.inner.mutate_stack(&tab, |stack| {
            stack.pop();
        });
    }

    pub fn pop_to_root(&self, tab: Option<&T>) {
        let tab = self.target(tab);
        self.inner.mutate_stack(&tab, Vec::clear);
    }

    /// Pop until `predicate` holds for the visible destination.
    ///
    /// If no destination matches, the stack is drained to empty.
    pub fn pop_to<F>(&self, predicate: F, tab: Option<&T>)
    where
        F: FnMut(&D) -> bool,
    {
        let tab = self.target(tab);
        self.inner
            .mutate_stack(&tab, |stack| stack::pop_until(stack, predicate));
    }

    // ---- interceptors --------------------------------------------------------

    /// Register an interceptor consulted by `navigate_async`.
    pub fn add_interceptor(&self, interceptor: Arc<dyn Interceptor<D>>) {
        self.inner.interceptors.write().push(interceptor);
    }

    pub fn clear_interceptors(&self) {
        self.inner.interceptors.write().clear();
    }

    pub fn interceptor_count(&self) -> usize {
        self.inner.interceptors.read().len()
    }

    /// Interceptor-gated `navigate_to`. Returns `false` if blocked, leaving the
    /// store untouched.
    pub async fn navigate_async(
        &self,
        destination: D,
        policy: StackPolicy,
        tab: Option<&T>,
    ) -> bool {
        self.navigate_all_async(vec![destination], policy, tab)
            .await
    }

    /// Interceptor-gated `navigate_to_all`.
    ///
    /// The chain sees the current top of the target stack as `from` and only
    /// the first destination as `to`; later destinations are not gated
    /// individually. An empty list has nothing to gate and is applied
    /// directly.
    ///
    /// Two calls issued without awaiting the first are not ordered: whichever
    /// finishes its interceptors last writes the stack last.
    pub async fn navigate_all_async(
        &self,
        destinations: Vec<D>,
        policy: StackPolicy,
        tab: Option<&T>,
    ) -> bool {
        if !self.is_alive() {
            return false;
        }

        let tab = self.target(tab);
        if let Some(to) = destinations.first() {
            let from = self.top(Some(&tab));
            let chain = self.inner.interceptors.read().clone();
            if !chain.run_all(from.as_ref(), to).await {
                info!(tab = ?tab, to = ?to, "Navigation blocked");
                return false;
            }
        }

        self.inner.apply(&tab, destinations, policy)
    }

    // ---- modals ------------------------------------------------------------

    pub fn present_sheet(&self, sheet: S) {
        self.inner
            .mutate_modal(ModalKind::Sheet, |modal| modal.present(sheet));
    }

    pub fn dismiss_sheet(&self) {
        self.inner.mutate_modal(ModalKind::Sheet, ModalStack::dismiss);
    }

    pub fn dismiss_sheets(&self, count: usize) {
        self.inner
            .mutate_modal(ModalKind::Sheet, |modal| modal.dismiss_many(count));
    }

    /// Dismiss sheets above `target`; drains all sheets if `target` is absent.
    pub fn dismiss_sheet_to(&self, target: &S) {
        self.inner
            .mutate_modal(ModalKind::Sheet, |modal| modal.dismiss_to(target));
    }

    /// Accessor used by presentation layers: `Some` shows the sheet unless it
    /// is already on top, `None` dismisses the top sheet.
    pub fn set_active_sheet(&self, sheet: Option<S>) {
        self.inner
            .mutate_modal(ModalKind::Sheet, |modal| modal.set_active(sheet));
    }

    pub fn present_cover(&self, cover: S) {
        self.inner
            .mutate_modal(ModalKind::Cover, |modal| modal.present(cover));
    }

    pub fn dismiss_cover(&self) {
        self.inner.mutate_modal(ModalKind::Cover, ModalStack::dismiss);
    }

    pub fn dismiss_covers(&self, count: usize) {
        self.inner
            .mutate_modal(ModalKind::Cover, |modal| modal.dismiss_many(count));
    }

    pub fn dismiss_cover_to(&self, target: &S) {
        self.inner
            .mutate_modal(ModalKind::Cover, |modal| modal.dismiss_to(target));
    }

    pub fn set_active_cover(&self, cover: Option<S>) {
        self.inner
            .mutate_modal(ModalKind::Cover, |modal| modal.set_active(cover));
    }

    // ---- lifecycle -----------------------------------------------------------

    pub fn is_alive(&self) -> bool {
        self.inner.is_alive()
    }

    /// End the session: abandon any in-flight deep push, disconnect
    /// subscribers, and ignore all further mutations.
    pub fn teardown(&self) {
        self.inner.teardown();
    }
}

impl<T: Tab, D: Destination, S: Sheet> Drop for NavigationStore<T, D, S> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}
