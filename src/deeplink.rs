//! Deep-Link Orchestrator
//!
//! Applies an external URL to a [`NavigationStore`]: resolves it, selects the
//! tab it names, and either replaces the target stack in one step or pushes
//! the destinations one at a time.
//!
//! Deep links bypass the interceptor chain. Interceptors gate programmatic
//! `navigate_async` calls only.

use crate::error::LinkError;
use crate::link::{self, ResolvedLink};
use crate::store::{NavigationStore, StoreInner};
use crate::types::{Destination, LinkableDestination, Sheet, StackPolicy, Tab};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

impl<T, D, S> NavigationStore<T, D, S>
where
    T: Tab,
    D: LinkableDestination,
    S: Sheet,
{
    /// Follow `url` with the configured policy and deep-push setting.
    pub fn navigate(&self, url: &str) -> bool {
        let config = self.config();
        self.navigate_with(url, config.default_policy, config.deep_push.enabled)
    }

    /// Follow `url`.
    ///
    /// Returns `false`, with no state change, when the link does not resolve.
    /// With `deep_push` and [`StackPolicy::Replace`] the target stack is
    /// cleared immediately and the destinations are pushed by a background
    /// task, one per step; this returns as soon as that task is scheduled.
    /// Any other combination applies the destinations in a single step.
    pub fn navigate_with(&self, url: &str, policy: StackPolicy, deep_push: bool) -> bool {
        if !self.is_alive() {
            return false;
        }

        let link = match self.resolve(url) {
            Ok(link) => link,
            Err(err) => {
                warn!(url = %url, error = %err, "Ignoring deep link");
                return false;
            }
        };

        // A newer link always wins over a push still in progress.
        let generation = self.inner.bump_push_generation();

        if let Some(tab) = &link.tab {
            self.select_tab(tab.clone());
        }
        let target = link.tab.unwrap_or_else(|| self.selected_tab());

        info!(
            url = %url,
            tab = ?target,
            count = link.destinations.len(),
            policy = policy.as_str(),
            deep_push,
            "Following deep link"
        );

        if deep_push && policy == StackPolicy::Replace {
            self.start_deep_push(generation, target, link.destinations);
        } else {
            self.navigate_to_all(link.destinations, policy, Some(&target));
        }
        true
    }

    /// Resolve `url` without touching the store.
    ///
    /// Applies the scheme check when `strict_scheme` is configured.
    pub fn resolve(&self, url: &str) -> Result<ResolvedLink<T, D>, LinkError> {
        let parsed = Url::parse(url)?;
        let config = self.config();
        if config.strict_scheme && parsed.scheme() != config.scheme {
            return Err(LinkError::SchemeMismatch {
                expected: config.scheme.clone(),
                found: parsed.scheme().to_string(),
            });
        }
        link::parse_url(&parsed)
    }

    /// Link to the selected tab and its current stack.
    pub fn share_link(&self, extra_query: &[(String, String)]) -> Result<Url, LinkError> {
        let snapshot = self.snapshot();
        let stack = snapshot
            .stacks
            .get(&snapshot.selected_tab)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        link::build(
            &self.config().scheme,
            Some(&snapshot.selected_tab),
            stack,
            extra_query,
        )
    }

    fn start_deep_push(&self, generation: u64, target: T, destinations: Vec<D>) {
        self.pop_to_root(Some(&target));
        if destinations.is_empty() {
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                debug!(tab = ?target, "No async runtime; applying deep link in one step");
                self.navigate_to_all(destinations, StackPolicy::Append, Some(&target));
                return;
            }
        };

        let delay = self.config().deep_push.step_delay();
        let inner = Arc::downgrade(&self.inner);
        let handle = runtime.spawn(run_deep_push(inner, generation, target, destinations, delay));
        self.inner.set_pending_push(handle);
    }
}

impl<T: Tab, D: Destination, S: Sheet> NavigationStore<T, D, S> {
    /// Stop an in-flight deep push. Destinations already pushed stay.
    pub fn cancel_deep_push(&self) {
        self.inner.bump_push_generation();
    }

    /// Wait until the current deep push, if any, has finished or been abandoned.
    pub async fn wait_for_deep_push(&self) {
        while let Some(handle) = self.inner.take_pending_push() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "Deep push task failed");
                }
            }
        }
    }
}

/// Push `destinations` onto `target`, one per step.
///
/// Holds only a weak reference; each step re-checks that the store is alive
/// and that no newer link has superseded this one.
async fn run_deep_push<T, D, S>(
    inner: Weak<StoreInner<T, D, S>>,
    generation: u64,
    target: T,
    destinations: Vec<D>,
    delay: Duration,
) where
    T: Tab,
    D: LinkableDestination,
    S: Sheet,
{
    let total = destinations.len();
    let mut paced = true;
    for (step, destination) in destinations.into_iter().enumerate() {
        if step > 0 {
            if paced && !pause(delay).await {
                debug!(step, total, "Runtime has no timer; pushing remaining steps unpaced");
                paced = false;
            }
            if !paced {
                tokio::task::yield_now().await;
            }
        }

        let Some(store) = inner.upgrade() else {
            debug!(step, total, "Store dropped; abandoning deep push");
            return;
        };
        if !store.is_alive() || store.push_generation() != generation {
            debug!(step, total, "Deep push superseded; abandoning");
            return;
        }
        store.apply(&target, vec![destination], StackPolicy::Append);
    }
    debug!(tab = ?target, total, "Deep push complete");
}

/// Sleep for `delay`. Returns `false` if the runtime was built without a
/// time driver, in which case no time has passed.
async fn pause(delay: Duration) -> bool {
    AssertUnwindSafe(async { tokio::time::sleep(delay).await })
        .catch_unwind()
        .await
        .is_ok()
}
