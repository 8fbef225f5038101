//! Interceptor Chain
//!
//! Asynchronous gates evaluated before a programmatic navigation. Each
//! interceptor may perform arbitrary async work (a session lookup, a storage
//! read) but must not mutate the navigation store it is guarding.

use crate::error::InterceptorError;
use crate::types::Destination;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Gate consulted before a navigation transition.
#[async_trait]
pub trait Interceptor<D>: Send + Sync {
    /// Decide whether navigating from `from` to `to` may proceed.
    ///
    /// An `Err` is treated as a block.
    async fn should_navigate(&self, from: Option<&D>, to: &D) -> Result<bool, InterceptorError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

type GateFn<D> = dyn Fn(Option<D>, D) -> BoxFuture<'static, Result<bool, InterceptorError>>
    + Send
    + Sync;

/// Interceptor backed by a closure.
///
/// The closure receives owned copies of `from` and `to` so the returned future
/// can be `'static`.
pub struct FnInterceptor<D> {
    name: String,
    gate: Box<GateFn<D>>,
}

impl<D: Destination> FnInterceptor<D> {
    pub fn new<F>(name: impl Into<String>, gate: F) -> Self
    where
        F: Fn(Option<D>, D) -> BoxFuture<'static, Result<bool, InterceptorError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            gate: Box::new(gate),
        }
    }

    /// Interceptor answering synchronously with a plain predicate.
    pub fn from_predicate<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(Option<&D>, &D) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |from, to| {
            let allowed = predicate(from.as_ref(), &to);
            Box::pin(async move { Ok::<_, InterceptorError>(allowed) })
        })
    }
}

impl<D> fmt::Debug for FnInterceptor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterceptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<D: Destination> Interceptor<D> for FnInterceptor<D> {
    async fn should_navigate(&self, from: Option<&D>, to: &D) -> Result<bool, InterceptorError> {
        (self.gate)(from.cloned(), to.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered list of interceptors.
pub struct InterceptorChain<D> {
    interceptors: Vec<Arc<dyn Interceptor<D>>>,
}

impl<D> Clone for InterceptorChain<D> {
    fn clone(&self) -> Self {
        Self {
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<D> Default for InterceptorChain<D> {
    fn default() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }
}

impl<D: Destination> fmt::Debug for InterceptorChain<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.interceptors.iter().map(|i| i.name()))
            .finish()
    }
}

impl<D: Destination> InterceptorChain<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor; it runs after every one already registered.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor<D>>) {
        self.interceptors.push(interceptor);
    }

    pub fn clear(&mut self) {
        self.interceptors.clear();
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Evaluate every interceptor in registration order, one at a time.
    ///
    /// Stops at the first block. An empty chain allows everything.
    pub async fn run_all(&self, from: Option<&D>, to: &D) -> bool {
        for interceptor in &self.interceptors {
            match interceptor.should_navigate(from, to).await {
                Ok(true) => continue,
                Ok(false) => {
                    debug!(
                        interceptor = interceptor.name(),
                        to = ?to,
                        "Navigation blocked by interceptor"
                    );
                    return false;
                }
                Err(err) => {
                    warn!(
                        interceptor = interceptor.name(),
                        to = ?to,
                        error = %err,
                        "Interceptor failed, blocking navigation"
                    );
                    return false;
                }
            }
        }
        true
    }
}
