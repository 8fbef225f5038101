//! Navstack: Navigation State for Tabbed, Stack-Based UIs
//!
//! Keeps a destination stack per tab plus sheet and full-screen-cover stacks,
//! gates programmatic navigation through async interceptors, and turns deep
//! links into tab selections and stack contents (and back again).

pub mod config;
pub mod deeplink;
pub mod error;
pub mod interceptor;
pub mod link;
pub mod logging;
pub mod store;
pub mod types;

pub use config::{ConfigLoader, NavigationConfig};
pub use error::{ConfigError, InterceptorError, LinkError};
pub use interceptor::{FnInterceptor, Interceptor, InterceptorChain};
pub use link::{QueryParams, ResolvedLink};
pub use store::{ModalStack, NavigationEvent, NavigationSnapshot, NavigationStore};
pub use types::{Destination, LinkableDestination, Sheet, StackPolicy, Tab};
