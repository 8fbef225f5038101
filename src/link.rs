//! Deep-Link Resolution
//!
//! Stateless conversion between URLs and a tab selection plus an ordered list
//! of destinations.
//!
//! URL shape: `scheme://<segment>/<segment>/...?tab=<name>&key=value`. The host
//! is the first segment; the remaining segments come from the path with empty
//! components dropped. Query parameters form a multi-map, and the tab is taken
//! from the last `tab` occurrence.

mod build;
mod parse;
mod query;

pub use build::build;
pub use parse::{parse, parse_url, segments_of};
pub use query::QueryParams;

/// Query parameter carrying the tab selection.
pub const TAB_PARAM: &str = "tab";

/// Result of resolving a deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink<T, D> {
    /// Tab named by the link, if it matched one of the closed set.
    pub tab: Option<T>,
    /// Decoded destinations, in segment order.
    pub destinations: Vec<D>,
    /// Full query multi-map.
    pub query: QueryParams,
}

/// Whether `scheme` is a syntactically valid URL scheme (RFC 3986 §3.1).
pub fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
