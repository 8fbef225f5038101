//! URL to (tab, destinations) resolution.

use super::{QueryParams, ResolvedLink, TAB_PARAM};
use crate::error::LinkError;
use crate::types::{LinkableDestination, Tab};
use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

/// Parse a raw URL string into a tab selection and destinations.
///
/// Fails fast: if any segment does not decode, the whole link is rejected and
/// no partial destination list is produced.
pub fn parse<T, D>(raw: &str) -> Result<ResolvedLink<T, D>, LinkError>
where
    T: Tab,
    D: LinkableDestination,
{
    let url = Url::parse(raw)?;
    parse_url(&url)
}

/// Resolve an already-parsed URL.
pub fn parse_url<T, D>(url: &Url) -> Result<ResolvedLink<T, D>, LinkError>
where
    T: Tab,
    D: LinkableDestination,
{
    let query = QueryParams::from_url(url);

    // Unknown tab names are not an error; the link just doesn't switch tabs.
    let tab = query.last(TAB_PARAM).and_then(T::from_name);

    let segments = segments_of(url);
    let mut destinations = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        match D::from_segment(segment, &segments[..=index], &query) {
            Some(destination) => destinations.push(destination),
            None => {
                debug!(
                    url = %url,
                    index,
                    segment = %segment,
                    "Deep link segment did not resolve"
                );
                return Err(LinkError::UnresolvedSegment {
                    index,
                    segment: segment.clone(),
                });
            }
        }
    }

    Ok(ResolvedLink {
        tab,
        destinations,
        query,
    })
}

/// Ordered, percent-decoded segments of `url`: the host (when non-empty)
/// followed by non-empty path components.
pub fn segments_of(url: &Url) -> Vec<String> {
    let mut segments = Vec::new();

    if let Some(host) = url.host_str() {
        let host = decode(host);
        if !host.is_empty() {
            segments.push(host);
        }
    }

    match url.path_segments() {
        Some(parts) => segments.extend(parts.filter(|s| !s.is_empty()).map(decode)),
        // `scheme:a/b` has no authority; its whole path is opaque text
        None => segments.extend(
            url.path()
                .split('/')
                .filter(|s| !s.is_empty())
                .map(decode),
        ),
    }

    segments
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
