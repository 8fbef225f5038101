//! (tab, destinations) to URL construction.

use super::{is_valid_scheme, TAB_PARAM};
use crate::error::LinkError;
use crate::types::{LinkableDestination, Tab};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Characters that may not appear raw in an opaque URL host.
const HOST: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Build a deep link for `tab` and `destinations`.
///
/// The first destination's segment becomes the host and the rest form the
/// path. With no destinations the link is `scheme:///`. Query order is `tab`
/// first, then `extra_query` as given; the query is omitted when both are
/// empty. A later destination whose segment is empty, `.` or `..` cannot be
/// represented in a path and is rejected.
///
/// For destinations whose `path`/`from_segment` pair round-trips, parsing the
/// result reproduces `tab` and `destinations`.
pub fn build<T, D>(
    scheme: &str,
    tab: Option<&T>,
    destinations: &[D],
    extra_query: &[(String, String)],
) -> Result<Url, LinkError>
where
    T: Tab,
    D: LinkableDestination,
{
    if !is_valid_scheme(scheme) {
        return Err(LinkError::InvalidUrl(format!("invalid scheme '{}'", scheme)));
    }

    let mut url = match destinations.split_first() {
        None => Url::parse(&format!("{}:///", scheme))?,
        Some((first, rest)) => {
            let host = first.path();
            if host.is_empty() {
                return Err(LinkError::InvalidUrl(
                    "first destination has an empty path segment".to_string(),
                ));
            }
            let mut url = Url::parse(&format!(
                "{}://{}",
                scheme,
                utf8_percent_encode(&host, HOST)
            ))?;
            let segments = rest.iter().map(|d| d.path()).collect::<Vec<_>>();
            // The URL path normalizer drops or collapses these
            if let Some(bad) = segments
                .iter()
                .find(|s| matches!(s.as_str(), "" | "." | ".."))
            {
                return Err(LinkError::InvalidUrl(format!(
                    "destination segment '{}' cannot be encoded in a path",
                    bad
                )));
            }
            if !segments.is_empty() {
                url.path_segments_mut()
                    .map_err(|_| {
                        LinkError::InvalidUrl(format!("{}:// cannot hold a path", scheme))
                    })?
                    .extend(segments);
            }
            url
        }
    };

    if tab.is_some() || !extra_query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        if let Some(tab) = tab {
            pairs.append_pair(TAB_PARAM, tab.name());
        }
        for (key, value) in extra_query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
