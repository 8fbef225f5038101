//! Properties of URL building and parsing

use super::model::{linkable_pages, pane, Page, Pane};
use navstack::link::{build, parse, ResolvedLink};
use navstack::LinkError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_build_then_parse_round_trips(
        tab in proptest::option::of(pane()),
        pages in linkable_pages(),
    ) {
        let url = build("myapp", tab.as_ref(), &pages, &[]).unwrap();
        let resolved: ResolvedLink<Pane, Page> = parse(url.as_str()).unwrap();

        prop_assert_eq!(resolved.tab, tab);
        prop_assert_eq!(resolved.destinations, pages);
    }

    #[test]
    fn test_extra_query_survives_round_trip(
        pages in linkable_pages(),
        value in "[a-zA-Z0-9 &=?/]{0,12}",
    ) {
        let extra = vec![("note".to_string(), value.clone())];
        let url = build("myapp", Some(&Pane::Inbox), &pages, &extra).unwrap();
        let resolved: ResolvedLink<Pane, Page> = parse(url.as_str()).unwrap();

        prop_assert_eq!(resolved.tab, Some(Pane::Inbox));
        prop_assert_eq!(resolved.query.last("note"), Some(value.as_str()));
    }
}

/// A bad segment anywhere rejects the link, even when later segments resolve.
#[test]
fn test_unresolvable_segment_fails_whole_link() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let strategy = (
        prop::collection::vec(prop_oneof![Just("home"), Just("about")], 1..6),
        any::<prop::sample::Index>(),
        "zz[0-9]{1,3}",
    );

    runner
        .run(&strategy, |(segments, position, bad)| {
            let mut segments: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
            let index = position.index(segments.len() + 1);
            segments.insert(index, bad.clone());

            let url = format!("myapp://{}?tab=feed", segments.join("/"));
            let result: Result<ResolvedLink<Pane, Page>, LinkError> = parse(&url);

            assert_eq!(
                result,
                Err(LinkError::UnresolvedSegment {
                    index,
                    segment: bad,
                })
            );
            Ok(())
        })
        .unwrap();
}
