//! URL parse/build behavior through the public API

use super::fixtures::{detail, AppTab, Route};
use anyhow::Result;
use navstack::link::{self, ResolvedLink};
use navstack::LinkError;

fn parse(raw: &str) -> std::result::Result<ResolvedLink<AppTab, Route>, LinkError> {
    link::parse(raw)
}

#[test]
fn test_parse_home_detail_with_tab() -> Result<()> {
    let resolved = parse("myapp://home/detail?id=123&tab=profile")?;
    assert_eq!(resolved.tab, Some(AppTab::Profile));
    assert_eq!(resolved.destinations, vec![Route::Home, detail("123")]);
    assert_eq!(resolved.query.first("id"), Some("123"));
    Ok(())
}

#[test]
fn test_build_home_detail_with_tab() {
    let url = link::build(
        "myapp",
        Some(&AppTab::Profile),
        &[Route::Home, detail("123")],
        &[],
    )
    .unwrap();

    assert_eq!(url.scheme(), "myapp");
    assert_eq!(url.host_str(), Some("home"));
    assert_eq!(url.path(), "/detail");
    assert_eq!(url.query(), Some("tab=profile"));
}

#[test]
fn test_tab_comes_first_in_query() {
    let url = link::build(
        "myapp",
        Some(&AppTab::Search),
        &[detail("5")],
        &[
            ("id".to_string(), "5".to_string()),
            ("ref".to_string(), "push".to_string()),
        ],
    )
    .unwrap();
    assert_eq!(url.query(), Some("tab=search&id=5&ref=push"));
}

#[test]
fn test_unresolvable_middle_segment_rejects_whole_link() {
    let result = parse("myapp://home/nowhere/settings?tab=search");
    assert_eq!(
        result,
        Err(LinkError::UnresolvedSegment {
            index: 1,
            segment: "nowhere".to_string()
        })
    );
}

#[test]
fn test_detail_without_id_does_not_resolve() {
    assert!(matches!(
        parse("myapp://detail"),
        Err(LinkError::UnresolvedSegment { index: 0, .. })
    ));
}

#[test]
fn test_unknown_tab_is_not_an_error() {
    let resolved = parse("myapp://settings?tab=inbox").unwrap();
    assert_eq!(resolved.tab, None);
    assert_eq!(resolved.destinations, vec![Route::Settings]);
}

#[test]
fn test_last_tab_parameter_wins() {
    let resolved = parse("myapp://home?tab=search&tab=profile").unwrap();
    assert_eq!(resolved.tab, Some(AppTab::Profile));
    assert_eq!(resolved.query.get_all("tab").len(), 2);
}

#[test]
fn test_segment_decoder_sees_preceding_path() {
    let resolved = parse("myapp://users/ada%20lovelace").unwrap();
    assert_eq!(
        resolved.destinations,
        vec![
            Route::Users,
            Route::User {
                name: "ada lovelace".to_string()
            }
        ]
    );
}

#[test]
fn test_empty_components_are_skipped() {
    let resolved = parse("myapp://home//settings/").unwrap();
    assert_eq!(resolved.destinations, vec![Route::Home, Route::Settings]);
}

#[test]
fn test_tab_only_link_round_trips() -> Result<()> {
    let url = link::build::<AppTab, Route>("myapp", Some(&AppTab::Search), &[], &[])?;
    let resolved = parse(url.as_str())?;
    assert_eq!(resolved.tab, Some(AppTab::Search));
    assert!(resolved.destinations.is_empty());
    Ok(())
}

#[test]
fn test_malformed_url() {
    assert!(matches!(parse("no scheme here"), Err(LinkError::InvalidUrl(_))));
}
