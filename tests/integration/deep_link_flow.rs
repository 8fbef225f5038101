//! Deep links applied to a live store

use super::fixtures::{app_store, app_store_with, detail, AppTab, Route};
use navstack::{NavigationConfig, NavigationEvent, StackPolicy};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_deep_push_ends_with_exact_destination_list() {
    let store = app_store();
    store.navigate_to_all(
        vec![Route::Settings, Route::Users],
        StackPolicy::Replace,
        Some(&AppTab::Profile),
    );

    assert!(store.navigate("myapp://home/detail/settings?id=123&tab=profile"));
    store.wait_for_deep_push().await;

    assert_eq!(store.selected_tab(), AppTab::Profile);
    assert_eq!(
        store.stack(&AppTab::Profile),
        vec![Route::Home, detail("123"), Route::Settings]
    );
    assert!(store.stack(&AppTab::Home).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deep_push_is_paced_by_step_delay() {
    let mut config = NavigationConfig::with_scheme("myapp");
    config.deep_push.step_delay_ms = 100;
    let store = app_store_with(config);

    assert!(store.navigate("myapp://home/settings/users"));
    tokio::task::yield_now().await;
    assert_eq!(store.current_stack(), vec![Route::Home]);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(store.current_stack(), vec![Route::Home, Route::Settings]);

    store.wait_for_deep_push().await;
    assert_eq!(
        store.current_stack(),
        vec![Route::Home, Route::Settings, Route::Users]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_keeps_what_was_pushed() {
    let store = app_store();
    assert!(store.navigate("myapp://home/settings/users"));
    tokio::task::yield_now().await;

    store.cancel_deep_push();
    tokio::time::sleep(Duration::from_secs(1)).await;
    store.wait_for_deep_push().await;

    assert_eq!(store.current_stack(), vec![Route::Home]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_store_stops_push() {
    let store = app_store();
    let rx = store.subscribe();
    assert!(store.navigate("myapp://home/settings/users"));
    drop(store);

    tokio::time::sleep(Duration::from_secs(1)).await;
    let stack_events = rx
        .try_iter()
        .filter(|e| matches!(e, NavigationEvent::StackChanged { .. }))
        .count();
    assert_eq!(stack_events, 0);
}

#[tokio::test(start_paused = true)]
async fn test_newer_link_on_other_tab_supersedes_push() {
    let store = app_store();
    assert!(store.navigate("myapp://home/settings/users"));
    tokio::task::yield_now().await;

    // A second link on another tab takes over; the first push stops.
    assert!(store.navigate("myapp://settings?tab=search"));
    store.wait_for_deep_push().await;

    assert_eq!(store.selected_tab(), AppTab::Search);
    assert_eq!(store.stack(&AppTab::Search), vec![Route::Settings]);
    assert_eq!(store.stack(&AppTab::Home), vec![Route::Home]);
}

#[test]
fn test_tab_miss_keeps_selection() {
    let store = app_store();
    store.select_tab(AppTab::Search);
    assert!(store.navigate_with("myapp://settings?tab=inbox", StackPolicy::Replace, false));
    assert_eq!(store.selected_tab(), AppTab::Search);
    assert_eq!(store.stack(&AppTab::Search), vec![Route::Settings]);
}

#[test]
fn test_invalid_link_leaves_state_unchanged() {
    let store = app_store();
    store.navigate_to(Route::Users, StackPolicy::Append, None);
    let before = store.snapshot();

    assert!(!store.navigate("myapp://home/bogus?tab=profile"));
    assert!(!store.navigate("::::"));

    let after = store.snapshot();
    assert_eq!(after.selected_tab, before.selected_tab);
    assert_eq!(after.stacks, before.stacks);
}

#[test]
fn test_append_and_replace_top_links() {
    let store = app_store();
    store.navigate_to(Route::Home, StackPolicy::Append, None);

    assert!(store.navigate_with("myapp://users", StackPolicy::Append, false));
    assert!(store.navigate_with("myapp://settings", StackPolicy::ReplaceTop, false));
    assert_eq!(store.current_stack(), vec![Route::Home, Route::Settings]);
}

#[test]
fn test_configured_policy_drives_navigate() {
    let mut config = NavigationConfig::with_scheme("myapp");
    config.default_policy = StackPolicy::Append;
    config.deep_push.enabled = false;
    let store = app_store_with(config);

    store.navigate_to(Route::Home, StackPolicy::Append, None);
    assert!(store.navigate("myapp://settings"));
    assert_eq!(store.current_stack(), vec![Route::Home, Route::Settings]);
}

#[test]
fn test_share_link_reproduces_state() {
    let store = app_store();
    store.select_tab(AppTab::Profile);
    store.navigate_to_all(
        vec![Route::Users, Route::User { name: "grace".to_string() }],
        StackPolicy::Replace,
        None,
    );

    let url = store.share_link(&[]).unwrap();
    assert_eq!(url.as_str(), "myapp://users/grace?tab=profile");

    let other = app_store();
    assert!(other.navigate_with(url.as_str(), StackPolicy::Replace, false));
    assert_eq!(other.selected_tab(), AppTab::Profile);
    assert_eq!(other.current_stack(), store.current_stack());
}

#[test]
fn test_navigate_after_teardown_is_rejected() {
    let store = app_store();
    store.teardown();
    assert!(!store.navigate("myapp://home"));
    assert!(store.current_stack().is_empty());
}
