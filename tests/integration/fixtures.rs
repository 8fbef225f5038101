//! Shared app model for integration tests
//!
//! A three-tab app with a handful of routes. `detail` reads its id from the
//! `id` query parameter; `user` reads it from the segment that follows.

use navstack::{LinkableDestination, NavigationConfig, NavigationStore, QueryParams, Sheet, Tab};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppTab {
    Home,
    Search,
    Profile,
}

impl Tab for AppTab {
    fn all() -> Vec<Self> {
        vec![AppTab::Home, AppTab::Search, AppTab::Profile]
    }

    fn name(&self) -> &str {
        match self {
            AppTab::Home => "home",
            AppTab::Search => "search",
            AppTab::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Detail { id: String },
    Settings,
    Users,
    User { name: String },
}

impl LinkableDestination for Route {
    fn path(&self) -> String {
        match self {
            Route::Home => "home".to_string(),
            Route::Detail { .. } => "detail".to_string(),
            Route::Settings => "settings".to_string(),
            Route::Users => "users".to_string(),
            Route::User { name } => name.clone(),
        }
    }

    fn from_segment(segment: &str, path: &[String], query: &QueryParams) -> Option<Self> {
        let parent = path.len().checked_sub(2).map(|i| path[i].as_str());
        match (parent, segment) {
            (Some("users"), name) => Some(Route::User {
                name: name.to_string(),
            }),
            (_, "home") => Some(Route::Home),
            (_, "detail") => query.last("id").map(|id| Route::Detail { id: id.to_string() }),
            (_, "settings") => Some(Route::Settings),
            (_, "users") => Some(Route::Users),
            _ => None,
        }
    }
}

pub fn detail(id: &str) -> Route {
    Route::Detail { id: id.to_string() }
}

#[derive(Debug, Clone)]
pub enum Overlay {
    Login,
    Share { id: u32 },
    Compose { draft: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverlayId {
    Login,
    Share(u32),
    Compose,
}

impl Sheet for Overlay {
    type Id = OverlayId;

    fn id(&self) -> OverlayId {
        match self {
            Overlay::Login => OverlayId::Login,
            Overlay::Share { id } => OverlayId::Share(*id),
            Overlay::Compose { .. } => OverlayId::Compose,
        }
    }
}

pub type AppStore = NavigationStore<AppTab, Route, Overlay>;

pub fn app_store() -> AppStore {
    NavigationStore::with_config(
        AppTab::Home,
        HashMap::new(),
        NavigationConfig::with_scheme("myapp"),
    )
}

pub fn app_store_with(config: NavigationConfig) -> AppStore {
    NavigationStore::with_config(AppTab::Home, HashMap::new(), config)
}
