//! Integration tests for navigation state and deep links

pub mod fixtures;

mod deep_link_flow;
mod link_resolution;
