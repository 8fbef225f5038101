//! Property-based tests for link resolution and stack mutation


mod link_round_trip;
