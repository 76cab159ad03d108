//! # paf-dash
//!
//! Library half of the dashboard binary, split out so integration tests
//! can build the router without starting a real server.

pub mod api;
pub mod cli;
pub mod config;
