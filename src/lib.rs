//! End-to-end contract suite for the pet-store REST API.
//!
//! Layers, bottom up: endpoint templates, data factories, service wrappers
//! over an injected [`http::RequestExecutor`], the scenario harness in
//! [`testing`] and the scenario catalog in [`scenarios`].

pub mod auth;
pub mod cli;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod factories;
pub mod http;
pub mod logging;
pub mod models;
pub mod probes;
pub mod scenarios;
pub mod services;
pub mod storage;
pub mod testing;

pub use error::{SuiteError, SuiteResult};
