//! nstest - Fast unit testing for namespace-dependency JavaScript codebases
//!
//! This library provides the core functionality for resolving Closure-style
//! namespace dependency closures and running the selected unit tests through
//! a Mocha driver, preloading exactly the source files the tests require.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bootstrap;
pub mod closure;
pub mod config;
pub mod manifest;
pub mod output;
pub mod resolver;
pub mod runner;
pub mod sanitizer;
pub mod selection;
pub mod task;
