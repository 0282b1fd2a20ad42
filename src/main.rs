//! nstest - Fast unit testing for namespace-dependency JavaScript codebases
//!
//! The CLI resolves the dependency closure of the selected test files and
//! runs them through a generated Mocha driver, preloading exactly the
//! source files the tests require.

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

mod cli;

/// Main entry point for the nstest CLI
fn main() {
    if let Err(err) = cli::app::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
