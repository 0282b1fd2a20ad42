//! CLI layer: argument parsing and command dispatch

pub mod app;
pub mod commands;
