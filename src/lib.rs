//! Library crate root for the descarga masiva CLI core.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod package;
pub mod query;
pub mod service;
