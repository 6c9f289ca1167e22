// src/lib.rs - smoothpath-rs: trajectory core plus configuration and output for the driver
pub mod config;
pub mod output;

pub use smoothpath_shared::*;
