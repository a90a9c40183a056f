//! Caller-facing adapters

pub mod console;

pub use console::{Console, MenuChoice};
