//! Domain types shared by the order session core and its presentation layers.
//!
//! Nothing here performs I/O or depends on an async runtime.

pub mod domain;
pub mod error;
pub mod screen;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
