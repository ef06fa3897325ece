//! File I/O for tree designs and command scripts.
//!
//! Designs and scripts can be read from disk (optionally gzipped) or stdin.

pub mod loader;
