//! Tree document model.
//!
//! - `node`: entries, property values and property maps
//! - `tree`: the ordered key → entry mapping
//! - `parser`: building string-payload trees from YAML design documents

pub mod node;
pub mod parser;
pub mod tree;
