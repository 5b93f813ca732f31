//! Shared types for the convodesk conversation logger and folder browser.

mod conversation;
mod tree;

pub use conversation::*;
pub use tree::*;
