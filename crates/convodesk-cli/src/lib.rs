//! CLI front-end for the convodesk conversation logger and folder browser.

pub mod config;
pub mod logging;
