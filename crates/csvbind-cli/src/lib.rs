//! CLI library components for csvbind.

pub mod dynamic;
pub mod logging;
