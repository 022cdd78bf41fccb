//! CLI command implementations

pub(crate) mod check;
pub(crate) mod common;
pub(crate) mod ls;
pub(crate) mod render;
pub(crate) mod serve;
