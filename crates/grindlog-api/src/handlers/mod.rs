//! HTTP handlers, one module per resource.

pub mod activity;
pub mod import;
pub mod notes;
pub mod problems;
pub mod signup;
