//! Weekend Planner Core Library
//!
//! Location graph, availability intersection and the document stores they
//! persist to.

pub mod availability;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod key;
pub mod logging;
pub mod store;
