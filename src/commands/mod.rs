//! CLI commands for the planner

pub mod availability;
pub mod dispatch;
pub mod graph;
