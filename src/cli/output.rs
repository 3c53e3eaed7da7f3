pub use planner_core::format::OutputFormat;
