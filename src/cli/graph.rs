//! Graph subcommands for building and querying the location network

use clap::Subcommand;

use super::parse::parse_attr;

/// Graph subcommands
#[derive(Subcommand, Debug)]
pub enum GraphCommands {
    /// Replace the stored graph with the starter network
    Seed,

    /// Add a location (existing locations are left unchanged)
    AddNode {
        /// Location key
        key: String,

        /// Attribute to store on the location, as key=value (can be repeated)
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr, action = clap::ArgAction::Append)]
        attrs: Vec<(String, serde_json::Value)>,
    },

    /// Connect two locations, creating either if needed
    AddEdge {
        /// First location
        a: String,

        /// Second location
        b: String,
    },

    /// Disconnect two locations
    RemoveEdge {
        /// First location
        a: String,

        /// Second location
        b: String,
    },

    /// Remove a location and all of its connections
    RemoveNode {
        /// Location key
        key: String,
    },

    /// List locations directly connected to a location
    Neighbors {
        /// Location key
        key: String,
    },

    /// Depth-first traversal order from a location
    Dfs {
        /// Starting location
        start: String,
    },

    /// Breadth-first traversal order from a location
    Bfs {
        /// Starting location
        start: String,
    },

    /// Shortest path between two locations
    Path {
        /// Starting location
        from: String,

        /// Destination location
        to: String,
    },

    /// Show every location with its connections
    Show,
}
