//! Starter location network written by `planner graph seed`

use super::{LocationGraph, LocationValue};

/// Locations in the starter network
pub const DEFAULT_LOCATIONS: [&str; 5] = ["Delhi", "Agra", "Jaipur", "Mumbai", "Goa"];

/// Connections in the starter network
pub const DEFAULT_CONNECTIONS: [(&str, &str); 4] = [
    ("Delhi", "Agra"),
    ("Delhi", "Jaipur"),
    ("Agra", "Jaipur"),
    ("Mumbai", "Goa"),
];

/// Build the starter network: a northern triangle and a separate coastal pair
pub fn default_network() -> LocationGraph {
    let mut graph = LocationGraph::new();

    for location in DEFAULT_LOCATIONS {
        graph.add_node(location, LocationValue::new());
    }
    for (a, b) in DEFAULT_CONNECTIONS {
        graph.add_edge(a, b);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_network_shape() {
        let graph = default_network();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.related_locations("Delhi"), vec!["Agra", "Jaipur"]);
        assert_eq!(graph.related_locations("Goa"), vec!["Mumbai"]);
    }

    #[test]
    fn test_coast_is_disconnected_from_north() {
        let graph = default_network();
        assert_eq!(graph.find_shortest_path("Delhi", "Goa"), None);
        assert_eq!(
            graph.find_shortest_path("Mumbai", "Goa"),
            Some(vec!["Mumbai".to_string(), "Goa".to_string()])
        );
    }
}
