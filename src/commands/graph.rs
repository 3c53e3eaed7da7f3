//! `planner graph` commands
//!
//! Every command loads the stored graph, applies one operation, and saves
//! the graph back when it changed.

use serde_json::json;

use crate::cli::{GraphCommands, OutputFormat};
use crate::commands::dispatch::CommandContext;
use planner_core::error::Result;
use planner_core::graph::{sanitize_key, seed, LocationGraph, LocationValue};
use planner_core::store::DocumentStore;
use planner_core::trace_time;

pub fn execute(ctx: &CommandContext, command: &GraphCommands) -> Result<()> {
    let config = ctx.config()?;
    let store = ctx.open_store(&config)?;
    let store = store.as_ref();
    let collection = config.collections.graph.as_str();

    match command {
        GraphCommands::Seed => execute_seed(ctx, store, collection),
        GraphCommands::AddNode { key, attrs } => {
            let mut graph = load(ctx, store, collection)?;
            let value: LocationValue = attrs.iter().cloned().collect();
            execute_add_node(ctx, store, &mut graph, key, value)
        }
        GraphCommands::AddEdge { a, b } => {
            let mut graph = load(ctx, store, collection)?;
            execute_add_edge(ctx, store, &mut graph, a, b)
        }
        GraphCommands::RemoveEdge { a, b } => {
            let mut graph = load(ctx, store, collection)?;
            execute_remove_edge(ctx, store, &mut graph, a, b)
        }
        GraphCommands::RemoveNode { key } => {
            let mut graph = load(ctx, store, collection)?;
            execute_remove_node(ctx, store, &mut graph, key)
        }
        GraphCommands::Neighbors { key } => {
            let graph = load(ctx, store, collection)?;
            output_neighbors(ctx, key, &graph.related_locations(key));
            Ok(())
        }
        GraphCommands::Dfs { start } => {
            let graph = load(ctx, store, collection)?;
            output_order(ctx, "dfs", start, &graph.depth_first_search(start));
            Ok(())
        }
        GraphCommands::Bfs { start } => {
            let graph = load(ctx, store, collection)?;
            output_order(ctx, "bfs", start, &graph.breadth_first_search(start));
            Ok(())
        }
        GraphCommands::Path { from, to } => {
            let graph = load(ctx, store, collection)?;
            let path = graph.find_shortest_path(from, to);
            trace_time!(ctx.start, "find_shortest_path");
            output_path(ctx, from, to, path.as_deref());
            Ok(())
        }
        GraphCommands::Show => {
            let graph = load(ctx, store, collection)?;
            output_graph(ctx, &graph);
            Ok(())
        }
    }
}

fn load(ctx: &CommandContext, store: &dyn DocumentStore, collection: &str) -> Result<LocationGraph> {
    let mut graph = LocationGraph::new().with_collection(collection);
    ctx.block_on(graph.load(store))?;
    trace_time!(ctx.start, "load_graph", locations = graph.len());
    Ok(graph)
}

fn save(ctx: &CommandContext, store: &dyn DocumentStore, graph: &LocationGraph) -> Result<()> {
    ctx.block_on(graph.save(store))?;
    trace_time!(ctx.start, "save_graph", locations = graph.len());
    Ok(())
}

fn execute_seed(ctx: &CommandContext, store: &dyn DocumentStore, collection: &str) -> Result<()> {
    let graph = seed::default_network().with_collection(collection);
    save(ctx, store, &graph)?;

    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "status": "seeded",
                    "collection": graph.collection(),
                    "locations": graph.locations().collect::<Vec<_>>(),
                })
            );
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "Seeded {} locations into {}",
                    graph.len(),
                    graph.collection()
                );
            }
        }
    }
    Ok(())
}

fn execute_add_node(
    ctx: &CommandContext,
    store: &dyn DocumentStore,
    graph: &mut LocationGraph,
    key: &str,
    value: LocationValue,
) -> Result<()> {
    let existed = graph.contains(key);
    if !existed {
        graph.add_node(key, value);
        save(ctx, store, graph)?;
    }

    let key = sanitize_key(key);
    let status = if existed { "unchanged" } else { "added" };
    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "status": status,
                    "location": key,
                    "value": graph.value(&key),
                })
            );
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                if existed {
                    println!("Location {} already exists", key);
                } else {
                    println!("Added location: {}", key);
                }
            }
        }
    }
    Ok(())
}

fn is_connected(graph: &LocationGraph, a: &str, b: &str) -> bool {
    graph.related_locations(a).contains(&sanitize_key(b))
}

fn execute_add_edge(
    ctx: &CommandContext,
    store: &dyn DocumentStore,
    graph: &mut LocationGraph,
    a: &str,
    b: &str,
) -> Result<()> {
    let existed = is_connected(graph, a, b);
    if !existed {
        graph.add_edge(a, b);
        save(ctx, store, graph)?;
    }

    let status = if existed { "unchanged" } else { "connected" };
    output_edge(ctx, status, a, b, "Connected");
    Ok(())
}

fn execute_remove_edge(
    ctx: &CommandContext,
    store: &dyn DocumentStore,
    graph: &mut LocationGraph,
    a: &str,
    b: &str,
) -> Result<()> {
    let existed = is_connected(graph, a, b);
    if existed {
        graph.remove_edge(a, b);
        save(ctx, store, graph)?;
    }

    let status = if existed { "disconnected" } else { "unchanged" };
    output_edge(ctx, status, a, b, "Disconnected");
    Ok(())
}

fn output_edge(ctx: &CommandContext, status: &str, a: &str, b: &str, verb: &str) {
    let (a, b) = (sanitize_key(a), sanitize_key(b));
    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", json!({ "status": status, "a": a, "b": b }));
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                if status == "unchanged" {
                    println!("No change: {} <-> {}", a, b);
                } else {
                    println!("{}: {} <-> {}", verb, a, b);
                }
            }
        }
    }
}

fn execute_remove_node(
    ctx: &CommandContext,
    store: &dyn DocumentStore,
    graph: &mut LocationGraph,
    key: &str,
) -> Result<()> {
    let existed = graph.contains(key);
    if existed {
        graph.remove_vertex(key);
        save(ctx, store, graph)?;
    }

    let key = sanitize_key(key);
    match ctx.cli.format {
        OutputFormat::Json => {
            let status = if existed { "removed" } else { "unchanged" };
            println!("{}", json!({ "status": status, "location": key }));
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                if existed {
                    println!("Removed location: {}", key);
                } else {
                    println!("No location named {}", key);
                }
            }
        }
    }
    Ok(())
}

fn output_neighbors(ctx: &CommandContext, key: &str, neighbors: &[String]) {
    let key = sanitize_key(key);
    match ctx.cli.format {
        OutputFormat::Json => {
            println!("{}", json!({ "location": key, "neighbors": neighbors }));
        }
        OutputFormat::Human => {
            if neighbors.is_empty() {
                if !ctx.cli.quiet {
                    println!("No locations connected to {}", key);
                }
                return;
            }
            for neighbor in neighbors {
                println!("{}", neighbor);
            }
        }
    }
}

fn output_order(ctx: &CommandContext, traversal: &str, start: &str, order: &[String]) {
    let start = sanitize_key(start);
    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({ "traversal": traversal, "start": start, "order": order })
            );
        }
        OutputFormat::Human => {
            if order.is_empty() {
                if !ctx.cli.quiet {
                    println!("No location named {}", start);
                }
                return;
            }
            println!("{}", order.join(" -> "));
        }
    }
}

fn output_path(ctx: &CommandContext, from: &str, to: &str, path: Option<&[String]>) {
    let (from, to) = (sanitize_key(from), sanitize_key(to));
    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "from": from,
                    "to": to,
                    "found": path.is_some(),
                    "path": path,
                    "path_length": path.map(|p| p.len().saturating_sub(1)),
                })
            );
        }
        OutputFormat::Human => match path {
            Some(path) => {
                let hops = path.len().saturating_sub(1);
                println!(
                    "{} ({} hop{})",
                    path.join(" -> "),
                    hops,
                    if hops == 1 { "" } else { "s" }
                );
            }
            None => println!("No path from {} to {}", from, to),
        },
    }
}

fn output_graph(ctx: &CommandContext, graph: &LocationGraph) {
    match ctx.cli.format {
        OutputFormat::Json => {
            let locations: Vec<_> = graph
                .locations()
                .map(|key| {
                    json!({
                        "key": key,
                        "value": graph.value(key),
                        "neighbors": graph.related_locations(key),
                    })
                })
                .collect();
            println!(
                "{}",
                json!({ "collection": graph.collection(), "locations": locations })
            );
        }
        OutputFormat::Human => {
            if graph.is_empty() {
                if !ctx.cli.quiet {
                    println!("No locations stored in {}", graph.collection());
                }
                return;
            }
            for key in graph.locations() {
                let neighbors = graph.related_locations(key);
                if neighbors.is_empty() {
                    println!("{}", key);
                } else {
                    println!("{}: {}", key, neighbors.join(", "));
                }
            }
        }
    }
}
