//! `planner availability` commands

use std::sync::Arc;

use serde_json::json;

use crate::cli::parse::parse_slot_list;
use crate::cli::{AvailabilityCommands, OutputFormat};
use crate::commands::dispatch::CommandContext;
use planner_core::availability::{
    common_free_times, common_times_for, normalize_slot, GroupAvailability, Participant,
};
use planner_core::error::Result;
use planner_core::key::sanitize_key;
use planner_core::store::DocumentStore;
use planner_core::trace_time;

pub fn execute(ctx: &CommandContext, command: &AvailabilityCommands) -> Result<()> {
    match command {
        AvailabilityCommands::Add {
            group,
            participant,
            time,
        } => {
            let (store, collection) = open(ctx)?;
            let store = store.as_ref();
            let mut availability = load(ctx, store, &collection, group)?;
            let key = availability.add_time(participant, time)?;
            ctx.block_on(availability.save(store))?;
            output_added(ctx, &availability, participant, &key, time);
            Ok(())
        }
        AvailabilityCommands::Remove {
            group,
            participant,
            key,
        } => {
            let (store, collection) = open(ctx)?;
            let store = store.as_ref();
            let mut availability = load(ctx, store, &collection, group)?;
            let removed = availability.remove_time(participant, key);
            if removed {
                ctx.block_on(availability.save(store))?;
            }
            output_removed(ctx, &availability, participant, key, removed);
            Ok(())
        }
        AvailabilityCommands::List { group } => {
            let (store, collection) = open(ctx)?;
            let availability = load(ctx, store.as_ref(), &collection, group)?;
            output_list(ctx, &availability);
            Ok(())
        }
        AvailabilityCommands::Common { group, normalize } => {
            let (store, collection) = open(ctx)?;
            let availability = load(ctx, store.as_ref(), &collection, group)?;
            let mut participants = availability.participants();
            if *normalize {
                for participant in &mut participants {
                    participant.available_times = normalize_list(&participant.available_times);
                }
            }
            let common = common_times_for(&participants);
            trace_time!(ctx.start, "common_times", participants = participants.len());
            output_common(
                ctx,
                Some(availability.group()),
                participants.len(),
                *normalize,
                &common,
            );
            Ok(())
        }
        AvailabilityCommands::Intersect {
            participants,
            normalize,
        } => {
            execute_intersect(ctx, participants, *normalize);
            Ok(())
        }
    }
}

/// Ad hoc intersection of slot lists given on the command line; touches no store
fn execute_intersect(ctx: &CommandContext, participants: &[String], normalize: bool) {
    let lists: Vec<Vec<String>> = participants.iter().map(|s| parse_slot_list(s)).collect();
    let lists = if normalize {
        normalize_lists(&lists)
    } else {
        lists
    };
    let common = common_free_times(&lists);
    output_common(ctx, None, lists.len(), normalize, &common);
}

/// Store and availability collection from the resolved config
fn open(ctx: &CommandContext) -> Result<(Arc<dyn DocumentStore>, String)> {
    let config = ctx.config()?;
    let store = ctx.open_store(&config)?;
    Ok((store, config.collections.availability))
}

fn load(
    ctx: &CommandContext,
    store: &dyn DocumentStore,
    collection: &str,
    group: &str,
) -> Result<GroupAvailability> {
    let availability = ctx.block_on(GroupAvailability::load(store, collection, group))?;
    trace_time!(ctx.start, "load_availability");
    Ok(availability)
}

fn normalize_list(times: &[String]) -> Vec<String> {
    times.iter().map(|t| normalize_slot(t)).collect()
}

fn normalize_lists(lists: &[Vec<String>]) -> Vec<Vec<String>> {
    lists.iter().map(|times| normalize_list(times)).collect()
}

fn output_added(
    ctx: &CommandContext,
    availability: &GroupAvailability,
    participant: &str,
    key: &str,
    time: &str,
) {
    let participant = sanitize_key(participant);
    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "status": "added",
                    "group": availability.group(),
                    "participant": participant,
                    "key": key,
                    "time": time.trim(),
                })
            );
        }
        OutputFormat::Human => {
            if ctx.cli.quiet {
                println!("{}", key);
            } else {
                println!(
                    "Added {} for {} in {} (key {})",
                    time.trim(),
                    participant,
                    availability.group(),
                    key
                );
            }
        }
    }
}

fn output_removed(
    ctx: &CommandContext,
    availability: &GroupAvailability,
    participant: &str,
    key: &str,
    removed: bool,
) {
    let participant = sanitize_key(participant);
    match ctx.cli.format {
        OutputFormat::Json => {
            let status = if removed { "removed" } else { "not_found" };
            println!(
                "{}",
                json!({
                    "status": status,
                    "group": availability.group(),
                    "participant": participant,
                    "key": key,
                })
            );
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                if removed {
                    println!("Removed slot {} for {}", key, participant);
                } else {
                    println!("No slot {} for {}", key, participant);
                }
            }
        }
    }
}

fn output_list(ctx: &CommandContext, availability: &GroupAvailability) {
    let participants: Vec<Participant> = availability.participants();

    match ctx.cli.format {
        OutputFormat::Json => {
            let participants: Vec<_> = participants
                .iter()
                .map(|p| {
                    let slots: Vec<_> = availability
                        .entries_for(&p.id)
                        .into_iter()
                        .flatten()
                        .map(|(key, time)| json!({ "key": key, "time": time }))
                        .collect();
                    json!({ "id": p.id, "slots": slots })
                })
                .collect();
            println!(
                "{}",
                json!({ "group": availability.group(), "participants": participants })
            );
        }
        OutputFormat::Human => {
            if participants.is_empty() {
                if !ctx.cli.quiet {
                    println!("No availability recorded for {}", availability.group());
                }
                return;
            }
            for p in &participants {
                println!("{}:", p.id);
                for (key, time) in availability.entries_for(&p.id).into_iter().flatten() {
                    println!("  {}  {}", key, time);
                }
            }
        }
    }
}

fn output_common(
    ctx: &CommandContext,
    group: Option<&str>,
    participants: usize,
    normalized: bool,
    common: &[String],
) {
    match ctx.cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                json!({
                    "group": group,
                    "participants": participants,
                    "normalized": normalized,
                    "common": common,
                })
            );
        }
        OutputFormat::Human => {
            if common.is_empty() {
                if !ctx.cli.quiet {
                    println!("No common free time");
                }
                return;
            }
            for slot in common {
                println!("{}", slot);
            }
        }
    }
}
