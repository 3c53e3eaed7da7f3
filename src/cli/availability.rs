//! Availability subcommands

use clap::Subcommand;

/// Availability subcommands
#[derive(Subcommand, Debug)]
pub enum AvailabilityCommands {
    /// Record a free time slot for a participant
    Add {
        /// Group the participant belongs to
        #[arg(long, short)]
        group: String,

        /// Participant id
        #[arg(long, short)]
        participant: String,

        /// Time slot (e.g. 2024-06-01T09:00)
        time: String,
    },

    /// Remove a recorded slot by its entry key
    Remove {
        /// Group the participant belongs to
        #[arg(long, short)]
        group: String,

        /// Participant id
        #[arg(long, short)]
        participant: String,

        /// Entry key printed by `availability add` or `availability list`
        key: String,
    },

    /// List participants and their slots
    List {
        /// Group to list
        #[arg(long, short)]
        group: String,
    },

    /// Slots every participant in a group has free
    Common {
        /// Group to intersect
        #[arg(long, short)]
        group: String,

        /// Canonicalize timestamps before comparing
        #[arg(long)]
        normalize: bool,
    },

    /// Intersect ad hoc slot lists without touching the store
    Intersect {
        /// One participant's slots, comma separated (repeat per participant)
        #[arg(long = "participant", short, value_name = "SLOTS", action = clap::ArgAction::Append)]
        participants: Vec<String>,

        /// Canonicalize timestamps before comparing
        #[arg(long)]
        normalize: bool,
    },
}
