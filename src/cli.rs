use clap::{Parser, Subcommand};

/// Essensplaner — weekly meal planning and shopping lists for a household.
#[derive(Parser, Debug)]
#[command(name = "essensplaner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the JSON data files (plan, recipes, catalog, config).
    #[arg(short, long, default_value = ".")]
    pub data_dir: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new weekly plan. Replaces the current one.
    Generate,

    /// Show the current plan.
    Show {
        /// Include all candidates with their reasoning.
        #[arg(long)]
        detailed: bool,
    },

    /// Select a candidate for a slot. -1 means "no meal"; without an index
    /// an interactive picker opens.
    Select {
        /// Weekday, e.g. "Montag".
        weekday: String,
        /// "Mittagessen" or "Abendessen".
        slot: String,
        /// Candidate index (0-4) or -1.
        #[arg(allow_hyphen_values = true)]
        index: Option<i32>,
    },

    /// Add or remove a user-supplied recipe for a slot.
    Custom {
        #[command(subcommand)]
        action: CustomAction,
    },

    /// Manage multi-day prep groups on the current plan.
    MultiDay {
        #[command(subcommand)]
        action: MultiDayAction,
    },

    /// Standing preferences applied to every generated plan.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Compute the shopping list for the current plan.
    Shopping {
        /// Household size; defaults to the configured value.
        #[arg(long)]
        household: Option<u32>,

        /// Partition by farm-shop availability.
        #[arg(long)]
        split: bool,

        /// Also write the list to a CSV file.
        #[arg(long)]
        csv: Option<String>,
    },

    /// Mark the current plan as completed.
    Complete,

    /// Delete the current plan.
    Delete {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Show { detailed: false }
    }
}

#[derive(Subcommand, Debug)]
pub enum CustomAction {
    /// Put a recipe by URL at the top of a slot and select it.
    Set {
        weekday: String,
        slot: String,
        title: String,
        url: String,
    },
    /// Remove a previously added custom recipe.
    Clear {
        weekday: String,
        slot: String,
        url: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MultiDayAction {
    /// Cook once at PRIMARY, eat again on each REUSE slot.
    /// Slots are written as "Wochentag:Slot", e.g. "Sonntag:Mittagessen".
    Set {
        primary: String,
        #[arg(required = true)]
        reuse: Vec<String>,
    },
    /// Remove a slot from its multi-day group.
    Clear { slot: String },
    /// List the active groups.
    Show,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Show the stored preferences.
    Show,
    /// Set the default household size.
    SetHousehold { size: u32 },
    /// Add a standing multi-day group ("Wochentag:Slot" notation).
    SetMultiDay {
        primary: String,
        #[arg(required = true)]
        reuse: Vec<String>,
    },
    /// Remove the standing multi-day group for a primary slot.
    ClearMultiDay { primary: String },
    /// Always plan "Kein Gericht" for a slot.
    Skip { weekday: String, slot: String },
    /// Plan the slot normally again.
    Unskip { weekday: String, slot: String },
}
