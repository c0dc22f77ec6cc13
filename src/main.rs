mod commands;
mod context;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use duoplan_core::model::EventKind;
use tracing_subscriber::EnvFilter;

use context::AppContext;

#[derive(Parser)]
#[command(name = "duoplan")]
#[command(about = "Plan a weekend together: a shared itinerary with weather and map pins")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, join or leave a couple space
    Space {
        #[command(subcommand)]
        action: SpaceAction,
    },
    /// Show the itinerary
    Show,
    /// Show the itinerary and redraw it whenever it changes
    Watch,
    /// Add, edit, move or remove events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Add or remove days
    Day {
        #[command(subcommand)]
        action: DayAction,
    },
    /// Manage weather locations
    Weather {
        #[command(subcommand)]
        action: WeatherAction,
    },
    /// List events that can be placed on a map
    Map,
    /// Show configuration paths and settings
    Config,
}

#[derive(Subcommand)]
enum SpaceAction {
    /// Create a space and print the code to share with your partner
    Create,
    /// Join your partner's space
    Join {
        /// The code your partner shared
        code: String,
    },
    /// Leave the current space (deletes it if you created it)
    Leave,
    /// Show the current space
    Status,
}

#[derive(Subcommand)]
enum EventAction {
    /// Add an event to a day
    Add {
        /// Day id or weekday name (e.g. "saturday")
        day: String,

        /// Display time (e.g. "10:30")
        #[arg(short, long)]
        time: String,

        #[arg(short, long)]
        location: String,

        /// activity, food or other
        #[arg(short, long, default_value = "activity")]
        kind: EventKind,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit an event
    Edit {
        day: String,

        /// Event id or its number in `duoplan show`
        event: String,

        #[arg(short, long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        kind: Option<EventKind>,

        /// New notes (empty string clears them)
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove an event
    Rm { day: String, event: String },
    /// Move an event one place earlier
    Up {
        day: String,
        /// Event number in `duoplan show`
        number: usize,
    },
    /// Move an event one place later
    Down { day: String, number: usize },
    /// Add an activity at a map point, named by its address
    At {
        day: String,
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
}

#[derive(Subcommand)]
enum DayAction {
    /// Add a day after the last (or before the first with --before)
    Add {
        #[arg(long, conflicts_with = "after")]
        before: bool,

        #[arg(long)]
        after: bool,
    },
    /// Remove a day and its events
    Rm { day: String },
}

#[derive(Subcommand)]
enum WeatherAction {
    /// Add weather for a location to a day
    Add { day: String, location: String },
    /// Remove a location's weather from a day
    Rm { day: String, location: String },
    /// Make a location the headline weather for a day
    Primary { day: String, location: String },
    /// Toggle a location in the defaults every day gets
    Default { location: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let ctx = AppContext::load()?;

    match cli.command {
        Commands::Space { action } => match action {
            SpaceAction::Create => commands::space::create(&ctx).await,
            SpaceAction::Join { code } => commands::space::join(&ctx, &code).await,
            SpaceAction::Leave => commands::space::leave(&ctx).await,
            SpaceAction::Status => commands::space::status(&ctx).await,
        },
        Commands::Show => commands::show::run(&ctx).await,
        Commands::Watch => commands::watch::run(&ctx).await,
        Commands::Event { action } => match action {
            EventAction::Add {
                day,
                time,
                location,
                kind,
                notes,
            } => commands::event::add(&ctx, &day, time, location, kind, notes).await,
            EventAction::Edit {
                day,
                event,
                time,
                location,
                kind,
                notes,
            } => {
                let edit = commands::event::EventEdit {
                    time,
                    location,
                    kind,
                    notes,
                };
                commands::event::edit(&ctx, &day, &event, edit).await
            }
            EventAction::Rm { day, event } => commands::event::remove(&ctx, &day, &event).await,
            EventAction::Up { day, number } => commands::event::move_up(&ctx, &day, number).await,
            EventAction::Down { day, number } => {
                commands::event::move_down(&ctx, &day, number).await
            }
            EventAction::At { day, lat, lng } => commands::event::at(&ctx, &day, lat, lng).await,
        },
        Commands::Day { action } => match action {
            DayAction::Add { before, after: _ } => commands::day::add(&ctx, before).await,
            DayAction::Rm { day } => commands::day::remove(&ctx, &day).await,
        },
        Commands::Weather { action } => match action {
            WeatherAction::Add { day, location } => {
                commands::weather::add(&ctx, &day, &location).await
            }
            WeatherAction::Rm { day, location } => {
                commands::weather::remove(&ctx, &day, &location).await
            }
            WeatherAction::Primary { day, location } => {
                commands::weather::primary(&ctx, &day, &location).await
            }
            WeatherAction::Default { location } => {
                commands::weather::toggle_default(&ctx, &location).await
            }
        },
        Commands::Map => commands::map::run(&ctx).await,
        Commands::Config => commands::config::run(&ctx),
    }
}

/// Log to stderr, filtered by `DUOPLAN_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DUOPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
