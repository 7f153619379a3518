//! Command-line front end over the trip store.
//!
//! Loads the configured seed data and prints trip views to stdout.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tripboard_core::{init_logging, Latency, SeedSource, StoreConfig, TripStore};

#[derive(Parser)]
#[command(name = "tripboard")]
#[command(about = "Inspect group trips: itinerary, members and shared expenses")]
#[command(version)]
struct Cli {
    /// Skip simulated latency
    #[arg(long, global = true)]
    no_latency: bool,

    /// Load seed data from a directory of <entity>.json files
    #[arg(long, value_name = "DIR", global = true)]
    seed_dir: Option<PathBuf>,

    /// Write rolling logs to this absolute directory
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all trips
    Trips,
    /// Show the overview card of a trip
    Overview { trip_id: String },
    /// Print the day-by-day itinerary of a trip
    Itinerary { trip_id: String },
    /// Print expenses, category totals and open balances of a trip
    Expenses { trip_id: String },
    /// Print members and pending invitations of a trip
    Members { trip_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| anyhow!("log dir must be valid UTF-8"))?;
        init_logging(&config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let store = TripStore::from_config(&config);
    match cli.command {
        Command::Trips => print_trips(&store).await,
        Command::Overview { trip_id } => print_overview(&store, &trip_id).await,
        Command::Itinerary { trip_id } => print_itinerary(&store, &trip_id).await,
        Command::Expenses { trip_id } => print_expenses(&store, &trip_id).await,
        Command::Members { trip_id } => print_members(&store, &trip_id).await,
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("reading TRIPBOARD_* environment")?;
    if cli.no_latency {
        config.latency = Latency::none();
    }
    if let Some(dir) = &cli.seed_dir {
        config.seed = SeedSource::Dir(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

async fn print_trips(store: &TripStore) -> anyhow::Result<()> {
    for trip in store.trips().get_all().await {
        println!(
            "{:<6} {:<24} {:<20} {} .. {}",
            trip.id, trip.name, trip.destination, trip.start_date, trip.end_date
        );
    }
    Ok(())
}

async fn print_overview(store: &TripStore, trip_id: &str) -> anyhow::Result<()> {
    let overview = store
        .trip_service()
        .overview(trip_id)
        .await
        .ok_or_else(|| anyhow!("trip not found: {trip_id}"))?;

    println!("{} ({})", overview.trip.name, overview.trip.destination);
    println!("  days          {}", overview.duration_days);
    println!(
        "  planned days  {} ({} activities)",
        overview.planned_days, overview.activity_count
    );
    println!("  members       {}", overview.member_count);
    println!("  stays         {}", overview.accommodation_count);
    println!(
        "  places        {} ({} must-see)",
        overview.place_count, overview.must_see_count
    );
    println!("  spent         {:.2}", overview.expense_total);
    Ok(())
}

async fn print_itinerary(store: &TripStore, trip_id: &str) -> anyhow::Result<()> {
    for day in store.itinerary_service().trip_plan(trip_id).await {
        println!("Day {} - {}", day.day, day.date);
        for activity in &day.activities {
            println!(
                "  {:>5}  {} @ {}",
                activity.start_time, activity.title, activity.location
            );
        }
    }
    Ok(())
}

async fn print_expenses(store: &TripStore, trip_id: &str) -> anyhow::Result<()> {
    let service = store.expense_service();
    let summary = service.get_trip_summary(trip_id).await;

    for expense in &summary.expenses {
        println!(
            "{}  {:<24} {:>10.2} {}  paid by {}  open {:.2}",
            expense.date,
            expense.title,
            expense.amount,
            expense.currency,
            expense.paid_by.name,
            expense.outstanding()
        );
    }
    println!(
        "total {:.2} across {} expenses",
        summary.total_amount, summary.total_expenses
    );
    for (category, amount) in &summary.category_summary {
        println!("  {category:?}: {amount:.2}");
    }
    for balance in service.outstanding_balances(trip_id).await {
        if balance.outstanding > 0.0 {
            println!("  {} owes {:.2}", balance.name, balance.outstanding);
        }
    }
    Ok(())
}

async fn print_members(store: &TripStore, trip_id: &str) -> anyhow::Result<()> {
    let service = store.invite_service();
    let (members, invitations) = tokio::join!(
        service.members_for_trip(trip_id),
        service.invitations_for_trip(trip_id)
    );

    for member in members {
        println!("{:<24} {:<32} {:?}", member.name, member.email, member.role);
    }
    for invitation in invitations.iter().filter(|invitation| invitation.is_pending()) {
        println!(
            "  invited: {} <{}> sent {}",
            invitation.invitee_name,
            invitation.invitee_email,
            invitation.sent_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
