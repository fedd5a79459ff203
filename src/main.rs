use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use trait_scan::analytics::summary::{self, EventSummary};
use trait_scan::config::Settings;
use trait_scan::gating::PaywallPrompt;
use trait_scan::{telemetry, AppContext};

#[derive(Parser)]
#[command(name = "trait-scan", about = "Inspect and drive persona-analysis client state")]
struct Cli {
    /// Configuration file (defaults to ./trait-scan.{toml,yaml,json} when present)
    #[arg(long, global = true, env = "TRAIT_SCAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Usage/event log
    #[command(subcommand)]
    Events(EventsCommand),
    /// Subscription tier
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Start an analysis for a handle or profile URL
    Seed { input: String },
    /// Fetch the persona profile of a seed
    Persona { seed_id: String },
}

#[derive(Subcommand)]
enum EventsCommand {
    List {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        name: Option<String>,
    },
    Summary,
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Clear,
}

#[derive(Subcommand)]
enum PlanCommand {
    Show,
    Set { tier: String },
    Toggle,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    info!("[Config] Store at {}", settings.storage.path);

    let app = AppContext::open(settings)?;

    match cli.command {
        Command::Events(EventsCommand::List { limit, name }) => {
            let events = match name {
                Some(name) => app.events.list_by_name(&name),
                None => app
                    .events
                    .list(Some(limit.unwrap_or(app.settings.analytics.recent_limit))),
            };
            print_json(&events)?;
        }
        Command::Events(EventsCommand::Summary) => {
            print_json(&EventSummary::from_events(&app.events.list(None)))?;
        }
        Command::Events(EventsCommand::Export { out }) => {
            let body = summary::export_json(&app.events.list(None))?;
            let path = out.unwrap_or_else(|| {
                PathBuf::from(summary::export_file_name(chrono::Utc::now().date_naive()))
            });
            std::fs::write(&path, body)?;
            info!("[Analytics] Exported {} events to {:?}", app.events.len(), path);
        }
        Command::Events(EventsCommand::Clear) => {
            app.events.clear();
            info!("[Analytics] Event log cleared");
        }
        Command::Plan(PlanCommand::Show) => {
            print_json(&serde_json::json!({
                "tier": app.plan.tier(),
                "features": app.plan.tier().features(),
                "usage": app.usage_meter(),
            }))?;
        }
        Command::Plan(PlanCommand::Set { tier }) => {
            let tier = app.select_plan(&tier)?;
            print_json(&serde_json::json!({ "tier": tier }))?;
        }
        Command::Plan(PlanCommand::Toggle) => {
            print_json(&serde_json::json!({ "tier": app.plan.toggle() }))?;
        }
        Command::Seed { input } => {
            let mut prompt = PaywallPrompt::new();
            match app.submit_handle(&input, &mut prompt).await {
                Some(seed) => print_json(&seed)?,
                None => {
                    if let Some(title) = prompt.title() {
                        print_json(&serde_json::json!({
                            "blocked": title,
                            "upgrade": trait_scan::gating::Route::Pricing.path(),
                        }))?;
                    }
                }
            }
        }
        Command::Persona { seed_id } => {
            print_json(&app.api.persona(&seed_id).await)?;
        }
    }

    for notice in app.notices.drain() {
        eprintln!("{}: {}", notice.title, notice.description);
    }
    Ok(())
}
