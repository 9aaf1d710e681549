use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use engine::{MemberId, Room};

mod report;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "party_ledger")]
#[command(about = "Show who owes whom in a shared-expense room snapshot")]
struct Cli {
    /// Settings file (defaults to `./settings.toml` when present).
    #[arg(long, env = "PARTY_LEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Room snapshot exported as JSON.
    snapshot: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Netted debts between members.
    Debts(QueryArgs),
    /// Spending totals and per-member figures.
    Stats(QueryArgs),
    /// Current party phase and who it is waiting on.
    Phase,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Restrict the output to one member id.
    #[arg(long)]
    user: Option<i64>,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error + Send + Sync>> {
    let settings = settings::Settings::new(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "party_ledger={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let raw = std::fs::read_to_string(&cli.snapshot)?;
    let room: Room = serde_json::from_str(&raw)?;
    tracing::info!(
        "loaded room {} ({} members, {} operations)",
        room.id,
        room.members.len(),
        room.operations.len()
    );

    let currency = settings.report.currency.as_str();
    let output = match cli.command {
        Command::Debts(args) => debts(&room, &args, currency)?,
        Command::Stats(args) => stats(&room, &args, currency)?,
        Command::Phase => {
            let phase = engine::resolve_phase(&room);
            report::phase(phase, &engine::pending_members(&room))
        }
    };
    print!("{output}");

    Ok(())
}

fn debts(
    room: &Room,
    args: &QueryArgs,
    currency: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut debts = engine::compute_debts(room)?;
    if !debts.rejected.is_empty() {
        tracing::warn!("{} operations were ignored", debts.rejected.len());
    }
    if let Some(user) = args.user {
        debts.debts = engine::user_debts(room, MemberId(user))?;
    }

    if args.json {
        return Ok(serde_json::to_string_pretty(&debts)? + "\n");
    }
    Ok(report::debts(&debts, currency))
}

fn stats(
    room: &Room,
    args: &QueryArgs,
    currency: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let summary = engine::room_summary(room)?;
    let Some(user) = args.user.map(MemberId) else {
        if args.json {
            return Ok(serde_json::to_string_pretty(&summary)? + "\n");
        }
        return Ok(report::summary(&summary, currency));
    };

    let member = summary
        .members
        .iter()
        .find(|m| m.member.id == user)
        .ok_or(engine::EngineError::UnknownMember(user))?;
    if args.json {
        return Ok(serde_json::to_string_pretty(member)? + "\n");
    }
    Ok(report::member(member, currency))
}
