//! Sabbath status command-line tool
//!
//! Operator front end over the `sabbath_companion` library: prints the
//! current status, windows, reminder decisions and preparation checklists,
//! or watches a timezone and logs when the Sabbath opens and closes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sabbath-status -- status --timezone America/New_York
//! cargo run --bin sabbath-status -- --json window --date 2026-10-17
//! cargo run --bin sabbath-status -- upcoming --count 8
//! cargo run --bin sabbath-status -- watch --timezone Europe/London
//! ```
//!
//! # Environment Variables
//!
//! - `SABBATH_TIMEZONE`, `SABBATH_START_HOUR`, `SABBATH_START_MINUTE`,
//!   `SABBATH_PREPARATION_START_HOUR`, `SABBATH_NOTIFICATION_HOURS_BEFORE`:
//!   override `sabbath.toml`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sabbath_companion::api::{
    PreparationChecklist, ReminderReport, SabbathPreferences, StatusReport, UserSabbathProfile,
    WindowReport,
};
use sabbath_companion::config::ClockConfig;
use sabbath_companion::models::SabbathPhase;
use sabbath_companion::services::{reminder_due, SabbathClock};
use sabbath_companion::time::{parse_instant, parse_reference, parse_timezone, Reference};

#[derive(Parser, Debug)]
#[command(name = "sabbath-status", version, about = "Sabbath times and status")]
struct Cli {
    /// Path to a sabbath.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Whether it is the Sabbath now (or at --at) and how long remains
    Status(StatusArgs),
    /// The Sabbath window for the current week or a given date
    Window(WindowArgs),
    /// The next few Sabbath windows
    Upcoming(UpcomingArgs),
    /// Whether a preparation reminder is due
    Reminder(ReminderArgs),
    /// Preparation checklist for a set of preferences
    Checklist(ChecklistArgs),
    /// Re-evaluate the status periodically and log phase changes
    Watch(WatchArgs),
}

#[derive(Args, Debug)]
struct TimezoneArg {
    /// IANA timezone (defaults to the configured one)
    #[arg(long, short = 't')]
    timezone: Option<String>,
}

#[derive(Args, Debug)]
struct StatusArgs {
    #[command(flatten)]
    tz: TimezoneArg,
    /// Reference instant (RFC 3339, e.g. 2026-10-16T19:00:00Z)
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args, Debug)]
struct WindowArgs {
    #[command(flatten)]
    tz: TimezoneArg,
    /// Date (YYYY-MM-DD) or RFC 3339 instant
    #[arg(long)]
    date: Option<String>,
}

#[derive(Args, Debug)]
struct UpcomingArgs {
    #[command(flatten)]
    tz: TimezoneArg,
    #[arg(long, short = 'n', default_value_t = 4)]
    count: usize,
}

#[derive(Args, Debug)]
struct ReminderArgs {
    #[command(flatten)]
    tz: TimezoneArg,
    /// JSON user profile ({"timezone": ..., "sabbath_preferences": {...}})
    #[arg(long, conflicts_with_all = ["prep_hour", "hours_before"])]
    profile: Option<PathBuf>,
    /// Local hour on Friday when preparation starts
    #[arg(long)]
    prep_hour: Option<u32>,
    /// Hours before preparation when the reminder becomes due
    #[arg(long)]
    hours_before: Option<u32>,
    /// Reference instant (RFC 3339)
    #[arg(long)]
    at: Option<String>,
}

#[derive(Args, Debug)]
struct ChecklistArgs {
    /// JSON file with Sabbath preferences
    #[arg(long)]
    preferences: Option<PathBuf>,
    #[arg(long)]
    meal_prep: bool,
    #[arg(long)]
    family_worship: bool,
    #[arg(long)]
    outreach: bool,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[command(flatten)]
    tz: TimezoneArg,
    /// Seconds between evaluations
    #[arg(long, default_value_t = 60)]
    interval_secs: u64,
}

struct AppContext {
    config: ClockConfig,
    clock: SabbathClock,
    json: bool,
}

impl AppContext {
    fn timezone(&self, arg: &TimezoneArg) -> Result<Tz> {
        let name = arg
            .timezone
            .as_deref()
            .unwrap_or(&self.config.clock.default_timezone);
        Ok(parse_timezone(name)?)
    }

    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays parseable
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClockConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClockConfig::from_default_location()?,
    }
    .apply_env_overrides()
    .context("applying environment overrides")?;

    let clock = SabbathClock::from_config(&config)?;
    let ctx = AppContext {
        config,
        clock,
        json: cli.json,
    };

    match cli.command {
        Command::Status(args) => status(&ctx, args),
        Command::Window(args) => window(&ctx, args),
        Command::Upcoming(args) => upcoming(&ctx, args),
        Command::Reminder(args) => reminder(&ctx, args),
        Command::Checklist(args) => checklist(&ctx, args),
        Command::Watch(args) => watch(&ctx, args).await,
    }
}

fn parse_at(at: Option<&str>, tz: Tz) -> Result<Option<DateTime<Tz>>> {
    at.map(|s| parse_instant(s, tz)).transpose().map_err(Into::into)
}

fn status(ctx: &AppContext, args: StatusArgs) -> Result<()> {
    let tz = ctx.timezone(&args.tz)?;
    let reference = parse_at(args.at.as_deref(), tz)?;
    let status = ctx.clock.status(tz.name(), reference)?;
    let report = StatusReport::from(&status);

    ctx.emit(&report, || {
        let headline = if report.is_sabbath {
            format!("It is the Sabbath in {}.", report.timezone)
        } else {
            format!("It is not the Sabbath in {}.", report.timezone)
        };
        let target = if report.is_sabbath { "ends" } else { "begins" };
        format!(
            "{}\nSabbath {} in {}.\nWindow: {} -> {}\nNext:   {} -> {}",
            headline,
            target,
            report.countdown,
            report.window.start,
            report.window.end,
            report.next_window.start,
            report.next_window.end
        )
    })
}

fn window(ctx: &AppContext, args: WindowArgs) -> Result<()> {
    let tz = ctx.timezone(&args.tz)?;
    let window = match args.date.as_deref().map(|s| parse_reference(s, tz)).transpose()? {
        Some(Reference::Date(date)) => ctx.clock.window_for_date(tz.name(), date)?,
        Some(Reference::Instant(instant)) => ctx.clock.window_at(&instant)?,
        None => ctx.clock.current_window(tz.name(), None)?,
    };
    let report = WindowReport::from(&window);

    ctx.emit(&report, || {
        format!("Friday {}: {} -> {}", report.friday, report.start, report.end)
    })
}

fn upcoming(ctx: &AppContext, args: UpcomingArgs) -> Result<()> {
    let tz = ctx.timezone(&args.tz)?;
    let reports: Vec<WindowReport> = ctx
        .clock
        .upcoming_windows(tz.name(), None, args.count)?
        .iter()
        .map(WindowReport::from)
        .collect();

    ctx.emit(&reports, || {
        reports
            .iter()
            .map(|r| format!("{}  {} -> {}", r.friday, r.start, r.end))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn reminder(ctx: &AppContext, args: ReminderArgs) -> Result<()> {
    let profile = match &args.profile {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<UserSabbathProfile>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            let mut preferences = ctx.config.default_preferences();
            if let Some(hour) = args.prep_hour {
                preferences.preparation_start_hour = hour;
            }
            if let Some(hours) = args.hours_before {
                preferences.notification_hours_before = hours;
            }
            UserSabbathProfile::new(ctx.timezone(&args.tz)?.name()).with_preferences(preferences)
        }
    };

    let tz = parse_timezone(&profile.timezone)?;
    let reference = parse_at(args.at.as_deref(), tz)?;
    let decision = reminder_due(&ctx.clock, &profile, reference)?;
    let report = ReminderReport::from(&decision);

    ctx.emit(&report, || {
        format!(
            "Reminder {} (opens {}, preparation starts {})",
            if report.due { "due" } else { "not due" },
            report.reminder_opens_at,
            report.preparation_starts_at
        )
    })
}

fn checklist(ctx: &AppContext, args: ChecklistArgs) -> Result<()> {
    let mut preferences = match &args.preferences {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<SabbathPreferences>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ctx.config.default_preferences(),
    };
    preferences.meal_prep |= args.meal_prep;
    preferences.family_worship |= args.family_worship;
    preferences.outreach |= args.outreach;

    let checklist = PreparationChecklist::for_preferences(&preferences);
    ctx.emit(&checklist, || {
        checklist
            .items()
            .map(|(category, task)| format!("[{}] {}", category, task))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

async fn watch(ctx: &AppContext, args: WatchArgs) -> Result<()> {
    let tz = ctx.timezone(&args.tz)?;
    let period = Duration::from_secs(args.interval_secs.max(1));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    watch_until(ctx, tz, period, shutdown).await
}

/// Evaluate the status every `period` until `shutdown` resolves.
async fn watch_until(
    ctx: &AppContext,
    tz: Tz,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(period);
    let mut last_phase: Option<SabbathPhase> = None;
    tokio::pin!(shutdown);

    info!("Watching Sabbath status for {}", tz.name());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let status = match ctx.clock.status(tz.name(), None) {
                    Ok(status) => status,
                    Err(e) => {
                        warn!("Status evaluation failed: {}", e);
                        continue;
                    }
                };
                if last_phase != Some(status.phase()) {
                    info!(
                        phase = ?status.phase(),
                        window_start = %status.window().start(),
                        window_end = %status.window().end(),
                        "Sabbath phase changed"
                    );
                    last_phase = Some(status.phase());
                }
                ctx.emit(&StatusReport::from(&status), || {
                    format!("{:?}: {} remaining", status.phase(), status.countdown_text())
                })?;
            }
            _ = &mut shutdown => {
                info!("Stopping watch");
                return Ok(());
            }
        }
    }
}
