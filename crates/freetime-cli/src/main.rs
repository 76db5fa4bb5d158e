//! `freetime` CLI: list free time between calendar events.
//!
//! ## Usage
//!
//! ```sh
//! # Free time in working hours (09:00-18:00) for one week, two calendars
//! freetime work.json personal.json --start-date 2024-03-11 --end-date 2024-03-15 -z America/New_York
//!
//! # Custom working hours, hide gaps shorter than 30 minutes
//! freetime work.json --start-date 2024-03-11 --end-date 2024-03-11 --from 8:30am --to 5pm --min-minutes 30
//!
//! # Read a calendar from stdin and print JSON
//! cat events.json | freetime --start-date 2024-03-11 --end-date 2024-03-12 --json
//!
//! # Prompt for dates and times
//! freetime work.json -i
//! ```
//!
//! Calendar files are Google Calendar `events.list` responses or bare arrays of
//! events; see [`source`].

mod prompt;
mod source;

use std::io::{self, IsTerminal};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{ArgAction, Parser};
use freetime_engine::render::{render_json, render_text};
use freetime_engine::{parse_timezone, Availability, AvailabilityQuery, ClampWindow, DateRange};
use tracing_subscriber::EnvFilter;

use crate::source::{CalendarSource, JsonCalendarSource, STDIN};

#[derive(Parser)]
#[command(
    name = "freetime",
    version,
    about = "List free time between calendar events within daily working hours"
)]
struct Cli {
    /// Calendar JSON files, one calendar each (reads stdin if omitted or "-")
    calendars: Vec<String>,

    /// Inclusive start date
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Inclusive end date
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,

    /// Start of the working day
    #[arg(long, default_value = "09:00")]
    from: String,

    /// End of the working day
    #[arg(long, default_value = "18:00")]
    to: String,

    /// IANA timezone for the working hours and output
    #[arg(short = 'z', long, env = "TZ", default_value = "UTC")]
    tz: String,

    /// Prompt for dates and working hours
    #[arg(short, long)]
    interactive: bool,

    /// Hide free intervals shorter than this many minutes
    #[arg(long, default_value_t = 0, value_name = "N")]
    min_minutes: i64,

    /// Print free intervals as JSON
    #[arg(long)]
    json: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let timezone = resolve_timezone(&cli.tz)?;
    let (range, clamp) = range_and_clamp(&cli)?;
    let query = AvailabilityQuery::new(range, clamp, timezone);

    let source = JsonCalendarSource::new(cli.calendars.clone());
    let (time_min, time_max) = query
        .window()
        .context("Failed to resolve the date range in the timezone")?;
    let streams = source
        .fetch(time_min, time_max)
        .context("Failed to fetch calendar events")?;

    if !cli.json {
        println!("Fetching events from:");
        for stream in &streams {
            println!("\t{}", stream.calendar);
        }
    }

    let availability = Availability::compute(query, &streams)
        .context("Failed to compute free time")?
        .with_min_duration(cli.min_minutes);

    if cli.json {
        let json = render_json(&availability.slots()).context("Failed to encode JSON output")?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&availability.query, &availability.free));
    }

    Ok(())
}

/// Dates and working hours from flags, or from prompts when asked for (or
/// when no dates were given on a terminal).
fn range_and_clamp(cli: &Cli) -> Result<(DateRange, ClampWindow)> {
    let no_dates = cli.start_date.is_none() && cli.end_date.is_none();
    if cli.interactive || (no_dates && io::stdin().is_terminal()) {
        if !io::stdin().is_terminal() {
            bail!("Interactive mode needs a terminal on stdin.");
        }
        if cli.calendars.is_empty() || cli.calendars.iter().any(|c| c == STDIN) {
            bail!("Interactive mode reads calendars from files; pass at least one calendar file.");
        }
        return prompt::ask_range_and_clamp();
    }

    let (Some(start), Some(end)) = (cli.start_date, cli.end_date) else {
        bail!("You must specify a start and end date.");
    };
    let range = DateRange::inclusive(start, end).context("Invalid date range")?;
    let clamp = ClampWindow::parse(&cli.from, &cli.to).context("Invalid working hours")?;
    Ok((range, clamp))
}

/// Accepts IANA names as well as `TZ`-style values such as `:America/Chicago`
/// or `/usr/share/zoneinfo/Europe/Paris`.
fn resolve_timezone(raw: &str) -> Result<Tz> {
    let name = raw.trim_start_matches(':');
    let name = name.rsplit_once("zoneinfo/").map_or(name, |(_, zone)| zone);
    parse_timezone(name).with_context(|| format!("Unknown timezone '{}'", raw))
}

/// Logs go to stderr. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
