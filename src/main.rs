//! # Shiftwatch CLI
//!
//! Watches the food co-op shift calendar for open shifts on one date and
//! texts you when a match appears.
//!
//! Usage:
//!   shiftwatch -d 04-13-2022 -s 8 -e 14 --phone-num 5551234567
//!   shiftwatch -d 04-13-2022 -s 8 -e 14 --shift checkout --phone-num 5551234567
//!
//! Credentials come from the environment (or a `.env` file):
//! COOP_USERNAME, COOP_PASSWORD, SMS_API_KEY.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shiftwatch_agent::ShiftWatcher;
use shiftwatch_calendar::dates;
use shiftwatch_calendar::shifts::SHIFT_DURATION_HOURS;
use shiftwatch_core::config::WatchConfig;
use shiftwatch_core::types::WatchRequest;

#[derive(Parser)]
#[command(
    name = "shiftwatch",
    version,
    about = "Watches the co-op shift calendar and texts you when a matching slot opens"
)]
struct Cli {
    /// Date in MM-DD-YYYY format you want your shift to be, e.g. 04-13-2022
    #[arg(short, long)]
    date: String,

    /// Earliest time (1-24) the shift could start (inclusive)
    #[arg(short, long)]
    start_hour: u32,

    /// Latest time (1-24) the shift could end (inclusive)
    #[arg(short, long)]
    end_hour: u32,

    /// The name of the shift you want, e.g. 'checkout'
    #[arg(long, default_value = "all")]
    shift: String,

    /// Persist the login session to disk so we don't create too many of them
    #[arg(long)]
    keep_session_alive: bool,

    /// How many seconds to sleep before checking the latest shifts again
    #[arg(long, default_value_t = 20)]
    sleep_time_secs: u64,

    /// When the watch should give up, in minutes
    #[arg(long, default_value_t = 300)]
    timeout_mins: u64,

    /// Phone number to text
    #[arg(long)]
    phone_num: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let target_date = dates::parse_date(&cli.date).with_context(|| {
        format!(
            "date {:?} couldn't be parsed — was it in MM-DD-YYYY format? E.g. 04-13-1994",
            cli.date
        )
    })?;

    if !(1..=24).contains(&cli.start_hour) || !(1..=24).contains(&cli.end_hour) {
        bail!("start and end hours must be between 1 and 24");
    }
    if cli.start_hour as f64 + SHIFT_DURATION_HOURS > cli.end_hour as f64 {
        bail!("shifts are 2:45 hrs long, but your start and end times allowed for less than that");
    }

    let config = WatchConfig::from_env()?;
    let request = WatchRequest {
        target_date,
        start_hour: cli.start_hour,
        end_hour: cli.end_hour,
        shift_name: cli.shift.to_lowercase(),
        keep_session_alive: cli.keep_session_alive,
        sleep_secs: cli.sleep_time_secs,
        timeout: Duration::from_secs(cli.timeout_mins * 60),
        phone: cli.phone_num,
    };

    tracing::info!("Shift date set to {target_date}");
    ShiftWatcher::new(config, request).run().await?;
    Ok(())
}
