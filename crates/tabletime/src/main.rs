//! tabletime - console front-end for a pay-by-time venue
//!
//! Wires together:
//! - Configuration loading (TOML file plus command-line overrides)
//! - The table manager, behind a shared handle
//! - A line-oriented console on stdin/stdout
//! - Logging of every occupy/free outcome

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tabletime_api::{Command, ReasonCode, Response};
use tabletime_config::{load_config, load_config_or_default, VenuePolicy};
use tabletime_core::{CoreEvent, SharedTableManager, TableManager};
use tabletime_util::{default_config_path, format_money, is_mock_time_active, Clock, SystemClock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::{interval_at, Instant, Interval};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  <n>              occupy table n if free, free it if occupied
  occupy <n>       seat guests at table n
  free <n>         guests at table n leave; bill the session
  list             show every table
  current          what every guest owes right now
  archive          lifetime statistics
  help             this text
  quit             exit";

/// tabletime - Occupancy and billing for a pay-by-time venue
#[derive(Parser, Debug)]
#[command(name = "tabletime")]
#[command(about = "Occupancy and billing for a pay-by-time venue", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/tabletime/config.toml)
    #[arg(short, long, env = "TABLETIME_CONFIG")]
    config: Option<PathBuf>,

    /// Number of tables, overriding the config file
    #[arg(short, long)]
    tables: Option<u32>,

    /// Price per minute, overriding the config file
    #[arg(short, long)]
    price: Option<f64>,

    /// Print responses as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Log an occupancy summary every N seconds
    #[arg(long, value_name = "SECONDS")]
    report_interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// What the console should do after a command
#[derive(Debug, PartialEq)]
enum Action {
    Respond(Response),
    Help,
    Quit,
}

/// Console service state
struct Service {
    venue: VenuePolicy,
    manager: SharedTableManager,
    json: bool,
}

impl Service {
    fn new(args: &Args) -> Result<Self> {
        let venue = match &args.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => {
                let path = default_config_path();
                load_config_or_default(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            }
        }
        .with_overrides(args.tables, args.price);

        Ok(Self::with_clock(venue, Arc::new(SystemClock), args.json))
    }

    fn with_clock(venue: VenuePolicy, clock: Arc<dyn Clock>, json: bool) -> Self {
        let manager = SharedTableManager::new(TableManager::from_policy(&venue, clock));

        info!(
            venue = %venue.name,
            table_count = venue.table_count,
            price_per_minute = venue.price_per_minute,
            "Venue opened"
        );

        Self {
            venue,
            manager,
            json,
        }
    }

    /// Execute one command against the venue
    fn dispatch(&self, command: Command) -> Action {
        let response = match command {
            Command::Occupy { table_id } => self.outcome(self.manager.occupy(table_id)),
            Command::Free { table_id } => self.outcome(self.manager.free(table_id)),
            Command::Toggle { table_id } => self.outcome(self.manager.toggle(table_id)),
            Command::List => Response::Tables {
                tables: self.manager.list_tables(),
            },
            Command::Current => {
                debug!("Generating current report");
                Response::Current {
                    report: self.manager.current_report(),
                }
            }
            Command::Archive => {
                debug!("Generating archive report");
                Response::Archive {
                    report: self.manager.archive_report(),
                }
            }
            Command::Help => return Action::Help,
            Command::Quit => return Action::Quit,
        };

        Action::Respond(response)
    }

    /// Log an occupy/free outcome and turn it into a response
    fn outcome(&self, result: std::result::Result<CoreEvent, ReasonCode>) -> Response {
        match result {
            Ok(CoreEvent::TableOccupied {
                table_id,
                session_id,
                started_at,
            }) => {
                info!(table_id = %table_id, session_id = %session_id, "Table occupied");
                Response::Occupied {
                    table_id,
                    session_id,
                    started_at,
                }
            }
            Ok(CoreEvent::TableReleased {
                table_id,
                session_id,
                minutes,
                charge,
                ..
            }) => {
                info!(
                    table_id = %table_id,
                    session_id = %session_id,
                    minutes,
                    charge,
                    "Table freed"
                );
                Response::Freed {
                    table_id,
                    session_id,
                    minutes,
                    charge,
                }
            }
            Err(reason) => {
                warn!(table_id = %reason.table_id(), reason = ?reason, "Request rejected");
                Response::Rejected { reason }
            }
        }
    }

    fn print(&self, response: &Response) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(response).context("Failed to encode response")?;
            println!("{}", line);
        } else {
            println!("{}", render::render_response(response));
        }
        Ok(())
    }

    fn log_summary(&self) {
        let report = self.manager.current_report();
        info!(
            occupied = report.occupied_count(),
            table_count = report.per_table.len(),
            owed_now = %format_money(report.total_owed_if_all_left_now),
            "Occupancy summary"
        );
    }

    async fn run(self, report_interval: Option<Duration>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut report_timer = report_interval.map(|period| interval_at(Instant::now() + period, period));

        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;

        if !self.json {
            println!(
                "{}: {} tables at {} per minute. Type 'help' for commands.",
                self.venue.name,
                self.venue.table_count,
                format_money(self.venue.price_per_minute)
            );
        }

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down");
                    break;
                }
                _ = next_tick(&mut report_timer) => {
                    self.log_summary();
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        debug!("End of input");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<Command>() {
                        Ok(command) => match self.dispatch(command) {
                            Action::Respond(response) => self.print(&response)?,
                            Action::Help => println!("{}", HELP),
                            Action::Quit => break,
                        },
                        Err(e) => {
                            debug!(line = %line, error = %e, "Unparseable command");
                            eprintln!("{}", e);
                        }
                    }
                }
            }
        }

        let archive = self.manager.archive_report();
        info!(
            grand_total_earnings = %format_money(archive.grand_total_earnings),
            still_occupied = self.manager.with(|m| m.occupied_count()),
            "Venue closed"
        );
        Ok(())
    }
}

/// Resolves on the next timer tick, or never without a timer
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Responses go to stdout, logs to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "tabletime starting");
    if is_mock_time_active() {
        warn!("Mock time is active; sessions are billed against the shifted clock");
    }

    let service = Service::new(&args)?;
    service
        .run(args.report_interval.map(Duration::from_secs))
        .await
}
