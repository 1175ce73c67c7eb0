mod error;
mod pipeline;
mod publish;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use std::time::Duration;
use vantage_core::{LinkConfig, StationLink};
use vantage_decode::FrameLayout;

use error::RunError;
use publish::{Publisher, StatePayload, DEFAULT_FRIENDLY_NAME};

#[derive(Parser, Debug)]
#[command(name = "vantage-app", version)]
#[command(about = "Read current conditions from a Vantage console and publish them as a JSON state update")]
struct Cli {
    /// Endpoint that receives the state update
    #[arg(required_unless_present = "list_ports")]
    url: Option<String>,
    /// Bearer token for the endpoint
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Serial device of the console [default: /dev/ttyUSB0]
    #[arg(long)]
    port: Option<String>,
    /// [default: 19200]
    #[arg(long)]
    baud_rate: Option<u32>,
    /// Per-reply read timeout [default: 1200]
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// LOOP field layout: loop, loop-no-bearing
    #[arg(long, default_value = "loop", value_parser = parse_layout)]
    layout: FrameLayout,
    #[arg(long, default_value = DEFAULT_FRIENDLY_NAME)]
    friendly_name: String,
    /// Print the state update instead of posting it
    #[arg(long)]
    dry_run: bool,
    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,
    /// Log the serial exchange
    #[arg(short, long)]
    verbose: bool,
}

fn parse_layout(name: &str) -> Result<FrameLayout, String> {
    FrameLayout::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = FrameLayout::ALL.iter().map(|l| l.name()).collect();
        format!("unknown layout {name:?}, expected one of {}", known.join(", "))
    })
}

impl Cli {
    fn link_config(&self) -> LinkConfig {
        let defaults = LinkConfig::default();
        LinkConfig {
            port_name: self.port.clone().unwrap_or(defaults.port_name),
            baud_rate: self.baud_rate.unwrap_or(defaults.baud_rate),
            timeout: self.timeout_ms.map(Duration::from_millis).unwrap_or(defaults.timeout),
            ..defaults
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), RunError> {
    if cli.list_ports {
        for port in StationLink::list_ports() {
            println!("{port}");
        }
        return Ok(());
    }

    let url = cli.url.as_deref().context("missing destination URL")?;

    // Resolve the token before touching the station so a bad setup never
    // holds the serial line.
    let publisher = if cli.dry_run {
        None
    } else {
        let token = cli.token.as_deref().context("TOKEN is not set")?;
        Some(Publisher::new(url, token)?)
    };

    let link = StationLink::open(&cli.link_config())?;
    let reading = pipeline::read_station(link, &cli.layout)?;
    let payload = StatePayload::new(&reading, &cli.layout, &cli.friendly_name, Local::now().fixed_offset());

    match publisher {
        Some(publisher) => publisher.post(&payload)?,
        None => {
            let body = serde_json::to_string_pretty(&payload).context("failed to serialize state update")?;
            info!("dry run, not posting to {url}");
            println!("{body}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
