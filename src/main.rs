//! Events Palour CLI
//!
//! Runs the host server and inspects the dashboard data from the terminal:
//! - Serve the API and built UI
//! - Print the purchase report and event pins
//! - Write a default config file
//! - Probe the map's external assets

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use palour::api::{serve, AppState};
use palour::catalog::Catalog;
use palour::config::{generate_default_config, Config};
use palour::map::TileCoord;
use palour::probe::AssetProbe;
use palour::report::{ChartFrame, PurchaseReport};

#[derive(Parser)]
#[command(name = "palour")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Events Palour attendee dashboard host")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the host server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Built UI directory
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Print the purchase report
    Report {
        /// Chart width used for bar geometry
        #[arg(long, default_value = "600")]
        width: f64,
        /// Chart height used for bar geometry
        #[arg(long, default_value = "300")]
        height: f64,
    },

    /// List event pins with colours and tiles
    Pins {
        /// Zoom level for tile coordinates (default: map default zoom)
        #[arg(short, long)]
        zoom: Option<u8>,
    },

    /// Write a default config file
    Config {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check that the map's stylesheet, script and tiles are reachable
    Probe {
        /// Zoom level for tile checks (default: map default zoom)
        #[arg(short, long)]
        zoom: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(dir) = static_dir {
                config.server.static_dir = dir;
            }
            cmd_serve(&config).await
        }
        Commands::Report { width, height } => cmd_report(cli.format, width, height),
        Commands::Pins { zoom } => {
            cmd_pins(&config, cli.format, zoom.unwrap_or(config.map.default_zoom))
        }
        Commands::Config { output, force } => cmd_config(&output, force),
        Commands::Probe { zoom } => {
            cmd_probe(&config, cli.format, zoom.unwrap_or(config.map.default_zoom)).await
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("palour={},tower_http=info", config.logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn cmd_serve(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Starting Events Palour v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config)?;
    state.catalog.validate().context("Built-in catalog is invalid")?;
    warn_on_summary_mismatch(&state.catalog);

    if let Err(e) = state
        .palette
        .verify_coverage(state.catalog.pins.iter().map(|p| p.category))
    {
        tracing::warn!("Event map will be unavailable: {}", e);
    }

    serve(state).await?;
    Ok(())
}

fn warn_on_summary_mismatch(catalog: &Catalog) {
    if let Some(diff) = catalog.summary.discrepancy(catalog.purchases) {
        tracing::warn!(
            shown_total = %diff.shown.total_spent,
            computed_total = %diff.computed.total_spent,
            shown_tickets = diff.shown.tickets_purchased,
            computed_tickets = diff.computed.tickets_purchased,
            "Purchase statistics do not match the recent purchases list"
        );
    }
}

fn cmd_report(format: OutputFormat, width: f64, height: f64) -> anyhow::Result<()> {
    let catalog = Catalog::sample();
    warn_on_summary_mismatch(&catalog);

    let report = PurchaseReport::build(&catalog);
    let layout = report.spending.layout(ChartFrame::sized(width, height));

    if format == OutputFormat::Json {
        let value = serde_json::json!({ "report": report, "chart": layout });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", report.title);
    println!();
    println!("{}", report.spending.header.title);
    println!("{}", "-".repeat(50));
    for bar in &layout.bars {
        let share = f64::from(bar.amount) / f64::from(layout.axis_max.max(1));
        let width = (share * 30.0).round() as usize;
        println!("{:<5} {:<30} ${}", bar.month, "#".repeat(width), bar.amount);
    }

    println!();
    println!("{}", report.recent.header.title);
    println!("{}", "-".repeat(50));
    for row in &report.recent.rows {
        println!("{:<25} {:<12} {:>8}", row.event, row.date, row.amount);
    }

    println!();
    println!("{}", report.statistics.header.title);
    println!("{}", "-".repeat(50));
    for stat in &report.statistics.stats {
        println!("{:<20} {:>10}", stat.label, stat.value);
    }

    Ok(())
}

fn cmd_pins(config: &Config, format: OutputFormat, zoom: u8) -> anyhow::Result<()> {
    let catalog = Catalog::sample();
    let palette = config.palette()?;

    let mut rows = Vec::with_capacity(catalog.pins.len());
    for pin in catalog.pins {
        let tile = TileCoord::containing(pin.position, zoom)?;
        let color = palette.color_for(pin.category).ok();
        rows.push((pin, tile, color));
    }

    if format == OutputFormat::Json {
        let values: Vec<_> = rows
            .iter()
            .map(|(pin, tile, color)| {
                serde_json::json!({
                    "pin": pin,
                    "tile": tile,
                    "color": color,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<25} {:<14} {:>10} {:>11}  {:<12} {}",
        "ID", "NAME", "CATEGORY", "LAT", "LNG", "COLOUR", "TILE"
    );
    for (pin, tile, color) in &rows {
        println!(
            "{:<4} {:<25} {:<14} {:>10.4} {:>11.4}  {:<12} {}",
            pin.id,
            pin.name,
            pin.category.display_name(),
            pin.position.lat,
            pin.position.lng,
            color.map(|c| c.name.as_str()).unwrap_or("(missing)"),
            tile
        );
    }

    Ok(())
}

fn cmd_config(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        bail!("{:?} already exists (use --force to overwrite)", output);
    }
    std::fs::write(output, generate_default_config())
        .with_context(|| format!("Failed to write {:?}", output))?;
    println!("Wrote default config to {:?}", output);
    Ok(())
}

async fn cmd_probe(config: &Config, format: OutputFormat, zoom: u8) -> anyhow::Result<()> {
    let catalog = Catalog::sample();
    let targets = AssetProbe::targets(&config.map.assets(), catalog.pins, zoom)?;
    let probe = AssetProbe::new(config.map.load_policy())?;

    let reports = probe.run(&targets).await;
    let failed = reports.iter().filter(|r| !r.ok).count();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            let outcome = match (&report.status, &report.error) {
                (Some(status), _) => format!("OK ({})", status.status),
                (None, Some(error)) => format!("FAILED: {}", error),
                (None, None) => "FAILED".to_string(),
            };
            println!("{:<40} {}", report.target.label, outcome);
        }
    }

    if failed > 0 {
        bail!("{} of {} map assets are unreachable", failed, reports.len());
    }
    Ok(())
}
