use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use prodplan::export::{self, ExportData, ExportFormat};
use prodplan::{parser, schedule_production, Order, ScheduleError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prodplan")]
#[command(version)]
#[command(about = "Sequence production orders so every order runs after its prerequisite", long_about = None)]
struct Cli {
    /// Log scheduling decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a production plan and export it
    Plan {
        /// Order file to read
        #[arg(short, long, default_value = "orders.json")]
        path: PathBuf,

        /// Output format: json, csv or markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write the plan to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that an order file can be scheduled
    Check {
        /// Order file to read
        #[arg(short, long, default_value = "orders.json")]
        path: PathBuf,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Plan {
            path,
            format,
            output,
        }) => run_plan(&path, format, output.as_deref()),
        Some(Commands::Check { path }) => run_check(&path),
        Some(Commands::Version) => {
            println!("prodplan v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("prodplan - Production Order Sequencer");
            println!("Run 'prodplan plan --path orders.json' to compute a plan");
            println!("Run 'prodplan --help' for more information");
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only the exported plan.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let orders = parser::parse_file(path)
        .with_context(|| format!("failed to load orders from {}", path.display()))?;
    parser::validate(&orders)
        .with_context(|| format!("invalid order file {}", path.display()))?;

    info!(orders = orders.len(), path = %path.display(), "loaded orders");
    Ok(orders)
}

fn run_plan(path: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let orders = load_orders(path)?;
    let plan = schedule_production(&orders).context("failed to compute production plan")?;
    let data = ExportData::new(&orders, &plan);

    match output {
        Some(target) => {
            let file = File::create(target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(format, &data, &mut writer)?;
            writer.flush()?;
            info!(%format, target = %target.display(), "wrote plan");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export::export(format, &data, &mut lock)?;
        }
    }

    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let orders = load_orders(path)?;

    let dangling = parser::dangling_dependencies(&orders);
    if !dangling.is_empty() {
        for (dep, order) in &dangling {
            println!("❌ order '{}' depends on unknown order '{}'", order, dep);
        }
        bail!("{} dangling dependencies in {}", dangling.len(), path.display());
    }

    match schedule_production(&orders) {
        Ok(plan) => {
            println!("✅ {} orders can be scheduled", plan.len());
            Ok(())
        }
        Err(ScheduleError::CircularDependency { cycles, .. }) => {
            for cycle in &cycles {
                println!("🔄 {}", cycle.cycle_path());
            }
            bail!("circular dependency detected in {}", path.display());
        }
        Err(err) => Err(err.into()),
    }
}
