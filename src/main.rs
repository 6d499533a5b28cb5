use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod log;
mod model;
mod render;
mod scan;

use config::{Config, DEFAULT_INPUT_DIR, ViewKind};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "bayes-results")]
#[command(about = "Aggregate bayes benchmark logs into speed-up and phase data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a directory of benchmark logs and write the aggregated views as JSON.
    Report {
        /// Directory holding `<variations>-t<n>-i<n>.txt` logs.
        #[arg(default_value = DEFAULT_INPUT_DIR)]
        dir: String,

        #[arg(long, value_enum, default_value_t = ViewKind::Speedup)]
        view: ViewKind,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bayes_results=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report { dir, view, out } => {
            // 1) Parse every log in the snapshot.
            let config = Config::new(dir);
            let batch = scan::load_runs(&config)?;

            // 2) Aggregate into the requested views.
            let data = render::build_report(&batch, view);

            // 3) Hand off to the chart renderer.
            let json = render::render_json_report(&data)?;
            match &out {
                Some(path) => {
                    std::fs::write(path, json).with_context(|| format!("write report {}", path))?;
                    tracing::info!(path = %path, "wrote report");
                }
                None => print!("{}", json),
            }

            if !data.failures.is_empty() {
                bail!("some views could not be computed: {}", data.failures.join("; "));
            }
        }
    }

    Ok(())
}
