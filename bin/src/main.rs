//! tickbar CLI - Resample tick-level trades into OHLCV bars.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbar")]
#[command(about = "Resample tick-level trades into OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate ticks into bars for one interval and time range
    Bars {
        /// Directory of tick CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Bar interval (e.g., 1h30m, 15m, 1d)
        #[arg(short, long)]
        interval: String,

        /// Range start (YYYY-MM-DD HH:MM:SS)
        #[arg(short, long)]
        start: String,

        /// Range end, inclusive (YYYY-MM-DD HH:MM:SS)
        #[arg(short, long)]
        end: String,

        /// Output file path. Defaults to bars_<interval>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Keep only ticks inside a daily session (HH:MM-HH:MM)
        #[arg(long)]
        session: Option<String>,
    },

    /// Run every bar job from a JSON plan against one tick set
    Batch {
        /// Directory of tick CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// JSON plan listing the jobs to run
        #[arg(short, long)]
        plan: PathBuf,

        /// Output directory. Files named <job>.<format>
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Format for jobs that do not name one
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Maximum jobs running at once
        #[arg(long, default_value = "4")]
        parallel: usize,
    },

    /// Write the cleaned tick set
    Clean {
        /// Directory of tick CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Keep only ticks inside a daily session (HH:MM-HH:MM)
        #[arg(long)]
        session: Option<String>,
    },

    /// Show load and cleaning statistics for a data directory
    Inspect {
        /// Directory of tick CSV files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Bars {
            data_dir,
            interval,
            start,
            end,
            output,
            format,
            session,
        } => commands::bars::bars(
            &data_dir,
            &interval,
            &start,
            &end,
            output,
            format,
            session.as_deref(),
            cli.quiet,
        ),
        Commands::Batch {
            data_dir,
            plan,
            output_dir,
            format,
            parallel,
        } => commands::batch::batch(&data_dir, &plan, output_dir, format, parallel, cli.quiet).await,
        Commands::Clean {
            data_dir,
            output,
            format,
            session,
        } => commands::clean::clean(&data_dir, &output, format, session.as_deref(), cli.quiet),
        Commands::Inspect { data_dir } => commands::inspect::inspect(&data_dir, cli.quiet),
    }
}
