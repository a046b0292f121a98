use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tablechart::assistant::{self, DeepSeekGateway, ModelGateway};
use tablechart::config::GatewayConfig;
use tablechart::{build_chart_option, load_records, load_records_from_reader, ChartType, RecordSet};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "tablechart")]
#[command(about = "Turn spreadsheet and CSV data into chart option documents", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the option document for one chart type
    Chart {
        /// Input file (.csv, .xlsx, .xls, .json); reads CSV or JSON from stdin when omitted
        file: Option<PathBuf>,

        /// Chart type tag (line, bar, pie, scatter, radar, heatmap, funnel, gauge); unknown tags render as bar
        #[arg(short = 't', long = "type", default_value = "bar")]
        chart_type: String,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Clean the data and recommend chart types through the model API
    Analyze {
        file: PathBuf,

        /// Skip the model API and use the built-in fallbacks
        #[arg(long)]
        offline: bool,

        /// API key for the model gateway
        #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// List the supported chart types
    Types,
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<RecordSet> {
    match file {
        Some(path) => load_records(path),
        None => load_records_from_reader(io::stdin().lock()).context("Failed to read data from stdin"),
    }
}

fn write_output(text: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", text).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chart {
            file,
            chart_type,
            title,
            compact,
        } => {
            let records = read_input(file.as_deref())?;
            let option = build_chart_option(&records, &chart_type, title.as_deref());
            let text = if compact {
                serde_json::to_string(&option)?
            } else {
                option.to_json_pretty()?
            };
            write_output(&text)
        }
        Command::Analyze {
            file,
            offline,
            api_key,
        } => {
            let records = load_records(&file)?;

            let mut config = GatewayConfig::from_env();
            if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
                config.api_key = Some(key);
            }

            let gateway = if offline {
                info!("offline mode, using fallback cleaning and recommendations");
                None
            } else if !config.has_api_key() {
                warn!("API key not configured; AI features unavailable");
                None
            } else {
                match DeepSeekGateway::new(config) {
                    Ok(g) => Some(g),
                    Err(e) => {
                        warn!("{}; AI features unavailable", e);
                        None
                    }
                }
            };

            let report = assistant::analyze_upload(
                gateway.as_ref().map(|g| g as &dyn ModelGateway),
                &records,
            );
            write_output(&serde_json::to_string_pretty(&report)?)
        }
        Command::Types => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for t in ChartType::ALL {
                writeln!(handle, "{}", t)?;
            }
            Ok(())
        }
    }
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
