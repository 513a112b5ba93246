use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tidegauge_cli::commands::server::ServerOptions;
use tidegauge_cli::{OutputFormat, commands, parse_scenario_arg};
use tidegauge_core::analysis::DEFAULT_SMOOTHING_WINDOW;
use tidegauge_core::extract::{DEFAULT_SENTINEL, DEFAULT_WORKER_SOURCE, ServerLogConfig};
use tidegauge_core::report::ScenarioInput;

#[derive(Parser)]
#[command(name = "tidegauge")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Compare load-test runs from k6 worker logs and server logs",
    long_about = "Tidegauge reads the docker compose output of distributed k6 workers and of the \
                  service under test, and compares several runs side by side: total throughput, \
                  latency, and the server-side request rate over time.\n\n\
                  Each FILE is one scenario. Its label is the text after the last '-' in the file \
                  name (k6-workers-cmsmode.log -> cmsmode); use LABEL=FILE to choose it yourself."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare throughput and latency from k6 worker summaries
    Workers {
        /// Worker log files, optionally as LABEL=FILE
        #[arg(value_name = "FILE", required = true, value_parser = parse_scenario_arg)]
        files: Vec<ScenarioInput>,

        /// Container name prefix of the workers (<source>-worker-<n>)
        #[arg(long, env = "TIDEGAUGE_WORKER_SOURCE", default_value = DEFAULT_WORKER_SOURCE)]
        source: String,

        /// Show every worker's own figures
        #[arg(long)]
        workers: bool,
    },

    /// Compare the server-side request rate over time
    Server {
        /// Server log files, optionally as LABEL=FILE
        #[arg(value_name = "FILE", required = true, value_parser = parse_scenario_arg)]
        files: Vec<ScenarioInput>,

        /// Log message that marks one request
        #[arg(long, env = "TIDEGAUGE_SENTINEL", default_value = DEFAULT_SENTINEL)]
        sentinel: String,

        /// JSON field holding the log message
        #[arg(long, default_value = "msg")]
        message_field: String,

        /// JSON field holding the timestamp
        #[arg(long, default_value = "time")]
        time_field: String,

        /// Number of points in the trailing moving average
        #[arg(long, env = "TIDEGAUGE_SMOOTHING_WINDOW", default_value_t = DEFAULT_SMOOTHING_WINDOW)]
        window: usize,

        /// Print the per-second counts under each curve
        #[arg(long)]
        series: bool,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
        bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash: tidegauge completion --shell bash >> ~/.bashrc\n  \
        zsh:  tidegauge completion --shell zsh > \"${fpath[1]}/_tidegauge\"\n  \
        fish: tidegauge completion --shell fish > ~/.config/fish/completions/tidegauge.fish")]
    Completion {
        /// Shell to generate the script for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Workers {
            files,
            source,
            workers,
        } => commands::workers::execute(&files, &source, workers, cli.format),
        Commands::Server {
            files,
            sentinel,
            message_field,
            time_field,
            window,
            series,
        } => {
            let options = ServerOptions {
                log: ServerLogConfig::default()
                    .with_sentinel(sentinel)
                    .with_message_field(message_field)
                    .with_time_field(time_field),
                window,
            };
            commands::server::execute(&files, &options, series, cli.format)
        }
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("tidegauge=debug,tidegauge_cli=debug,tidegauge_core=debug")
    } else {
        EnvFilter::new("tidegauge=info,tidegauge_cli=info,tidegauge_core=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
