//! hazmix - Command-line interface for chemical compatibility analysis.

use clap::Parser;
use hazmix_cli::commands;
use hazmix_cli::config::OutputFormat;
use hazmix_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let error_format = cli.format.map(Into::into).unwrap_or(OutputFormat::Table);
    if let Err(e) = run(cli).await {
        if error_format == OutputFormat::Json {
            println!("{}", Formatter::new(OutputFormat::Json, false).format_error(&e));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `HAZMIX_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("HAZMIX_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> hazmix_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Command-line database path wins over the config file
    if let Some(database) = cli.database {
        config.database.path = Some(database);
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await,
        Command::Groups => commands::execute_groups(&config, &formatter).await,
        Command::Show(args) => commands::execute_show(args, &config, &formatter).await,
        Command::Stats => commands::execute_stats(&config, &formatter).await,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await
        }
    }
}

