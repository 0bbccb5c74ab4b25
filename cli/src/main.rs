mod commands;
mod host;
mod util;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::link::LinkArgs;
use crate::commands::settings::SetArgs;

#[derive(Parser)]
#[command(
    name = "obslink",
    version,
    about = "Observability links for tool invocations: build metrics/logs dashboard URLs and share their config"
)]
struct Cli {
    /// Settings file holding the base URLs and query templates
    #[arg(long, global = true, env = "OBSLINK_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, env = "OBSLINK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current base URLs and query templates
    Show,
    /// Edit base URLs or query templates (omitted flags keep their value)
    Set(SetArgs),
    /// Clear base URLs and restore the default query templates
    Reset,
    /// Build metrics/logs links for a tool invocation
    Link(LinkArgs),
    /// Check whether a base URL can be opened (http/https only)
    CheckUrl {
        /// Candidate base URL
        url: String,
    },
    /// Export the config as toolsObsConf.json
    Export {
        /// Directory to write toolsObsConf.json into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Import a previously exported config (use '-' for stdin)
    Import {
        /// Path to the exported JSON document
        file: String,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "obslink=warn,obslink_core=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let settings_path = cli.settings.unwrap_or_else(util::default_settings_path);
    tracing::debug!(path = %settings_path.display(), "using settings file");

    let code = match cli.command {
        Commands::Show => commands::settings::show(&settings_path),
        Commands::Set(args) => commands::settings::set(&settings_path, args),
        Commands::Reset => commands::settings::reset(&settings_path),
        Commands::Link(args) => commands::link::run(&settings_path, args),
        Commands::CheckUrl { url } => commands::link::check_url(&url),
        Commands::Export { out_dir } => commands::config::export(&settings_path, &out_dir),
        Commands::Import { file } => commands::config::import(&settings_path, &file),
    };

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn link_args_parse() {
        let cli = Cli::try_parse_from([
            "obslink",
            "link",
            "--tool-type",
            "http_get",
            "--tool-name",
            "simple",
            "--key",
            "timeout_ms",
            "--target",
            "logs",
        ])
        .unwrap();
        match cli.command {
            Commands::Link(args) => {
                assert_eq!(args.tool_type, "http_get");
                assert_eq!(args.key, "timeout_ms");
                assert_eq!(args.target, commands::link::TargetArg::Logs);
                assert!(!args.open);
            }
            _ => panic!("expected link"),
        }
    }

    #[test]
    fn set_accepts_empty_base() {
        let cli = Cli::try_parse_from(["obslink", "set", "--prom-base", ""]).unwrap();
        match cli.command {
            Commands::Set(args) => assert_eq!(args.prom_base.as_deref(), Some("")),
            _ => panic!("expected set"),
        }
    }
}
