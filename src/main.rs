//! certchain: academic certificate registry and authenticity verification.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use certchain::{
    cli::{self, Credentials, OutputOptions},
    config::{self, AppConfig, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "certchain")]
#[command(version)]
#[command(about = "Academic certificate registry and authenticity verification", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Original certificate (or command succeeded)
    1  Suspicious certificate: partial match with discrepancies
    2  Certificate not found
    3  Error occurred

EXAMPLES:
    # Verify an uploaded certificate image
    certchain verify scan.png

    # Look up a certificate by its ID, as JSON
    certchain lookup CERT-2024-001 -o json

    # Register a certificate (admin only)
    CERTCHAIN_PASSWORD=... certchain register scan.png --user admin --cert-id CERT-2024-001")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output flags shared by reporting commands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format (defaults to the config file setting)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Operator credentials for gated commands
#[derive(clap::Args)]
struct CredentialArgs {
    /// Operator username
    #[arg(long, env = "CERTCHAIN_USER")]
    user: String,

    /// Operator password
    #[arg(long, env = "CERTCHAIN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Self {
            username: args.user,
            password: args.password,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a certificate image against the registry
    Verify {
        /// Certificate image path (image/* or PDF) or a `data:<mime>;base64,` URL
        image: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Look up a certificate by its ID
    Lookup {
        /// Certificate ID as printed on the certificate
        cert_id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// OCR a certificate image and add it to the registry (admin only)
    Register {
        /// Certificate image path (image/* or PDF) or a `data:<mime>;base64,` URL
        image: String,

        /// Certificate ID to use instead of the one read from the image
        #[arg(long)]
        cert_id: Option<String>,

        #[command(flatten)]
        credentials: CredentialArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Take a registered certificate out of matching and lookup (admin only)
    Revoke {
        /// Registry record id
        id: String,

        #[command(flatten)]
        credentials: CredentialArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Return a revoked certificate to the active set (admin only)
    Reinstate {
        /// Registry record id
        id: String,

        #[command(flatten)]
        credentials: CredentialArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List registered certificates
    List {
        /// Include revoked records
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the verification audit log
    Logs {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show registry and verification statistics
    Stats {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List known operators
    Users {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Inspect or generate configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a commented example config file
    Example,
    /// Print current effective configuration (merged from defaults + file)
    Show,
}

fn output_options(
    config: &AppConfig,
    args: OutputArgs,
    no_color: bool,
    quiet: bool,
) -> OutputOptions {
    let mut options = OutputOptions::from_config(&config.output, quiet);
    if let Some(format) = args.output {
        options.format = format;
    }
    if args.output_file.is_some() {
        options.file = args.output_file;
    }
    options.no_color |= no_color;
    options
}

fn load_config(explicit: Option<&std::path::Path>) -> AppConfig {
    let (config, loaded_from) = config::load_or_default(explicit);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded configuration from {}", path.display());
    }
    for error in config.validate() {
        tracing::warn!("Invalid configuration: {error}");
    }
    config
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref());
    let (no_color, quiet) = (cli.no_color, cli.quiet);

    match cli.command {
        Commands::Verify { image, output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_verify(&config, &image, &options)
        }
        Commands::Lookup { cert_id, output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_lookup(&config, &cert_id, &options)
        }
        Commands::Register {
            image,
            cert_id,
            credentials,
            output,
        } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_register(
                &config,
                &image,
                cert_id.as_deref(),
                &credentials.into(),
                &options,
            )?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Revoke {
            id,
            credentials,
            output,
        } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_set_status(&config, &id, true, &credentials.into(), &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Reinstate {
            id,
            credentials,
            output,
        } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_set_status(&config, &id, false, &credentials.into(), &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::List { all, output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_list(&config, all, &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Logs { output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_logs(&config, &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Stats { output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_stats(&config, &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Users { output } => {
            let options = output_options(&config, output, no_color, quiet);
            cli::run_users(&config, &options)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "certchain", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Schema { output } => {
                    let schema =
                        config::generate_json_schema().context("failed to generate schema")?;
                    match output {
                        Some(path) => {
                            std::fs::write(&path, &schema)
                                .with_context(|| format!("failed to write {}", path.display()))?;
                            eprintln!("Schema written to {}", path.display());
                        }
                        None => println!("{schema}"),
                    }
                }
                ConfigAction::Example => print!("{}", config::generate_full_example_config()),
                ConfigAction::Show => {
                    let yaml =
                        serde_yaml::to_string(&config).context("failed to serialize config")?;
                    print!("{yaml}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays machine-readable
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}
