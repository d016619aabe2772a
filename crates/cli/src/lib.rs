use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::FarmerConfig;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use wiring::App;

mod command;
pub mod config;
mod wiring;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "farmer")]
#[command(about = "Farmer profile sync and text profile tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (overrides FARMER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for the local store and text profile (overrides FARMER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Cloud document API base URL (overrides FARMER_REMOTE_URL)
    #[arg(long, global = true)]
    remote_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the cloud profile into the local store after sign-in
    Login(UserArgs),

    /// Save a new profile locally, then create it in the cloud
    Register(RegisterArgs),

    /// Change fields of the local profile and push them to the cloud
    Edit(EditArgs),

    /// Flush the local profile to the cloud before signing out
    Logout(UserArgs),

    /// Re-pull the cloud profile, replacing the local copy
    #[command(name = "force-sync")]
    ForceSync(UserArgs),

    /// Check whether the cloud holds a profile for a user
    Exists(UserArgs),

    /// Print the local profile
    Show(ShowArgs),

    /// Delete the local copy of a profile
    #[command(name = "clear-local")]
    ClearLocal(UserArgs),

    /// Manage the free-text profile document
    Text {
        #[command(subcommand)]
        action: command::text::TextAction,
    },

    /// Query pest alerts, market prices and government schemes
    Reference {
        #[command(subcommand)]
        action: command::reference::ReferenceAction,
    },
}

#[derive(Args)]
struct UserArgs {
    /// Account identifier issued by the auth provider
    user_id: String,
}

#[derive(Args)]
struct RegisterArgs {
    user_id: String,

    /// Mobile number
    #[arg(long)]
    phone: String,

    #[command(flatten)]
    fields: command::profile::ProfileFields,
}

#[derive(Args)]
struct EditArgs {
    user_id: String,

    /// New mobile number
    #[arg(long)]
    phone: Option<String>,

    #[command(flatten)]
    fields: command::profile::ProfileFields,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ShowArgs {
    /// Look up by account identifier
    #[arg(long)]
    user_id: Option<String>,

    /// Look up by mobile number, in any common formatting
    #[arg(long)]
    phone: Option<String>,
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest and its connection pool are noisy at debug
    if !cli.verbose {
        builder.filter_module("hyper_util", log::LevelFilter::Warn);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn resolve_config(cli: &Cli) -> Result<FarmerConfig> {
    let (mut config, source) = FarmerConfig::load(cli.config.as_deref())?;
    match source {
        Some(path) => log::debug!("Using config {}", path.display()),
        None => log::debug!("No config file, using defaults"),
    }
    config.apply_process_env();
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(url) = &cli.remote_url {
        config.remote.base_url = url.clone();
    }
    Ok(config)
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let app = App::new(resolve_config(&cli)?)?;
    log::debug!("Data directory: {}", app.data_dir.display());

    match cli.command {
        Commands::Login(args) => command::profile::run_login(&app, &args.user_id).await?,
        Commands::Register(args) => {
            command::profile::run_register(&app, args.user_id, args.phone, args.fields).await?
        }
        Commands::Edit(args) => {
            command::profile::run_edit(&app, &args.user_id, args.phone, args.fields).await?
        }
        Commands::Logout(args) => command::profile::run_logout(&app, &args.user_id).await?,
        Commands::ForceSync(args) => {
            command::profile::run_force_sync(&app, &args.user_id).await?
        }
        Commands::Exists(args) => command::profile::run_exists(&app, &args.user_id).await?,
        Commands::Show(args) => {
            command::profile::run_show(&app, args.user_id.as_deref(), args.phone.as_deref())
                .await?
        }
        Commands::ClearLocal(args) => {
            command::profile::run_clear_local(&app, &args.user_id).await?
        }
        Commands::Text { action } => command::text::run(&app, action).await?,
        Commands::Reference { action } => command::reference::run(&app, action).await?,
    }

    Ok(())
}
