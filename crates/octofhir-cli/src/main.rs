mod auth;
mod cli;
mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use client::Session;
use output::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    // Prefer RUST_LOG from env, otherwise use the flag-derived level.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn output_format(cli: &Cli) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    match config::load_profile(&cli.profile)?.format.as_deref() {
        Some("table") => Ok(OutputFormat::Table),
        Some("json") | None => Ok(OutputFormat::Json),
        Some(other) => anyhow::bail!("Unknown output format in config: {other}. Valid: json, table"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let profile = &cli.profile;
    let format = output_format(&cli)?;

    match &cli.command {
        Commands::Login(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            commands::auth::login(&server, args, profile)?;
        }
        Commands::Logout => {
            commands::auth::logout(profile)?;
        }
        Commands::Whoami => {
            commands::auth::whoami(profile)?;
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    cfg.format.as_deref().unwrap_or("json")
                );
                println!(
                    "{}: {}",
                    "POST encoding".cyan(),
                    cfg.post_encoding.unwrap_or_default()
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                config::set_key(&mut cfg, &set_args.key, &set_args.value)?;
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
        Commands::Metadata => {
            let session = Session::open(&cli.server, profile)?;
            commands::server::metadata(&session, format).await?;
        }
        Commands::Get(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::crud::get(&session, &args.reference, &args.params, format).await?;
        }
        Commands::FetchUrl(args) => {
            // The URL is absolute, so a configured server is not required.
            let server = cli.server.clone().or_else(|| Some(args.url.clone()));
            let session = Session::open(&server, profile)?;
            commands::crud::fetch_url(&session, &args.url, format).await?;
        }
        Commands::Search(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::search::search(&session, args, format).await?;
        }
        Commands::Create(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::crud::create(&session, &args.file, &args.url, format).await?;
        }
        Commands::Update(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::crud::update(&session, &args.file, format).await?;
        }
        Commands::Upsert(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::crud::upsert(&session, &args.file, &args.params, format).await?;
        }
        Commands::Delete(args) => {
            let session = Session::open(&cli.server, profile)?;
            commands::crud::delete(&session, &args.reference).await?;
        }
    }

    Ok(())
}
