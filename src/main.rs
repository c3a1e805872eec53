use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitegrab::app::AppContext;
use sitegrab::cli::{commands, Cli, Commands};
use sitegrab::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so page markup on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::ConfigPath = cli.command {
        match cli.config {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", Config::default_config_path()?.display()),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Scan {
            urls,
            output,
            raw,
            open,
            workers,
        } => {
            let ok = if urls.len() == 1 {
                commands::scan_one(&ctx, &urls[0], output.as_deref(), raw, open).await?
            } else {
                commands::scan_many(&ctx, urls, output.as_deref(), raw, open, workers).await?
            };
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Normalize {
            path,
            source,
            output,
        } => {
            commands::normalize_file(&ctx, &path, &source, output.as_deref())?;
        }
        Commands::Relays => {
            commands::list_relays(&ctx);
        }
        Commands::ConfigPath => {}
    }

    Ok(())
}
