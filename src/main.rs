use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaultgrab::config::Paths;
use vaultgrab::{App, Config, APP_VERSION};

#[derive(Parser)]
#[command(name = "vaultgrab")]
#[command(
    author,
    version = APP_VERSION,
    about = "Browse and download ROMs from the Vimm's Lair vault",
    after_help = "Exit status: 0 after a successful download, 1 on any failure."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Root ROM directory (platform folders are created beneath it)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Timeout in seconds for catalog and detail page requests
    #[arg(long)]
    timeout: Option<u64>,
}

fn setup_logging(verbosity: u8, paths: &Paths) {
    let filter = match verbosity {
        0 => "vaultgrab=info",
        1 => "vaultgrab=debug",
        _ => "vaultgrab=trace",
    };

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    // Log to a file; stdout belongs to the prompts and the browse screen
    let file = paths.ensure_dirs().and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
    });

    match file {
        Ok(file) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Arc::new(file)),
            )
            .init(),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::default();
    setup_logging(cli.verbose, &config.paths);

    if let Some(output_dir) = cli.output_dir {
        config.output_root = output_dir;
    }
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            anyhow::bail!("--timeout must be at least 1 second");
        }
        config.page_timeout = Duration::from_secs(secs);
    }

    tracing::info!(
        "vaultgrab {} starting, output root {}",
        APP_VERSION,
        config.output_root.display()
    );

    let app = App::new(config)?;
    let downloaded = app.run().await?;

    tracing::info!("Finished: {}", downloaded.path.display());
    Ok(())
}
