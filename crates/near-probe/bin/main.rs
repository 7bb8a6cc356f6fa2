use clap::{Parser, Subcommand};
use near_probe::{Probe, ProbeArgs, ProbeConfig, ProbeServer};
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "near-probe")]
#[command(about = "NEAR validator status probe with webhook alerts", long_about = None)]
struct Cli {
    #[command(flatten)]
    probe: ProbeArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every check once and print the invocation result
    Run,

    /// Run every check on a fixed interval until interrupted
    Watch {
        /// Seconds between runs
        #[arg(long, default_value_t = 300)]
        interval_secs: u64,
    },

    /// Serve an HTTP trigger for the probe
    Serve {
        /// Server bind address
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ProbeConfig::from_args(cli.probe)?;

    tracing::info!(
        "Probing {} on {} ({}) as {} with key {}",
        config.pool_id,
        config.node_url,
        config.network,
        config.signer_id,
        config.key_pair.public_key(),
    );

    let probe = Probe::from_config(&config);

    match cli.command {
        Command::Run => {
            let invocation = probe.invoke().await;
            println!("{}", invocation.body_json());
            if invocation.status_code != 200 {
                process::exit(1);
            }
        }
        Command::Watch { interval_secs } => {
            if interval_secs == 0 {
                return Err(eyre::eyre!("--interval-secs must be greater than zero"));
            }

            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let invocation = probe.invoke().await;
                        if invocation.status_code != 200 {
                            tracing::warn!("Probe run failed: {}", invocation.body.message);
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutting down");
                        break;
                    }
                }
            }
        }
        Command::Serve { addr } => {
            ProbeServer::new(probe).serve(&addr).await?;
        }
    }

    Ok(())
}
