//! Command-line entry point.
//!
//! ```text
//! ferrispoll mantools -i devices.json -b /srv/acme
//! RUST_LOG=debug ferrispoll report -i devices.json --timeout 60
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;

use ferrispoll::{
    Collector, HostKeyVerification, PollConfig, Poller, SshConnector, TextFsmParser, inventory,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dump the raw troubleshooting command set to `<hostname>.txt`.
    Mantools(RunArgs),

    /// Write normalized version, resource, interface, MAC, route, ARP and
    /// log data to `<hostname>.json`.
    Report(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// JSON inventory: an array of {hostname, ip, device_type, username, password}.
    #[arg(short, long)]
    inventory: PathBuf,

    /// Root of the result tree (default: ./legacy/results).
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Connection error log.
    #[arg(long, default_value = "connect_error.csv")]
    error_log: PathBuf,

    /// Connection and per-command timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Host key checking.
    #[arg(long, value_enum, default_value_t = HostKeyMode::Disabled)]
    host_key: HostKeyMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum HostKeyMode {
    Strict,
    AcceptNew,
    Disabled,
}

impl From<HostKeyMode> for HostKeyVerification {
    fn from(mode: HostKeyMode) -> Self {
        match mode {
            HostKeyMode::Strict => HostKeyVerification::Strict,
            HostKeyMode::AcceptNew => HostKeyVerification::AcceptNew,
            HostKeyMode::Disabled => HostKeyVerification::Disabled,
        }
    }
}

impl RunArgs {
    fn config(&self) -> PollConfig {
        let mut config = PollConfig::new()
            .error_log(self.error_log.clone())
            .timeout(Duration::from_secs(self.timeout))
            .host_key_verification(self.host_key.into());
        if let Some(base_dir) = &self.base_dir {
            config = config.base_dir(base_dir.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), ferrispoll::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let (collector, args) = match &cli.command {
        Command::Mantools(args) => (Collector::Mantools, args),
        Command::Report(args) => (Collector::Report, args),
    };

    let devices = inventory::load(&args.inventory)?;
    info!("loaded {} devices from {}", devices.len(), args.inventory.display());

    let config = args.config();
    let poller = Poller::new(SshConnector::new(&config), TextFsmParser::new(), config);
    let summary = poller.run(collector, &devices).await?;

    info!("results in {}", summary.directory.display());
    Ok(())
}
