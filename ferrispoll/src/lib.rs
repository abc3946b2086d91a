//! # Ferrispoll
//!
//! Sequential SSH poller for Cisco IOS and NX-OS devices.
//!
//! Ferrispoll logs into each device of an inventory, elevates with `enable`,
//! runs a fixed set of `show` commands and writes one result file per
//! device into a timestamped run directory.
//!
//! ## Features
//!
//! - Async SSH sessions via russh with scrapli-style tail prompt matching
//! - Privilege level management with graph-based navigation
//! - TextFSM templates keyed by `(platform, command)` and regex rules keyed
//!   by `(platform, metric)`
//! - One schema for interfaces, MAC table, routes and ARP across IOS and NX-OS
//! - `hostname;ip;reason` log of unreachable devices
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferrispoll::{Collector, PollConfig, Poller, SshConnector, TextFsmParser, inventory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ferrispoll::Error> {
//!     let devices = inventory::load("devices.json")?;
//!
//!     let config = PollConfig::new().base_dir("/srv/acme");
//!     let poller = Poller::new(SshConnector::new(&config), TextFsmParser::new(), config);
//!
//!     let summary = poller.run(Collector::Mantools, &devices).await?;
//!     println!("{} devices written to {}", summary.total(), summary.directory.display());
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod collect;
pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod output;
pub mod parse;
pub mod platform;
pub mod transport;

// Re-export main types for convenience
pub use collect::{
    CollectionResult, Collector, Connector, DeviceReport, Poller, RunSummary, SshConnector,
};
pub use config::PollConfig;
pub use driver::{Driver, DriverBuilder, GenericDriver, Response};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use inventory::DeviceCredential;
pub use output::{ErrorLog, RunDirectory};
pub use parse::{FieldValue, Record, StructuredParser, TextFsmParser};
pub use platform::{Platform, PlatformDefinition, PrivilegeLevel};
pub use transport::{AuthMethod, HostKeyVerification, SshConfig};
