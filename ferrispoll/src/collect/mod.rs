//! Polling a device inventory.
//!
//! The [`Poller`] walks the inventory one device at a time: connect through
//! a [`Connector`], run a [`Collector`], write the device's file into the run
//! directory. Devices that cannot be reached are recorded in the
//! [`ErrorLog`] and still get an empty file, so the run directory always
//! lists the whole inventory.

pub mod mantools;
pub mod report;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};

pub use report::DeviceReport;

use crate::config::PollConfig;
use crate::driver::{Driver, DriverBuilder, GenericDriver};
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::inventory::DeviceCredential;
use crate::output::{self, ErrorLog, RunDirectory};
use crate::parse::StructuredParser;
use crate::transport::HostKeyVerification;

/// Error log reason for connect timeouts and refused sessions.
pub const REASON_UNREACHABLE: &str = "Device Unreachable/SSH not enabled";

/// Error log reason for rejected credentials.
pub const REASON_AUTHENTICATION: &str = "Authentication failure";

/// Error log reason for a failed connection attempt.
pub fn failure_reason(error: &Error) -> String {
    if error.is_authentication_failure() {
        REASON_AUTHENTICATION.to_string()
    } else if error.is_unreachable() {
        REASON_UNREACHABLE.to_string()
    } else {
        error.to_string()
    }
}

/// Opens a ready-to-use session to a device.
pub trait Connector {
    type Driver: Driver;

    fn connect(
        &self,
        device: &DeviceCredential,
    ) -> impl Future<Output = Result<Self::Driver>> + Send;
}

/// Connects over SSH and elevates with the device password.
#[derive(Debug, Clone)]
pub struct SshConnector {
    timeout: Duration,
    host_key_verification: HostKeyVerification,
}

impl SshConnector {
    pub fn new(config: &PollConfig) -> Self {
        Self {
            timeout: config.timeout,
            host_key_verification: config.host_key_verification,
        }
    }
}

impl Connector for SshConnector {
    type Driver = GenericDriver;

    async fn connect(&self, device: &DeviceCredential) -> Result<GenericDriver> {
        let mut driver = DriverBuilder::from_credential(device)
            .timeout(self.timeout)
            .host_key_verification(self.host_key_verification)
            .build()?;

        if let Err(e) = driver.open().await {
            if let Err(close_err) = driver.close().await {
                debug!("closing {} after failed open: {}", device.hostname, close_err);
            }
            return Err(e);
        }
        Ok(driver)
    }
}

/// What to gather from each device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collector {
    /// Concatenated raw output of the troubleshooting commands.
    Mantools,

    /// Typed, normalized JSON report.
    Report,
}

impl Collector {
    /// Directory under `legacy/` holding this collector's runs.
    pub fn directory_name(&self) -> &'static str {
        match self {
            Collector::Mantools => "mantools",
            Collector::Report => "reports",
        }
    }
}

/// What one device produced.
#[derive(Debug, Clone)]
pub enum CollectionResult {
    Text(String),
    Report(Box<DeviceReport>),
}

impl CollectionResult {
    /// Placeholder for a device that produced nothing.
    pub fn empty(collector: Collector, device: &DeviceCredential) -> Self {
        match collector {
            Collector::Mantools => CollectionResult::Text(String::new()),
            Collector::Report => CollectionResult::Report(Box::new(DeviceReport::empty(device))),
        }
    }

    /// Write `<hostname>.txt` or `<hostname>.json`.
    pub fn write(&self, run: &RunDirectory, hostname: &str) -> Result<PathBuf> {
        match self {
            CollectionResult::Text(text) => run.write_text(hostname, text),
            CollectionResult::Report(report) => run.write_json(hostname, report),
        }
    }
}

/// Per-run tally of device hostnames.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub directory: PathBuf,
    pub collected: Vec<String>,
    /// Connected, but collection or writing failed.
    pub failed: Vec<String>,
    /// Never connected; listed in the error log.
    pub unreachable: Vec<String>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.collected.len() + self.failed.len() + self.unreachable.len()
    }
}

enum Outcome {
    Collected,
    Failed,
    Unreachable,
}

/// Sequential inventory poller.
pub struct Poller<C, P> {
    connector: C,
    parser: P,
    config: PollConfig,
    error_log: ErrorLog,
}

impl<C: Connector, P: StructuredParser> Poller<C, P> {
    pub fn new(connector: C, parser: P, config: PollConfig) -> Self {
        let error_log = ErrorLog::new(config.error_log.clone());
        Self {
            connector,
            parser,
            config,
            error_log,
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `devices` into a fresh timestamped run directory.
    pub async fn run(&self, collector: Collector, devices: &[DeviceCredential]) -> Result<RunSummary> {
        let run = RunDirectory::create(
            self.config.base_dir.as_deref(),
            collector.directory_name(),
            &output::timestamp(),
        )?;
        self.run_in(collector, &run, devices).await
    }

    /// Poll `devices` into an existing run directory.
    pub async fn run_in(
        &self,
        collector: Collector,
        run: &RunDirectory,
        devices: &[DeviceCredential],
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            directory: run.path().to_path_buf(),
            ..RunSummary::default()
        };

        for device in devices {
            let hostname = device.hostname.clone();

            let (result, mut outcome) = match self.connect(device).await {
                None => (None, Outcome::Unreachable),
                Some(mut driver) => {
                    let result = self.collect(collector, &mut driver, device).await;
                    if let Err(e) = driver.close().await {
                        debug!("closing {}: {}", hostname, e);
                    }
                    match result {
                        Ok(result) => (Some(result), Outcome::Collected),
                        Err(e) => {
                            warn!("{}: collection failed: {}", hostname, e);
                            (None, Outcome::Failed)
                        }
                    }
                }
            };

            let result = result.unwrap_or_else(|| CollectionResult::empty(collector, device));
            match result.write(run, &hostname) {
                Ok(path) => debug!("wrote {}", path.display()),
                Err(e) => {
                    warn!("{}: {}", hostname, e);
                    outcome = Outcome::Failed;
                }
            }

            match outcome {
                Outcome::Collected => summary.collected.push(hostname),
                Outcome::Failed => summary.failed.push(hostname),
                Outcome::Unreachable => summary.unreachable.push(hostname),
            }
        }

        info!(
            "run complete: {} collected, {} failed, {} unreachable",
            summary.collected.len(),
            summary.failed.len(),
            summary.unreachable.len()
        );
        Ok(summary)
    }

    /// Connect, or record the device in the error log.
    async fn connect(&self, device: &DeviceCredential) -> Option<C::Driver> {
        match self.connector.connect(device).await {
            Ok(driver) => {
                info!("Connected to {} ({})", device.hostname, device.device_type);
                Some(driver)
            }
            Err(e) => {
                warn!("failed to connect to {} ({}): {}", device.hostname, device.ip, e);
                let reason = failure_reason(&e);
                if let Err(log_err) = self.error_log.record(&device.hostname, &device.ip, &reason) {
                    warn!("could not update {}: {}", self.error_log.path().display(), log_err);
                }
                None
            }
        }
    }

    async fn collect(
        &self,
        collector: Collector,
        driver: &mut C::Driver,
        device: &DeviceCredential,
    ) -> Result<CollectionResult> {
        let platform = device.platform();
        match collector {
            Collector::Mantools => Ok(CollectionResult::Text(
                mantools::collect(driver, platform).await?,
            )),
            Collector::Report => {
                let mut extractor = Extractor::new(driver, &self.parser, platform);
                let report = report::collect(&mut extractor, device).await?;
                Ok(CollectionResult::Report(Box::new(report)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::error::{DriverError, TransportError};
    use crate::extract::testing::CannedParser;

    /// Serves fake sessions by hostname; unknown hosts time out.
    #[derive(Default)]
    struct FakeConnector {
        drivers: HashMap<String, FakeDriver>,
        auth_failures: Vec<String>,
    }

    impl Connector for FakeConnector {
        type Driver = FakeDriver;

        async fn connect(&self, device: &DeviceCredential) -> Result<FakeDriver> {
            if self.auth_failures.contains(&device.hostname) {
                return Err(TransportError::AuthenticationFailed {
                    user: device.username.clone(),
                }
                .into());
            }
            let mut driver = self
                .drivers
                .get(&device.hostname)
                .cloned()
                .ok_or(TransportError::Timeout(Duration::from_secs(30)))?;
            driver.open().await?;
            Ok(driver)
        }
    }

    fn device(hostname: &str, ip: &str, device_type: &str) -> DeviceCredential {
        DeviceCredential::new(hostname, ip, device_type, "admin", "pw")
    }

    fn poller(
        connector: FakeConnector,
        dir: &tempfile::TempDir,
    ) -> Poller<FakeConnector, CannedParser> {
        let config = PollConfig::new()
            .base_dir(dir.path())
            .error_log(dir.path().join("connect_error.csv"));
        Poller::new(connector, CannedParser::new(), config)
    }

    #[test]
    fn test_failure_reasons() {
        let auth: Error = TransportError::AuthenticationFailed {
            user: "admin".to_string(),
        }
        .into();
        assert_eq!(failure_reason(&auth), "Authentication failure");

        let timeout: Error = TransportError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(failure_reason(&timeout), "Device Unreachable/SSH not enabled");

        let enable: Error = DriverError::PrivilegeAcquisitionFailed {
            target: "privilege_exec".to_string(),
        }
        .into();
        assert_eq!(failure_reason(&enable), enable.to_string());
    }

    #[tokio::test]
    async fn test_unreachable_device_logged_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut connector = FakeConnector::default();
        connector.drivers.insert(
            "sw2".to_string(),
            FakeDriver::new().with_output("show inv", "NAME: \"Chassis\""),
        );
        let poller = poller(connector, &dir);
        let devices = vec![
            device("sw1", "10.0.0.1", "cisco_ios"),
            device("sw2", "10.0.0.2", "cisco_ios"),
        ];

        let summary = poller.run(Collector::Mantools, &devices).await.unwrap();
        assert_eq!(summary.unreachable, vec!["sw1"]);
        assert_eq!(summary.collected, vec!["sw2"]);

        let log = fs::read_to_string(dir.path().join("connect_error.csv")).unwrap();
        assert_eq!(log, "sw1;10.0.0.1;Device Unreachable/SSH not enabled\n");

        assert!(summary.directory.starts_with(dir.path().join("legacy").join("mantools")));
        assert_eq!(fs::read_to_string(summary.directory.join("sw1.txt")).unwrap(), "");
        let sw2 = fs::read_to_string(summary.directory.join("sw2.txt")).unwrap();
        assert!(sw2.starts_with("NAME: \"Chassis\"\n"));
    }

    #[tokio::test]
    async fn test_authentication_failure_reason() {
        let dir = tempfile::tempdir().unwrap();
        let connector = FakeConnector {
            auth_failures: vec!["nx1".to_string()],
            ..FakeConnector::default()
        };
        let poller = poller(connector, &dir);

        let summary = poller
            .run(Collector::Report, &[device("nx1", "10.0.0.9", "cisco_nxos")])
            .await
            .unwrap();
        assert_eq!(summary.total(), 1);

        let log = fs::read_to_string(dir.path().join("connect_error.csv")).unwrap();
        assert_eq!(log, "nx1;10.0.0.9;Authentication failure\n");

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(summary.directory.join("nx1.json")).unwrap())
                .unwrap();
        assert_eq!(report["hostname"], "nx1");
        assert_eq!(report["platform"], "cisco_nxos");
    }

    #[tokio::test]
    async fn test_collection_failure_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut connector = FakeConnector::default();
        connector
            .drivers
            .insert("sw1".to_string(), FakeDriver::new().with_broken("show interface trunk"));
        let poller = poller(connector, &dir);
        let run = RunDirectory::create(Some(dir.path()), "mantools", "2026-10-19_14-05").unwrap();

        let summary = poller
            .run_in(Collector::Mantools, &run, &[device("sw1", "10.0.0.1", "cisco_ios")])
            .await
            .unwrap();
        assert_eq!(summary.failed, vec!["sw1"]);
        assert_eq!(fs::read_to_string(run.path().join("sw1.txt")).unwrap(), "");
        assert!(!dir.path().join("connect_error.csv").exists());
    }

    #[tokio::test]
    async fn test_report_stops_after_session_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let mut connector = FakeConnector::default();
        connector
            .drivers
            .insert("sw1".to_string(), FakeDriver::new().with_broken("show proc cpu"));
        let poller = poller(connector, &dir);

        let summary = poller
            .run(Collector::Report, &[device("sw1", "10.0.0.1", "cisco_ios")])
            .await
            .unwrap();
        assert_eq!(summary.failed, vec!["sw1"]);
        assert!(summary.collected.is_empty());

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(summary.directory.join("sw1.json")).unwrap())
                .unwrap();
        assert_eq!(report["hostname"], "sw1");
        assert_eq!(report["version"]["version"], "");
        assert!(report["interfaces"].as_array().unwrap().is_empty());
    }
}
