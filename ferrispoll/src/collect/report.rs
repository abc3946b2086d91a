//! Typed per-device report.

use log::warn;
use serde::Serialize;

use crate::driver::Driver;
use crate::error::Result;
use crate::extract::{
    ArpEntry, Extractor, InterfaceRecord, MacEntry, ResourceUsage, RouteEntry, VersionInfo,
};
use crate::inventory::DeviceCredential;
use crate::parse::StructuredParser;
use crate::platform::Platform;

/// Everything the typed collectors extract from one device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceReport {
    pub hostname: String,
    pub ip: String,
    pub platform: Platform,
    pub version: VersionInfo,
    pub resources: ResourceUsage,
    pub interfaces: Vec<InterfaceRecord>,
    pub mac_table: Vec<MacEntry>,
    pub routes: Vec<RouteEntry>,
    pub arp: Vec<ArpEntry>,
    pub logs: Vec<String>,
}

impl DeviceReport {
    /// Report with identity only, for devices that could not be polled.
    pub fn empty(device: &DeviceCredential) -> Self {
        Self {
            hostname: device.hostname.clone(),
            ip: device.ip.clone(),
            platform: device.platform(),
            version: VersionInfo::default(),
            resources: ResourceUsage::default(),
            interfaces: vec![],
            mac_table: vec![],
            routes: vec![],
            arp: vec![],
            logs: vec![],
        }
    }
}

/// Keep a section's value, or log a command-level failure and fall back to
/// the empty value. Session failures end the report.
fn section<T: Default>(result: Result<T>, what: &str, hostname: &str) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_session_failure() => Err(e),
        Err(e) => {
            warn!("{}: {} extraction failed: {}", hostname, what, e);
            Ok(T::default())
        }
    }
}

/// Run every typed collector.
///
/// A rejected or unparsable command only empties its own section. Once the
/// session times out or drops, later output can no longer be matched to its
/// command, so the remaining sections are not run and the error is returned.
pub async fn collect<D: Driver, P: StructuredParser>(
    extractor: &mut Extractor<'_, D, P>,
    device: &DeviceCredential,
) -> Result<DeviceReport> {
    let host = device.hostname.as_str();
    let mut report = DeviceReport::empty(device);

    report.version = section(extractor.version().await, "version", host)?;
    report.resources = section(extractor.resources().await, "resources", host)?;
    report.interfaces = section(extractor.interfaces().await, "interface", host)?;
    report.mac_table = section(extractor.mac_table().await, "MAC table", host)?;
    report.routes = section(extractor.routes().await, "route", host)?;
    report.arp = section(extractor.arp().await, "ARP", host)?;
    report.logs = section(extractor.logs().await, "log", host)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::extract::LOG_COMMAND;
    use crate::extract::testing::CannedParser;
    use crate::parse::Record;

    #[tokio::test]
    async fn test_failed_sections_are_empty() {
        let device = DeviceCredential::new("nx1", "10.0.0.2", "cisco_nxos", "admin", "pw");
        let mut driver = FakeDriver::new()
            .with_output(
                "show system resources",
                "CPU states  :   2.00% user,   1.00% kernel,   97.00% idle",
            )
            .with_output("show logg | in %SYS-5-", "%SYS-5-RESTART: System restarted")
            .with_rejection("show mac address-table", "% Invalid command");
        driver.open().await.unwrap();

        let parser = CannedParser::new()
            .with("show version", vec![Record::new().with("hostname", "nx1").with("version", "9.3(8)")])
            .with(
                "show interface",
                vec![Record::new().with("interface", "Ethernet1/1").with("admin_state", "up")],
            );
        let mut extractor = Extractor::new(&mut driver, &parser, device.platform());

        let report = collect(&mut extractor, &device).await.unwrap();
        assert_eq!(report.platform, Platform::CiscoNxos);
        assert_eq!(report.version.version, "9.3(8)");
        assert_eq!(report.resources.cpu_utilization, "3.00%");
        assert_eq!(report.resources.memory_utilization, "0%");
        assert_eq!(report.interfaces[0].protocol_status, "up");
        assert!(report.mac_table.is_empty());
        // No canned records for `show ip route vrf all`.
        assert!(report.routes.is_empty());
        assert_eq!(report.logs.len(), 2);
    }

    #[tokio::test]
    async fn test_timed_out_command_ends_report() {
        let device = DeviceCredential::new("nx1", "10.0.0.2", "cisco_nxos", "admin", "pw");
        let mut driver = FakeDriver::new().with_broken("show ip route vrf all");
        driver.open().await.unwrap();

        let parser = CannedParser::new();
        let mut extractor = Extractor::new(&mut driver, &parser, device.platform());

        let err = collect(&mut extractor, &device).await.unwrap_err();
        assert!(err.is_session_failure());
        assert_eq!(driver.sent.last().map(String::as_str), Some("show ip route vrf all"));
        assert!(!driver.sent.iter().any(|c| c == "show ip arp vrf all"));
        assert!(!driver.sent.iter().any(|c| c == LOG_COMMAND));
    }

    #[test]
    fn test_empty_report_serializes_identity() {
        let device = DeviceCredential::new("sw1", "10.0.0.1", "cisco_ios", "admin", "pw");
        let json = serde_json::to_value(DeviceReport::empty(&device)).unwrap();
        assert_eq!(json["hostname"], "sw1");
        assert_eq!(json["platform"], "cisco_ios");
        assert_eq!(json["resources"]["cpu_utilization"], "0%");
        assert!(json["routes"].as_array().unwrap().is_empty());
    }
}
