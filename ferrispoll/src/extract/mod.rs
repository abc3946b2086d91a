//! Field extraction from diagnostic commands.
//!
//! An [`Extractor`] pairs an open [`Driver`] with a [`StructuredParser`]
//! and the device's [`Platform`]. Each collector lives in its own module
//! and returns a typed value normalized to one schema for both IOS and
//! NX-OS:
//!
//! | collector | source |
//! |---|---|
//! | [`Extractor::version`] | `show version` template |
//! | [`Extractor::resources`] | regex rules from [`rules`] |
//! | [`Extractor::interfaces`] | `show interface` template |
//! | [`Extractor::mac_table`] | `show mac address-table` template |
//! | [`Extractor::routes`] | `show ip route` per VRF |
//! | [`Extractor::arp`] | `show ip arp` per VRF |
//! | [`Extractor::logs`] | `%SYS-5-` log lines |

mod arp;
mod interfaces;
mod logging;
mod mac_table;
mod resources;
mod routes;
pub mod rules;
mod version;
mod vrf;

pub use arp::{ArpEntry, normalize_arp};
pub use interfaces::{InterfaceRecord, normalize_interfaces};
pub use logging::{LOG_COMMAND, match_log_lines};
pub use mac_table::{MacEntry, normalize_mac_table};
pub use resources::ResourceUsage;
pub use routes::{RouteEntry, normalize_routes};
pub use rules::{Metric, MetricRule};
pub use version::VersionInfo;
pub use vrf::vrf_names;

use log::debug;

use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};
use crate::platform::Platform;

/// Runs commands on one device and extracts typed values.
pub struct Extractor<'a, D, P> {
    driver: &'a mut D,
    parser: &'a P,
    platform: Platform,
}

impl<'a, D: Driver, P: StructuredParser> Extractor<'a, D, P> {
    pub fn new(driver: &'a mut D, parser: &'a P, platform: Platform) -> Self {
        Self {
            driver,
            parser,
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Run `command`, failing if the device rejects it.
    pub async fn run(&mut self, command: &str) -> Result<String> {
        debug!("running '{}'", command);
        self.driver.send_command(command).await?.into_result()
    }

    /// Run `command` and parse it with the template for this platform.
    pub async fn run_parsed(&mut self, command: &str) -> Result<Vec<Record>> {
        let output = self.run(command).await?;
        self.parser.parse(self.platform, command, &output)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Parser double keyed by command.

    use std::collections::HashMap;

    use crate::error::{ParseError, Result};
    use crate::parse::{Record, StructuredParser};
    use crate::platform::Platform;

    #[derive(Debug, Default)]
    pub struct CannedParser {
        records: HashMap<String, Vec<Record>>,
    }

    impl CannedParser {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, command: &str, records: Vec<Record>) -> Self {
            self.records.insert(command.to_string(), records);
            self
        }
    }

    impl StructuredParser for CannedParser {
        fn parse(&self, platform: Platform, command: &str, _output: &str) -> Result<Vec<Record>> {
            self.records.get(command).cloned().ok_or_else(|| {
                ParseError::NoTemplate {
                    platform: platform.to_string(),
                    command: command.to_string(),
                }
                .into()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CannedParser;
    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::parse::TextFsmParser;

    #[tokio::test]
    async fn test_run_rejected_command_is_error() {
        let mut driver = FakeDriver::new().with_rejection("show vrf", "% Invalid input detected");
        driver.open().await.unwrap();
        let parser = CannedParser::new();
        let mut extractor = Extractor::new(&mut driver, &parser, Platform::CiscoIos);

        let err = extractor.run("show vrf").await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Driver(crate::error::DriverError::CommandFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_parsed_uses_platform_template() {
        let mut driver = FakeDriver::new().with_output("show version", "irrelevant");
        driver.open().await.unwrap();
        let parser = CannedParser::new().with(
            "show version",
            vec![Record::new().with("hostname", "core1")],
        );
        let mut extractor = Extractor::new(&mut driver, &parser, Platform::CiscoNxos);

        let records = extractor.run_parsed("show version").await.unwrap();
        assert_eq!(records[0].text("hostname"), "core1");
    }

    #[tokio::test]
    async fn test_ios_routes_walk_discovered_vrfs() {
        let mut driver = FakeDriver::new()
            .with_output(
                "show ip route",
                "\
Gateway of last resort is not set

C        10.1.1.0/24 is directly connected, GigabitEthernet0/1
",
            )
            .with_output(
                "show vrf",
                "\
  Name                             Default RD            Protocols   Interfaces
  CUST-A                           65000:100             ipv4        Gi0/2
  Mgmt-intf                        <not set>             ipv4        Gi0/0
",
            )
            .with_output(
                "show ip route vrf CUST-A",
                "\
Routing Table: CUST-A
Gateway of last resort is not set

S        172.16.0.0/16 [1/0] via 192.0.2.1
",
            )
            .with_rejection("show ip route vrf Mgmt-intf", "% Invalid input detected");
        driver.open().await.unwrap();
        let parser = TextFsmParser::new();
        let mut extractor = Extractor::new(&mut driver, &parser, Platform::CiscoIos);

        let routes = extractor.routes().await.unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].vrf, "default");
        assert_eq!(routes[0].nexthop_if, "GigabitEthernet0/1");
        assert_eq!(routes[1].vrf, "CUST-A");
        assert_eq!(routes[1].network, "172.16.0.0");
        assert_eq!(routes[1].nexthop_ip, "192.0.2.1");
        assert_eq!(
            driver.sent,
            vec![
                "show ip route",
                "show vrf",
                "show ip route vrf CUST-A",
                "show ip route vrf Mgmt-intf"
            ]
        );
    }

    #[tokio::test]
    async fn test_nxos_interfaces_take_admin_state_as_protocol() {
        let mut driver = FakeDriver::new().with_output(
            "show interface",
            "\
Ethernet1/1 is up
admin state is up, Dedicated Interface
  MTU 9216 bytes, BW 10000000 Kbit , DLY 10 usec
Ethernet1/2 is down (Administratively down)
admin state is down, Dedicated Interface
  MTU 1500 bytes, BW 10000000 Kbit , DLY 10 usec
",
        );
        driver.open().await.unwrap();
        let parser = TextFsmParser::new();
        let mut extractor = Extractor::new(&mut driver, &parser, Platform::CiscoNxos);

        let interfaces = extractor.interfaces().await.unwrap();
        assert_eq!(interfaces.len(), 2);
        assert_eq!(interfaces[0].protocol_status, "up");
        assert_eq!(interfaces[1].interface, "Ethernet1/2");
        assert_eq!(interfaces[1].protocol_status, "down");
        assert_eq!(interfaces[1].mtu, "1500");
    }
}
