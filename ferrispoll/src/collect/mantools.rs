//! Raw text dump of the troubleshooting command set.

use log::debug;

use crate::driver::Driver;
use crate::error::Result;
use crate::platform::Platform;

/// Commands run on every platform, in output order.
pub const COMMON_COMMANDS: &[&str] = &[
    "show inv",
    "show interface description",
    "show interface status",
    "show interface trunk",
    "show interface",
    "show ip arp",
    "show mac address-table",
    "show cdp neighbors",
    "show cdp neighbors detail",
    "show lldp neighbors",
    "show lldp neighbors detail",
];

/// Full command list for `platform`: the common set, then port-channel and
/// first-hop redundancy summaries in the platform's dialect.
pub fn commands(platform: Platform) -> Vec<&'static str> {
    let tail: [&str; 2] = match platform {
        Platform::CiscoNxos => ["show port-channel summary", "show hsrp brief"],
        Platform::CiscoIos => ["show etherchannel summary", "show standby brief"],
    };
    COMMON_COMMANDS.iter().copied().chain(tail).collect()
}

/// Run every command and concatenate the outputs, each followed by a
/// newline. Rejected commands keep the device's error text.
pub async fn collect<D: Driver>(driver: &mut D, platform: Platform) -> Result<String> {
    let mut combined = String::new();
    for command in commands(platform) {
        let response = driver.send_command(command).await?;
        if let Some(message) = &response.failure_message {
            debug!("'{}' rejected: {}", command, message);
        }
        combined.push_str(&response.result);
        combined.push('\n');
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeDriver;

    #[test]
    fn test_platform_tails() {
        let ios = commands(Platform::CiscoIos);
        assert_eq!(ios.len(), 13);
        assert_eq!(&ios[11..], ["show etherchannel summary", "show standby brief"]);

        let nxos = commands(Platform::CiscoNxos);
        assert_eq!(&nxos[11..], ["show port-channel summary", "show hsrp brief"]);
        assert_eq!(nxos[..11], ios[..11]);
    }

    #[tokio::test]
    async fn test_concatenates_in_order() {
        let mut driver = FakeDriver::new()
            .with_output("show inv", "NAME: \"Chassis\"")
            .with_output("show standby brief", "Vl10 100 P Active")
            .with_rejection("show lldp neighbors", "% LLDP is not enabled");
        driver.open().await.unwrap();

        let text = collect(&mut driver, Platform::CiscoIos).await.unwrap();
        assert!(text.starts_with("NAME: \"Chassis\"\n\n"));
        assert!(text.contains("% LLDP is not enabled\n"));
        assert!(text.ends_with("Vl10 100 P Active\n"));
        assert_eq!(text.matches('\n').count(), 13);
        assert_eq!(driver.sent, commands(Platform::CiscoIos));
    }

    #[tokio::test]
    async fn test_session_error_aborts_device() {
        let mut driver = FakeDriver::new().with_broken("show interface");
        driver.open().await.unwrap();
        assert!(collect(&mut driver, Platform::CiscoNxos).await.is_err());
    }
}
