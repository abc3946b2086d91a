//! `(platform, command)` to TextFSM template table.

use crate::platform::Platform;

/// A template registered for one platform and command.
#[derive(Debug)]
pub struct TemplateEntry {
    pub platform: Platform,
    pub command: &'static str,
    pub source: &'static str,
}

impl TemplateEntry {
    /// Whether this entry parses `command`.
    ///
    /// VRF-scoped forms (`show ip route vrf RED`) reuse the template of the
    /// base command since the row format is the same.
    pub fn handles(&self, platform: Platform, command: &str) -> bool {
        if platform != self.platform {
            return false;
        }
        let command = command.trim();
        command == self.command
            || command
                .strip_prefix(self.command)
                .is_some_and(|rest| rest.starts_with(" vrf "))
    }

    /// Value names in declaration order, lowercased.
    pub fn value_names(&self) -> Vec<String> {
        self.source
            .lines()
            .filter_map(|line| {
                let mut tokens = line.split_whitespace();
                if tokens.next() != Some("Value") {
                    return None;
                }
                let first = tokens.next()?;
                let second = tokens.next()?;
                // `Value [Options] NAME (regex)`
                let name = if second.starts_with('(') { first } else { second };
                Some(name.to_ascii_lowercase())
            })
            .collect()
    }
}

macro_rules! template {
    ($platform:ident, $command:literal, $file:literal) => {
        TemplateEntry {
            platform: Platform::$platform,
            command: $command,
            source: include_str!(concat!("../../templates/", $file)),
        }
    };
}

pub static TEMPLATES: &[TemplateEntry] = &[
    template!(CiscoIos, "show version", "cisco_ios_show_version.textfsm"),
    template!(CiscoIos, "show interface", "cisco_ios_show_interfaces.textfsm"),
    template!(CiscoIos, "show mac address-table", "cisco_ios_show_mac_address_table.textfsm"),
    template!(CiscoIos, "show ip route", "cisco_ios_show_ip_route.textfsm"),
    template!(CiscoIos, "show vrf", "cisco_ios_show_vrf.textfsm"),
    template!(CiscoIos, "show ip arp", "cisco_ios_show_ip_arp.textfsm"),
    template!(CiscoNxos, "show version", "cisco_nxos_show_version.textfsm"),
    template!(CiscoNxos, "show interface", "cisco_nxos_show_interface.textfsm"),
    template!(CiscoNxos, "show mac address-table", "cisco_nxos_show_mac_address_table.textfsm"),
    template!(CiscoNxos, "show ip route", "cisco_nxos_show_ip_route.textfsm"),
    template!(CiscoNxos, "show ip arp", "cisco_nxos_show_ip_arp.textfsm"),
];

/// Template for `command` on `platform`.
pub fn lookup(platform: Platform, command: &str) -> Option<&'static TemplateEntry> {
    TEMPLATES.iter().find(|entry| entry.handles(platform, command))
}
