//! Platform definitions for the supported Cisco dialects.
//!
//! A [`Platform`] is derived from the inventory's `device_type` string and
//! selects both the CLI definition (prompts, privilege levels, failure
//! strings) and the command/template set used by the extractors.

mod definition;
mod privilege_level;
pub mod vendors;

use std::fmt;

use serde::Serialize;

pub use definition::PlatformDefinition;
pub use privilege_level::PrivilegeLevel;

use crate::error::PlatformError;

/// Supported device operating system families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    CiscoIos,
    CiscoNxos,
}

impl Platform {
    /// Map a netmiko-style device type (`cisco_ios`, `cisco_xe`,
    /// `cisco_nxos`, ...) onto a platform. Anything mentioning `nxos` is
    /// NX-OS; everything else is treated as IOS.
    pub fn from_device_type(device_type: &str) -> Self {
        if device_type.to_ascii_lowercase().contains("nxos") {
            Platform::CiscoNxos
        } else {
            Platform::CiscoIos
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::CiscoIos => "cisco_ios",
            Platform::CiscoNxos => "cisco_nxos",
        }
    }

    /// Build the CLI definition for this platform.
    pub fn definition(&self) -> Result<PlatformDefinition, PlatformError> {
        match self {
            Platform::CiscoIos => vendors::cisco_ios::platform(),
            Platform::CiscoNxos => vendors::cisco_nxos::platform(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
