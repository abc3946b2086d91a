//! Device inventory.
//!
//! The inventory is a JSON array of credential objects:
//!
//! ```json
//! [
//!   {
//!     "hostname": "core-sw1",
//!     "ip": "10.0.0.1",
//!     "device_type": "cisco_nxos",
//!     "username": "admin",
//!     "password": "secret"
//!   }
//! ]
//! ```
//!
//! The password is also sent as the enable secret.

use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{InventoryError, Result};
use crate::platform::Platform;

fn default_port() -> u16 {
    22
}

/// Login details for one device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCredential {
    pub hostname: String,
    pub ip: String,
    /// Netmiko-style type, e.g. `cisco_ios` or `cisco_nxos`.
    pub device_type: String,
    pub username: String,
    pub password: SecretString,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl DeviceCredential {
    pub fn new(
        hostname: impl Into<String>,
        ip: impl Into<String>,
        device_type: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            ip: ip.into(),
            device_type: device_type.into(),
            username: username.into(),
            password: password.into(),
            port: default_port(),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform::from_device_type(&self.device_type)
    }
}

/// Parse an inventory document.
pub fn from_json(text: &str) -> Result<Vec<DeviceCredential>> {
    Ok(serde_json::from_str(text).map_err(InventoryError::from)?)
}

/// Read an inventory file.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<DeviceCredential>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| InventoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_from_json_defaults_port() {
        let devices = from_json(
            r#"[{"hostname":"sw1","ip":"10.0.0.1","device_type":"cisco_ios",
                 "username":"admin","password":"pw"},
                {"hostname":"nx1","ip":"10.0.0.2","device_type":"cisco_nxos",
                 "username":"admin","password":"pw","port":2222}]"#,
        )
        .unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].port, 22);
        assert_eq!(devices[0].password.expose_secret(), "pw");
        assert_eq!(devices[0].platform(), Platform::CiscoIos);
        assert_eq!(devices[1].port, 2222);
        assert_eq!(devices[1].platform(), Platform::CiscoNxos);
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let device = DeviceCredential::new("sw1", "10.0.0.1", "cisco_ios", "admin", "hunter2");
        assert!(!format!("{device:?}").contains("hunter2"));
    }

    #[test]
    fn test_load_missing_field_is_format_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"hostname":"sw1"}}]"#).unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, crate::Error::Inventory(InventoryError::Format(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/devices.json").unwrap_err();
        assert!(matches!(err, crate::Error::Inventory(InventoryError::Read { .. })));
    }
}
