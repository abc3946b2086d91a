//! Builder for creating device drivers.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use super::generic::GenericDriver;
use crate::error::{DriverError, Result};
use crate::inventory::DeviceCredential;
use crate::platform::Platform;
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig};

/// Builder for constructing device drivers.
///
/// # Example
///
/// ```rust,no_run
/// use ferrispoll::{Driver, DriverBuilder, Platform};
///
/// # async fn example() -> Result<(), ferrispoll::Error> {
/// let mut driver = DriverBuilder::new("192.168.1.1")
///     .username("admin")
///     .password("secret")
///     .platform(Platform::CiscoIos)
///     .build()?;
///
/// driver.open().await?;
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: Option<AuthMethod>,
    enable_secret: Option<SecretString>,
    platform: Platform,
    timeout: Duration,
    terminal_size: Option<(u32, u32)>,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl DriverBuilder {
    /// Create a new driver builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: None,
            enable_secret: None,
            platform: Platform::CiscoIos,
            timeout: Duration::from_secs(30),
            terminal_size: None,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Builder preloaded from an inventory entry: its IP, port, username,
    /// password and platform.
    pub fn from_credential(device: &DeviceCredential) -> Self {
        Self::new(device.ip.clone())
            .port(device.port)
            .username(device.username.clone())
            .password(device.password.clone())
            .platform(device.platform())
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password authentication.
    pub fn password(mut self, password: impl Into<SecretString>) -> Self {
        self.auth = Some(AuthMethod::Password(password.into()));
        self
    }

    /// Set private key authentication.
    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        });
        self
    }

    /// Secret for `enable`. Defaults to the login password.
    pub fn enable_secret(mut self, secret: impl Into<SecretString>) -> Self {
        self.enable_secret = Some(secret.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the connection and read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the platform's terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_size = Some((width, height));
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Build the driver.
    ///
    /// This creates the driver but does not connect. Call `open()` on the
    /// returned driver to establish the connection.
    pub fn build(self) -> Result<GenericDriver> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "username is required".to_string(),
        })?;
        let auth = self.auth.ok_or_else(|| DriverError::InvalidConfig {
            message: "a password or private key is required".to_string(),
        })?;

        let platform = self.platform.definition()?;
        let (terminal_width, terminal_height) = self
            .terminal_size
            .unwrap_or((platform.terminal_width, platform.terminal_height));

        let ssh_config = SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth,
            enable_secret: self.enable_secret,
            timeout: self.timeout,
            terminal_width,
            terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        };

        GenericDriver::new(ssh_config, platform)
    }
}
