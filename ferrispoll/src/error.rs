//! Error types for ferrispoll.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for ferrispoll operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform/vendor errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Structured output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Inventory loading errors
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Result file and error log errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl Error {
    /// Whether the device rejected the supplied credentials.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::AuthenticationFailed { .. })
        )
    }

    /// Whether the device could not be reached or refused the SSH session
    /// before authentication.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Error::Transport(TransportError::AuthenticationFailed { .. }) => false,
            Error::Transport(_) => true,
            Error::Channel(ChannelError::PatternTimeout(_)) => false,
            Error::Channel(_) => true,
            _ => false,
        }
    }

    /// Whether only this command failed and the session is still usable.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            Error::Parse(_) | Error::Driver(DriverError::CommandFailed { .. })
        )
    }

    /// Whether the session is closed or no longer in step with the device
    /// (a read ran past its timeout), so no further command can be trusted.
    pub fn is_session_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Channel(_) | Error::Driver(DriverError::NotConnected)
        )
    }
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to open the TCP connection
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host is not present in known_hosts (strict verification)
    #[error("Host key for {host}:{port} is not known")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Channel layer errors (prompt matching, PTY operations).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Driver layer errors (command execution, privilege escalation).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// The device reported a failure for the command
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Failed to acquire target privilege level
    #[error("Failed to acquire privilege level '{target}'")]
    PrivilegeAcquisitionFailed { target: String },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Unknown privilege level detected
    #[error("Unknown privilege level from prompt: '{prompt}'")]
    UnknownPrivilege { prompt: String },

    /// No path found between privilege levels
    #[error("No path from privilege '{from}' to '{to}'")]
    NoPrivilegePath { from: String, to: String },
}

/// Platform/vendor definition errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Invalid platform definition
    #[error("Invalid platform definition: {message}")]
    InvalidDefinition { message: String },

    /// Invalid prompt regex
    #[error("Invalid prompt pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Structured output parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// No template is registered for the platform/command pair
    #[error("No template for '{command}' on {platform}")]
    NoTemplate { platform: String, command: String },

    /// The template failed to compile or to parse the output
    #[error("Template for '{command}' failed: {message}")]
    Template { command: String, message: String },
}

/// Inventory loading errors.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The inventory file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The inventory file is not a JSON list of devices
    #[error("Invalid inventory format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result file and error log errors.
#[derive(Error, Debug)]
pub enum OutputError {
    /// A file or directory could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// A hostname that cannot be used as a file name
    #[error("Hostname '{0}' is not a valid file name")]
    InvalidFileName(String),
}

/// Result type alias using ferrispoll's Error.
pub type Result<T> = std::result::Result<T, Error>;
